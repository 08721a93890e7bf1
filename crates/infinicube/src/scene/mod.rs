//! Cubes, the store that owns them, and the per-frame render side

pub mod cube;
pub mod frame_driver;
pub mod render_node;
pub mod store;

pub use cube::{Cube, CubeId, CubeOptions, CubeSize, CubeUpdate};
pub use frame_driver::{FrameDriver, FrameItem, NodeKey};
pub use render_node::RenderNode;
pub use store::{lock_shared, CubeStore, SharedCubeStore, StoreConfig};
