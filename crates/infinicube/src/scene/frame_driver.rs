//! # Frame Driver
//!
//! Presentation-side loop body. Each tick walks the store in list order,
//! resolves every cube's theme, runs the animator against the cube's render
//! node and records the result in a reusable buffer.
//!
//! Nodes live in a [`SlotMap`] with a side index from cube id to key. A node
//! is mounted the first time its cube is seen, remounted when the cube's
//! position changes in the store, and dropped once the cube is gone.

use std::collections::HashMap;

use slotmap::{new_key_type, SlotMap};

use super::cube::CubeId;
use super::render_node::RenderNode;
use super::store::CubeStore;
use crate::animation::{Animator, FrameInput, TransformDelta};
use crate::theme::{ResolvedAttributes, ThemeResolver};

new_key_type! {
    /// Key of a mounted render node
    pub struct NodeKey;
}

#[derive(Debug, Clone, Copy)]
struct Mounted {
    node: RenderNode,
    last_frame: u64,
}

/// Output for one cube in one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameItem {
    /// Cube id
    pub id: CubeId,
    /// Resolved, renderer-safe attributes
    pub attributes: ResolvedAttributes,
    /// Changes applied this frame
    pub delta: TransformDelta,
    /// Node transform after applying `delta`
    pub node: RenderNode,
}

/// Drives resolution and animation for every cube once per frame
#[derive(Debug)]
pub struct FrameDriver {
    resolver: ThemeResolver,
    animator: Animator,
    nodes: SlotMap<NodeKey, Mounted>,
    index: HashMap<CubeId, NodeKey>,
    items: Vec<FrameItem>,
    frame: u64,
}

impl FrameDriver {
    /// Create a driver
    pub fn new(resolver: ThemeResolver, animator: Animator) -> Self {
        Self {
            resolver,
            animator,
            nodes: SlotMap::with_key(),
            index: HashMap::new(),
            items: Vec::new(),
            frame: 0,
        }
    }

    /// The resolver used each frame
    pub fn resolver(&self) -> &ThemeResolver {
        &self.resolver
    }

    /// The animator used each frame
    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    /// Run one frame at `elapsed` seconds
    pub fn tick(&mut self, store: &CubeStore, elapsed: f32) -> &[FrameItem] {
        self.frame += 1;
        self.items.clear();

        for cube in store.iter() {
            let key = match self.index.get(&cube.id) {
                Some(&key) => key,
                None => {
                    log::debug!("Mounting render node for {}", cube.id);
                    let key = self.nodes.insert(Mounted {
                        node: RenderNode::new(cube.position),
                        last_frame: 0,
                    });
                    self.index.insert(cube.id.clone(), key);
                    key
                }
            };
            let Some(mounted) = self.nodes.get_mut(key) else {
                continue;
            };
            if mounted.node.rest_position != cube.position {
                log::debug!("Cube {} moved, remounting its render node", cube.id);
                mounted.node = RenderNode::new(cube.position);
            }
            mounted.last_frame = self.frame;

            let is_selected = store.is_selected(&cube.id);
            let attributes = self.resolver.resolve_cube(cube, is_selected);
            let input = FrameInput {
                elapsed,
                rest_position: mounted.node.rest_position,
                current_scale: mounted.node.scale,
                is_selected,
            };
            let delta = self.animator.frame(&attributes.animation, &input);
            mounted.node.apply(&delta);

            self.items.push(FrameItem {
                id: cube.id.clone(),
                attributes,
                delta,
                node: mounted.node,
            });
        }

        self.prune();
        &self.items
    }

    fn prune(&mut self) {
        let frame = self.frame;
        let nodes = &mut self.nodes;
        self.index.retain(|id, key| {
            let live = nodes.get(*key).is_some_and(|m| m.last_frame == frame);
            if !live {
                log::debug!("Unmounting render node for {id}");
                nodes.remove(*key);
            }
            live
        });
    }

    /// Output of the most recent tick
    pub fn items(&self) -> &[FrameItem] {
        &self.items
    }

    /// The mounted node of a cube
    pub fn node(&self, id: &CubeId) -> Option<&RenderNode> {
        let key = self.index.get(id)?;
        self.nodes.get(*key).map(|m| &m.node)
    }

    /// Number of mounted nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of ticks run so far
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    /// Drop every node; the next tick remounts from the store
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.index.clear();
        self.items.clear();
    }
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(ThemeResolver::new(), Animator::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::scene::cube::{CubeOptions, CubeUpdate};
    use approx::assert_relative_eq;

    #[test]
    fn test_items_follow_list_order() {
        let mut store = CubeStore::new();
        let ids: Vec<_> = (0..3_u8)
            .map(|i| store.create(Vec3::new(f32::from(i), 0.0, 0.0), CubeOptions::new()))
            .collect();

        let mut driver = FrameDriver::default();
        let items = driver.tick(&store, 0.0);

        let order: Vec<_> = items.iter().map(|item| item.id.clone()).collect();
        assert_eq!(order, ids);
        assert_eq!(driver.node_count(), 3);
    }

    #[test]
    fn test_mounted_nodes_are_reused() {
        let mut store = CubeStore::new();
        let id = store.create(Vec3::zeros(), CubeOptions::new().theme("neon"));
        let mut driver = FrameDriver::default();

        driver.tick(&store, 0.0);
        let key = driver.index[&id];
        for step in 1..=10_u8 {
            driver.tick(&store, f32::from(step) * 0.016);
        }

        assert_eq!(driver.index[&id], key);
        assert_eq!(driver.node_count(), 1);
        assert_eq!(driver.index.len(), 1);
        assert_relative_eq!(driver.node(&id).unwrap().rotation.y, 0.11, epsilon = 1e-5);
    }

    #[test]
    fn test_deleted_cubes_are_unmounted() {
        let mut store = CubeStore::new();
        let a = store.create(Vec3::zeros(), CubeOptions::new());
        let b = store.create(Vec3::zeros(), CubeOptions::new());
        let mut driver = FrameDriver::default();
        driver.tick(&store, 0.0);

        store.delete(&a);
        driver.tick(&store, 0.016);

        assert_eq!(driver.node_count(), 1);
        assert!(driver.node(&a).is_none());
        assert!(driver.node(&b).is_some());

        store.clear();
        assert!(driver.tick(&store, 0.032).is_empty());
        assert_eq!(driver.node_count(), 0);
    }

    #[test]
    fn test_selection_eases_scale_across_frames() {
        let mut store = CubeStore::new();
        let id = store.create(Vec3::zeros(), CubeOptions::new().theme("metal"));
        store.select(&id);
        let mut driver = FrameDriver::default();

        driver.tick(&store, 0.0);
        assert_relative_eq!(driver.node(&id).unwrap().scale, 1.01, epsilon = 1e-6);
        driver.tick(&store, 0.016);
        assert_relative_eq!(driver.node(&id).unwrap().scale, 1.019, epsilon = 1e-6);

        store.select(&CubeId::new("nobody"));
        driver.tick(&store, 0.032);
        assert_relative_eq!(driver.node(&id).unwrap().scale, 1.0171, epsilon = 1e-5);
    }

    #[test]
    fn test_moved_cube_is_remounted() {
        let mut store = CubeStore::new();
        let id = store.create(Vec3::zeros(), CubeOptions::new().theme("neon"));
        let mut driver = FrameDriver::default();
        driver.tick(&store, 0.0);
        driver.tick(&store, 0.016);
        assert_relative_eq!(driver.node(&id).unwrap().rotation.y, 0.02, epsilon = 1e-6);

        store.update(&id, CubeUpdate::new().position(Vec3::new(0.0, 5.0, 0.0)));
        driver.tick(&store, 0.032);
        let node = driver.node(&id).unwrap();
        assert_eq!(node.rest_position, Vec3::new(0.0, 5.0, 0.0));
        assert_relative_eq!(node.rotation.y, 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_animation_never_writes_back() {
        let mut store = CubeStore::new();
        let id = store.create(Vec3::new(0.0, 2.0, 0.0), CubeOptions::new().theme("crystal"));
        let before = store.list();
        let mut driver = FrameDriver::default();
        for frame in 0..10_u8 {
            driver.tick(&store, f32::from(frame) * 0.1);
        }
        assert_eq!(store.list(), before);
        assert_ne!(driver.node(&id).unwrap().position.y, 2.0);
    }
}
