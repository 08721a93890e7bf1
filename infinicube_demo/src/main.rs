//! Infinicube demo application
//!
//! Runs a headless cube scene for a fixed number of frames: loads a scene
//! file, spawns a cube per built-in preset, cycles the selection and logs what
//! a renderer would be handed each frame.

use std::error::Error;
use std::path::PathBuf;

use infinicube::prelude::*;
use infinicube::foundation::logging;
use infinicube::theme::BUILTIN_PRESETS;
use rand::Rng;

const DEFAULT_CONFIG: &str = "infinicube_demo/config/demo.toml";
const FRAMES: u64 = 240;
const FRAMES_PER_SELECTION: u64 = 60;

struct CubeDemo {
    store: CubeStore,
    driver: FrameDriver,
    clock: FrameClock,
}

impl CubeDemo {
    fn new(config: &InfinicubeConfig) -> Result<Self, ConfigError> {
        let mut store = config.build_store();

        store.observe(EventType::CubeCreated, |event| {
            if let StoreEvent::Created(cube) = event {
                log::info!("Created {} with color {}", cube.id, cube.color);
            }
        });
        store.observe(EventType::SelectionChanged, |event| {
            if let StoreEvent::SelectionChanged(selected) = event {
                match selected {
                    Some(cube) => log::info!("Selected {}", cube.id),
                    None => log::info!("Selection cleared"),
                }
            }
        });
        store.observe(EventType::CubeDeleted, |event| {
            if let StoreEvent::Deleted(id) = event {
                log::info!("Deleted {id}");
            }
        });

        Ok(Self {
            store,
            driver: FrameDriver::new(config.resolver()?, config.animator()),
            clock: FrameClock::fixed_step(1.0 / 60.0),
        })
    }

    /// Lay out one cube per built-in preset on a ring
    fn populate(&mut self) {
        let mut rng = rand::thread_rng();
        #[allow(clippy::cast_precision_loss)]
        let step = infinicube::foundation::math::constants::TAU / BUILTIN_PRESETS.len() as f32;

        for (i, preset) in BUILTIN_PRESETS.iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let angle = step * i as f32;
            let position = Vec3::new(5.0 * angle.cos(), 0.0, 5.0 * angle.sin());
            let size: f32 = rng.gen_range(0.75..1.25);
            self.store
                .create(position, CubeOptions::new().size(size).theme(*preset));
        }
    }

    fn run(&mut self, frames: u64) {
        let ids: Vec<CubeId> = self.store.iter().map(|cube| cube.id.clone()).collect();

        for frame in 0..frames {
            if frame % FRAMES_PER_SELECTION == 0 && !ids.is_empty() {
                #[allow(clippy::cast_possible_truncation)]
                let index = (frame / FRAMES_PER_SELECTION) as usize % ids.len();
                self.store.select(&ids[index]);
            }
            if frame == frames / 2 {
                if let Some(last) = ids.last() {
                    self.store.delete(last);
                }
            }

            let elapsed = self.clock.tick();
            let items = self.driver.tick(&self.store, elapsed);

            if frame % FRAMES_PER_SELECTION == FRAMES_PER_SELECTION - 1 {
                log::info!("Frame {} at {:.2}s: {} cubes", frame + 1, elapsed, items.len());
                for item in items {
                    log::debug!(
                        "  {} {} color {} opacity {:.2} scale {:.3} y {:.3} outline {}",
                        item.id,
                        item.attributes.material.kind.as_str(),
                        item.attributes.material.color,
                        item.attributes.material.opacity,
                        item.node.scale,
                        item.node.position.y,
                        item.attributes.outline.is_some(),
                    );
                }
            }
        }

        self.store.clear();
        self.driver.tick(&self.store, self.clock.elapsed());
        log::info!(
            "Done after {} frames, {} render nodes left",
            self.clock.frame_count(),
            self.driver.node_count()
        );
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG), PathBuf::from);
    let config = if path.exists() {
        InfinicubeConfig::load_from_file(&path)?
    } else {
        InfinicubeConfig::default()
    };

    logging::init_with_level(&config.logging.level);

    if path.exists() {
        log::info!("Loaded scene from {}", path.display());
    } else {
        log::warn!("{} not found, using default configuration", path.display());
    }
    config.validate()?;

    log::info!("Starting Infinicube demo");
    let mut demo = CubeDemo::new(&config)?;
    demo.populate();
    demo.run(FRAMES);

    Ok(())
}
