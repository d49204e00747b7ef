//! Culling Demo
//!
//! Drives the culling pipeline headlessly:
//! - Three scenes: a terrain grid, an occlusion test field and a dense
//!   random cloud for performance
//! - Camera orbiting the origin, looking at it
//! - Automatic scene switching, like pressing 1/2/3 in an interactive build
//! - Periodic statistics line per scene
//!
//! Usage: `culling_demo [config.toml|config.ron] [frames]`

use cull_engine::foundation::logging;
use cull_engine::prelude::*;
use rand::prelude::*;
use std::time::Instant;
use thiserror::Error;

// Scene layout
const TERRAIN_GRID_SIZE: i32 = 20;
const TERRAIN_SPACING: f32 = 5.0;
const TEST_OBJECTS: usize = 500;
const PERFORMANCE_OBJECTS: usize = 10_000;
const RANDOM_SEED: u64 = 42;

// Camera orbit
const ORBIT_RADIUS: f32 = 30.0;
const ORBIT_HEIGHT: f32 = 10.0;
const ORBIT_SPEED: f32 = 0.01;

// Frame loop
const DEFAULT_FRAMES: u32 = 600;
const SCENE_SWITCH_INTERVAL: u32 = 200;
const STATS_INTERVAL: u32 = 60;

const SCENE_ORDER: [&str; 3] = ["main", "test", "performance"];

#[derive(Error, Debug)]
enum DemoError {
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Invalid frame count '{0}'")]
    InvalidFrameCount(String),
}

/// Ground plane of wide, flat tiles
fn create_terrain_grid(scene: &mut Scene, size: i32, spacing: f32) {
    for x in -size..=size {
        for z in -size..=size {
            scene.create_rect(
                Vec3::new(x as f32 * spacing, -2.0, z as f32 * spacing),
                Vec3::new(spacing * 0.9, 0.5, spacing * 0.9),
            );
        }
    }
}

/// Random cubes in a horizontal square, 0 to 15 units above ground
fn create_random_objects(scene: &mut Scene, rng: &mut StdRng, count: usize, range: f32) {
    for _ in 0..count {
        let position = Vec3::new(
            rng.gen_range(-range..range),
            rng.gen_range(0.0..15.0),
            rng.gen_range(-range..range),
        );
        scene.create_cube(position, rng.gen_range(0.5..2.5));
    }
}

struct CullingDemoApp {
    engine: Engine,
    device: HeadlessDevice,
    camera: Camera,
    frames: u32,
}

impl CullingDemoApp {
    fn new(config_path: Option<&str>, frames: u32) -> Result<Self, DemoError> {
        let mut engine = match config_path {
            Some(path) => Engine::from_config_file(path)?,
            None => Engine::new(CullingConfig::default())?,
        };

        engine.set_default_feature(Feature::FrustumCulling, true);
        engine.set_default_feature(Feature::BatchRendering, true);
        engine.set_default_feature(Feature::Octree, true);
        engine.set_lod_settings(LodSettings::new(30.0, 60.0, 100.0, 150.0));

        let mut rng = StdRng::seed_from_u64(RANDOM_SEED);

        create_terrain_grid(engine.create_scene("main"), TERRAIN_GRID_SIZE, TERRAIN_SPACING);

        let test = engine.create_scene("test");
        test.set_feature(Feature::OcclusionCulling, true);
        create_random_objects(test, &mut rng, TEST_OBJECTS, 40.0);

        create_random_objects(engine.create_scene("performance"), &mut rng, PERFORMANCE_OBJECTS, 25.0);

        engine.set_active_scene("main")?;

        // Anything left of x = -10 counts as hidden behind a wall
        let device = HeadlessDevice::new()
            .with_query_latency(1)
            .with_sample_fn(|bounds: &AABB| if bounds.max.x < -10.0 { 0 } else { 64 });

        let mut camera = Camera::perspective(
            Vec3::new(0.0, ORBIT_HEIGHT, ORBIT_RADIUS),
            engine.config().projection.fov_degrees,
            engine.config().projection.aspect,
            engine.config().projection.near,
            engine.config().projection.far,
        );
        camera.set_target(Vec3::zeros());

        for name in engine.scene_names() {
            if let Some(scene) = engine.scene(name) {
                log::info!(
                    "Scene '{}': {} entities, {} outside the octree, {} octree nodes",
                    name,
                    scene.entity_count(),
                    scene.unindexed_count(),
                    scene.octree().node_count()
                );
            }
        }

        Ok(Self {
            engine,
            device,
            camera,
            frames,
        })
    }

    fn run(mut self) -> Result<(), DemoError> {
        let start = Instant::now();

        for frame in 0..self.frames {
            if frame > 0 && frame % SCENE_SWITCH_INTERVAL == 0 {
                let next = SCENE_ORDER[(frame / SCENE_SWITCH_INTERVAL) as usize % SCENE_ORDER.len()];
                self.engine.set_active_scene(next)?;
            }

            self.camera
                .orbit(Vec3::zeros(), ORBIT_RADIUS, ORBIT_HEIGHT, frame as f32 * ORBIT_SPEED);

            self.device.clear_draws();
            let Some(stats) = self.engine.frame(&mut self.device, &self.camera) else {
                log::warn!("No active scene, skipping frame {}", frame);
                continue;
            };

            if frame % STATS_INTERVAL == 0 {
                let name = self.engine.active_scene_name().unwrap_or("-");
                log::info!(
                    "Frame: {:>4} | Scene: {:<12} | {} | Draws: {:>6}",
                    frame,
                    name,
                    stats,
                    self.device.stats().draw_calls
                );
            }
        }

        let elapsed = start.elapsed();
        log::info!(
            "Rendered {} frames in {:.2?} ({:.1} frames/s)",
            self.frames,
            elapsed,
            f64::from(self.frames) / elapsed.as_secs_f64().max(f64::EPSILON)
        );

        for name in SCENE_ORDER {
            if let Some(mut scene) = self.engine.delete_scene(name) {
                scene.release_queries(&mut self.device);
            }
        }
        log::info!("Live queries after shutdown: {}", self.device.live_queries());

        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init("info");

    println!("=== Culling Demo ===");
    println!("Scenes: main (terrain grid), test (occlusion), performance (10k cubes)");
    println!();

    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let frames = match args.next() {
        Some(text) => text
            .parse()
            .map_err(|_| DemoError::InvalidFrameCount(text.clone()))?,
        None => DEFAULT_FRAMES,
    };

    let app = CullingDemoApp::new(config_path.as_deref(), frames)?;
    app.run()?;
    Ok(())
}
