#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel Terrain
//!
//! Procedural voxel terrain organised into 16x16x16 chunks and streamed around a
//! moving viewer.
//!
//! ## Key Modules
//!
//! * `engine_state` - The engine: configuration, world, biome model, streaming and meshing
//!
//! ## Architecture
//!
//! The engine follows a staged pipeline:
//! * Column height maps are sampled from layered noise and macro biomes
//! * Columns are sized from their neighbourhood and filled with chunks
//! * Chunk surfaces are smoothed into ramps and corners
//! * Chunks are meshed with exposed-face culling and handed to a mesh sink
//!
//! ## Usage
//!
//! ```no_run
//! fn main() -> Result<(), voxel_terrain::EngineError> {
//!     voxel_terrain::run()
//! }
//! ```

use cgmath::Point3;
use log::info;

pub mod engine_state;

pub use engine_state::config::EngineConfig;
pub use engine_state::error::EngineError;
pub use engine_state::rendering::{ChunkMesh, MeshSink, MeshStore};
pub use engine_state::streaming::RegionQuery;
pub use engine_state::voxels::block::block_type::BlockType;
pub use engine_state::EngineState;

/// Environment variable naming a JSON configuration file.
pub const CONFIG_ENV_VAR: &str = "TERRAIN_CONFIG";

/// Upper bound on ticks spent at one waypoint of the headless run.
const MAX_TICKS_PER_WAYPOINT: u64 = 1_000_000;

/// Column offsets, in chunks, the headless viewer walks through.
const VIEWER_PATH: [(i32, i32); 3] = [(0, 0), (1, 0), (1, 2)];

/// A viewer that stays wherever it was last placed.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedViewer {
    /// Origin of the chunk the viewer is in.
    pub chunk_origin: Point3<i32>,
}

impl RegionQuery for ScriptedViewer {
    fn viewer_chunk_origin(&self) -> Point3<i32> {
        self.chunk_origin
    }
}

/// Ticks `engine` until streaming around `viewer` has drained.
///
/// The viewer is only sampled every `viewer_poll_interval` ticks, so at least
/// that many ticks run before the engine may report idle.
///
/// # Returns
/// The number of ticks run.
pub fn stream_until_idle<S: MeshSink>(engine: &mut EngineState<S>, viewer: &dyn RegionQuery) -> u64 {
    let poll_interval = engine.config().viewer_poll_interval.max(1);
    let mut ticks = 0;
    while ticks < MAX_TICKS_PER_WAYPOINT {
        let busy = engine.tick(viewer);
        ticks += 1;
        if !busy && ticks > poll_interval {
            break;
        }
    }
    ticks
}

/// Runs the headless terrain driver.
///
/// Initialises logging, loads the configuration named by `TERRAIN_CONFIG` (or
/// the defaults), then walks a scripted viewer through a few columns, streaming
/// terrain at each stop and logging mesh statistics.
///
/// # Errors
/// Returns any configuration loading or validation error.
pub fn run() -> Result<(), EngineError> {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config = match std::env::var(CONFIG_ENV_VAR) {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            EngineConfig::load(path)?
        }
        Err(_) => EngineConfig::default(),
    };
    let mut engine = EngineState::new(config)?;

    for (index, (dx, dz)) in VIEWER_PATH.iter().enumerate() {
        let viewer = ScriptedViewer {
            chunk_origin: Point3::new(dx * 16, 0, dz * 16),
        };
        let ticks = stream_until_idle(&mut engine, &viewer);
        info!(
            "Waypoint {} {:?}: {} ticks, {} columns, {} chunks, {} meshes ({} vertices, {} triangles)",
            index,
            viewer.chunk_origin,
            ticks,
            engine.world.column_count(),
            engine.world.chunk_count(),
            engine.mesh_sink.len(),
            engine.mesh_sink.total_vertices(),
            engine.mesh_sink.total_triangles()
        );

        if index == 0 {
            let surface = engine
                .world
                .get_column_at(&viewer.chunk_origin)
                .map(|column| column.height_at(0, 0));
            if let Some(height) = surface {
                let target = Point3::new(viewer.chunk_origin.x, height, viewer.chunk_origin.z);
                let affected = engine.change_block(target, BlockType::AIR);
                info!("Dug out {:?}, {} chunk(s) redrawn", target, affected.len());
            }
        }
    }

    Ok(())
}
