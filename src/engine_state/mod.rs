//! # Engine State Module
//!
//! The core module that owns the terrain and drives it forward.
//!
//! ## Key Components
//!
//! * `EngineState` - The main state container: world, biome model, streamer and mesh sink
//! * `config` - Engine configuration loaded from JSON
//! * `error` - The crate error type
//! * `rendering` - Chunk meshing and the mesh sink interface
//! * `streaming` - The staged pipeline that builds terrain around the viewer
//! * `task_management` - The bounded work queue the streamer runs on
//! * `voxels` - Blocks, biomes, columns, chunks, smoothing and the world registry
//!
//! ## Architecture
//!
//! `EngineState` is the single owner of all mutable terrain state. Each call to
//! [`EngineState::tick`] samples the viewer (every `viewer_poll_interval` ticks)
//! and runs one bounded streaming step, so the caller decides how much time per
//! frame terrain generation may take.

use cgmath::Point3;
use log::{debug, info};

use config::EngineConfig;
use error::EngineError;
use rendering::{MeshSink, MeshStore};
use streaming::{RegionQuery, WorldStreamer};
use voxels::{biome::BiomeModel, block::block_type::BlockType, world::World};

pub mod config;
pub mod error;
pub mod rendering;
pub mod streaming;
pub mod task_management;
pub mod voxels;

/// The main state container of the terrain engine.
///
/// Generic over the mesh sink so an integration can receive meshes directly;
/// the default keeps them in a [`MeshStore`].
pub struct EngineState<S: MeshSink = MeshStore> {
    /// All columns and chunks
    pub world: World,
    /// Terrain height source
    pub biome_model: BiomeModel,
    /// Streaming pipeline around the viewer
    pub streamer: WorldStreamer,
    /// Receives every built mesh
    pub mesh_sink: S,
    config: EngineConfig,
    tick_count: u64,
}

impl EngineState<MeshStore> {
    /// Creates an engine from a configuration, keeping meshes in a `MeshStore`.
    ///
    /// # Errors
    /// Returns `EngineError::InvalidConfig` if the configuration does not validate.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let biome_model = BiomeModel::from_config(&config);
        Ok(Self::with_parts(config, biome_model, MeshStore::new()))
    }
}

impl<S: MeshSink> EngineState<S> {
    /// Assembles an engine from already built parts.
    ///
    /// # Arguments
    /// * `config` - Engine configuration; it is not validated here
    /// * `biome_model` - The terrain height source
    /// * `mesh_sink` - Receives built meshes
    ///
    /// # Panics
    /// Panics if `config.render_radius < 2`.
    pub fn with_parts(config: EngineConfig, biome_model: BiomeModel, mesh_sink: S) -> Self {
        info!(
            "Engine created (seed {}, render radius {}, batch size {})",
            config.seed, config.render_radius, config.batch_size
        );
        EngineState {
            world: World::new(),
            biome_model,
            streamer: WorldStreamer::new(config.render_radius),
            mesh_sink,
            config,
            tick_count: 0,
        }
    }

    /// The configuration the engine was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Advances the engine by one tick.
    ///
    /// The viewer is sampled on the first tick and then every
    /// `viewer_poll_interval` ticks; streaming processes at most `batch_size`
    /// columns per tick.
    ///
    /// # Returns
    /// `true` while streaming work remains.
    pub fn tick(&mut self, region_query: &dyn RegionQuery) -> bool {
        let poll_interval = self.config.viewer_poll_interval.max(1);
        if self.tick_count % poll_interval == 0 {
            self.streamer.update_viewer(region_query.viewer_chunk_origin());
        }
        self.tick_count += 1;

        self.streamer.stream_step(
            &mut self.world,
            &self.biome_model,
            &mut self.mesh_sink,
            self.config.batch_size,
        )
    }

    /// Whether streaming work remains.
    pub fn is_busy(&self) -> bool {
        self.streamer.is_busy()
    }

    /// Replaces the block at a world position and refreshes affected chunks.
    ///
    /// # Returns
    /// Origins of the chunks that were updated; empty if the edit was ignored.
    pub fn change_block(&mut self, world_position: Point3<i32>, block_type: BlockType) -> Vec<Point3<i32>> {
        let previous = self.world.block_at(world_position).map(|block| block.block_type);
        let affected = self
            .world
            .change_block(world_position, block_type, &mut self.mesh_sink);
        debug!(
            "Edit at {:?} ({:?} -> {:?}) touched {} chunk(s)",
            world_position,
            previous,
            block_type,
            affected.len()
        );
        affected
    }
}
