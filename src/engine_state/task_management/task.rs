//! # Task System Core Traits
//!
//! The building blocks of the streaming pipeline.
//!
//! ## Core Components
//! - `Task`: a unit of work that reads the world and computes a result
//! - `TaskResult`: the computed result, applied to the world afterwards
//!
//! ## Task Lifecycle
//! 1. A `Task` is queued via `TaskManager::publish_task()`
//! 2. Its `process()` method runs against a read-only [`WorldView`]
//! 3. The task returns a boxed `TaskResult`
//! 4. The result's `handle_result()` mutates the world and may publish meshes
//! 5. The result can return follow-up tasks, which are queued behind the current ones
//!
//! Splitting the read phase from the write phase keeps every chunk mutation inside
//! a single `handle_result` call, so the queue can be cleared between any two
//! tasks without leaving a chunk half-built.

use crate::engine_state::rendering::MeshSink;
use crate::engine_state::voxels::{biome::BiomeModel, world::World};

/// Read-only state handed to `Task::process`.
#[derive(Copy, Clone)]
pub struct WorldView<'a> {
    /// The world as it was when the task started.
    pub world: &'a World,
    /// The biome model used to sample new columns.
    pub biome_model: &'a BiomeModel,
}

/// A unit of streaming work.
///
/// Tasks own the coordinates they work on and nothing else; all world state is
/// borrowed through the `WorldView` for the duration of `process`.
pub trait Task {
    /// Computes the work of this task without mutating anything.
    ///
    /// # Arguments
    /// * `view` - Read access to the world and the biome model
    ///
    /// # Returns
    /// A boxed `TaskResult` to apply to the world.
    fn process(&self, view: WorldView<'_>) -> Box<dyn TaskResult>;

    /// Short name used in log messages.
    fn name(&self) -> &'static str;
}

/// The outcome of a `Task`, applied to the world.
pub trait TaskResult {
    /// Applies the result.
    ///
    /// # Arguments
    /// * `world` - The world to mutate
    /// * `mesh_sink` - Receives any mesh built or removed by the result
    ///
    /// # Returns
    /// Follow-up tasks to queue (can be empty).
    fn handle_result(self: Box<Self>, world: &mut World, mesh_sink: &mut dyn MeshSink) -> Vec<Box<dyn Task>>;
}
