//! # Task Management System
//!
//! A single-threaded work queue that drives terrain streaming in bounded steps.
//!
//! ## Architecture Overview
//! - `TaskManager`: FIFO queue of pending tasks
//! - `Task`: a unit of work that reads the world (see [`task`])
//! - `TaskResult`: the result of a task, applied to the world
//!
//! ## Task Lifecycle
//! 1. Tasks are created and published via `TaskManager::publish_task()`
//! 2. `process_queued_tasks()` pops at most `budget` tasks per call
//! 3. Each task is processed against a read-only view, then its result is applied
//! 4. Results can return follow-up tasks, which join the back of the queue
//! 5. `clear()` drops every pending task; the world is never left mid-task
//!
//! ## Example Usage
//! ```ignore
//! let mut task_manager = TaskManager::new();
//! task_manager.publish_task(Box::new(ColumnCreationTask::new(origin)));
//!
//! // Once per tick:
//! task_manager.process_queued_tasks(&mut world, &biome_model, &mut mesh_store, 4);
//! ```

pub mod task;

use std::collections::VecDeque;

use log::trace;
use task::{Task, WorldView};

use crate::engine_state::rendering::MeshSink;
use crate::engine_state::voxels::{biome::BiomeModel, world::World};

/// Owns the queue of pending streaming tasks.
#[derive(Default)]
pub struct TaskManager {
    queued_tasks: VecDeque<Box<dyn Task>>,
}

impl TaskManager {
    /// Creates an empty task manager.
    pub fn new() -> Self {
        TaskManager {
            queued_tasks: VecDeque::new(),
        }
    }

    /// Queues a task behind every task already pending.
    pub fn publish_task(&mut self, task: Box<dyn Task>) {
        self.queued_tasks.push_back(task);
    }

    /// Runs up to `budget` queued tasks in FIFO order.
    ///
    /// # Arguments
    /// * `world` - The world every task reads and every result mutates
    /// * `biome_model` - Handed to tasks through the `WorldView`
    /// * `mesh_sink` - Receives meshes published by results
    /// * `budget` - Maximum number of tasks processed by this call
    ///
    /// # Returns
    /// The number of tasks processed.
    pub fn process_queued_tasks(
        &mut self,
        world: &mut World,
        biome_model: &BiomeModel,
        mesh_sink: &mut dyn MeshSink,
        budget: usize,
    ) -> usize {
        let mut processed = 0;
        while processed < budget {
            let task = match self.queued_tasks.pop_front() {
                Some(task) => task,
                None => break,
            };
            let result = task.process(WorldView {
                world: &*world,
                biome_model,
            });
            let follow_ups = result.handle_result(world, mesh_sink);
            trace!("Processed {} ({} follow-up tasks)", task.name(), follow_ups.len());
            self.queued_tasks.extend(follow_ups);
            processed += 1;
        }
        processed
    }

    /// Whether no task is pending.
    pub fn is_idle(&self) -> bool {
        self.queued_tasks.is_empty()
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.queued_tasks.len()
    }

    /// Whether no task is pending.
    pub fn is_empty(&self) -> bool {
        self.queued_tasks.is_empty()
    }

    /// Drops every pending task.
    pub fn clear(&mut self) {
        self.queued_tasks.clear();
    }
}
