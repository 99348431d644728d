//! # World Streaming
//!
//! Keeps the terrain around a moving viewer built. Whenever the viewer enters a
//! new chunk, the streamer restarts a six-stage pipeline over square regions of
//! columns centred on the viewer:
//!
//! | stage            | radius          | order          |
//! |------------------|-----------------|----------------|
//! | create columns   | `radius + 1`    | row by row     |
//! | size columns     | `radius`        | row by row     |
//! | create chunks    | `radius`        | row by row     |
//! | generate blocks  | `radius`        | row by row     |
//! | smooth           | `radius - 1`    | row by row     |
//! | draw             | `radius - 2`    | outward spiral |
//!
//! A stage is only published once the previous one has drained, so every task
//! finds the neighbourhood it depends on already built. Work runs in bounded
//! steps through the [`TaskManager`]; each task covers one column.

use cgmath::Point3;
use log::{debug, info};
use web_time::Instant;

pub mod region;

use region::{square_region, SpiralIterator};

use crate::engine_state::{
    rendering::{tasks::chunk_draw_task::ChunkDrawTask, MeshSink},
    task_management::{task::Task, TaskManager},
    voxels::{
        biome::BiomeModel,
        column::floor_to_chunk,
        tasks::{
            chunk_tasks::{BlockGenerationTask, ChunkCreationTask, SmoothingTask},
            column_tasks::{ColumnCreationTask, ColumnSizingTask},
        },
        world::World,
    },
};

/// Supplies the viewer position to the streamer.
pub trait RegionQuery {
    /// Origin of the chunk the viewer is in.
    fn viewer_chunk_origin(&self) -> Point3<i32>;
}

/// One stage of the streaming pipeline.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StreamStage {
    /// Sample column height maps.
    CREATE_COLUMNS,
    /// Compute column chunk ranges.
    SIZE_COLUMNS,
    /// Create the chunks of each column.
    CREATE_CHUNKS,
    /// Fill chunks with blocks.
    GENERATE_BLOCKS,
    /// Smooth chunk surfaces.
    SMOOTH_BLOCKS,
    /// Mesh chunks.
    DRAW_CHUNKS,
}

impl StreamStage {
    /// The first stage of the pipeline.
    pub const FIRST: StreamStage = StreamStage::CREATE_COLUMNS;

    /// The stage that follows this one, if any.
    pub fn next(self) -> Option<StreamStage> {
        match self {
            StreamStage::CREATE_COLUMNS => Some(StreamStage::SIZE_COLUMNS),
            StreamStage::SIZE_COLUMNS => Some(StreamStage::CREATE_CHUNKS),
            StreamStage::CREATE_CHUNKS => Some(StreamStage::GENERATE_BLOCKS),
            StreamStage::GENERATE_BLOCKS => Some(StreamStage::SMOOTH_BLOCKS),
            StreamStage::SMOOTH_BLOCKS => Some(StreamStage::DRAW_CHUNKS),
            StreamStage::DRAW_CHUNKS => None,
        }
    }

    /// Offset applied to the render radius for this stage.
    pub fn radius_offset(self) -> i32 {
        match self {
            StreamStage::CREATE_COLUMNS => 1,
            StreamStage::SIZE_COLUMNS | StreamStage::CREATE_CHUNKS | StreamStage::GENERATE_BLOCKS => 0,
            StreamStage::SMOOTH_BLOCKS => -1,
            StreamStage::DRAW_CHUNKS => -2,
        }
    }

    /// The task this stage runs for the column at `column_position`.
    pub fn task_for(self, column_position: Point3<i32>) -> Box<dyn Task> {
        match self {
            StreamStage::CREATE_COLUMNS => Box::new(ColumnCreationTask::new(column_position)),
            StreamStage::SIZE_COLUMNS => Box::new(ColumnSizingTask::new(column_position)),
            StreamStage::CREATE_CHUNKS => Box::new(ChunkCreationTask::new(column_position)),
            StreamStage::GENERATE_BLOCKS => Box::new(BlockGenerationTask::new(column_position)),
            StreamStage::SMOOTH_BLOCKS => Box::new(SmoothingTask::new(column_position)),
            StreamStage::DRAW_CHUNKS => Box::new(ChunkDrawTask::new(column_position)),
        }
    }

    /// Column origins this stage covers around `center`, in processing order.
    pub fn cells(self, center: Point3<i32>, render_radius: i32) -> Vec<Point3<i32>> {
        let radius = render_radius + self.radius_offset();
        match self {
            StreamStage::DRAW_CHUNKS => SpiralIterator::new(center, radius).collect(),
            _ => square_region(center, radius).collect(),
        }
    }

    /// Human readable stage name.
    pub fn name(self) -> &'static str {
        match self {
            StreamStage::CREATE_COLUMNS => "create columns",
            StreamStage::SIZE_COLUMNS => "size columns",
            StreamStage::CREATE_CHUNKS => "create chunks",
            StreamStage::GENERATE_BLOCKS => "generate blocks",
            StreamStage::SMOOTH_BLOCKS => "smooth blocks",
            StreamStage::DRAW_CHUNKS => "draw chunks",
        }
    }
}

/// Drives the streaming pipeline around the viewer.
pub struct WorldStreamer {
    task_manager: TaskManager,
    render_radius: i32,
    center: Option<Point3<i32>>,
    next_stage: Option<StreamStage>,
    active_stage: Option<(StreamStage, Instant)>,
}

impl WorldStreamer {
    /// Creates an idle streamer.
    ///
    /// # Panics
    /// Panics if `render_radius < 2`.
    pub fn new(render_radius: i32) -> Self {
        assert!(render_radius >= 2, "render radius {} is below 2", render_radius);
        WorldStreamer {
            task_manager: TaskManager::new(),
            render_radius,
            center: None,
            next_stage: None,
            active_stage: None,
        }
    }

    /// The column origin the pipeline is centred on.
    pub fn center(&self) -> Option<Point3<i32>> {
        self.center
    }

    /// The stage currently being processed.
    pub fn active_stage(&self) -> Option<StreamStage> {
        self.active_stage.map(|(stage, _)| stage)
    }

    /// Number of tasks waiting in the queue.
    pub fn pending_tasks(&self) -> usize {
        self.task_manager.len()
    }

    /// Whether any work is queued or any stage is still to be published.
    pub fn is_busy(&self) -> bool {
        !self.task_manager.is_idle() || self.next_stage.is_some()
    }

    /// Reports the viewer's position.
    ///
    /// When the viewer is in a different chunk column than before, pending
    /// work is dropped and the pipeline restarts from its first stage around
    /// the new column.
    ///
    /// # Returns
    /// `true` if the pipeline was restarted.
    pub fn update_viewer(&mut self, viewer_chunk_origin: Point3<i32>) -> bool {
        let center = Point3::new(
            floor_to_chunk(viewer_chunk_origin.x),
            0,
            floor_to_chunk(viewer_chunk_origin.z),
        );
        if self.center == Some(center) {
            return false;
        }
        info!("Viewer entered column {:?}, restarting streaming", center);
        self.task_manager.clear();
        self.center = Some(center);
        self.next_stage = Some(StreamStage::FIRST);
        self.active_stage = None;
        true
    }

    /// Runs one bounded step of the pipeline.
    ///
    /// # Arguments
    /// * `world` - The world to build
    /// * `biome_model` - Supplies terrain heights
    /// * `mesh_sink` - Receives finished meshes
    /// * `budget` - Maximum number of columns processed by this call
    ///
    /// # Returns
    /// `true` while work remains.
    pub fn stream_step(
        &mut self,
        world: &mut World,
        biome_model: &BiomeModel,
        mesh_sink: &mut dyn MeshSink,
        budget: usize,
    ) -> bool {
        let center = match self.center {
            Some(center) => center,
            None => return false,
        };

        if self.task_manager.is_idle() {
            self.finish_active_stage();
            self.publish_next_stage(center);
        }

        self.task_manager
            .process_queued_tasks(world, biome_model, mesh_sink, budget);

        if self.task_manager.is_idle() && self.next_stage.is_none() {
            self.finish_active_stage();
        }
        self.is_busy()
    }

    /// Publishes stages until one yields tasks or the pipeline is exhausted.
    fn publish_next_stage(&mut self, center: Point3<i32>) {
        while let Some(stage) = self.next_stage.take() {
            self.next_stage = stage.next();
            for cell in stage.cells(center, self.render_radius) {
                self.task_manager.publish_task(stage.task_for(cell));
            }
            if !self.task_manager.is_idle() {
                info!(
                    "Streaming stage '{}' started ({} columns)",
                    stage.name(),
                    self.task_manager.len()
                );
                self.active_stage = Some((stage, Instant::now()));
                return;
            }
        }
    }

    fn finish_active_stage(&mut self) {
        if let Some((stage, started)) = self.active_stage.take() {
            debug!("Streaming stage '{}' finished in {:?}", stage.name(), started.elapsed());
            if self.next_stage.is_none() {
                info!("Streaming around {:?} complete", self.center);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_run_in_order() {
        let mut stage = StreamStage::FIRST;
        let mut order = vec![stage];
        while let Some(next) = stage.next() {
            order.push(next);
            stage = next;
        }
        assert_eq!(
            order,
            vec![
                StreamStage::CREATE_COLUMNS,
                StreamStage::SIZE_COLUMNS,
                StreamStage::CREATE_CHUNKS,
                StreamStage::GENERATE_BLOCKS,
                StreamStage::SMOOTH_BLOCKS,
                StreamStage::DRAW_CHUNKS,
            ]
        );
    }

    #[test]
    fn stage_regions_shrink_toward_drawing() {
        let center = Point3::new(0, 0, 0);
        assert_eq!(StreamStage::CREATE_COLUMNS.cells(center, 3).len(), 81);
        assert_eq!(StreamStage::GENERATE_BLOCKS.cells(center, 3).len(), 49);
        assert_eq!(StreamStage::SMOOTH_BLOCKS.cells(center, 3).len(), 25);
        let draw = StreamStage::DRAW_CHUNKS.cells(center, 3);
        assert_eq!(draw.len(), 9);
        assert_eq!(draw[0], center);
    }

    #[test]
    fn viewer_updates_snap_and_flatten() {
        let mut streamer = WorldStreamer::new(2);
        assert!(!streamer.is_busy());
        assert!(streamer.update_viewer(Point3::new(17, 40, -3)));
        assert_eq!(streamer.center(), Some(Point3::new(16, 0, -16)));
        assert!(streamer.is_busy());
        assert!(!streamer.update_viewer(Point3::new(31, -200, -16)));
        assert!(streamer.update_viewer(Point3::new(32, 0, -16)));
    }

    #[test]
    #[should_panic]
    fn radius_below_two_is_rejected() {
        WorldStreamer::new(1);
    }
}
