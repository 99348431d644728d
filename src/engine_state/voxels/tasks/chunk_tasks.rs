//! # Chunk Tasks
//!
//! Streaming stages that work on every chunk of a column's generate range:
//! creating the chunks, filling them with blocks and smoothing their surface.
//! Each task covers one column so the streaming budget counts grid cells.

use cgmath::Point3;

use crate::engine_state::{
    rendering::MeshSink,
    task_management::task::{Task, TaskResult, WorldView},
    voxels::{
        chunk::{chunk_creation::ChunkCreationIterator, Chunk, ChunkStatus},
        smoothing::ShapeAssignment,
        world::World,
    },
};

/// Creates the `CREATED` chunks of a sized column.
pub struct ChunkCreationTask {
    column_position: Point3<i32>,
}

impl ChunkCreationTask {
    /// Creates a chunk creation task for the column at `column_position`.
    pub fn new(column_position: Point3<i32>) -> Self {
        ChunkCreationTask {
            column_position: Point3::new(column_position.x, 0, column_position.z),
        }
    }
}

impl Task for ChunkCreationTask {
    fn process(&self, _view: WorldView<'_>) -> Box<dyn TaskResult> {
        Box::new(ChunkCreationTaskResult {
            column_position: self.column_position,
        })
    }

    fn name(&self) -> &'static str {
        "chunk creation"
    }
}

/// Applies chunk creation; there is nothing to precompute.
pub struct ChunkCreationTaskResult {
    column_position: Point3<i32>,
}

impl TaskResult for ChunkCreationTaskResult {
    /// # Panics
    /// Panics if the column is missing or has not been sized.
    fn handle_result(self: Box<Self>, world: &mut World, _mesh_sink: &mut dyn MeshSink) -> Vec<Box<dyn Task>> {
        world.create_column_chunks(self.column_position);
        Vec::new()
    }
}

/// Fills every `CREATED` chunk of a column from its height map.
pub struct BlockGenerationTask {
    column_position: Point3<i32>,
}

impl BlockGenerationTask {
    /// Creates a block generation task for the column at `column_position`.
    pub fn new(column_position: Point3<i32>) -> Self {
        BlockGenerationTask {
            column_position: Point3::new(column_position.x, 0, column_position.z),
        }
    }
}

impl Task for BlockGenerationTask {
    fn process(&self, view: WorldView<'_>) -> Box<dyn TaskResult> {
        let mut blocks = Vec::new();
        if let Some(column) = view.world.get_column_at(&self.column_position) {
            for origin in column.generate_chunk_origins() {
                let pending = view
                    .world
                    .get_chunk_at(&origin)
                    .is_some_and(|chunk| chunk.status == ChunkStatus::CREATED);
                if pending {
                    blocks.push((origin, Chunk::build_blocks(origin, column)));
                }
            }
        }
        Box::new(BlockGenerationTaskResult {
            column_position: self.column_position,
            blocks,
        })
    }

    fn name(&self) -> &'static str {
        "block generation"
    }
}

/// Block types built for each pending chunk of a column.
pub struct BlockGenerationTaskResult {
    column_position: Point3<i32>,
    blocks: Vec<(Point3<i32>, ChunkCreationIterator)>,
}

impl TaskResult for BlockGenerationTaskResult {
    fn handle_result(self: Box<Self>, world: &mut World, _mesh_sink: &mut dyn MeshSink) -> Vec<Box<dyn Task>> {
        for (origin, blocks) in self.blocks {
            if let Some(chunk) = world.get_chunk_at_mut(&origin) {
                chunk.install_blocks(blocks);
            }
        }
        world.refresh_column_status(self.column_position);
        Vec::new()
    }
}

/// Smooths the surface of every chunk of a column's generate range.
pub struct SmoothingTask {
    column_position: Point3<i32>,
}

impl SmoothingTask {
    /// Creates a smoothing task for the column at `column_position`.
    pub fn new(column_position: Point3<i32>) -> Self {
        SmoothingTask {
            column_position: Point3::new(column_position.x, 0, column_position.z),
        }
    }
}

impl Task for SmoothingTask {
    fn process(&self, view: WorldView<'_>) -> Box<dyn TaskResult> {
        let shapes = match view.world.get_column_at(&self.column_position) {
            Some(column) => column
                .generate_chunk_origins()
                .filter_map(|origin| {
                    view.world
                        .compute_chunk_shapes(origin)
                        .map(|assignments| (origin, assignments))
                })
                .collect(),
            None => Vec::new(),
        };
        Box::new(SmoothingTaskResult {
            column_position: self.column_position,
            shapes,
        })
    }

    fn name(&self) -> &'static str {
        "smoothing"
    }
}

/// Shapes computed for each chunk of a column.
pub struct SmoothingTaskResult {
    column_position: Point3<i32>,
    shapes: Vec<(Point3<i32>, Vec<ShapeAssignment>)>,
}

impl TaskResult for SmoothingTaskResult {
    fn handle_result(self: Box<Self>, world: &mut World, _mesh_sink: &mut dyn MeshSink) -> Vec<Box<dyn Task>> {
        for (origin, assignments) in &self.shapes {
            world.apply_chunk_shapes(*origin, assignments);
        }
        world.refresh_column_status(self.column_position);
        Vec::new()
    }
}
