//! Task that meshes the drawable chunks of one column.
//!
//! Meshes are built during `process` against the read-only world, then
//! published to the mesh sink and marked `DRAWN` when the result is handled.

use cgmath::Point3;

use crate::engine_state::{
    rendering::{meshing::ChunkMesher, ChunkMesh, MeshSink},
    task_management::task::{Task, TaskResult, WorldView},
    voxels::{chunk::ChunkStatus, world::World},
};

/// Draws every chunk in a column's draw range that has not been drawn yet.
pub struct ChunkDrawTask {
    /// Origin `(x, 0, z)` of the column
    column_position: Point3<i32>,
}

impl ChunkDrawTask {
    /// Creates a new chunk draw task.
    ///
    /// # Arguments
    /// * `column_position` - Any point on the column's chunk-aligned X/Z origin
    pub fn new(column_position: Point3<i32>) -> Self {
        ChunkDrawTask {
            column_position: Point3::new(column_position.x, 0, column_position.z),
        }
    }
}

impl Task for ChunkDrawTask {
    /// Builds meshes for the column's undrawn chunks.
    ///
    /// # Panics
    /// Panics if a chunk of the draw range is missing or has not been generated.
    fn process(&self, view: WorldView<'_>) -> Box<dyn TaskResult> {
        let mesher = ChunkMesher::new(view.world);
        let mut meshes = Vec::new();

        if let Some(column) = view.world.get_column_at(&self.column_position) {
            for origin in column.draw_chunk_origins() {
                let status = view
                    .world
                    .get_chunk_at(&origin)
                    .map(|chunk| chunk.status)
                    .unwrap_or_else(|| panic!("chunk {:?} drawn before creation", origin));
                assert!(
                    status >= ChunkStatus::GENERATED,
                    "chunk {:?} drawn before generation",
                    origin
                );
                if status != ChunkStatus::DRAWN {
                    meshes.push((origin, mesher.mesh_chunk(origin)));
                }
            }
        }

        Box::new(ChunkDrawTaskResult {
            column_position: self.column_position,
            meshes,
        })
    }

    fn name(&self) -> &'static str {
        "chunk draw"
    }
}

/// Meshes built for a column; `None` marks a skipped chunk.
pub struct ChunkDrawTaskResult {
    column_position: Point3<i32>,
    meshes: Vec<(Point3<i32>, Option<ChunkMesh>)>,
}

impl TaskResult for ChunkDrawTaskResult {
    fn handle_result(self: Box<Self>, world: &mut World, mesh_sink: &mut dyn MeshSink) -> Vec<Box<dyn Task>> {
        for (origin, mesh) in self.meshes {
            world.apply_mesh(origin, mesh, mesh_sink);
        }
        world.refresh_column_status(self.column_position);
        Vec::new()
    }
}
