//! # Column Tasks
//!
//! The first two streaming stages: sampling a column's height map and sizing its
//! vertical chunk range once its neighbours exist.

use cgmath::Point3;
use log::trace;

use crate::engine_state::{
    rendering::MeshSink,
    task_management::task::{Task, TaskResult, WorldView},
    voxels::{
        column::{ChunkRange, Column},
        world::World,
    },
};

/// Samples the height map of one column.
pub struct ColumnCreationTask {
    /// Origin `(x, 0, z)` of the column.
    position: Point3<i32>,
}

impl ColumnCreationTask {
    /// Creates a column creation task.
    ///
    /// # Arguments
    /// * `position` - Any point on the column's chunk-aligned X/Z origin
    pub fn new(position: Point3<i32>) -> Self {
        ColumnCreationTask {
            position: Point3::new(position.x, 0, position.z),
        }
    }
}

impl Task for ColumnCreationTask {
    fn process(&self, view: WorldView<'_>) -> Box<dyn TaskResult> {
        let column = if view.world.get_column_at(&self.position).is_some() {
            None
        } else {
            Some(Column::generate(self.position, view.biome_model))
        };
        Box::new(ColumnCreationTaskResult { column })
    }

    fn name(&self) -> &'static str {
        "column creation"
    }
}

/// A freshly sampled column, if one was needed.
pub struct ColumnCreationTaskResult {
    column: Option<Column>,
}

impl TaskResult for ColumnCreationTaskResult {
    fn handle_result(self: Box<Self>, world: &mut World, _mesh_sink: &mut dyn MeshSink) -> Vec<Box<dyn Task>> {
        if let Some(column) = self.column {
            world.insert_column(column);
        }
        Vec::new()
    }
}

/// Computes the chunk range of one column from its 3x3 neighbourhood.
pub struct ColumnSizingTask {
    position: Point3<i32>,
}

impl ColumnSizingTask {
    /// Creates a column sizing task.
    pub fn new(position: Point3<i32>) -> Self {
        ColumnSizingTask {
            position: Point3::new(position.x, 0, position.z),
        }
    }
}

impl Task for ColumnSizingTask {
    /// # Panics
    /// Panics if the column or any of its eight neighbours does not exist.
    fn process(&self, view: WorldView<'_>) -> Box<dyn TaskResult> {
        let sized = view
            .world
            .get_column_at(&self.position)
            .map(|column| column.size_calculated)
            .unwrap_or_else(|| panic!("column {:?} sized before creation", self.position));
        let range = if sized {
            None
        } else {
            Some(view.world.column_extent(self.position))
        };
        Box::new(ColumnSizingTaskResult {
            position: self.position,
            range,
        })
    }

    fn name(&self) -> &'static str {
        "column sizing"
    }
}

/// The chunk range computed for a column.
pub struct ColumnSizingTaskResult {
    position: Point3<i32>,
    range: Option<ChunkRange>,
}

impl TaskResult for ColumnSizingTaskResult {
    fn handle_result(self: Box<Self>, world: &mut World, _mesh_sink: &mut dyn MeshSink) -> Vec<Box<dyn Task>> {
        if let Some(range) = self.range {
            world.set_column_range(self.position, range);
            trace!("Column {:?} sized to {:?}", self.position, range);
        }
        Vec::new()
    }
}
