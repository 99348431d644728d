//! # Voxel Task System
//!
//! Streaming tasks that build terrain data. Each task covers one column and
//! splits its work into a read-only `process` step and a `handle_result` step
//! that mutates the world.

pub mod chunk_tasks;
pub mod column_tasks;
