//! Streaming tasks for the rendering side.
//!
//! # Available Tasks
//! - `ChunkDrawTask`: meshes the drawable chunks of one column

pub mod chunk_draw_task;
