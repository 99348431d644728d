//! Mesh buffers produced by the chunk mesher.
//!
//! # Architecture
//! - [`ChunkMesh`]: one chunk's positions, normals, colours and triangle indices
//! - [`crate::engine_state::rendering::Vertex`]: the interleaved upload format built from it

mod mesh;

pub use mesh::*;
