//! Rendering side of the terrain engine.
//!
//! The terrain core never talks to a graphics API. Finished chunk meshes are
//! handed to a [`MeshSink`], which an integration implements to upload them (and
//! build colliders, materials and so on). [`MeshStore`] is the in-crate sink: it
//! keeps the latest mesh of every chunk in memory and counts what it received.

use std::collections::HashMap;

use cgmath::Point3;
use log::trace;

pub mod meshing;
pub mod tasks;
mod vertex;

// Re-export commonly used types
pub use meshing::mesh::ChunkMesh;
pub use vertex::Vertex;

/// Receives chunk meshes as they are built.
pub trait MeshSink {
    /// Publishes (or replaces) the mesh of the chunk at `chunk_origin`.
    fn upload(&mut self, chunk_origin: Point3<i32>, mesh: &ChunkMesh);

    /// Withdraws whatever mesh the chunk at `chunk_origin` had.
    fn remove(&mut self, chunk_origin: Point3<i32>);
}

/// Keeps the current mesh of every chunk in memory.
#[derive(Debug, Default)]
pub struct MeshStore {
    meshes: HashMap<Point3<i32>, ChunkMesh>,
    upload_count: usize,
    remove_count: usize,
}

impl MeshStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        MeshStore::default()
    }

    /// The mesh currently held for a chunk.
    pub fn get(&self, chunk_origin: &Point3<i32>) -> Option<&ChunkMesh> {
        self.meshes.get(chunk_origin)
    }

    /// Number of chunks holding a mesh.
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether no chunk holds a mesh.
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Vertices over all held meshes.
    pub fn total_vertices(&self) -> usize {
        self.meshes.values().map(ChunkMesh::vertex_count).sum()
    }

    /// Triangles over all held meshes.
    pub fn total_triangles(&self) -> usize {
        self.meshes.values().map(ChunkMesh::triangle_count).sum()
    }

    /// Number of uploads received so far.
    pub fn upload_count(&self) -> usize {
        self.upload_count
    }

    /// Number of removals received so far.
    pub fn remove_count(&self) -> usize {
        self.remove_count
    }
}

impl MeshSink for MeshStore {
    fn upload(&mut self, chunk_origin: Point3<i32>, mesh: &ChunkMesh) {
        trace!(
            "Uploading mesh for {:?} ({} triangles)",
            chunk_origin,
            mesh.triangle_count()
        );
        self.meshes.insert(chunk_origin, mesh.clone());
        self.upload_count += 1;
    }

    fn remove(&mut self, chunk_origin: Point3<i32>) {
        self.meshes.remove(&chunk_origin);
        self.remove_count += 1;
    }
}
