//! Mesh data structures for chunk rendering.
//!
//! A [`ChunkMesh`] holds one chunk's geometry as parallel buffers: positions,
//! per-vertex normals and colours, and a triangle index list.

use cgmath::Vector3;

use crate::engine_state::rendering::meshing::shapes::ShapeFace;
use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::{shape::Rotation, Color};

/// The geometry of one chunk, in chunk-local coordinates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChunkMesh {
    /// Vertex positions relative to the chunk origin
    pub vertices: Vec<Vector3<f32>>,
    /// One unit normal per vertex
    pub normals: Vec<Vector3<f32>>,
    /// Vertex indices, three per triangle
    pub triangles: Vec<u32>,
    /// One colour per vertex
    pub colors: Vec<Color>,
}

impl ChunkMesh {
    /// Creates a new, empty mesh.
    pub fn new() -> Self {
        ChunkMesh {
            vertices: Vec::new(),
            normals: Vec::new(),
            triangles: Vec::new(),
            colors: Vec::new(),
        }
    }

    /// Appends one shape polygon.
    ///
    /// # Arguments
    /// * `face` - The polygon to append
    /// * `rotation` - Rotation of the voxel the polygon belongs to
    /// * `offset` - Local position of the voxel
    /// * `color` - Colour of the voxel
    ///
    /// # Note
    /// Indices are offset by the number of vertices already in the mesh.
    pub fn add_shape_face(&mut self, face: &ShapeFace, rotation: Rotation, offset: Vector3<f32>, color: Color) {
        let base = self.vertices.len() as u32;
        let normal = face.normal(rotation);

        for vertex in face.vertices(rotation, offset) {
            self.vertices.push(vertex);
            self.normals.push(normal);
            self.colors.push(color);
        }
        for triangle in face.triangles() {
            self.triangles.extend(triangle.iter().map(|index| index + base));
        }
    }

    /// Whether the mesh holds no triangle.
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() / 3
    }

    /// Interleaves positions, normals and colours for upload.
    pub fn to_vertices(&self) -> Vec<Vertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .zip(&self.colors)
            .map(|((position, normal), color)| Vertex::new(*position, *normal, *color))
            .collect()
    }

    /// The index buffer as raw bytes.
    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.triangles)
    }
}
