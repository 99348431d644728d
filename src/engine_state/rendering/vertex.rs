//! Vertex data structures for chunk meshes.
//!
//! This module defines the interleaved vertex format a mesh sink uploads and
//! provides utilities for viewing vertex data as raw bytes.

use cgmath::Vector3;

use crate::engine_state::voxels::block::Color;

/// A vertex of a chunk mesh.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes), relative to the chunk origin
/// - Normal: [f32; 3] (12 bytes)
/// - Color: [f32; 4] (16 bytes)
///
/// Total size: 40 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in chunk space
    pub position: [f32; 3],
    /// Unit face normal
    pub normal: [f32; 3],
    /// RGBA colour of the block
    pub color: [f32; 4],
}

impl Vertex {
    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - The position of the vertex relative to the chunk origin
    /// * `normal` - The normal of the face the vertex belongs to
    /// * `color` - The colour of the block the vertex belongs to
    pub fn new(position: Vector3<f32>, normal: Vector3<f32>, color: Color) -> Self {
        Vertex {
            position: position.into(),
            normal: normal.into(),
            color,
        }
    }

    /// Views a vertex slice as raw bytes, ready for upload.
    pub fn as_bytes(vertices: &[Vertex]) -> &[u8] {
        bytemuck::cast_slice(vertices)
    }
}
