//! Mesh generation for voxel chunks.
//!
//! This module converts the voxels of one chunk into a single chunk-wide
//! [`ChunkMesh`]. Every non-air voxel contributes the faces of its shape that
//! can be seen: faces lying on a cell side are culled against the neighbour on
//! that side, slopes are always emitted.
//!
//! # Architecture
//! - `ChunkMesher`: walks a chunk and emits geometry, consulting neighbouring chunks at boundaries
//! - `shapes/`: declarative geometry of every shape
//! - `mesh/`: the mesh buffers
//!
//! # Performance Considerations
//! - Chunks that are empty or enclosed by opaque solid chunks are skipped outright
//! - The deep interior of an opaque chunk is never inspected

use cgmath::{Point3, Vector3};
use log::trace;
use web_time::Instant;

pub mod mesh;
pub mod shapes;

use mesh::ChunkMesh;
use shapes::ShapeDescriptor;

use crate::engine_state::voxels::{
    block::block_side::BlockSide,
    chunk::{Chunk, Composition, CHUNK_DIMENSION},
    world::World,
};

/// Builds chunk meshes against a read-only world.
pub struct ChunkMesher<'a> {
    world: &'a World,
}

impl<'a> ChunkMesher<'a> {
    /// Creates a mesher reading from `world`.
    pub fn new(world: &'a World) -> Self {
        ChunkMesher { world }
    }

    /// Whether drawing `chunk_origin` can be skipped entirely.
    ///
    /// A chunk is skipped when it is empty, or when all six face-adjacent chunks
    /// exist and are solid without any see-through block.
    pub fn should_skip(&self, chunk_origin: Point3<i32>) -> bool {
        let chunk = match self.world.get_chunk_at(&chunk_origin) {
            Some(chunk) => chunk,
            None => return true,
        };
        if chunk.composition == Composition::EMPTY {
            return true;
        }
        BlockSide::all().iter().all(|side| {
            let neighbor_origin = chunk_origin + side.direction() * CHUNK_DIMENSION;
            self.world
                .get_chunk_at(&neighbor_origin)
                .is_some_and(|neighbor| neighbor.composition == Composition::SOLID && neighbor.opaque)
        })
    }

    /// Builds the mesh of one chunk.
    ///
    /// # Arguments
    /// * `chunk_origin` - World-space origin of the chunk
    ///
    /// # Returns
    /// `None` when the chunk is skipped, otherwise its mesh (possibly empty).
    pub fn mesh_chunk(&self, chunk_origin: Point3<i32>) -> Option<ChunkMesh> {
        if self.should_skip(chunk_origin) {
            return None;
        }
        let chunk = self.world.get_chunk_at(&chunk_origin)?;
        let start = Instant::now();
        let mut mesh = ChunkMesh::new();

        for (local, block) in chunk.blocks() {
            if chunk.opaque && Chunk::is_deep_interior(local) {
                continue;
            }

            let mut exposed = [false; 6];
            for side in BlockSide::all() {
                exposed[side as usize] = self.world.face_exposed(side, local, chunk_origin);
            }
            if !exposed.contains(&true) && block.bitmask == 0 {
                continue;
            }

            let offset = Vector3::new(local.x as f32, local.y as f32, local.z as f32);
            let color = block.block_type.color();
            for face in ShapeDescriptor::for_shape(block.shape).get_exposed_face_list(&exposed, block.rotation) {
                mesh.add_shape_face(face, block.rotation, offset, color);
            }
        }

        trace!(
            "Meshed chunk {:?}: {} vertices, {} triangles in {:?}",
            chunk_origin,
            mesh.vertex_count(),
            mesh.triangle_count(),
            start.elapsed()
        );
        Some(mesh)
    }
}
