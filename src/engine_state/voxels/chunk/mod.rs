//! # Chunk Module
//!
//! This module provides the `Chunk` struct and related functionality for managing
//! 16x16x16 blocks of voxel data.
//!
//! ## Storage
//!
//! A chunk keeps four parallel arrays of `CHUNK_SIZE` entries (block type, shape,
//! rotation and smoothing bitmask). Entries are stored in row-major order with X
//! varying fastest, then Y, then Z, so the index of local voxel `(x, y, z)` is
//! `x + CHUNK_DIMENSION * y + CHUNK_PLANE_SIZE * z`.
//!
//! ## Lifecycle
//!
//! Chunks move forward through [`ChunkStatus`]: they are `CREATED` zero-filled,
//! become `GENERATED` once their column has filled them, and `DRAWN` after a mesh
//! has been built. Redrawing keeps a chunk `DRAWN`.

use cgmath::Point3;
use chunk_creation::ChunkCreationIterator;
use chunk_iteration::ChunkBlockIterator;

use super::block::block_type::BlockType;
use super::block::shape::{Rotation, ShapeType};
use super::block::Block;
use super::column::Column;

pub mod chunk_creation;
pub mod chunk_iteration;

/// The dimension (width, height, depth) of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = 16;
/// The number of blocks in a single 2D plane of a chunk (CHUNK_DIMENSION²).
pub const CHUNK_PLANE_SIZE: i32 = CHUNK_DIMENSION * CHUNK_DIMENSION;
/// The total number of blocks in a chunk (CHUNK_DIMENSION³).
pub const CHUNK_SIZE: i32 = CHUNK_PLANE_SIZE * CHUNK_DIMENSION;

/// Progress of a chunk (or of a whole column of chunks) through the pipeline.
///
/// The ordering is meaningful: a later variant is further along.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ChunkStatus {
    /// Not present in the world yet.
    #[default]
    NONE,
    /// Allocated and filled with air.
    CREATED,
    /// Blocks have been generated from the owning column.
    GENERATED,
    /// A mesh has been built and handed to the mesh sink.
    DRAWN,
}

/// Summary of what a chunk contains, used to skip work.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Composition {
    /// Every voxel is air.
    #[default]
    EMPTY,
    /// Some voxels are air and some are not.
    MIX,
    /// No voxel is air.
    SOLID,
}

/// Represents a 16x16x16 collection of voxel blocks in the world.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// World-space origin of the chunk, a multiple of `CHUNK_DIMENSION` on every axis.
    pub position: Point3<i32>,
    /// Where the chunk is in its lifecycle.
    pub status: ChunkStatus,
    /// What the chunk contains.
    pub composition: Composition,
    /// No voxel is see-through. Cleared by any see-through edit and never restored.
    pub opaque: bool,
    /// Whether the smoothing pass has already run on this chunk.
    pub smoothed: bool,
    block_types: Vec<BlockType>,
    block_shapes: Vec<ShapeType>,
    block_rotations: Vec<Rotation>,
    neighbor_bitmasks: Vec<u8>,
}

impl Chunk {
    /// Creates a new `CREATED` chunk filled with air cubes.
    ///
    /// # Arguments
    /// * `position` - The world-space origin of the chunk
    pub fn new(position: Point3<i32>) -> Self {
        debug_assert!(
            position.x % CHUNK_DIMENSION == 0
                && position.y % CHUNK_DIMENSION == 0
                && position.z % CHUNK_DIMENSION == 0,
            "chunk origin {:?} is not aligned",
            position
        );
        Chunk {
            position,
            status: ChunkStatus::CREATED,
            composition: Composition::EMPTY,
            opaque: false,
            smoothed: false,
            block_types: vec![BlockType::AIR; CHUNK_SIZE as usize],
            block_shapes: vec![ShapeType::CUBE; CHUNK_SIZE as usize],
            block_rotations: vec![Rotation::FRONT; CHUNK_SIZE as usize],
            neighbor_bitmasks: vec![0; CHUNK_SIZE as usize],
        }
    }

    /// Creates a `GENERATED` chunk from block types pushed in storage order.
    ///
    /// # Arguments
    /// * `position` - The world-space origin of the chunk
    /// * `fill` - Called once per voxel, in index order, with the local coordinate
    pub fn from_fn<F>(position: Point3<i32>, mut fill: F) -> Self
    where
        F: FnMut(Point3<i32>) -> BlockType,
    {
        let mut cci = ChunkCreationIterator::new();
        for z in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    cci.push_block_type(fill(Point3::new(x, y, z)));
                }
            }
        }
        let mut chunk = Chunk::new(position);
        chunk.install_blocks(cci);
        chunk
    }

    /// Converts a local coordinate into an index into the block arrays.
    ///
    /// # Panics
    /// Panics in debug builds when the coordinate lies outside the chunk.
    #[inline]
    pub fn index(local: Point3<i32>) -> usize {
        debug_assert!(Self::in_bounds(local), "local coordinate {:?} outside chunk", local);
        (local.x + CHUNK_DIMENSION * local.y + CHUNK_PLANE_SIZE * local.z) as usize
    }

    /// Whether a local coordinate addresses a voxel of this chunk.
    #[inline]
    pub fn in_bounds(local: Point3<i32>) -> bool {
        (0..CHUNK_DIMENSION).contains(&local.x)
            && (0..CHUNK_DIMENSION).contains(&local.y)
            && (0..CHUNK_DIMENSION).contains(&local.z)
    }

    /// Whether a voxel is at least two voxels away from every face of the chunk.
    ///
    /// Such voxels cannot be reached by any exposure test of an opaque chunk.
    #[inline]
    pub fn is_deep_interior(local: Point3<i32>) -> bool {
        let inner = 2..=CHUNK_DIMENSION - 3;
        inner.contains(&local.x) && inner.contains(&local.y) && inner.contains(&local.z)
    }

    /// The block type at a local coordinate.
    #[inline]
    pub fn block_type_at(&self, local: Point3<i32>) -> BlockType {
        self.block_types[Self::index(local)]
    }

    /// The shape assigned to a local coordinate.
    #[inline]
    pub fn shape_at(&self, local: Point3<i32>) -> ShapeType {
        self.block_shapes[Self::index(local)]
    }

    /// The rotation assigned to a local coordinate.
    #[inline]
    pub fn rotation_at(&self, local: Point3<i32>) -> Rotation {
        self.block_rotations[Self::index(local)]
    }

    /// The neighbour bitmask recorded for a local coordinate by smoothing.
    #[inline]
    pub fn bitmask_at(&self, local: Point3<i32>) -> u8 {
        self.neighbor_bitmasks[Self::index(local)]
    }

    /// Everything stored for one voxel.
    pub fn block_at(&self, local: Point3<i32>) -> Block {
        let index = Self::index(local);
        Block {
            block_type: self.block_types[index],
            shape: self.block_shapes[index],
            rotation: self.block_rotations[index],
            bitmask: self.neighbor_bitmasks[index],
        }
    }

    /// Whether a face pressed against this voxel could be seen.
    ///
    /// True for see-through blocks and for any shape that does not fill the cell.
    #[inline]
    pub fn exposes(&self, local: Point3<i32>) -> bool {
        let index = Self::index(local);
        self.block_types[index].is_see_through() || self.block_shapes[index] != ShapeType::CUBE
    }

    /// Records the smoothing result for one voxel.
    pub fn set_shape(&mut self, local: Point3<i32>, shape: ShapeType, rotation: Rotation, bitmask: u8) {
        let index = Self::index(local);
        self.block_shapes[index] = shape;
        self.block_rotations[index] = rotation;
        self.neighbor_bitmasks[index] = bitmask;
    }

    /// Iterates over all non-air voxels.
    pub fn blocks(&self) -> ChunkBlockIterator<'_> {
        ChunkBlockIterator::new(self)
    }

    /// Fills the chunk from its column's height map.
    ///
    /// Does nothing unless the chunk is `CREATED`, which makes generation
    /// idempotent.
    ///
    /// # Arguments
    /// * `column` - The column whose X/Z origin matches this chunk
    ///
    /// # Returns
    /// `true` if blocks were generated by this call.
    pub fn generate_blocks(&mut self, column: &Column) -> bool {
        if self.status != ChunkStatus::CREATED {
            return false;
        }
        let blocks = Self::build_blocks(self.position, column);
        self.install_blocks(blocks);
        true
    }

    /// Computes the block types of a chunk without touching any chunk.
    ///
    /// # Arguments
    /// * `position` - The world-space origin of the chunk to build
    /// * `column` - The column supplying heights and surface materials
    pub fn build_blocks(position: Point3<i32>, column: &Column) -> ChunkCreationIterator {
        debug_assert!(
            column.position.x == position.x && column.position.z == position.z,
            "column {:?} does not own chunk {:?}",
            column.position,
            position
        );
        let mut cci = ChunkCreationIterator::new();
        for z in 0..CHUNK_DIMENSION {
            for y in 0..CHUNK_DIMENSION {
                for x in 0..CHUNK_DIMENSION {
                    let cell = column.cell(x, z);
                    cci.push_block_type(cell.block_for(position.y + y));
                }
            }
        }
        cci
    }

    /// Moves generated blocks into a `CREATED` chunk and marks it `GENERATED`.
    ///
    /// A chunk that has already moved on is left untouched.
    pub fn install_blocks(&mut self, blocks: ChunkCreationIterator) {
        if self.status != ChunkStatus::CREATED {
            return;
        }
        let (block_types, composition, opaque) = blocks.finish();
        self.block_types = block_types;
        self.composition = composition;
        self.opaque = opaque;
        self.status = ChunkStatus::GENERATED;
    }

    /// Replaces a single block type, keeping the composition conservative.
    ///
    /// Opening a `SOLID` chunk demotes it to `MIX`, filling an `EMPTY` chunk
    /// demotes it to `MIX`. The voxel loses any smoothing shape it had.
    pub fn set_block_type(&mut self, local: Point3<i32>, block_type: BlockType) {
        let index = Self::index(local);
        self.block_types[index] = block_type;
        self.block_shapes[index] = ShapeType::CUBE;
        self.block_rotations[index] = Rotation::FRONT;
        self.neighbor_bitmasks[index] = 0;

        if block_type.is_see_through() {
            self.opaque = false;
        }
        match self.composition {
            Composition::SOLID if block_type == BlockType::AIR => {
                self.composition = Composition::MIX
            }
            Composition::EMPTY if block_type != BlockType::AIR => {
                self.composition = Composition::MIX
            }
            _ => {}
        }
    }
}
