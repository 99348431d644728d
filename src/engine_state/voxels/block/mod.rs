//! # Block Module
//!
//! This module provides the core block-related functionality for the terrain engine.
//! It includes block type definitions, block face handling, surface shape types and
//! the fixed per-type property table consulted by generation and meshing.

use block_type::BlockType;
use shape::{Rotation, ShapeType};

pub mod block_side;
pub mod block_type;
pub mod shape;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Linear RGBA colour, one channel per component in `0.0..=1.0`.
pub type Color = [f32; 4];

/// Fixed attributes looked up by block type index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockProperties {
    /// Whether neighbouring faces stay visible through this block.
    pub see_through: bool,
    /// Vertex colour used when meshing this block.
    pub color: Color,
}

/// Maps each block type to its properties.
///
/// The array is indexed by `BlockType` as a `usize`, so its order must match the
/// declaration order of [`BlockType`]. AIR is always first and always see-through.
pub static BLOCK_TYPE_PROPERTIES: [BlockProperties; BlockType::COUNT] = [
    // AIR
    BlockProperties {
        see_through: true,
        color: [0.0, 0.0, 0.0, 0.0],
    },
    // DIRT
    BlockProperties {
        see_through: false,
        color: [0.45, 0.32, 0.2, 1.0],
    },
    // STONE
    BlockProperties {
        see_through: false,
        color: [0.5, 0.5, 0.52, 1.0],
    },
    // GRASS
    BlockProperties {
        see_through: false,
        color: [0.3, 0.6, 0.22, 1.0],
    },
    // LIGHTGRASS
    BlockProperties {
        see_through: false,
        color: [0.52, 0.75, 0.35, 1.0],
    },
    // WATER
    BlockProperties {
        see_through: true,
        color: [0.2, 0.4, 0.85, 0.6],
    },
    // SAND
    BlockProperties {
        see_through: false,
        color: [0.86, 0.8, 0.58, 1.0],
    },
    // SNOW
    BlockProperties {
        see_through: false,
        color: [0.95, 0.96, 0.98, 1.0],
    },
];

/// A snapshot of everything a chunk stores for one voxel.
///
/// Chunks keep their data in parallel arrays; this is the value returned when a
/// caller wants all of it at once.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Block {
    /// The material of the voxel.
    pub block_type: BlockType,
    /// The surface shape assigned by smoothing.
    pub shape: ShapeType,
    /// Rotation of the shape about the vertical axis.
    pub rotation: Rotation,
    /// Horizontal neighbour bitmask recorded by smoothing.
    pub bitmask: u8,
}

impl Block {
    /// Creates a plain cube block of the specified type.
    pub fn new(block_type: BlockType) -> Self {
        Block {
            block_type,
            shape: ShapeType::CUBE,
            rotation: Rotation::FRONT,
            bitmask: 0,
        }
    }
}
