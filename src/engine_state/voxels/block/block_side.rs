//! # Block Side Module
//!
//! This module defines the different faces/sides of a voxel block and the
//! direction vectors used for face exposure tests.

use cgmath::Vector3;

/// Represents the six possible faces of a voxel block.
///
/// Each variant corresponds to a specific face and is assigned a unique integer value
/// so exposure data can be stored in a `[bool; 6]` indexed by side.
///
/// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The front face (facing positive Z)
    FRONT = 0,

    /// The back face (facing negative Z)
    BACK = 1,

    /// The bottom face (facing negative Y)
    BOTTOM = 2,

    /// The top face (facing positive Y)
    TOP = 3,

    /// The left face (facing negative X)
    LEFT = 4,

    /// The right face (facing positive X)
    RIGHT = 5,
}

impl BlockSide {
    /// Returns an array containing all six block faces in a consistent order.
    ///
    /// The order is: [FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT]
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::FRONT,
            BlockSide::BACK,
            BlockSide::BOTTOM,
            BlockSide::TOP,
            BlockSide::LEFT,
            BlockSide::RIGHT,
        ]
    }

    /// The unit offset from a voxel to its neighbour across this face.
    pub fn direction(self) -> Vector3<i32> {
        match self {
            BlockSide::FRONT => Vector3::new(0, 0, 1),
            BlockSide::BACK => Vector3::new(0, 0, -1),
            BlockSide::BOTTOM => Vector3::new(0, -1, 0),
            BlockSide::TOP => Vector3::new(0, 1, 0),
            BlockSide::LEFT => Vector3::new(-1, 0, 0),
            BlockSide::RIGHT => Vector3::new(1, 0, 0),
        }
    }

    /// One quarter turn about the vertical axis.
    ///
    /// FRONT goes to RIGHT, RIGHT to BACK, BACK to LEFT and LEFT to FRONT.
    /// TOP and BOTTOM are unaffected.
    pub fn quarter_turn(self) -> BlockSide {
        match self {
            BlockSide::FRONT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::LEFT,
            BlockSide::LEFT => BlockSide::FRONT,
            vertical => vertical,
        }
    }
}
