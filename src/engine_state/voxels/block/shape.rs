//! # Shape Module
//!
//! Surface shapes assigned to voxels by the smoothing pass, and the quarter-turn
//! rotations that orient them about the vertical axis.

use cgmath::Point3;

use super::block_side::BlockSide;

/// The geometric shape a voxel is drawn with.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ShapeType {
    /// A full unit cube.
    #[default]
    CUBE,
    /// A ramp rising away from its local front.
    WEDGE,
    /// A cube with one top corner cut away by a slope.
    CORNER_IN,
    /// A pyramid-like outer corner sloping toward its local front and right.
    CORNER_OUT,
    /// An outer corner lifted one voxel above the shelf it grows out of.
    CORNER_OUT2,
}

impl ShapeType {
    /// Number of shape types.
    pub const COUNT: usize = 5;
}

/// A quarter-turn rotation about the Y axis.
///
/// A rotation is named after the world direction that the shape's local front
/// (`+Z`) points to once rotated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// No rotation.
    #[default]
    FRONT = 0,
    /// Local front faces `+X`.
    RIGHT = 1,
    /// Local front faces `-Z`.
    BACK = 2,
    /// Local front faces `-X`.
    LEFT = 3,
}

impl Rotation {
    /// The number of quarter turns this rotation applies.
    #[inline]
    pub fn quarter_turns(self) -> usize {
        self as usize
    }

    /// Maps a side in the shape's local frame to the world side it ends up on.
    pub fn rotate_side(self, side: BlockSide) -> BlockSide {
        (0..self.quarter_turns()).fold(side, |side, _| side.quarter_turn())
    }

    /// Rotates a point inside the unit cell about the cell's vertical centre line.
    ///
    /// One quarter turn sends `(x, y, z)` to `(z, y, 1 - x)`, which carries the
    /// local front face onto the world right face.
    pub fn rotate_point(self, point: Point3<f32>) -> Point3<f32> {
        (0..self.quarter_turns()).fold(point, |p, _| Point3::new(p.z, p.y, 1.0 - p.x))
    }
}
