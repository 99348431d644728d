//! # Surface Smoothing
//!
//! Replaces cubes along the terrain surface with ramps and corners. For every
//! `(x, z)` of a chunk, the voxel just below the surface and the surface voxel
//! itself are classified by which of their eight horizontal neighbours are
//! see-through; the resulting bitmask indexes [`SHAPE_LOOKUP`].
//!
//! ## Bitmask Layout
//!
//! | bit | neighbour            |
//! |-----|----------------------|
//! | 0   | right `(+X)`         |
//! | 1   | left `(-X)`          |
//! | 2   | front `(+Z)`         |
//! | 3   | back `(-Z)`          |
//! | 4   | front-right `(+X,+Z)`|
//! | 5   | front-left `(-X,+Z)` |
//! | 6   | back-right `(+X,-Z)` |
//! | 7   | back-left `(-X,-Z)`  |

use cgmath::Point3;
use log::trace;

use super::block::shape::{Rotation, ShapeType};
use super::chunk::{ChunkStatus, Composition, CHUNK_DIMENSION};
use super::world::World;

/// Horizontal `(dx, dz)` offset of each bitmask bit, in bit order.
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (-1, 1),
    (1, -1),
    (-1, -1),
];

const RIGHT_OPEN: u8 = 1 << 0;
const LEFT_OPEN: u8 = 1 << 1;
const FRONT_OPEN: u8 = 1 << 2;
const BACK_OPEN: u8 = 1 << 3;
const FRONT_RIGHT_OPEN: u8 = 1 << 4;
const FRONT_LEFT_OPEN: u8 = 1 << 5;
const BACK_RIGHT_OPEN: u8 = 1 << 6;
const BACK_LEFT_OPEN: u8 = 1 << 7;

const CARDINAL_MASK: u8 = RIGHT_OPEN | LEFT_OPEN | FRONT_OPEN | BACK_OPEN;

const FRONT_AND_RIGHT: u8 = FRONT_OPEN | RIGHT_OPEN;
const RIGHT_AND_BACK: u8 = RIGHT_OPEN | BACK_OPEN;
const BACK_AND_LEFT: u8 = BACK_OPEN | LEFT_OPEN;
const LEFT_AND_FRONT: u8 = LEFT_OPEN | FRONT_OPEN;

const fn shape_for_bitmask(mask: u8) -> (ShapeType, Rotation) {
    match mask & CARDINAL_MASK {
        FRONT_OPEN => (ShapeType::WEDGE, Rotation::FRONT),
        RIGHT_OPEN => (ShapeType::WEDGE, Rotation::RIGHT),
        BACK_OPEN => (ShapeType::WEDGE, Rotation::BACK),
        LEFT_OPEN => (ShapeType::WEDGE, Rotation::LEFT),
        FRONT_AND_RIGHT => (ShapeType::CORNER_OUT, Rotation::FRONT),
        RIGHT_AND_BACK => (ShapeType::CORNER_OUT, Rotation::RIGHT),
        BACK_AND_LEFT => (ShapeType::CORNER_OUT, Rotation::BACK),
        LEFT_AND_FRONT => (ShapeType::CORNER_OUT, Rotation::LEFT),
        0 => match mask {
            FRONT_RIGHT_OPEN => (ShapeType::CORNER_IN, Rotation::FRONT),
            BACK_RIGHT_OPEN => (ShapeType::CORNER_IN, Rotation::RIGHT),
            BACK_LEFT_OPEN => (ShapeType::CORNER_IN, Rotation::BACK),
            FRONT_LEFT_OPEN => (ShapeType::CORNER_IN, Rotation::LEFT),
            _ => (ShapeType::CUBE, Rotation::FRONT),
        },
        _ => (ShapeType::CUBE, Rotation::FRONT),
    }
}

const fn build_shape_lookup() -> [(ShapeType, Rotation); 256] {
    let mut table = [(ShapeType::CUBE, Rotation::FRONT); 256];
    let mut mask = 0;
    while mask < 256 {
        table[mask] = shape_for_bitmask(mask as u8);
        mask += 1;
    }
    table
}

/// Shape and rotation for every possible neighbour bitmask.
pub static SHAPE_LOOKUP: [(ShapeType, Rotation); 256] = build_shape_lookup();

/// A smoothing decision for one voxel, computed before it is written.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ShapeAssignment {
    /// Local coordinate of the voxel.
    pub local: Point3<i32>,
    /// The assigned shape.
    pub shape: ShapeType,
    /// The assigned rotation.
    pub rotation: Rotation,
    /// The bitmask the shape was derived from.
    pub bitmask: u8,
}

impl World {
    /// Computes surface shapes for a chunk without modifying it.
    ///
    /// Only `MIX` chunks that have not been smoothed yet produce assignments.
    ///
    /// # Arguments
    /// * `chunk_origin` - World-space origin of the chunk
    ///
    /// # Returns
    /// The assignments to apply, or `None` when the chunk needs no smoothing.
    ///
    /// # Panics
    /// Panics if the chunk exists but has not been generated.
    pub fn compute_chunk_shapes(&self, chunk_origin: Point3<i32>) -> Option<Vec<ShapeAssignment>> {
        let chunk = self.get_chunk_at(&chunk_origin)?;
        assert!(
            chunk.status >= ChunkStatus::GENERATED,
            "chunk {:?} smoothed before generation",
            chunk_origin
        );
        if chunk.composition != Composition::MIX || chunk.smoothed {
            return None;
        }
        let column = self.get_column_at(&Point3::new(chunk_origin.x, 0, chunk_origin.z))?;

        let mut assignments: Vec<ShapeAssignment> = Vec::new();
        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let height = column.height_at(x, z);
                let mut lower: Option<usize> = None;

                for global_y in [height - 1, height] {
                    let local = Point3::new(x, global_y - chunk_origin.y, z);
                    if !(0..CHUNK_DIMENSION).contains(&local.y)
                        || chunk.block_type_at(local).is_see_through()
                    {
                        lower = None;
                        continue;
                    }

                    let bitmask = self.compute_bitmask(local, chunk_origin);
                    let (mut shape, mut rotation) = SHAPE_LOOKUP[bitmask as usize];

                    // Lift an outer corner sitting under a ramp or corner by one voxel.
                    if let Some(lower_index) = lower {
                        let below = &mut assignments[lower_index];
                        if below.shape == ShapeType::CORNER_OUT
                            && matches!(shape, ShapeType::CORNER_OUT | ShapeType::WEDGE)
                        {
                            shape = ShapeType::CORNER_OUT2;
                            rotation = below.rotation;
                            below.shape = ShapeType::CUBE;
                            below.rotation = Rotation::FRONT;
                        }
                    }

                    assignments.push(ShapeAssignment {
                        local,
                        shape,
                        rotation,
                        bitmask,
                    });
                    lower = Some(assignments.len() - 1);
                }
            }
        }
        Some(assignments)
    }

    /// Writes previously computed shapes into a chunk and marks it smoothed.
    pub fn apply_chunk_shapes(&mut self, chunk_origin: Point3<i32>, assignments: &[ShapeAssignment]) {
        if let Some(chunk) = self.get_chunk_at_mut(&chunk_origin) {
            for assignment in assignments {
                chunk.set_shape(
                    assignment.local,
                    assignment.shape,
                    assignment.rotation,
                    assignment.bitmask,
                );
            }
            chunk.smoothed = true;
            trace!(
                "Smoothed chunk {:?} ({} surface voxels)",
                chunk_origin,
                assignments.len()
            );
        }
    }

    /// Runs the smoothing pass on one chunk.
    ///
    /// # Returns
    /// `true` if shapes were assigned by this call.
    pub fn smooth_chunk(&mut self, chunk_origin: Point3<i32>) -> bool {
        match self.compute_chunk_shapes(chunk_origin) {
            Some(assignments) => {
                self.apply_chunk_shapes(chunk_origin, &assignments);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::column::Column;

    #[test]
    fn lookup_is_total() {
        for mask in 0..=255u8 {
            let (shape, rotation) = SHAPE_LOOKUP[mask as usize];
            assert_ne!(shape, ShapeType::CORNER_OUT2, "mask {:#010b}", mask);
            if shape == ShapeType::CUBE {
                assert_eq!(rotation, Rotation::FRONT, "mask {:#010b}", mask);
            }
        }
    }

    #[test]
    fn single_cardinal_makes_wedges() {
        assert_eq!(SHAPE_LOOKUP[0b0000_0001], (ShapeType::WEDGE, Rotation::RIGHT));
        assert_eq!(SHAPE_LOOKUP[0b0000_0010], (ShapeType::WEDGE, Rotation::LEFT));
        assert_eq!(SHAPE_LOOKUP[0b0000_0100], (ShapeType::WEDGE, Rotation::FRONT));
        assert_eq!(SHAPE_LOOKUP[0b0000_1000], (ShapeType::WEDGE, Rotation::BACK));
        // Diagonals do not change a wedge.
        assert_eq!(SHAPE_LOOKUP[0b1111_0100], (ShapeType::WEDGE, Rotation::FRONT));
    }

    #[test]
    fn adjacent_cardinals_make_outer_corners() {
        assert_eq!(SHAPE_LOOKUP[0b0000_0101], (ShapeType::CORNER_OUT, Rotation::FRONT));
        assert_eq!(SHAPE_LOOKUP[0b0000_1001], (ShapeType::CORNER_OUT, Rotation::RIGHT));
        assert_eq!(SHAPE_LOOKUP[0b0000_1010], (ShapeType::CORNER_OUT, Rotation::BACK));
        assert_eq!(SHAPE_LOOKUP[0b0000_0110], (ShapeType::CORNER_OUT, Rotation::LEFT));
    }

    #[test]
    fn single_diagonal_makes_inner_corners() {
        assert_eq!(SHAPE_LOOKUP[0b0001_0000], (ShapeType::CORNER_IN, Rotation::FRONT));
        assert_eq!(SHAPE_LOOKUP[0b0100_0000], (ShapeType::CORNER_IN, Rotation::RIGHT));
        assert_eq!(SHAPE_LOOKUP[0b1000_0000], (ShapeType::CORNER_IN, Rotation::BACK));
        assert_eq!(SHAPE_LOOKUP[0b0010_0000], (ShapeType::CORNER_IN, Rotation::LEFT));
    }

    #[test]
    fn everything_else_is_a_cube() {
        for mask in [0u8, 0b0000_0011, 0b0000_1100, 0b0000_0111, 0b0000_1111, 0b0011_0000, 0b1111_0000] {
            assert_eq!(SHAPE_LOOKUP[mask as usize], (ShapeType::CUBE, Rotation::FRONT));
        }
    }

    /// A plateau of height 8 over `x <= 5, z <= 5`, height 6 elsewhere.
    fn plateau_world() -> (World, Point3<i32>) {
        let origin = Point3::new(0, 0, 0);
        let mut world = World::new();
        world.insert_column(Column::with_height_fn(origin, BlockType::STONE, |x, z| {
            if x <= 5 && z <= 5 {
                8
            } else {
                6
            }
        }));
        world.add_chunk_at(origin);
        world.generate_chunk(origin);
        (world, origin)
    }

    #[test]
    fn plateau_edges_become_ramps() {
        let (mut world, origin) = plateau_world();
        assert!(world.smooth_chunk(origin));
        let chunk = world.get_chunk_at(&origin).unwrap();

        assert_eq!(chunk.shape_at(Point3::new(3, 8, 5)), ShapeType::WEDGE);
        assert_eq!(chunk.rotation_at(Point3::new(3, 8, 5)), Rotation::FRONT);
        assert_eq!(chunk.shape_at(Point3::new(5, 8, 3)), ShapeType::WEDGE);
        assert_eq!(chunk.rotation_at(Point3::new(5, 8, 3)), Rotation::RIGHT);
        assert_eq!(chunk.shape_at(Point3::new(2, 8, 2)), ShapeType::CUBE);
        assert_eq!(chunk.bitmask_at(Point3::new(2, 8, 2)), 0);
    }

    #[test]
    fn outer_corner_under_corner_is_lifted() {
        let (mut world, origin) = plateau_world();
        world.smooth_chunk(origin);
        let chunk = world.get_chunk_at(&origin).unwrap();

        assert_eq!(chunk.shape_at(Point3::new(5, 7, 5)), ShapeType::CUBE);
        assert_eq!(chunk.shape_at(Point3::new(5, 8, 5)), ShapeType::CORNER_OUT2);
        assert_eq!(chunk.rotation_at(Point3::new(5, 8, 5)), Rotation::FRONT);
        assert_ne!(chunk.bitmask_at(Point3::new(5, 7, 5)), 0);
    }

    #[test]
    fn smoothing_runs_once() {
        let (mut world, origin) = plateau_world();
        assert!(world.smooth_chunk(origin));
        assert!(!world.smooth_chunk(origin));
    }

    #[test]
    fn solid_chunks_are_not_smoothed() {
        let origin = Point3::new(0, 0, 0);
        let mut world = World::new();
        world.insert_column(Column::flat(origin, 100, BlockType::STONE));
        world.add_chunk_at(origin);
        world.generate_chunk(origin);
        assert!(!world.smooth_chunk(origin));
        assert!(!world.get_chunk_at(&origin).unwrap().smoothed);
    }
}
