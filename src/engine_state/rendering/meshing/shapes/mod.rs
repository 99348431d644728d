//! Geometry of every voxel shape.
//!
//! Each [`ShapeType`] is described declaratively by a [`ShapeDescriptor`]: a list
//! of planar polygons inside the unit cell, wound counter-clockwise when seen from
//! outside. Polygons lying on a cell face carry the side they lie on so the mesher
//! can cull them against the neighbour on that side; slopes carry no side and are
//! always drawn.
//!
//! Geometry is authored in the shape's local frame; [`Rotation`] turns it about
//! the cell's vertical centre line.

use cgmath::{InnerSpace, Vector3};

use crate::engine_state::voxels::block::{
    block_side::BlockSide,
    shape::{Rotation, ShapeType},
};

mod corner;
mod cube;
mod wedge;

/// One planar polygon of a shape.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeFace {
    /// The local cell side this polygon lies on, if any.
    pub cull_side: Option<BlockSide>,
    /// Corners in the unit cell, counter-clockwise from outside.
    pub polygon: &'static [[f32; 3]],
}

impl ShapeFace {
    /// Corner positions after rotation, translated by `offset`.
    pub fn vertices(&self, rotation: Rotation, offset: Vector3<f32>) -> impl Iterator<Item = Vector3<f32>> + '_ {
        self.polygon.iter().map(move |corner| {
            let rotated = rotation.rotate_point((*corner).into());
            Vector3::new(rotated.x, rotated.y, rotated.z) + offset
        })
    }

    /// Outward unit normal after rotation.
    pub fn normal(&self, rotation: Rotation) -> Vector3<f32> {
        let corners: Vec<Vector3<f32>> = self.vertices(rotation, Vector3::new(0.0, 0.0, 0.0)).take(3).collect();
        (corners[1] - corners[0]).cross(corners[2] - corners[0]).normalize()
    }

    /// Fan triangulation, as indices into this polygon's corners.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> {
        (1..self.polygon.len().saturating_sub(1) as u32).map(|i| [0, i, i + 1])
    }

    /// The world side this face must be culled against under `rotation`.
    pub fn world_cull_side(&self, rotation: Rotation) -> Option<BlockSide> {
        self.cull_side.map(|side| rotation.rotate_side(side))
    }
}

/// The full geometry of one shape.
#[derive(Debug)]
pub struct ShapeDescriptor {
    /// The shape described.
    pub shape: ShapeType,
    /// Every polygon of the shape.
    pub faces: &'static [ShapeFace],
}

/// Descriptors indexed by `ShapeType` as a `usize`.
pub static SHAPE_DESCRIPTORS: [ShapeDescriptor; ShapeType::COUNT] = [
    ShapeDescriptor {
        shape: ShapeType::CUBE,
        faces: cube::FACES,
    },
    ShapeDescriptor {
        shape: ShapeType::WEDGE,
        faces: wedge::FACES,
    },
    ShapeDescriptor {
        shape: ShapeType::CORNER_IN,
        faces: corner::INNER_FACES,
    },
    ShapeDescriptor {
        shape: ShapeType::CORNER_OUT,
        faces: corner::OUTER_FACES,
    },
    ShapeDescriptor {
        shape: ShapeType::CORNER_OUT2,
        faces: corner::OUTER_FACES,
    },
];

impl ShapeDescriptor {
    /// The descriptor of `shape`.
    pub fn for_shape(shape: ShapeType) -> &'static ShapeDescriptor {
        &SHAPE_DESCRIPTORS[shape as usize]
    }

    /// The faces to draw given which world sides of the voxel are exposed.
    ///
    /// # Arguments
    /// * `exposed` - Exposure per world side, indexed by `BlockSide as usize`
    /// * `rotation` - Rotation of the voxel
    pub fn get_exposed_face_list(
        &self,
        exposed: &[bool; 6],
        rotation: Rotation,
    ) -> impl Iterator<Item = &'static ShapeFace> + '_ {
        let faces: &'static [ShapeFace] = self.faces;
        let exposed = *exposed;
        faces.iter().filter(move |face| match face.world_cull_side(rotation) {
            Some(side) => exposed[side as usize],
            None => true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROTATIONS: [Rotation; 4] = [Rotation::FRONT, Rotation::RIGHT, Rotation::BACK, Rotation::LEFT];

    fn side_normal(side: BlockSide) -> Vector3<f32> {
        let d = side.direction();
        Vector3::new(d.x as f32, d.y as f32, d.z as f32)
    }

    #[test]
    fn descriptors_are_indexed_by_shape() {
        for (index, descriptor) in SHAPE_DESCRIPTORS.iter().enumerate() {
            assert_eq!(descriptor.shape as usize, index);
        }
    }

    #[test]
    fn side_faces_point_out_of_their_side() {
        for descriptor in &SHAPE_DESCRIPTORS {
            for face in descriptor.faces {
                for rotation in ROTATIONS {
                    if let Some(side) = face.world_cull_side(rotation) {
                        let normal = face.normal(rotation);
                        assert!(
                            (normal - side_normal(side)).magnitude() < 1e-5,
                            "{:?} face {:?} under {:?} has normal {:?}",
                            descriptor.shape,
                            face.cull_side,
                            rotation,
                            normal
                        );
                        for corner in face.vertices(rotation, Vector3::new(0.0, 0.0, 0.0)) {
                            let on_plane = match side {
                                BlockSide::FRONT => corner.z == 1.0,
                                BlockSide::BACK => corner.z == 0.0,
                                BlockSide::TOP => corner.y == 1.0,
                                BlockSide::BOTTOM => corner.y == 0.0,
                                BlockSide::RIGHT => corner.x == 1.0,
                                BlockSide::LEFT => corner.x == 0.0,
                            };
                            assert!(on_plane);
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn slopes_face_up_and_away_from_the_solid_side() {
        let wedge = ShapeDescriptor::for_shape(ShapeType::WEDGE);
        let slope = wedge.faces.iter().find(|f| f.cull_side.is_none()).unwrap();
        let normal = slope.normal(Rotation::FRONT);
        assert!(normal.y > 0.0 && normal.z > 0.0 && normal.x.abs() < 1e-6);

        let rotated = slope.normal(Rotation::RIGHT);
        assert!(rotated.y > 0.0 && rotated.x > 0.0 && rotated.z.abs() < 1e-6);
    }

    #[test]
    fn fully_hidden_cube_has_no_faces() {
        let cube = ShapeDescriptor::for_shape(ShapeType::CUBE);
        assert_eq!(cube.get_exposed_face_list(&[false; 6], Rotation::FRONT).count(), 0);

        let mut exposed = [false; 6];
        exposed[BlockSide::TOP as usize] = true;
        let faces: Vec<_> = cube.get_exposed_face_list(&exposed, Rotation::LEFT).collect();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].cull_side, Some(BlockSide::TOP));
    }

    #[test]
    fn slopes_survive_full_occlusion() {
        let corner = ShapeDescriptor::for_shape(ShapeType::CORNER_OUT);
        assert_eq!(corner.get_exposed_face_list(&[false; 6], Rotation::BACK).count(), 2);
        let inner = ShapeDescriptor::for_shape(ShapeType::CORNER_IN);
        assert_eq!(inner.get_exposed_face_list(&[false; 6], Rotation::FRONT).count(), 1);
    }

    #[test]
    fn triangles_fan_from_the_first_corner() {
        let quad = ShapeDescriptor::for_shape(ShapeType::CUBE).faces[0];
        assert_eq!(quad.triangles().collect::<Vec<_>>(), vec![[0, 1, 2], [0, 2, 3]]);
    }
}
