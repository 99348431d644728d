//! Inner and outer corners.
//!
//! The outer corner is a pyramid whose apex sits at the top back-left edge and
//! which slopes down toward the front and the right. The inner corner is a cube
//! with its top front-right corner sliced off.

use super::{cube, ShapeFace};
use crate::engine_state::voxels::block::block_side::BlockSide;

const OUT_BACK: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::BACK),
    polygon: &[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
};

const OUT_LEFT: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::LEFT),
    polygon: &[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]],
};

const OUT_SLOPE_FRONT: ShapeFace = ShapeFace {
    cull_side: None,
    polygon: &[[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0]],
};

const OUT_SLOPE_RIGHT: ShapeFace = ShapeFace {
    cull_side: None,
    polygon: &[[0.0, 1.0, 0.0], [1.0, 0.0, 1.0], [1.0, 0.0, 0.0]],
};

pub(super) const OUTER_FACES: &[ShapeFace] =
    &[cube::BOTTOM, OUT_BACK, OUT_LEFT, OUT_SLOPE_FRONT, OUT_SLOPE_RIGHT];

const IN_FRONT: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::FRONT),
    polygon: &[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 1.0, 1.0]],
};

const IN_RIGHT: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::RIGHT),
    polygon: &[[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
};

const IN_TOP: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::TOP),
    polygon: &[[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
};

const IN_SLOPE: ShapeFace = ShapeFace {
    cull_side: None,
    polygon: &[[1.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
};

pub(super) const INNER_FACES: &[ShapeFace] = &[
    cube::BOTTOM,
    cube::BACK,
    cube::LEFT,
    IN_FRONT,
    IN_RIGHT,
    IN_TOP,
    IN_SLOPE,
];
