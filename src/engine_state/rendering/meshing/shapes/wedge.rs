//! A ramp that is full height at the back and descends to the front.

use super::{cube, ShapeFace};
use crate::engine_state::voxels::block::block_side::BlockSide;

const SLOPE: ShapeFace = ShapeFace {
    cull_side: None,
    polygon: &[[0.0, 1.0, 0.0], [0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 0.0]],
};

const LEFT: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::LEFT),
    polygon: &[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]],
};

const RIGHT: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::RIGHT),
    polygon: &[[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0]],
};

pub(super) const FACES: &[ShapeFace] = &[cube::BACK, cube::BOTTOM, LEFT, RIGHT, SLOPE];
