//! Faces of the unit cube.

use super::ShapeFace;
use crate::engine_state::voxels::block::block_side::BlockSide;

pub(super) const TOP: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::TOP),
    polygon: &[[0.0, 1.0, 0.0], [0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0]],
};

pub(super) const BOTTOM: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::BOTTOM),
    polygon: &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]],
};

pub(super) const FRONT: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::FRONT),
    polygon: &[[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0]],
};

pub(super) const BACK: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::BACK),
    polygon: &[[1.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0]],
};

pub(super) const RIGHT: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::RIGHT),
    polygon: &[[1.0, 0.0, 1.0], [1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0]],
};

pub(super) const LEFT: ShapeFace = ShapeFace {
    cull_side: Some(BlockSide::LEFT),
    polygon: &[[0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0]],
};

/// All six faces, in `BlockSide` order.
pub(super) const FACES: &[ShapeFace] = &[FRONT, BACK, BOTTOM, TOP, LEFT, RIGHT];
