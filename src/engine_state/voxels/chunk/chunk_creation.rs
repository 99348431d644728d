//! # Chunk Creation Module
//!
//! This module provides a builder for populating chunk storage one block at a time
//! while tracking the chunk's composition as it goes.
//!
//! Blocks must be pushed in storage order (X fastest, then Y, then Z). Once all
//! `CHUNK_SIZE` blocks have been pushed, [`ChunkCreationIterator::finish`] hands
//! back the block array and the composition derived from it.

use crate::engine_state::voxels::block::block_type::BlockType;

use super::{Composition, CHUNK_SIZE};

/// A builder for chunk block arrays.
///
/// Counting air and see-through blocks while pushing means composition never
/// needs a second pass over the data.
#[derive(Debug, Clone)]
pub struct ChunkCreationIterator {
    /// Block types pushed so far, in storage order
    block_types: Vec<BlockType>,
    /// Number of `AIR` blocks pushed
    air_count: usize,
    /// Number of see-through blocks pushed, air included
    see_through_count: usize,
}

impl Default for ChunkCreationIterator {
    fn default() -> Self {
        Self::new()
    }
}

impl ChunkCreationIterator {
    /// Creates an empty builder with room for a full chunk.
    pub fn new() -> Self {
        ChunkCreationIterator {
            block_types: Vec::with_capacity(CHUNK_SIZE as usize),
            air_count: 0,
            see_through_count: 0,
        }
    }

    /// Adds a block at the current position and advances the position.
    ///
    /// # Arguments
    /// * `block_type` - The type of block to add
    ///
    /// # Panics
    /// Panics in debug builds if more than `CHUNK_SIZE` blocks are pushed.
    pub fn push_block_type(&mut self, block_type: BlockType) {
        debug_assert!(
            self.block_types.len() < CHUNK_SIZE as usize,
            "chunk builder overflow"
        );
        if block_type == BlockType::AIR {
            self.air_count += 1;
        }
        if block_type.is_see_through() {
            self.see_through_count += 1;
        }
        self.block_types.push(block_type);
    }

    /// The composition of the blocks pushed so far.
    ///
    /// Only `AIR` counts as empty space; a chunk of water is `SOLID`.
    pub fn composition(&self) -> Composition {
        if self.air_count == self.block_types.len() {
            Composition::EMPTY
        } else if self.air_count == 0 {
            Composition::SOLID
        } else {
            Composition::MIX
        }
    }

    /// Whether no see-through block has been pushed.
    pub fn is_opaque(&self) -> bool {
        self.see_through_count == 0
    }

    /// Finalizes the builder.
    ///
    /// # Returns
    /// The block array in storage order, its composition and whether it is opaque.
    ///
    /// # Panics
    /// Panics if fewer than `CHUNK_SIZE` blocks were pushed.
    pub fn finish(self) -> (Vec<BlockType>, Composition, bool) {
        assert_eq!(
            self.block_types.len(),
            CHUNK_SIZE as usize,
            "chunk builder finished with {} of {} blocks",
            self.block_types.len(),
            CHUNK_SIZE
        );
        let composition = self.composition();
        let opaque = self.is_opaque();
        (self.block_types, composition, opaque)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_opaque_block_makes_a_mix() {
        let mut cci = ChunkCreationIterator::new();
        cci.push_block_type(BlockType::GRASS);
        for _ in 1..CHUNK_SIZE {
            cci.push_block_type(BlockType::AIR);
        }
        let (blocks, composition, opaque) = cci.finish();
        assert_eq!(blocks[0], BlockType::GRASS);
        assert_eq!(composition, Composition::MIX);
        assert!(!opaque);
    }

    #[test]
    fn water_without_air_is_solid_but_not_opaque() {
        let mut cci = ChunkCreationIterator::new();
        for _ in 0..CHUNK_SIZE {
            cci.push_block_type(BlockType::WATER);
        }
        let (_, composition, opaque) = cci.finish();
        assert_eq!(composition, Composition::SOLID);
        assert!(!opaque);
    }

    #[test]
    #[should_panic]
    fn finishing_early_panics() {
        let mut cci = ChunkCreationIterator::new();
        cci.push_block_type(BlockType::STONE);
        let _ = cci.finish();
    }
}
