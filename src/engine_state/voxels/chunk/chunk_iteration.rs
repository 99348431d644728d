//! # Chunk Iteration Module
//!
//! This module provides an iterator over all non-air voxels of a chunk, yielding
//! each voxel's local coordinate together with its stored data.

use cgmath::Point3;

use crate::engine_state::voxels::block::{block_type::BlockType, Block};

use super::{Chunk, CHUNK_DIMENSION, CHUNK_PLANE_SIZE, CHUNK_SIZE};

/// An iterator over all non-air blocks in a chunk, in storage order.
pub struct ChunkBlockIterator<'a> {
    /// Reference to the chunk being iterated over
    chunk_ref: &'a Chunk,
    /// Index of the next voxel to inspect
    current_offset: i32,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given chunk.
    ///
    /// # Arguments
    /// * `chunk_ref` - A reference to the chunk to iterate over
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        ChunkBlockIterator {
            chunk_ref,
            current_offset: 0,
        }
    }

    /// Gets the next non-air block in the chunk along with its local position.
    ///
    /// # Returns
    /// - `Some((position, block))` if another non-air block is found
    /// - `None` once the end of the chunk is reached
    pub fn get_next_block(&mut self) -> Option<(Point3<i32>, Block)> {
        while self.current_offset < CHUNK_SIZE {
            let offset = self.current_offset;
            self.current_offset += 1;

            let local = Point3::new(
                offset % CHUNK_DIMENSION,
                (offset / CHUNK_DIMENSION) % CHUNK_DIMENSION,
                offset / CHUNK_PLANE_SIZE,
            );
            if self.chunk_ref.block_type_at(local) != BlockType::AIR {
                return Some((local, self.chunk_ref.block_at(local)));
            }
        }
        None
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        self.get_next_block()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yields_only_non_air_in_storage_order() {
        let chunk = Chunk::from_fn(Point3::new(0, 0, 0), |p| {
            if p == Point3::new(1, 0, 0) || p == Point3::new(0, 1, 0) || p == Point3::new(15, 15, 15) {
                BlockType::DIRT
            } else {
                BlockType::AIR
            }
        });
        let positions: Vec<_> = chunk.blocks().map(|(p, _)| p).collect();
        assert_eq!(
            positions,
            vec![Point3::new(1, 0, 0), Point3::new(0, 1, 0), Point3::new(15, 15, 15)]
        );
    }
}
