//! Square regions of column origins around a centre.

use cgmath::Point3;

use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;

/// Hard ceiling on the number of cells a spiral yields.
pub const MAX_SPIRAL_CELLS: usize = 1 << 20;

/// Column origins of the square of `radius` cells around `center`, row by row.
///
/// A negative radius yields nothing.
pub fn square_region(center: Point3<i32>, radius: i32) -> impl Iterator<Item = Point3<i32>> {
    (-radius..=radius).flat_map(move |dz| {
        (-radius..=radius).map(move |dx| {
            Point3::new(
                center.x + dx * CHUNK_DIMENSION,
                0,
                center.z + dz * CHUNK_DIMENSION,
            )
        })
    })
}

/// Walks the column origins of a square region in an outward square spiral,
/// starting at the centre.
#[derive(Debug, Clone)]
pub struct SpiralIterator {
    center: Point3<i32>,
    offset: (i32, i32),
    step: (i32, i32),
    segment_length: usize,
    segment_passed: usize,
    remaining: usize,
}

impl SpiralIterator {
    /// Creates a spiral over the square of `radius` cells around `center`.
    pub fn new(center: Point3<i32>, radius: i32) -> Self {
        let remaining = if radius < 0 {
            0
        } else {
            let side = 2 * radius as usize + 1;
            side.saturating_mul(side).min(MAX_SPIRAL_CELLS)
        };
        SpiralIterator {
            center: Point3::new(center.x, 0, center.z),
            offset: (0, 0),
            step: (1, 0),
            segment_length: 1,
            segment_passed: 0,
            remaining,
        }
    }
}

impl Iterator for SpiralIterator {
    type Item = Point3<i32>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let cell = Point3::new(
            self.center.x + self.offset.0 * CHUNK_DIMENSION,
            0,
            self.center.z + self.offset.1 * CHUNK_DIMENSION,
        );

        self.offset.0 += self.step.0;
        self.offset.1 += self.step.1;
        self.segment_passed += 1;
        if self.segment_passed == self.segment_length {
            self.segment_passed = 0;
            self.step = (-self.step.1, self.step.0);
            // Segments grow after every second turn.
            if self.step.1 == 0 {
                self.segment_length += 1;
            }
        }
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}
