//! # Noise Sources
//!
//! Two-dimensional noise fields consumed by the biome model. The default
//! [`LayeredNoise`] combines fractal Perlin noise for smooth scalar fields with a
//! seeded Voronoi lattice for macro-biome cells.

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};

/// Result of sampling cellular noise.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct EdgeData {
    /// Value in `[0, 1]` of the cell containing the sample.
    pub current_cell_value: f64,
    /// Value in `[0, 1]` of the nearest neighbouring cell.
    pub adjacent_cell_value: f64,
    /// World-space distance from the sample to the shared cell border.
    pub distance_to_edge: f64,
}

/// A deterministic 2D noise field.
pub trait NoiseSource {
    /// Samples the field at world `(x, z)`, returning a value in `[0, 1]`.
    fn sample_2d(&self, x: f64, z: f64) -> f64;

    /// Samples the field as cells, reporting the current and nearest cell.
    ///
    /// Sources without cells behave as one infinite cell valued by `sample_2d`.
    fn sample_2d_cellular(&self, x: f64, z: f64) -> EdgeData {
        let value = self.sample_2d(x, z);
        EdgeData {
            current_cell_value: value,
            adjacent_cell_value: value,
            distance_to_edge: f64::INFINITY,
        }
    }
}

/// Fractal Perlin noise with seeded Voronoi cells.
pub struct LayeredNoise {
    fbm: Fbm<Perlin>,
    seed: u32,
    frequency: f64,
}

impl LayeredNoise {
    /// Creates a noise field.
    ///
    /// # Arguments
    /// * `seed` - Seed for both the fractal and the cellular lattice
    /// * `frequency` - Features per block along each axis
    /// * `octaves` - Octaves summed by the fractal
    pub fn new(seed: u32, frequency: f64, octaves: usize) -> Self {
        let fbm = Fbm::<Perlin>::new(seed)
            .set_octaves(octaves.max(1))
            .set_frequency(frequency);
        LayeredNoise {
            fbm,
            seed,
            frequency,
        }
    }

    /// Position and value of the feature point of lattice cell `(i, j)`.
    fn feature_point(&self, i: i64, j: i64) -> ([f64; 2], f64) {
        let mut rng = fastrand::Rng::with_seed(cell_seed(self.seed, i, j));
        let px = i as f64 + rng.f64();
        let pz = j as f64 + rng.f64();
        ([px, pz], rng.f64())
    }
}

/// Mixes a seed and lattice coordinates into a per-cell seed.
fn cell_seed(seed: u32, i: i64, j: i64) -> u64 {
    let mut h = (seed as u64) ^ 0x9E37_79B9_7F4A_7C15;
    h = (h ^ i as u64).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    h = h.rotate_left(31);
    h = (h ^ j as u64).wrapping_mul(0x94D0_49BB_1331_11EB);
    h ^ (h >> 29)
}

impl NoiseSource for LayeredNoise {
    fn sample_2d(&self, x: f64, z: f64) -> f64 {
        let value = self.fbm.get([x, z]);
        ((value + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    fn sample_2d_cellular(&self, x: f64, z: f64) -> EdgeData {
        let p = [x * self.frequency, z * self.frequency];
        let cell_i = p[0].floor() as i64;
        let cell_j = p[1].floor() as i64;

        let mut features = Vec::with_capacity(9);
        for dj in -1..=1 {
            for di in -1..=1 {
                features.push(self.feature_point(cell_i + di, cell_j + dj));
            }
        }

        let distance_sq = |f: &[f64; 2]| (f[0] - p[0]).powi(2) + (f[1] - p[1]).powi(2);
        let nearest = features
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| distance_sq(&a.0).total_cmp(&distance_sq(&b.0)))
            .map(|(index, _)| index)
            .unwrap_or(0);
        let (near_point, near_value) = features[nearest];

        // Distance to the perpendicular bisector between the nearest feature and each other one.
        let mut edge_distance = f64::INFINITY;
        let mut adjacent_value = near_value;
        for (index, (point, value)) in features.iter().enumerate() {
            if index == nearest {
                continue;
            }
            let dx = point[0] - near_point[0];
            let dz = point[1] - near_point[1];
            let length = (dx * dx + dz * dz).sqrt();
            if length == 0.0 {
                continue;
            }
            let mid_x = (point[0] + near_point[0]) * 0.5;
            let mid_z = (point[1] + near_point[1]) * 0.5;
            let distance = ((mid_x - p[0]) * dx + (mid_z - p[1]) * dz) / length;
            if distance < edge_distance {
                edge_distance = distance;
                adjacent_value = *value;
            }
        }

        EdgeData {
            current_cell_value: near_value,
            adjacent_cell_value: adjacent_value,
            distance_to_edge: edge_distance.max(0.0) / self.frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_normalised_and_deterministic() {
        let a = LayeredNoise::new(42, 0.01, 4);
        let b = LayeredNoise::new(42, 0.01, 4);
        for i in 0..64 {
            let (x, z) = (i as f64 * 13.7, i as f64 * -7.3);
            let value = a.sample_2d(x, z);
            assert!((0.0..=1.0).contains(&value));
            assert_eq!(value, b.sample_2d(x, z));
        }
    }

    #[test]
    fn cells_are_stable_and_report_neighbours() {
        let noise = LayeredNoise::new(7, 0.05, 1);
        for i in 0..64 {
            let (x, z) = (i as f64 * 5.1, i as f64 * 3.3);
            let edge = noise.sample_2d_cellular(x, z);
            assert!((0.0..=1.0).contains(&edge.current_cell_value));
            assert!((0.0..=1.0).contains(&edge.adjacent_cell_value));
            assert!(edge.distance_to_edge >= 0.0);
            assert!(edge.distance_to_edge.is_finite());
            assert_eq!(edge, noise.sample_2d_cellular(x, z));
        }
    }

    #[test]
    fn plain_sources_are_a_single_cell() {
        struct Constant;
        impl NoiseSource for Constant {
            fn sample_2d(&self, _x: f64, _z: f64) -> f64 {
                0.25
            }
        }
        let edge = Constant.sample_2d_cellular(3.0, 4.0);
        assert_eq!(edge.current_cell_value, 0.25);
        assert_eq!(edge.adjacent_cell_value, 0.25);
        assert!(edge.distance_to_edge.is_infinite());
    }
}
