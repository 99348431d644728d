//! # Biome Model
//!
//! Turns world `(x, z)` positions into terrain heights and surface materials.
//!
//! ## Height Pipeline
//!
//! 1. Cellular noise picks the macro [`Biome`] of the sample and of its nearest
//!    neighbouring cell.
//! 2. Base noise picks the [`BiomeLayer`] inside the biome.
//! 3. The layer's detail noise and maximum height form the sample's topology,
//!    blended with the adjacent layer near layer borders.
//! 4. Near a macro-biome border the topology is blended with the neighbouring
//!    biome's topology.
//! 5. Point-of-interest sites pull the topology toward a flat middle value.
//! 6. The height is `floor(max_height * base * noise)`, clamped to the world ceiling.

use noise_source::{LayeredNoise, NoiseSource};

use super::block::block_type::BlockType;
use super::column::Column;
use crate::engine_state::config::{EngineConfig, PoiSite};

pub mod noise_source;

/// Value returned by [`edge_gradient`] when a sample lies outside the blend band.
pub const OUTSIDE_MARGIN: f64 = 2.0;

/// Seed offset separating the cellular field from the base field.
const CELLULAR_SEED_OFFSET: u32 = 0x5EED;
/// Seed offset applied per layer so no two layers share a field.
const LAYER_SEED_STRIDE: u32 = 101;

/// Distance of `value` from `border` as a fraction of `margin`.
///
/// # Returns
/// `0.0` at the border rising to `1.0` at the outer edge of the band, or
/// [`OUTSIDE_MARGIN`] when `value` lies more than `margin` away.
pub fn edge_gradient(value: f64, border: f64, margin: f64) -> f64 {
    let distance = (value - border).abs();
    if margin <= 0.0 || distance > margin {
        OUTSIDE_MARGIN
    } else {
        distance / margin
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// The quantities blended between layers and biomes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Topology {
    /// Base noise sample.
    pub base: f64,
    /// Detail noise sample.
    pub noise: f64,
    /// Height reached where both samples are 1.
    pub max_height: f64,
}

impl Topology {
    /// Interpolates every component toward `other` by `t`.
    pub fn lerp(self, other: Topology, t: f64) -> Topology {
        Topology {
            base: lerp(self.base, other.base, t),
            noise: lerp(self.noise, other.noise, t),
            max_height: lerp(self.max_height, other.max_height, t),
        }
    }
}

/// A layer of a biome, active over a band of base-noise values.
pub struct BiomeLayer {
    /// Display name.
    pub name: String,
    /// Inclusive lower bound of the band.
    pub min: f64,
    /// Exclusive upper bound of the band (inclusive for the top layer).
    pub max: f64,
    /// Height reached where both base and detail noise are 1.
    pub max_height: f64,
    /// Detail noise of the layer.
    pub noise: Box<dyn NoiseSource>,
    /// Block placed at the top of each column.
    pub surface_block: BlockType,
    /// Block placed below the surface band.
    pub subsurface_block: BlockType,
    /// Thickness of the surface band.
    pub surface_depth: i32,
}

/// A macro biome: layers ordered by ascending base-noise band.
pub struct Biome {
    /// Display name.
    pub name: String,
    /// The biome's layers. Never empty.
    pub layers: Vec<BiomeLayer>,
}

impl Biome {
    /// Index of the layer whose band contains `base`.
    ///
    /// Values outside every band fall back to the lowest layer.
    pub fn layer_index(&self, base: f64) -> usize {
        let last = self.layers.len().saturating_sub(1);
        self.layers
            .iter()
            .position(|layer| base >= layer.min && base < layer.max)
            .or_else(|| {
                self.layers
                    .last()
                    .filter(|layer| base >= layer.min && base <= layer.max)
                    .map(|_| last)
            })
            .unwrap_or(0)
    }
}

/// Samples terrain height for any world column.
pub struct BiomeModel {
    base_noise: Box<dyn NoiseSource>,
    cellular_noise: Box<dyn NoiseSource>,
    biomes: Vec<Biome>,
    layer_margin: f64,
    smooth_radius: f64,
    max_world_height: i32,
    poi_max_relief: i32,
    poi_sites: Vec<PoiSite>,
}

impl BiomeModel {
    /// Assembles a model from explicit noise sources.
    ///
    /// Scalar settings (margins, radii, height ceiling, points of interest) are
    /// read from `config`; its biome list is ignored in favour of `biomes`.
    ///
    /// # Panics
    /// Panics if `biomes` is empty or any biome has no layers.
    pub fn new(
        base_noise: Box<dyn NoiseSource>,
        cellular_noise: Box<dyn NoiseSource>,
        biomes: Vec<Biome>,
        config: &EngineConfig,
    ) -> Self {
        assert!(!biomes.is_empty(), "a biome model needs at least one biome");
        assert!(
            biomes.iter().all(|biome| !biome.layers.is_empty()),
            "every biome needs at least one layer"
        );
        BiomeModel {
            base_noise,
            cellular_noise,
            biomes,
            layer_margin: config.layer_margin,
            smooth_radius: config.smooth_radius,
            max_world_height: config.max_world_height,
            poi_max_relief: config.poi_max_relief,
            poi_sites: config.poi_sites.clone(),
        }
    }

    /// Builds the model described by a validated configuration.
    pub fn from_config(config: &EngineConfig) -> Self {
        let mut layer_seed = config.seed;
        let biomes = config
            .biomes
            .iter()
            .map(|biome| Biome {
                name: biome.name.clone(),
                layers: biome
                    .layers
                    .iter()
                    .map(|layer| {
                        layer_seed = layer_seed.wrapping_add(LAYER_SEED_STRIDE);
                        BiomeLayer {
                            name: layer.name.clone(),
                            min: layer.min,
                            max: layer.max,
                            max_height: layer.max_height,
                            noise: Box::new(LayeredNoise::new(layer_seed, layer.frequency, layer.octaves)),
                            surface_block: layer.surface_block,
                            subsurface_block: layer.subsurface_block,
                            surface_depth: layer.surface_depth,
                        }
                    })
                    .collect(),
            })
            .collect();

        BiomeModel::new(
            Box::new(LayeredNoise::new(config.seed, config.base_frequency, 4)),
            Box::new(LayeredNoise::new(
                config.seed.wrapping_add(CELLULAR_SEED_OFFSET),
                config.cellular_frequency,
                1,
            )),
            biomes,
            config,
        )
    }

    /// Largest height difference within a column that allows a point of interest.
    pub fn poi_max_relief(&self) -> i32 {
        self.poi_max_relief
    }

    /// The macro biomes of the model.
    pub fn biomes(&self) -> &[Biome] {
        &self.biomes
    }

    fn biome_index(&self, cell_value: f64) -> usize {
        let count = self.biomes.len();
        ((cell_value.clamp(0.0, 1.0) * count as f64).floor() as usize).min(count - 1)
    }

    /// Topology of a biome at a sample, blended across layer borders.
    fn layer_topology<'a>(&'a self, biome: &'a Biome, base: f64, x: f64, z: f64) -> (Topology, &'a BiomeLayer) {
        let index = biome.layer_index(base);
        let layer = &biome.layers[index];
        let mut topology = Topology {
            base,
            noise: layer.noise.sample_2d(x, z),
            max_height: layer.max_height,
        };

        let lower = index.checked_sub(1).map(|i| (i, layer.min));
        let upper = Some(index + 1).filter(|i| *i < biome.layers.len()).map(|i| (i, layer.max));
        for (adjacent_index, border) in [lower, upper].into_iter().flatten() {
            let gradient = edge_gradient(base, border, self.layer_margin);
            if gradient <= 1.0 {
                let adjacent = &biome.layers[adjacent_index];
                let adjacent_topology = Topology {
                    base,
                    noise: adjacent.noise.sample_2d(x, z),
                    max_height: adjacent.max_height,
                };
                topology = adjacent_topology.lerp(topology, 0.5 + 0.5 * gradient);
            }
        }

        (topology, layer)
    }

    /// Strongest point-of-interest pull at a sample and the wall height that comes with it.
    fn poi_gradient(&self, x: f64, z: f64) -> (f64, i32) {
        self.poi_sites
            .iter()
            .map(|site| {
                let distance = ((x - site.center_x).powi(2) + (z - site.center_z).powi(2)).sqrt();
                let gradient = if distance <= site.radius {
                    1.0
                } else if site.falloff > 0.0 && distance < site.radius + site.falloff {
                    1.0 - (distance - site.radius) / site.falloff
                } else {
                    0.0
                };
                (gradient, site.wall_height)
            })
            .fold((0.0, 0), |best, candidate| if candidate.0 > best.0 { candidate } else { best })
    }

    /// Computes the terrain height of one world column.
    ///
    /// The result depends only on the model and the coordinates. `column` only
    /// receives flags: `biome_boundary` when macro biomes were blended and
    /// `poi_wall_height` when a point of interest touches the sample.
    ///
    /// # Arguments
    /// * `gx` - World X
    /// * `gz` - World Z
    /// * `column` - The column being generated
    ///
    /// # Returns
    /// The height and the layer that supplies the surface materials.
    pub fn get_height<'a>(&'a self, gx: i32, gz: i32, column: &mut Column) -> (i32, &'a BiomeLayer) {
        let (x, z) = (gx as f64, gz as f64);

        let edge = self.cellular_noise.sample_2d_cellular(x, z);
        let biome_index = self.biome_index(edge.current_cell_value);
        let adjacent_index = self.biome_index(edge.adjacent_cell_value);
        let biome = &self.biomes[biome_index];

        let base = self.base_noise.sample_2d(x, z);
        let (mut topology, layer) = self.layer_topology(biome, base, x, z);

        if adjacent_index != biome_index && edge.distance_to_edge < self.smooth_radius {
            column.biome_boundary = true;
            let (adjacent_topology, _) = self.layer_topology(&self.biomes[adjacent_index], base, x, z);
            let weight = 0.5 + 0.5 * edge.distance_to_edge / self.smooth_radius;
            topology = adjacent_topology.lerp(topology, weight);
        }

        let (poi, wall_height) = self.poi_gradient(x, z);
        if poi > 0.0 {
            topology.noise = lerp(topology.noise, 0.5, poi);
            topology.base = lerp(topology.base, 0.5, poi);
            column.poi_wall_height = column.poi_wall_height.max(wall_height);
        }

        let height = lerp(0.0, topology.max_height, topology.base * topology.noise).floor() as i32;
        (height.clamp(0, self.max_world_height), layer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::Point3;

    use super::noise_source::EdgeData;

    struct Constant(f64);

    impl NoiseSource for Constant {
        fn sample_2d(&self, _x: f64, _z: f64) -> f64 {
            self.0
        }
    }

    /// Two cells split at `x = 0`, valued 0.1 on the negative side and 0.9 on the positive side.
    struct SplitCells;

    impl NoiseSource for SplitCells {
        fn sample_2d(&self, x: f64, _z: f64) -> f64 {
            if x < 0.0 {
                0.1
            } else {
                0.9
            }
        }

        fn sample_2d_cellular(&self, x: f64, z: f64) -> EdgeData {
            let current = self.sample_2d(x, z);
            EdgeData {
                current_cell_value: current,
                adjacent_cell_value: 1.0 - current,
                distance_to_edge: if x < 0.0 { -x } else { x + 1.0 },
            }
        }
    }

    fn layer(min: f64, max: f64, max_height: f64, noise: f64, block: BlockType) -> BiomeLayer {
        BiomeLayer {
            name: format!("{}..{}", min, max),
            min,
            max,
            max_height,
            noise: Box::new(Constant(noise)),
            surface_block: block,
            subsurface_block: BlockType::STONE,
            surface_depth: 1,
        }
    }

    fn config() -> EngineConfig {
        EngineConfig {
            layer_margin: 0.1,
            smooth_radius: 8.0,
            max_world_height: 100,
            poi_sites: Vec::new(),
            ..EngineConfig::default()
        }
    }

    fn single_biome_model(base: f64, config: &EngineConfig) -> BiomeModel {
        BiomeModel::new(
            Box::new(Constant(base)),
            Box::new(Constant(0.0)),
            vec![Biome {
                name: "test".to_string(),
                layers: vec![
                    layer(0.0, 0.5, 100.0, 0.5, BlockType::SAND),
                    layer(0.5, 1.0, 200.0, 1.0, BlockType::GRASS),
                ],
            }],
            config,
        )
    }

    fn scratch_column() -> Column {
        Column::flat(Point3::new(0, 0, 0), 0, BlockType::AIR)
    }

    #[test]
    fn gradient_is_zero_at_border_and_sentinel_outside() {
        assert_eq!(edge_gradient(0.5, 0.5, 0.1), 0.0);
        assert!((edge_gradient(0.45, 0.5, 0.1) - 0.5).abs() < 1e-9);
        assert!((edge_gradient(0.6, 0.5, 0.1) - 1.0).abs() < 1e-9);
        assert_eq!(edge_gradient(0.7, 0.5, 0.1), OUTSIDE_MARGIN);
        assert_eq!(edge_gradient(0.5, 0.5, 0.0), OUTSIDE_MARGIN);
    }

    #[test]
    fn layer_lookup_degrades_to_lowest() {
        let biome = Biome {
            name: "gappy".to_string(),
            layers: vec![
                layer(0.0, 0.3, 10.0, 1.0, BlockType::SAND),
                layer(0.6, 1.0, 10.0, 1.0, BlockType::GRASS),
            ],
        };
        assert_eq!(biome.layer_index(0.1), 0);
        assert_eq!(biome.layer_index(0.45), 0);
        assert_eq!(biome.layer_index(0.7), 1);
        assert_eq!(biome.layer_index(1.0), 1);
    }

    #[test]
    fn height_away_from_borders_is_the_plain_product() {
        let config = config();
        let model = single_biome_model(0.2, &config);
        let mut column = scratch_column();
        let (height, layer) = model.get_height(5, 9, &mut column);
        // 100 * 0.2 * 0.5
        assert_eq!(height, 10);
        assert_eq!(layer.surface_block, BlockType::SAND);
        assert!(!column.biome_boundary);
    }

    #[test]
    fn layer_border_is_an_even_blend() {
        let config = config();
        let model = single_biome_model(0.5, &config);
        let mut column = scratch_column();
        let (height, layer) = model.get_height(0, 0, &mut column);
        // noise 0.75, max height 150 at the border.
        assert_eq!(height, (150.0f64 * 0.5 * 0.75).floor() as i32);
        assert_eq!(layer.surface_block, BlockType::GRASS);
    }

    #[test]
    fn heights_are_deterministic_and_clamped() {
        let config = EngineConfig {
            max_world_height: 30,
            ..config()
        };
        let model = single_biome_model(0.9, &config);
        let mut column = scratch_column();
        let first = model.get_height(-40, 17, &mut column);
        let second = model.get_height(-40, 17, &mut column);
        assert_eq!(first.0, second.0);
        assert_eq!(first.0, 30);
    }

    #[test]
    fn macro_biome_border_blends_and_flags() {
        let config = config();
        let model = BiomeModel::new(
            Box::new(Constant(0.2)),
            Box::new(SplitCells),
            vec![
                Biome {
                    name: "low".to_string(),
                    layers: vec![layer(0.0, 1.0, 50.0, 1.0, BlockType::SAND)],
                },
                Biome {
                    name: "high".to_string(),
                    layers: vec![layer(0.0, 1.0, 250.0, 1.0, BlockType::SNOW)],
                },
            ],
            &config,
        );

        let mut far = scratch_column();
        let (far_height, far_layer) = model.get_height(-20, 0, &mut far);
        assert_eq!(far_height, 10);
        assert_eq!(far_layer.surface_block, BlockType::SAND);
        assert!(!far.biome_boundary);

        let mut border = scratch_column();
        let (border_height, _) = model.get_height(0, 0, &mut border);
        // distance 1 of 8: weight 0.5625 on "high".
        let expected = (0.2 * (50.0 + (250.0 - 50.0) * 0.5625f64)).floor() as i32;
        assert_eq!(border_height, expected);
        assert!(border.biome_boundary);
    }

    #[test]
    fn poi_sites_flatten_and_raise_walls() {
        let config = EngineConfig {
            poi_sites: vec![PoiSite {
                center_x: 0.0,
                center_z: 0.0,
                radius: 4.0,
                falloff: 4.0,
                wall_height: 3,
            }],
            ..config()
        };
        let model = single_biome_model(0.2, &config);

        let mut inside = scratch_column();
        let (height, _) = model.get_height(1, 1, &mut inside);
        // Fully flattened: base and noise both pulled to 0.5.
        assert_eq!(height, (100.0f64 * 0.25).floor() as i32);
        assert_eq!(inside.poi_wall_height, 3);

        let mut outside = scratch_column();
        model.get_height(40, 40, &mut outside);
        assert_eq!(outside.poi_wall_height, 0);
    }
}
