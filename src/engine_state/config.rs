//! # Engine Configuration
//!
//! JSON-backed settings for world generation and streaming. Every field has a
//! default, so a configuration file only needs to name what it changes.
//!
//! ```json
//! { "seed": 7, "render_radius": 4, "batch_size": 8 }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::error::EngineError;
use super::voxels::block::block_type::BlockType;

/// Tolerance used when checking that layer ranges meet.
const RANGE_EPSILON: f64 = 1e-9;

/// Top-level engine settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed shared by every noise field.
    pub seed: u32,
    /// Streaming radius in columns around the viewer. Must be at least 2.
    pub render_radius: i32,
    /// Maximum number of grid cells processed per engine tick.
    pub batch_size: usize,
    /// Number of ticks between viewer position samples.
    pub viewer_poll_interval: u64,
    /// Half-width of the blend band around layer borders, in base-noise units.
    pub layer_margin: f64,
    /// Distance in blocks over which neighbouring macro biomes are blended.
    pub smooth_radius: f64,
    /// Frequency of the cellular noise that selects macro biomes.
    pub cellular_frequency: f64,
    /// Frequency of the base noise that selects layers.
    pub base_frequency: f64,
    /// Hard ceiling on generated column heights.
    pub max_world_height: i32,
    /// Largest height difference inside a column that still allows a point of interest.
    pub poi_max_relief: i32,
    /// Macro biome definitions, selected by cellular noise value.
    pub biomes: Vec<BiomeConfig>,
    /// Areas flattened for points of interest.
    pub poi_sites: Vec<PoiSite>,
}

/// A macro biome made of vertically stacked layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomeConfig {
    /// Display name, used in logs.
    pub name: String,
    /// Layers ordered by ascending base-noise range.
    pub layers: Vec<LayerConfig>,
}

/// One layer of a biome, active where the base noise falls in `[min, max)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Display name, used in logs.
    pub name: String,
    /// Inclusive lower bound of the base-noise range.
    pub min: f64,
    /// Exclusive upper bound of the base-noise range.
    pub max: f64,
    /// Height reached where both base and detail noise are 1.
    pub max_height: f64,
    /// Frequency of the layer's detail noise.
    pub frequency: f64,
    /// Octave count of the layer's detail noise.
    #[serde(default = "default_octaves")]
    pub octaves: usize,
    /// Block placed at the top of each column.
    pub surface_block: BlockType,
    /// Block placed below the surface band.
    pub subsurface_block: BlockType,
    /// Thickness of the surface band in blocks.
    #[serde(default = "default_surface_depth")]
    pub surface_depth: i32,
}

/// A circular area whose terrain is pulled flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoiSite {
    /// World X of the centre.
    pub center_x: f64,
    /// World Z of the centre.
    pub center_z: f64,
    /// Fully flattened radius in blocks.
    pub radius: f64,
    /// Width of the ring over which flattening fades out.
    pub falloff: f64,
    /// Extra height reserved above touched columns for walls.
    pub wall_height: i32,
}

fn default_octaves() -> usize {
    3
}

fn default_surface_depth() -> i32 {
    1
}

impl LayerConfig {
    #[allow(clippy::too_many_arguments)]
    fn new(
        name: &str,
        min: f64,
        max: f64,
        max_height: f64,
        frequency: f64,
        surface_block: BlockType,
        subsurface_block: BlockType,
        surface_depth: i32,
    ) -> Self {
        LayerConfig {
            name: name.to_string(),
            min,
            max,
            max_height,
            frequency,
            octaves: default_octaves(),
            surface_block,
            subsurface_block,
            surface_depth,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            seed: 1337,
            render_radius: 4,
            batch_size: 4,
            viewer_poll_interval: 10,
            layer_margin: 0.05,
            smooth_radius: 24.0,
            cellular_frequency: 0.004,
            base_frequency: 0.003,
            max_world_height: 256,
            poi_max_relief: 6,
            biomes: vec![
                BiomeConfig {
                    name: "plains".to_string(),
                    layers: vec![
                        LayerConfig::new("lowlands", 0.0, 0.35, 40.0, 0.02, BlockType::SAND, BlockType::SAND, 2),
                        LayerConfig::new("meadows", 0.35, 0.7, 80.0, 0.015, BlockType::LIGHTGRASS, BlockType::DIRT, 1),
                        LayerConfig::new("hills", 0.7, 1.0, 140.0, 0.01, BlockType::GRASS, BlockType::STONE, 1),
                    ],
                },
                BiomeConfig {
                    name: "mountains".to_string(),
                    layers: vec![
                        LayerConfig::new("foothills", 0.0, 0.4, 90.0, 0.015, BlockType::GRASS, BlockType::DIRT, 1),
                        LayerConfig::new("slopes", 0.4, 0.75, 180.0, 0.01, BlockType::STONE, BlockType::STONE, 1),
                        LayerConfig::new("peaks", 0.75, 1.0, 260.0, 0.008, BlockType::SNOW, BlockType::STONE, 2),
                    ],
                },
            ],
            poi_sites: vec![PoiSite {
                center_x: 0.0,
                center_z: 0.0,
                radius: 12.0,
                falloff: 10.0,
                wall_height: 4,
            }],
        }
    }
}

impl EngineConfig {
    /// Reads, parses and validates a configuration file.
    ///
    /// # Arguments
    /// * `path` - Location of a JSON configuration file
    ///
    /// # Returns
    /// The validated configuration, or the first I/O, parse or validation error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, EngineError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses and validates a configuration from a JSON string.
    pub fn from_json_str(text: &str) -> Result<Self, EngineError> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the configuration for values the generator cannot work with.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.render_radius < 2 {
            return Err(invalid(format!(
                "render_radius must be at least 2, got {}",
                self.render_radius
            )));
        }
        if self.batch_size == 0 {
            return Err(invalid("batch_size must be positive".to_string()));
        }
        if self.viewer_poll_interval == 0 {
            return Err(invalid("viewer_poll_interval must be positive".to_string()));
        }
        if self.max_world_height <= 0 {
            return Err(invalid("max_world_height must be positive".to_string()));
        }
        if self.layer_margin < 0.0 {
            return Err(invalid("layer_margin must not be negative".to_string()));
        }
        if self.smooth_radius <= 0.0 {
            return Err(invalid("smooth_radius must be positive".to_string()));
        }
        if self.cellular_frequency <= 0.0 || self.base_frequency <= 0.0 {
            return Err(invalid("noise frequencies must be positive".to_string()));
        }
        if self.biomes.is_empty() {
            return Err(invalid("at least one biome is required".to_string()));
        }
        for biome in &self.biomes {
            biome.validate()?;
        }
        for site in &self.poi_sites {
            if site.radius < 0.0 || site.falloff < 0.0 || site.wall_height < 0 {
                return Err(invalid(
                    "point of interest sizes must not be negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl BiomeConfig {
    fn validate(&self) -> Result<(), EngineError> {
        let (first, last) = match (self.layers.first(), self.layers.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(invalid(format!("biome `{}` has no layers", self.name))),
        };
        if first.min.abs() > RANGE_EPSILON || (last.max - 1.0).abs() > RANGE_EPSILON {
            return Err(invalid(format!(
                "layers of biome `{}` must span [0, 1]",
                self.name
            )));
        }
        for layer in &self.layers {
            if layer.min >= layer.max {
                return Err(invalid(format!(
                    "layer `{}` of biome `{}` has an empty range",
                    layer.name, self.name
                )));
            }
            if layer.max_height < 0.0 || layer.frequency <= 0.0 || layer.surface_depth < 0 {
                return Err(invalid(format!(
                    "layer `{}` of biome `{}` has a negative size",
                    layer.name, self.name
                )));
            }
        }
        for pair in self.layers.windows(2) {
            if (pair[0].max - pair[1].min).abs() > RANGE_EPSILON {
                return Err(invalid(format!(
                    "layers `{}` and `{}` of biome `{}` leave a gap or overlap",
                    pair[0].name, pair[1].name, self.name
                )));
            }
        }
        Ok(())
    }
}

fn invalid(reason: String) -> EngineError {
    EngineError::InvalidConfig(reason)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = EngineConfig::from_json_str(r#"{ "seed": 7, "render_radius": 3 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.render_radius, 3);
        assert_eq!(config.batch_size, EngineConfig::default().batch_size);
        assert_eq!(config.biomes.len(), 2);
    }

    #[test]
    fn small_render_radius_is_rejected() {
        let result = EngineConfig::from_json_str(r#"{ "render_radius": 1 }"#);
        assert!(matches!(result, Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn zero_batch_is_rejected() {
        let config = EngineConfig {
            batch_size: 0,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn layer_gap_is_rejected() {
        let mut config = EngineConfig::default();
        config.biomes[0].layers[1].min = 0.4;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn empty_biomes_are_rejected() {
        let config = EngineConfig {
            biomes: Vec::new(),
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));
    }

    #[test]
    fn unknown_block_name_fails_to_parse() {
        let json = r#"{ "biomes": [ { "name": "odd", "layers": [ {
            "name": "only", "min": 0.0, "max": 1.0, "max_height": 10.0,
            "frequency": 0.1, "surface_block": "MARBLE", "subsurface_block": "STONE" } ] } ] }"#;
        assert!(matches!(EngineConfig::from_json_str(json), Err(EngineError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = EngineConfig::load("/nonexistent/terrain-config.json");
        assert!(matches!(result, Err(EngineError::Io(_))));
    }
}
