//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world.
//! It provides functionality for block type identification, conversion from the
//! compact storage integer and from configuration names.

use std::str::FromStr;

use num_derive::FromPrimitive;
use phf::phf_map;
use serde::{Deserialize, Serialize};

use super::{BlockProperties, BlockTypeSize, Color, BLOCK_TYPE_PROPERTIES};
use crate::engine_state::error::EngineError;

/// Enumerates all possible block types in the voxel world.
///
/// The declaration order is significant: it is the index into
/// [`BLOCK_TYPE_PROPERTIES`] and the value stored by `BlockTypeSize`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BlockType {
    /// Empty space. Always index 0 and always see-through.
    #[default]
    AIR,

    /// Soil found under grass layers.
    DIRT,

    /// Bedrock-like fill used for deep and mountainous layers.
    STONE,

    /// Dark grass surface.
    GRASS,

    /// Light grass surface used by meadow layers.
    LIGHTGRASS,

    /// Translucent liquid, see-through but not empty.
    WATER,

    /// Beach and desert surface.
    SAND,

    /// Mountain cap surface.
    SNOW,
}

/// Lookup from upper-case configuration names to block types.
static BLOCK_TYPE_NAMES: phf::Map<&'static str, BlockType> = phf_map! {
    "AIR" => BlockType::AIR,
    "DIRT" => BlockType::DIRT,
    "STONE" => BlockType::STONE,
    "GRASS" => BlockType::GRASS,
    "LIGHTGRASS" => BlockType::LIGHTGRASS,
    "WATER" => BlockType::WATER,
    "SAND" => BlockType::SAND,
    "SNOW" => BlockType::SNOW,
};

impl BlockType {
    /// Number of block types in the table.
    pub const COUNT: usize = 8;

    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the value is out of range.
    pub fn get_block_type_from_int(btype: BlockTypeSize) -> Option<Self> {
        num::FromPrimitive::from_u8(btype)
    }

    /// Looks up a block type by its upper-case name.
    pub fn from_name(name: &str) -> Option<Self> {
        BLOCK_TYPE_NAMES.get(name).copied()
    }

    /// The upper-case name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::AIR => "AIR",
            BlockType::DIRT => "DIRT",
            BlockType::STONE => "STONE",
            BlockType::GRASS => "GRASS",
            BlockType::LIGHTGRASS => "LIGHTGRASS",
            BlockType::WATER => "WATER",
            BlockType::SAND => "SAND",
            BlockType::SNOW => "SNOW",
        }
    }

    /// The fixed properties of this block type.
    #[inline]
    pub fn properties(self) -> &'static BlockProperties {
        &BLOCK_TYPE_PROPERTIES[self as usize]
    }

    /// Whether faces behind this block remain visible.
    #[inline]
    pub fn is_see_through(self) -> bool {
        self.properties().see_through
    }

    /// Vertex colour of this block type.
    #[inline]
    pub fn color(self) -> Color {
        self.properties().color
    }
}

impl FromStr for BlockType {
    type Err = EngineError;

    /// Accepts an upper-case name or a numeric storage id.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlockType::from_name(s)
            .or_else(|| {
                s.parse::<BlockTypeSize>()
                    .ok()
                    .and_then(BlockType::get_block_type_from_int)
            })
            .ok_or_else(|| EngineError::UnknownBlockType(s.to_string()))
    }
}

impl TryFrom<String> for BlockType {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BlockType> for String {
    fn from(value: BlockType) -> Self {
        value.name().to_string()
    }
}
