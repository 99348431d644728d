//! # Column Module
//!
//! A column is the vertical stack of chunks sharing one X/Z chunk origin. It owns
//! the 16x16 height map sampled from the biome model and decides which chunk
//! origins must exist (the generate range) and which must be meshed (the draw
//! range).

use cgmath::Point3;

use super::biome::BiomeModel;
use super::block::block_type::BlockType;
use super::chunk::{ChunkStatus, CHUNK_DIMENSION};

/// Floors a world coordinate to the origin of the chunk containing it.
#[inline]
pub fn floor_to_chunk(value: i32) -> i32 {
    value.div_euclid(CHUNK_DIMENSION) * CHUNK_DIMENSION
}

/// Terrain information for one X/Z position of a column.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ColumnCell {
    /// World Y of the topmost solid voxel.
    pub height: i32,
    /// Block used within `surface_depth` of the top.
    pub surface_block: BlockType,
    /// Block used below the surface band.
    pub subsurface_block: BlockType,
    /// Thickness of the surface band.
    pub surface_depth: i32,
}

impl ColumnCell {
    /// The block type generated at world height `global_y` in this cell.
    #[inline]
    pub fn block_for(&self, global_y: i32) -> BlockType {
        if global_y > self.height {
            BlockType::AIR
        } else if self.height - global_y < self.surface_depth {
            self.surface_block
        } else {
            self.subsurface_block
        }
    }
}

/// Vertical chunk origins a column needs.
///
/// All four bounds are multiples of `CHUNK_DIMENSION` and satisfy
/// `bottom_generate <= bottom_draw <= top_draw <= top_generate`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChunkRange {
    /// Highest chunk origin that must be generated.
    pub top_generate: i32,
    /// Lowest chunk origin that must be generated.
    pub bottom_generate: i32,
    /// Highest chunk origin that is meshed.
    pub top_draw: i32,
    /// Lowest chunk origin that is meshed.
    pub bottom_draw: i32,
}

impl ChunkRange {
    /// Builds the range covering terrain between `lowest` and `highest`.
    ///
    /// The draw range covers the chunks containing both extremes; the generate
    /// range adds one chunk above and below so every drawn chunk has generated
    /// vertical neighbours.
    pub fn from_extremes(highest: i32, lowest: i32) -> Self {
        let top = floor_to_chunk(highest.max(lowest));
        let bottom = floor_to_chunk(lowest.min(highest));
        ChunkRange {
            top_generate: top + CHUNK_DIMENSION,
            bottom_generate: bottom - CHUNK_DIMENSION,
            top_draw: top,
            bottom_draw: bottom,
        }
    }

    /// Chunk Y origins of the generate range, bottom to top.
    pub fn generate_origins(&self) -> impl Iterator<Item = i32> {
        (self.bottom_generate..=self.top_generate).step_by(CHUNK_DIMENSION as usize)
    }

    /// Chunk Y origins of the draw range, bottom to top.
    pub fn draw_origins(&self) -> impl Iterator<Item = i32> {
        (self.bottom_draw..=self.top_draw).step_by(CHUNK_DIMENSION as usize)
    }
}

/// A vertical stack of chunks and its height map.
#[derive(Debug, Clone)]
pub struct Column {
    /// World-space origin `(x, 0, z)`.
    pub position: Point3<i32>,
    cells: Vec<ColumnCell>,
    /// Highest terrain point, raised by any point-of-interest wall height.
    pub highest_point: i32,
    /// Lowest terrain point.
    pub lowest_point: i32,
    /// Set when any cell was blended with a neighbouring macro biome.
    pub biome_boundary: bool,
    /// Whether the column is flat enough, and far enough from biome borders, to host a point of interest.
    pub is_poi_eligible: bool,
    /// Extra height reserved above the terrain by point-of-interest sites.
    pub poi_wall_height: i32,
    /// Whether `range` has been computed from the neighbouring columns.
    pub size_calculated: bool,
    /// Vertical chunk range, valid once `size_calculated` is set.
    pub range: ChunkRange,
    /// Lowest status over the chunks of the generate range.
    pub spawn_status: ChunkStatus,
}

impl Column {
    fn with_cells(position: Point3<i32>, cells: Vec<ColumnCell>) -> Self {
        Column {
            position: Point3::new(position.x, 0, position.z),
            cells,
            highest_point: i32::MIN,
            lowest_point: i32::MAX,
            biome_boundary: false,
            is_poi_eligible: false,
            poi_wall_height: 0,
            size_calculated: false,
            range: ChunkRange::default(),
            spawn_status: ChunkStatus::NONE,
        }
    }

    /// Samples the height map of the column at `position`.
    ///
    /// # Arguments
    /// * `position` - The column origin; its Y component is ignored
    /// * `biome_model` - Supplies heights and surface materials
    ///
    /// # Returns
    /// A column with its height map, extremes and point-of-interest data filled in.
    pub fn generate(position: Point3<i32>, biome_model: &BiomeModel) -> Self {
        let mut column =
            Column::with_cells(position, Vec::with_capacity((CHUNK_DIMENSION * CHUNK_DIMENSION) as usize));

        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let (height, layer) =
                    biome_model.get_height(column.position.x + x, column.position.z + z, &mut column);
                column.cells.push(ColumnCell {
                    height,
                    surface_block: layer.surface_block,
                    subsurface_block: layer.subsurface_block,
                    surface_depth: layer.surface_depth,
                });
                column.highest_point = column.highest_point.max(height);
                column.lowest_point = column.lowest_point.min(height);
            }
        }

        column.is_poi_eligible = !column.biome_boundary
            && column.highest_point - column.lowest_point <= biome_model.poi_max_relief();
        column.highest_point += column.poi_wall_height;
        column
    }

    /// A column of constant height made of a single block type.
    pub fn flat(position: Point3<i32>, height: i32, block_type: BlockType) -> Self {
        Column::with_height_fn(position, block_type, |_, _| height)
    }

    /// A column of a single block type whose heights come from `height_fn(x, z)`.
    ///
    /// Used for hand-built terrain. The column is marked POI-eligible when it is
    /// perfectly flat.
    pub fn with_height_fn<F>(position: Point3<i32>, block_type: BlockType, height_fn: F) -> Self
    where
        F: Fn(i32, i32) -> i32,
    {
        let mut column =
            Column::with_cells(position, Vec::with_capacity((CHUNK_DIMENSION * CHUNK_DIMENSION) as usize));
        for z in 0..CHUNK_DIMENSION {
            for x in 0..CHUNK_DIMENSION {
                let height = height_fn(x, z);
                column.cells.push(ColumnCell {
                    height,
                    surface_block: block_type,
                    subsurface_block: block_type,
                    surface_depth: 1,
                });
                column.highest_point = column.highest_point.max(height);
                column.lowest_point = column.lowest_point.min(height);
            }
        }
        column.is_poi_eligible = column.highest_point == column.lowest_point;
        column
    }

    /// The cell at local `(x, z)`.
    #[inline]
    pub fn cell(&self, x: i32, z: i32) -> &ColumnCell {
        &self.cells[(x + CHUNK_DIMENSION * z) as usize]
    }

    /// Terrain height at local `(x, z)`.
    #[inline]
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        self.cell(x, z).height
    }

    /// World-space origins of every chunk in the generate range.
    ///
    /// # Panics
    /// Panics if the column has not been sized.
    pub fn generate_chunk_origins(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        assert!(
            self.size_calculated,
            "column {:?} used before sizing",
            self.position
        );
        self.range
            .generate_origins()
            .map(move |y| Point3::new(self.position.x, y, self.position.z))
    }

    /// World-space origins of every chunk in the draw range.
    ///
    /// # Panics
    /// Panics if the column has not been sized.
    pub fn draw_chunk_origins(&self) -> impl Iterator<Item = Point3<i32>> + '_ {
        assert!(
            self.size_calculated,
            "column {:?} used before sizing",
            self.position
        );
        self.range
            .draw_origins()
            .map(move |y| Point3::new(self.position.x, y, self.position.z))
    }
}
