//! # World Module
//!
//! The owned registry of every column and chunk in the voxel world, and the
//! operations that need to see across chunk borders: vertical sizing of columns,
//! face exposure, smoothing bitmasks, drawing and block edits.
//!
//! Chunks are keyed by their world-space origin (a multiple of
//! `CHUNK_DIMENSION` on every axis); columns by their `(x, 0, z)` origin.

use std::collections::HashMap;

use cgmath::{Point3, Vector3};
use log::{debug, trace, warn};

use super::biome::BiomeModel;
use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::block::Block;
use super::chunk::{Chunk, ChunkStatus, CHUNK_DIMENSION};
use super::column::{ChunkRange, Column};
use super::smoothing::NEIGHBOR_OFFSETS;
use crate::engine_state::rendering::meshing::mesh::ChunkMesh;
use crate::engine_state::rendering::meshing::ChunkMesher;
use crate::engine_state::rendering::MeshSink;

/// Represents the entire voxel world.
#[derive(Debug, Default)]
pub struct World {
    /// Chunks keyed by world-space origin.
    chunks: HashMap<Point3<i32>, Chunk>,
    /// Columns keyed by `(x, 0, z)` origin.
    columns: HashMap<Point3<i32>, Column>,
}

impl World {
    /// Creates a new, empty world.
    pub fn new() -> Self {
        World {
            chunks: HashMap::new(),
            columns: HashMap::new(),
        }
    }

    /// Number of chunks in the world.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Number of columns in the world.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Retrieves a chunk by its world-space origin.
    pub fn get_chunk_at(&self, origin: &Point3<i32>) -> Option<&Chunk> {
        self.chunks.get(origin)
    }

    /// Retrieves a chunk mutably by its world-space origin.
    pub fn get_chunk_at_mut(&mut self, origin: &Point3<i32>) -> Option<&mut Chunk> {
        self.chunks.get_mut(origin)
    }

    /// Retrieves a column by its `(x, 0, z)` origin.
    pub fn get_column_at(&self, origin: &Point3<i32>) -> Option<&Column> {
        self.columns.get(&Point3::new(origin.x, 0, origin.z))
    }

    /// Retrieves a column mutably by its `(x, 0, z)` origin.
    pub fn get_column_at_mut(&mut self, origin: &Point3<i32>) -> Option<&mut Column> {
        self.columns.get_mut(&Point3::new(origin.x, 0, origin.z))
    }

    /// Generates and registers the column at `origin` if it does not exist yet.
    ///
    /// # Returns
    /// `true` if a new column was created.
    pub fn add_column_at(&mut self, origin: Point3<i32>, biome_model: &BiomeModel) -> bool {
        let key = Point3::new(origin.x, 0, origin.z);
        if self.columns.contains_key(&key) {
            return false;
        }
        self.insert_column(Column::generate(key, biome_model))
    }

    /// Registers an already built column. An existing column is kept.
    ///
    /// # Returns
    /// `true` if the column was inserted.
    pub fn insert_column(&mut self, column: Column) -> bool {
        let key = column.position;
        if self.columns.contains_key(&key) {
            return false;
        }
        trace!(
            "Column {:?} created (heights {}..={})",
            key,
            column.lowest_point,
            column.highest_point
        );
        self.columns.insert(key, column);
        true
    }

    /// Computes the chunk range of a column from itself and its eight neighbours.
    ///
    /// # Panics
    /// Panics if the column or any of its horizontal neighbours is missing.
    pub fn column_extent(&self, origin: Point3<i32>) -> ChunkRange {
        let mut highest = i32::MIN;
        let mut lowest = i32::MAX;
        for dz in -1..=1 {
            for dx in -1..=1 {
                let key = Point3::new(
                    origin.x + dx * CHUNK_DIMENSION,
                    0,
                    origin.z + dz * CHUNK_DIMENSION,
                );
                let column = self
                    .columns
                    .get(&key)
                    .unwrap_or_else(|| panic!("column {:?} sized before neighbour {:?} exists", origin, key));
                highest = highest.max(column.highest_point);
                lowest = lowest.min(column.lowest_point);
            }
        }
        ChunkRange::from_extremes(highest, lowest)
    }

    /// Sizes a column once all eight horizontal neighbours exist.
    ///
    /// # Returns
    /// `true` if the column was sized by this call, `false` if it already was.
    ///
    /// # Panics
    /// Panics if the column or any of its neighbours is missing.
    pub fn compute_vertical_extent(&mut self, origin: Point3<i32>) -> bool {
        let key = Point3::new(origin.x, 0, origin.z);
        let already_sized = self
            .columns
            .get(&key)
            .map(|column| column.size_calculated)
            .unwrap_or_else(|| panic!("column {:?} sized before it exists", key));
        if already_sized {
            return false;
        }
        let range = self.column_extent(key);
        self.set_column_range(key, range);
        true
    }

    /// Stores a precomputed chunk range on a column.
    pub fn set_column_range(&mut self, origin: Point3<i32>, range: ChunkRange) {
        if let Some(column) = self.get_column_at_mut(&origin) {
            if !column.size_calculated {
                column.range = range;
                column.size_calculated = true;
            }
        }
    }

    /// Creates a `CREATED` chunk at `origin` unless one already exists.
    ///
    /// # Returns
    /// `true` if a chunk was created.
    pub fn add_chunk_at(&mut self, origin: Point3<i32>) -> bool {
        if self.chunks.contains_key(&origin) {
            return false;
        }
        self.chunks.insert(origin, Chunk::new(origin));
        true
    }

    /// Creates every chunk of a sized column's generate range.
    ///
    /// # Returns
    /// The number of chunks created.
    ///
    /// # Panics
    /// Panics if the column is missing or has not been sized.
    pub fn create_column_chunks(&mut self, column_origin: Point3<i32>) -> usize {
        let origins: Vec<Point3<i32>> = self
            .get_column_at(&column_origin)
            .unwrap_or_else(|| panic!("chunks requested for missing column {:?}", column_origin))
            .generate_chunk_origins()
            .collect();
        let created = origins.into_iter().filter(|origin| self.add_chunk_at(*origin)).count();
        self.refresh_column_status(column_origin);
        created
    }

    /// Fills a `CREATED` chunk from its column.
    ///
    /// # Returns
    /// `true` if blocks were generated by this call.
    ///
    /// # Panics
    /// Panics if the chunk's column does not exist.
    pub fn generate_chunk(&mut self, origin: Point3<i32>) -> bool {
        let column_key = Point3::new(origin.x, 0, origin.z);
        let column = self
            .columns
            .get(&column_key)
            .unwrap_or_else(|| panic!("chunk {:?} generated without its column", origin));
        match self.chunks.get_mut(&origin) {
            Some(chunk) => chunk.generate_blocks(column),
            None => false,
        }
    }

    /// Recomputes a column's `spawn_status` from the chunks of its generate range.
    pub fn refresh_column_status(&mut self, column_origin: Point3<i32>) {
        let key = Point3::new(column_origin.x, 0, column_origin.z);
        let status = match self.columns.get(&key) {
            Some(column) if column.size_calculated => column
                .generate_chunk_origins()
                .map(|origin| {
                    self.chunks
                        .get(&origin)
                        .map_or(ChunkStatus::NONE, |chunk| chunk.status)
                })
                .min()
                .unwrap_or(ChunkStatus::NONE),
            _ => return,
        };
        if let Some(column) = self.columns.get_mut(&key) {
            column.spawn_status = status;
        }
    }

    /// Origin of the chunk containing a world-space voxel.
    pub fn chunk_origin_of(global: Point3<i32>) -> Point3<i32> {
        Point3::new(
            global.x.div_euclid(CHUNK_DIMENSION) * CHUNK_DIMENSION,
            global.y.div_euclid(CHUNK_DIMENSION) * CHUNK_DIMENSION,
            global.z.div_euclid(CHUNK_DIMENSION) * CHUNK_DIMENSION,
        )
    }

    /// Resolves a local coordinate that may lie outside its chunk.
    ///
    /// # Returns
    /// The chunk actually containing the voxel and the wrapped local coordinate,
    /// or `None` if that chunk does not exist.
    pub fn resolve_neighbor(&self, chunk_origin: Point3<i32>, local: Point3<i32>) -> Option<(&Chunk, Point3<i32>)> {
        let global = chunk_origin + Vector3::new(local.x, local.y, local.z);
        let origin = Self::chunk_origin_of(global);
        let wrapped = Point3::new(
            local.x.rem_euclid(CHUNK_DIMENSION),
            local.y.rem_euclid(CHUNK_DIMENSION),
            local.z.rem_euclid(CHUNK_DIMENSION),
        );
        self.chunks.get(&origin).map(|chunk| (chunk, wrapped))
    }

    /// The block stored at a world-space voxel, if its chunk exists.
    pub fn block_at(&self, global: Point3<i32>) -> Option<Block> {
        let origin = Self::chunk_origin_of(global);
        self.chunks
            .get(&origin)
            .map(|chunk| chunk.block_at(global - (origin - Point3::new(0, 0, 0))))
    }

    /// Whether the `side` face of a voxel can be seen.
    ///
    /// Unknown territory (missing chunks, or chunks that have not been generated)
    /// never exposes a face.
    ///
    /// # Arguments
    /// * `side` - The face being tested
    /// * `voxel` - Local coordinate of the voxel
    /// * `chunk_origin` - World-space origin of the voxel's chunk
    pub fn face_exposed(&self, side: BlockSide, voxel: Point3<i32>, chunk_origin: Point3<i32>) -> bool {
        let chunk = match self.chunks.get(&chunk_origin) {
            Some(chunk) => chunk,
            None => return false,
        };
        let neighbor = voxel + side.direction();

        if Chunk::in_bounds(neighbor) {
            if chunk.opaque {
                debug_assert!(
                    !chunk.exposes(neighbor),
                    "opaque chunk {:?} holds an exposing voxel at {:?}",
                    chunk_origin,
                    neighbor
                );
                return false;
            }
            return chunk.exposes(neighbor);
        }

        match self.resolve_neighbor(chunk_origin, neighbor) {
            Some((neighbor_chunk, local)) if neighbor_chunk.status != ChunkStatus::CREATED => {
                neighbor_chunk.exposes(local)
            }
            _ => false,
        }
    }

    /// Builds the eight-bit horizontal neighbour mask of a voxel.
    ///
    /// Bit `i` is set when the neighbour at `NEIGHBOR_OFFSETS[i]` is see-through.
    /// Neighbours in missing or ungenerated chunks count as opaque.
    pub fn compute_bitmask(&self, voxel: Point3<i32>, chunk_origin: Point3<i32>) -> u8 {
        let chunk = match self.chunks.get(&chunk_origin) {
            Some(chunk) => chunk,
            None => return 0,
        };

        let mut bitmask = 0u8;
        for (bit, (dx, dz)) in NEIGHBOR_OFFSETS.iter().enumerate() {
            let neighbor = voxel + Vector3::new(*dx, 0, *dz);
            let open = if Chunk::in_bounds(neighbor) {
                chunk.block_type_at(neighbor).is_see_through()
            } else {
                match self.resolve_neighbor(chunk_origin, neighbor) {
                    Some((neighbor_chunk, local)) if neighbor_chunk.status != ChunkStatus::CREATED => {
                        neighbor_chunk.block_type_at(local).is_see_through()
                    }
                    _ => false,
                }
            };
            if open {
                bitmask |= 1 << bit;
            }
        }
        bitmask
    }

    /// Meshes a generated chunk and hands the result to `mesh_sink`.
    ///
    /// # Returns
    /// `true` if the chunk was drawn by this call, `false` if it already was.
    ///
    /// # Panics
    /// Panics if the chunk is missing or has not been generated.
    pub fn draw_chunk(&mut self, origin: Point3<i32>, mesh_sink: &mut dyn MeshSink) -> bool {
        let status = self.expect_generated(origin, "drawn");
        if status == ChunkStatus::DRAWN {
            return false;
        }
        let mesh = ChunkMesher::new(self).mesh_chunk(origin);
        self.apply_mesh(origin, mesh, mesh_sink);
        true
    }

    /// Rebuilds the mesh of a chunk that has already been drawn.
    ///
    /// # Panics
    /// Panics if the chunk is missing or not `DRAWN`.
    pub fn redraw_chunk(&mut self, origin: Point3<i32>, mesh_sink: &mut dyn MeshSink) {
        let status = self.expect_generated(origin, "redrawn");
        assert_eq!(
            status,
            ChunkStatus::DRAWN,
            "chunk {:?} redrawn before its first draw",
            origin
        );
        let mesh = ChunkMesher::new(self).mesh_chunk(origin);
        self.apply_mesh(origin, mesh, mesh_sink);
    }

    /// Publishes a mesh built for `origin` and marks the chunk `DRAWN`.
    ///
    /// A skipped or empty mesh removes whatever the sink held for the chunk.
    pub fn apply_mesh(&mut self, origin: Point3<i32>, mesh: Option<ChunkMesh>, mesh_sink: &mut dyn MeshSink) {
        match mesh {
            Some(mesh) if !mesh.is_empty() => mesh_sink.upload(origin, &mesh),
            _ => mesh_sink.remove(origin),
        }
        if let Some(chunk) = self.chunks.get_mut(&origin) {
            chunk.status = ChunkStatus::DRAWN;
        }
    }

    fn expect_generated(&self, origin: Point3<i32>, action: &str) -> ChunkStatus {
        let status = self
            .chunks
            .get(&origin)
            .map(|chunk| chunk.status)
            .unwrap_or_else(|| panic!("missing chunk {:?} {}", origin, action));
        assert!(
            status >= ChunkStatus::GENERATED,
            "chunk {:?} {} before generation",
            origin,
            action
        );
        status
    }

    /// Advances a chunk by one step: generate, draw, or redraw.
    pub fn update_chunk(&mut self, origin: Point3<i32>, mesh_sink: &mut dyn MeshSink) {
        let status = match self.chunks.get(&origin) {
            Some(chunk) => chunk.status,
            None => return,
        };
        match status {
            ChunkStatus::NONE => {}
            ChunkStatus::CREATED => {
                self.generate_chunk(origin);
            }
            ChunkStatus::GENERATED => {
                self.draw_chunk(origin, mesh_sink);
            }
            ChunkStatus::DRAWN => self.redraw_chunk(origin, mesh_sink),
        }
    }

    /// Replaces one block and refreshes every chunk that can see the change.
    ///
    /// The edited chunk and each existing face-adjacent chunk touching the
    /// edited voxel are updated immediately.
    ///
    /// # Arguments
    /// * `global` - World-space voxel coordinate
    /// * `block_type` - The new block type
    /// * `mesh_sink` - Receives rebuilt meshes
    ///
    /// # Returns
    /// Origins of the chunks that were updated, the edited chunk first. Empty if
    /// the edit was rejected because the chunk is missing or not generated.
    pub fn change_block(
        &mut self,
        global: Point3<i32>,
        block_type: BlockType,
        mesh_sink: &mut dyn MeshSink,
    ) -> Vec<Point3<i32>> {
        let origin = Self::chunk_origin_of(global);
        let local = global - (origin - Point3::new(0, 0, 0));

        match self.chunks.get_mut(&origin) {
            Some(chunk) if chunk.status >= ChunkStatus::GENERATED => {
                chunk.set_block_type(local, block_type);
            }
            Some(chunk) => {
                warn!(
                    "Ignoring edit at {:?}: chunk {:?} is {:?}",
                    global, origin, chunk.status
                );
                return Vec::new();
            }
            None => {
                warn!("Ignoring edit at {:?}: chunk {:?} does not exist", global, origin);
                return Vec::new();
            }
        }

        let mut affected = vec![origin];
        for side in BlockSide::all() {
            if !Chunk::in_bounds(local + side.direction()) {
                let neighbor_origin = origin + side.direction() * CHUNK_DIMENSION;
                if self.chunks.contains_key(&neighbor_origin) {
                    affected.push(neighbor_origin);
                }
            }
        }

        for chunk_origin in &affected {
            self.update_chunk(*chunk_origin, mesh_sink);
        }
        debug!(
            "Set {:?} to {:?}, updated {} chunk(s)",
            global,
            block_type,
            affected.len()
        );
        affected
    }
}
