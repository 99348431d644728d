//! # Voxel Terrain Core
//!
//! Everything that describes the terrain itself, independent of how it is drawn.
//!
//! ## Architecture
//!
//! * **Block**: block types, their properties, faces, shapes and rotations
//! * **Biome**: noise sources and the layered biome model that turns world X/Z into a height
//! * **Column**: the height map and vertical chunk range of one X/Z chunk origin
//! * **Chunk**: a 16x16x16 block of voxels and its lifecycle status
//! * **Smoothing**: the bitmask lookup that turns terrain steps into slopes
//! * **World**: the registry of columns and chunks, and every cross-chunk query
//! * **Tasks**: streaming work units that create, size, generate and smooth terrain
//!
//! ## Data Flow
//!
//! 1. Columns are sampled from the biome model
//! 2. Once all eight neighbours exist, a column is sized and its chunks are created
//! 3. Chunks are filled from their column, then smoothed
//! 4. Drawn chunks hand their meshes to a mesh sink
//! 5. Block edits update the edited chunk and any face neighbour touching the edit

pub mod biome;
pub mod block;
pub mod chunk;
pub mod column;
pub mod smoothing;
pub mod tasks;
pub mod world;
