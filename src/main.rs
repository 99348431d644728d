//! # Voxel Terrain Entry Point
//!
//! The native entry point. It calls into the library's `run()` function, which
//! streams terrain headlessly along a scripted viewer path.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info TERRAIN_CONFIG=terrain.json cargo run --release
//! ```

fn main() -> Result<(), voxel_terrain::EngineError> {
    voxel_terrain::run()
}
