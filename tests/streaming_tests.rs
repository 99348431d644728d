/// Integration tests for streaming terrain around a viewer.
use cgmath::Point3;
use voxel_terrain::engine_state::voxels::biome::noise_source::NoiseSource;
use voxel_terrain::engine_state::voxels::biome::{Biome, BiomeLayer, BiomeModel};
use voxel_terrain::engine_state::voxels::chunk::ChunkStatus;
use voxel_terrain::engine_state::voxels::column::Column;
use voxel_terrain::{stream_until_idle, BlockType, EngineConfig, EngineState, MeshStore, ScriptedViewer};

struct Constant(f64);

impl NoiseSource for Constant {
    fn sample_2d(&self, _x: f64, _z: f64) -> f64 {
        self.0
    }
}

fn test_config() -> EngineConfig {
    EngineConfig {
        render_radius: 2,
        batch_size: 4,
        viewer_poll_interval: 1,
        poi_sites: Vec::new(),
        ..EngineConfig::default()
    }
}

/// Terrain flat at height 20 everywhere: 80 * 0.5 * 0.5.
fn flat_engine() -> EngineState<MeshStore> {
    let config = test_config();
    let biome = Biome {
        name: "flat".to_string(),
        layers: vec![BiomeLayer {
            name: "plain".to_string(),
            min: 0.0,
            max: 1.0,
            max_height: 80.0,
            noise: Box::new(Constant(0.5)),
            surface_block: BlockType::GRASS,
            subsurface_block: BlockType::DIRT,
            surface_depth: 1,
        }],
    };
    let biome_model = BiomeModel::new(Box::new(Constant(0.5)), Box::new(Constant(0.0)), vec![biome], &config);
    EngineState::with_parts(config, biome_model, MeshStore::new())
}

fn viewer_at(x: i32, z: i32) -> ScriptedViewer {
    ScriptedViewer {
        chunk_origin: Point3::new(x, 0, z),
    }
}

#[test]
fn test_streaming_builds_the_whole_neighbourhood() {
    let mut engine = flat_engine();
    stream_until_idle(&mut engine, &viewer_at(0, 0));
    assert!(!engine.is_busy());

    // Columns reach one ring past the render radius, chunks stop at it.
    assert_eq!(engine.world.column_count(), 49);
    assert_eq!(engine.world.chunk_count(), 25 * 3);

    let center = engine
        .world
        .get_column_at(&Point3::new(0, 0, 0))
        .expect("center column");
    assert!(center.size_calculated);
    assert_eq!(center.height_at(7, 7), 20);
    assert_eq!(center.range.bottom_draw, 16);
    assert_eq!(center.range.top_draw, 16);
    assert_eq!(center.range.bottom_generate, 0);
    assert_eq!(center.range.top_generate, 32);
    assert_eq!(center.spawn_status, ChunkStatus::GENERATED);

    // The outer ring of columns is only sampled, never sized.
    let rim = engine
        .world
        .get_column_at(&Point3::new(48, 0, 0))
        .expect("rim column");
    assert!(!rim.size_calculated);

    // Only the center column is within drawing distance.
    let drawn = Point3::new(0, 16, 0);
    assert_eq!(engine.world.get_chunk_at(&drawn).map(|c| c.status), Some(ChunkStatus::DRAWN));
    assert_eq!(
        engine.world.get_chunk_at(&Point3::new(16, 16, 0)).map(|c| c.status),
        Some(ChunkStatus::GENERATED)
    );

    let mesh = engine.mesh_sink.get(&drawn).expect("surface chunk mesh");
    assert_eq!(mesh.triangle_count(), 512);
    assert!(mesh.colors.iter().all(|c| *c == BlockType::GRASS.color()));
    assert_eq!(engine.mesh_sink.len(), 1);
}

#[test]
fn test_moving_the_viewer_extends_the_world() {
    let mut engine = flat_engine();
    stream_until_idle(&mut engine, &viewer_at(0, 0));

    // Moving within the same column keeps everything idle.
    assert!(!engine.tick(&viewer_at(5, 9)));

    stream_until_idle(&mut engine, &viewer_at(16, 0));
    assert_eq!(engine.streamer.center(), Some(Point3::new(16, 0, 0)));
    assert_eq!(engine.world.column_count(), 8 * 7);
    assert_eq!(engine.world.chunk_count(), 6 * 5 * 3);
    assert_eq!(engine.mesh_sink.len(), 2);
    assert!(engine.mesh_sink.get(&Point3::new(16, 16, 0)).is_some());
}

#[test]
fn test_restart_mid_stream_still_completes() {
    let mut engine = flat_engine();
    for _ in 0..5 {
        engine.tick(&viewer_at(0, 0));
    }
    assert!(engine.is_busy());

    stream_until_idle(&mut engine, &viewer_at(-32, 0));
    assert!(!engine.is_busy());
    let drawn = Point3::new(-32, 16, 0);
    assert_eq!(engine.world.get_chunk_at(&drawn).map(|c| c.status), Some(ChunkStatus::DRAWN));
    assert!(engine.mesh_sink.get(&drawn).is_some());
}

#[test]
fn test_streamed_terrain_accepts_edits() {
    let mut engine = flat_engine();
    stream_until_idle(&mut engine, &viewer_at(0, 0));

    let affected = engine.change_block(Point3::new(4, 20, 4), BlockType::AIR);
    assert_eq!(affected, vec![Point3::new(0, 16, 0)]);

    // The removed top face gives way to four walls and a floor.
    let mesh = engine.mesh_sink.get(&Point3::new(0, 16, 0)).expect("mesh");
    assert_eq!(mesh.triangle_count(), 512 + 4 * 2);
}

#[test]
fn test_heights_are_deterministic() {
    let config = EngineConfig::default();
    let first = BiomeModel::from_config(&config);
    let second = BiomeModel::from_config(&config);

    for origin in [Point3::new(0, 0, 0), Point3::new(-160, 0, 320), Point3::new(4096, 0, -4096)] {
        let a = Column::generate(origin, &first);
        let b = Column::generate(origin, &second);
        for z in 0..16 {
            for x in 0..16 {
                let height = a.height_at(x, z);
                assert_eq!(height, b.height_at(x, z));
                assert!((0..=config.max_world_height).contains(&height));
            }
        }
        assert_eq!(a.highest_point, b.highest_point);
        assert_eq!(a.is_poi_eligible, b.is_poi_eligible);
    }
}

#[test]
fn test_default_configuration_streams_to_completion() {
    let config = EngineConfig {
        render_radius: 2,
        viewer_poll_interval: 1,
        batch_size: 8,
        ..EngineConfig::default()
    };
    let mut engine = EngineState::new(config).expect("default configuration is valid");
    stream_until_idle(&mut engine, &viewer_at(0, 0));

    assert!(!engine.is_busy());
    let center = engine
        .world
        .get_column_at(&Point3::new(0, 0, 0))
        .expect("center column");
    for origin in center.draw_chunk_origins() {
        assert_eq!(engine.world.get_chunk_at(&origin).map(|c| c.status), Some(ChunkStatus::DRAWN));
    }
}
