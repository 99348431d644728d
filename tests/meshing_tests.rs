/// Integration tests for chunk meshing and block edits.
/// These build small hand-made worlds and check the geometry handed to the mesh sink.
use cgmath::{Point3, Vector3};
use voxel_terrain::engine_state::rendering::meshing::shapes::ShapeDescriptor;
use voxel_terrain::engine_state::voxels::block::shape::{Rotation, ShapeType};
use voxel_terrain::engine_state::voxels::chunk::{ChunkStatus, Composition};
use voxel_terrain::engine_state::voxels::column::Column;
use voxel_terrain::engine_state::voxels::world::World;
use voxel_terrain::{BlockType, ChunkMesh, MeshStore};

/// Inserts a flat column at each origin and a generated chunk at y = 0 above it.
fn flat_layer(origins: &[Point3<i32>], height: i32, block_type: BlockType) -> World {
    let mut world = World::new();
    for origin in origins {
        world.insert_column(Column::flat(*origin, height, block_type));
        world.add_chunk_at(*origin);
        assert!(world.generate_chunk(*origin));
    }
    world
}

fn three_by_three() -> Vec<Point3<i32>> {
    let mut origins = Vec::new();
    for dz in -1..=1 {
        for dx in -1..=1 {
            origins.push(Point3::new(dx * 16, 0, dz * 16));
        }
    }
    origins
}

fn assert_consistent(mesh: &ChunkMesh) {
    assert_eq!(mesh.vertices.len(), mesh.normals.len());
    assert_eq!(mesh.vertices.len(), mesh.colors.len());
    assert_eq!(mesh.triangles.len() % 3, 0);
    assert!(mesh
        .triangles
        .iter()
        .all(|index| (*index as usize) < mesh.vertices.len()));
}

#[test]
fn test_flat_chunk_meshes_only_its_top_surface() {
    let origin = Point3::new(0, 0, 0);
    let mut world = flat_layer(&[origin], 10, BlockType::STONE);

    let above = Point3::new(0, 16, 0);
    world.add_chunk_at(above);
    assert!(world.generate_chunk(above));
    assert_eq!(world.get_chunk_at(&above).map(|c| c.composition), Some(Composition::EMPTY));
    assert_eq!(world.get_chunk_at(&origin).map(|c| c.composition), Some(Composition::MIX));

    let mut store = MeshStore::new();
    assert!(world.draw_chunk(origin, &mut store));
    assert!(world.draw_chunk(above, &mut store));

    let mesh = store.get(&origin).expect("flat chunk should have a mesh");
    assert_eq!(mesh.vertex_count(), 1024);
    assert_eq!(mesh.triangle_count(), 512);
    assert!(mesh.normals.iter().all(|n| *n == Vector3::new(0.0, 1.0, 0.0)));
    assert!(mesh.colors.iter().all(|c| *c == BlockType::STONE.color()));
    assert_consistent(mesh);

    // The empty chunk is skipped and never reaches the store.
    assert!(store.get(&above).is_none());
    assert_eq!(world.get_chunk_at(&above).map(|c| c.status), Some(ChunkStatus::DRAWN));
}

#[test]
fn test_missing_neighbours_hide_chunk_borders() {
    let origin = Point3::new(0, 0, 0);
    let mut world = flat_layer(&[origin], 100, BlockType::DIRT);
    assert_eq!(world.get_chunk_at(&origin).map(|c| c.composition), Some(Composition::SOLID));

    let mut store = MeshStore::new();
    world.draw_chunk(origin, &mut store);

    // Every border face looks into unknown territory, so nothing is drawn.
    assert!(store.get(&origin).is_none());
    assert_eq!(store.remove_count(), 1);
}

#[test]
fn test_digging_a_border_voxel_redraws_both_chunks() {
    let mut world = flat_layer(&three_by_three(), 100, BlockType::STONE);
    let mut store = MeshStore::new();
    for origin in three_by_three() {
        world.draw_chunk(origin, &mut store);
    }
    // Solid chunks bounded by unknown territory above and below show nothing yet.
    assert!(store.is_empty());

    let center = Point3::new(0, 0, 0);
    let left = Point3::new(-16, 0, 0);
    let affected = world.change_block(Point3::new(0, 5, 5), BlockType::AIR, &mut store);
    assert_eq!(affected, vec![center, left]);

    let center_chunk = world.get_chunk_at(&center).expect("center chunk");
    assert_eq!(center_chunk.composition, Composition::MIX);
    assert_eq!(center_chunk.status, ChunkStatus::DRAWN);
    assert_eq!(world.get_chunk_at(&left).map(|c| c.status), Some(ChunkStatus::DRAWN));

    // The five voxels around the hole inside the edited chunk each show one face.
    let center_mesh = store.get(&center).expect("edited chunk should have a mesh");
    assert_eq!(center_mesh.vertex_count(), 20);
    assert_eq!(center_mesh.triangle_count(), 10);
    assert_consistent(center_mesh);

    // The neighbour across the border shows a single face looking into the hole.
    let left_mesh = store.get(&left).expect("neighbour should have a mesh");
    assert_eq!(left_mesh.vertex_count(), 4);
    assert!(left_mesh.normals.iter().all(|n| *n == Vector3::new(1.0, 0.0, 0.0)));
    assert_consistent(left_mesh);

    assert_eq!(store.len(), 2);
}

#[test]
fn test_edits_in_unknown_territory_are_ignored() {
    let mut world = flat_layer(&[Point3::new(0, 0, 0)], 10, BlockType::DIRT);
    let mut store = MeshStore::new();

    assert!(world
        .change_block(Point3::new(40, 5, 40), BlockType::AIR, &mut store)
        .is_empty());

    world.add_chunk_at(Point3::new(0, 16, 0));
    assert!(world
        .change_block(Point3::new(3, 20, 3), BlockType::STONE, &mut store)
        .is_empty());
    assert_eq!(store.upload_count() + store.remove_count(), 0);
}

#[test]
fn test_filling_air_above_the_surface_adds_a_cube() {
    let origin = Point3::new(0, 0, 0);
    let mut world = flat_layer(&[origin], 10, BlockType::GRASS);
    let mut store = MeshStore::new();
    world.draw_chunk(origin, &mut store);
    let before = store.get(&origin).map(ChunkMesh::vertex_count).unwrap_or(0);

    let affected = world.change_block(Point3::new(8, 11, 8), BlockType::SNOW, &mut store);
    assert_eq!(affected, vec![origin]);

    // One top face is covered, five faces of the new block appear.
    let mesh = store.get(&origin).expect("mesh after edit");
    assert_eq!(mesh.vertex_count(), before + 4 * 4);
    assert_eq!(
        mesh.colors.iter().filter(|c| **c == BlockType::SNOW.color()).count(),
        5 * 4
    );
    assert_consistent(mesh);
}

#[test]
fn test_vertex_buffers_match_mesh_layout() {
    let origin = Point3::new(0, 0, 0);
    let mut world = flat_layer(&[origin], 3, BlockType::SAND);
    let mut store = MeshStore::new();
    world.draw_chunk(origin, &mut store);

    let mesh = store.get(&origin).expect("mesh");
    let vertices = mesh.to_vertices();
    assert_eq!(vertices.len(), mesh.vertex_count());
    assert_eq!(mesh.index_bytes().len(), mesh.triangles.len() * 4);
    for (vertex, position) in vertices.iter().zip(&mesh.vertices) {
        assert_eq!(vertex.position, [position.x, position.y, position.z]);
    }
}

#[test]
fn test_every_shape_keeps_outward_normals() {
    let shapes = [
        ShapeType::CUBE,
        ShapeType::WEDGE,
        ShapeType::CORNER_IN,
        ShapeType::CORNER_OUT,
        ShapeType::CORNER_OUT2,
    ];
    let rotations = [Rotation::FRONT, Rotation::RIGHT, Rotation::BACK, Rotation::LEFT];

    for shape in shapes {
        for rotation in rotations {
            for face in ShapeDescriptor::for_shape(shape).faces {
                let normal = face.normal(rotation);
                assert!((cgmath::InnerSpace::magnitude(normal) - 1.0).abs() < 1e-4);

                // Faces are drawn from a unit cell, so their centre sits inside it
                // and the normal points away from the cell centre.
                let vertices: Vec<_> = face.vertices(rotation, Vector3::new(0.0, 0.0, 0.0)).collect();
                let count = vertices.len() as f32;
                let centroid = vertices
                    .iter()
                    .fold(Vector3::new(0.0, 0.0, 0.0), |acc, v| acc + *v)
                    / count;
                let from_center = centroid - Vector3::new(0.5, 0.5, 0.5);
                assert!(
                    cgmath::dot(from_center, normal) > -1e-4,
                    "{:?} {:?} face points inward",
                    shape,
                    rotation
                );
            }
        }
    }
}
