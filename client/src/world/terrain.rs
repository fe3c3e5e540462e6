use bevy::{
    asset::RenderAssetUsages,
    prelude::*,
    render::mesh::PrimitiveTopology,
};
use canyon_shared::terrain::{srgb_hex_components, TerrainGrid, TerrainSettings};

use crate::SceneSettings;

/// Flat-shaded, non-indexed triangle list with one vertex colour.
pub fn terrain_mesh(settings: &TerrainSettings) -> Mesh {
    let positions = TerrainGrid::generate(settings).to_triangle_list();
    let [red, green, blue] = srgb_hex_components(settings.color);
    // Vertex colours are linear
    let color = LinearRgba::from(Color::srgb(red, green, blue)).to_f32_array();
    let colors = vec![color; positions.len()];

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    mesh.compute_flat_normals();
    mesh
}

pub fn spawn_terrain(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let terrain = &settings.terrain;
    commands.spawn((
        Name::new("terrain"),
        Mesh3d(meshes.add(terrain_mesh(terrain))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            ..default()
        })),
        Transform::IDENTITY,
    ));
    debug!(
        "Terrain: {} x {} segments over {} units",
        terrain.segments, terrain.segments, terrain.size
    );
}
