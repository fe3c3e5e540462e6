//! Water surface entities and their per-frame uniforms.

use std::f32::consts::FRAC_PI_2;

use bevy::{pbr::NotShadowCaster, prelude::*, render::view::RenderLayers};
use canyon_shared::{
    sets::{SceneStartupSet, SceneUpdateSet},
    water::WaterClock,
};

use super::{
    depth_targets::{
        allocate_depth_targets, spawn_depth_cameras, sync_capture_size, DepthTargets,
    },
    ripple_texture::ripple_image,
    water_material::WaterMaterial,
};
use crate::{
    constants::{WATER_LAYER, WATER_MASK_LAYER},
    shaders::water_uniforms::WaterUniforms,
    SceneSettings,
};

/// Plugin that registers the water material and drives its uniforms.
pub struct WaterPlugin;

impl Plugin for WaterPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<WaterMaterial> {
            prepass_enabled: false,
            shadows_enabled: false,
            ..default()
        })
        .init_resource::<WaterTime>()
        .add_systems(
            Startup,
            (allocate_depth_targets, spawn_depth_cameras, spawn_water)
                .chain()
                .in_set(SceneStartupSet::Water),
        )
        .add_systems(
            Update,
            (
                sync_capture_size,
                update_water_time,
                reveal_water_when_targets_ready,
            )
                .chain()
                .in_set(SceneUpdateSet::Water),
        );
    }
}

/// Resource tracking time for water animation.
#[derive(Resource, Default)]
pub struct WaterTime(pub WaterClock);

/// Marker for both water meshes (the visible surface and its depth mask).
#[derive(Component)]
pub struct WaterSurface;

pub fn water_mesh(size: Vec2, subdivisions: u32) -> Mesh {
    // Local XY plane, so the shader displaces along local z
    Plane3d::new(Vec3::Z, size * 0.5)
        .mesh()
        .subdivisions(subdivisions)
        .build()
}

pub fn spawn_water(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    targets: Option<Res<DepthTargets>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<WaterMaterial>>,
) {
    let Some(targets) = targets else {
        warn!("Depth targets missing, skipping water");
        return;
    };
    let water = &settings.water;
    let uniforms = WaterUniforms::new(
        water,
        settings.camera.near,
        settings.camera.far,
        targets.size.screen_size_uniform(),
    );
    let ripple_texture = images.add(ripple_image(&water.ripple_texture));
    let mesh = meshes.add(water_mesh(water.size, water.subdivisions));
    // Lay the XY plane flat, local +z becomes world +y
    let transform =
        Transform::from_translation(water.position).with_rotation(Quat::from_rotation_x(-FRAC_PI_2));

    commands.spawn((
        Name::new("water"),
        WaterSurface,
        Mesh3d(mesh.clone()),
        MeshMaterial3d(materials.add(WaterMaterial::surface(
            uniforms,
            ripple_texture.clone(),
            &targets,
        ))),
        transform,
        RenderLayers::layer(WATER_LAYER),
        NotShadowCaster,
        Visibility::Hidden,
    ));
    commands.spawn((
        Name::new("water depth mask"),
        WaterSurface,
        Mesh3d(mesh),
        MeshMaterial3d(materials.add(WaterMaterial::mask(uniforms, ripple_texture, &targets))),
        transform,
        RenderLayers::layer(WATER_MASK_LAYER),
        NotShadowCaster,
        Visibility::Hidden,
    ));
    info!(
        "Water surface spawned at {:?} ({} x {})",
        water.position, water.size.x, water.size.y
    );
}

/// System to advance water time each frame and push it to every water material.
fn update_water_time(
    time: Res<Time>,
    mut water_time: ResMut<WaterTime>,
    mut materials: ResMut<Assets<WaterMaterial>>,
) {
    let elapsed = water_time.0.advance(time.delta_secs());
    for (_, material) in materials.iter_mut() {
        material.uniforms.time = elapsed;
    }
}

/// Water samples both depth captures, so it stays hidden until they exist.
fn reveal_water_when_targets_ready(
    targets: Option<Res<DepthTargets>>,
    images: Res<Assets<Image>>,
    mut water: Query<&mut Visibility, With<WaterSurface>>,
) {
    let ready = targets.is_some_and(|targets| targets.is_allocated(&images));
    let wanted = if ready {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut water {
        visibility.set_if_neq(wanted);
    }
}
