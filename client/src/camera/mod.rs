pub mod orbit;
pub mod stereo;

pub use orbit::*;
pub use stereo::*;

use bevy::{
    pbr::{DistanceFog, FogFalloff},
    prelude::*,
    render::view::RenderLayers,
    ui::IsDefaultUiCamera,
};
use canyon_shared::{
    camera::OrbitState,
    config::CameraSettings,
    sets::{SceneStartupSet, SceneUpdateSet},
    terrain::srgb_hex_components,
};

use crate::{
    constants::{DEBUG_LAYER, SCENE_LAYER, WATER_LAYER},
    SceneSettings,
};

/// The window camera. Depth capture and right-eye cameras are its children.
#[derive(Component)]
pub struct MainCamera;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StereoMode>().add_systems(
            Startup,
            (spawn_main_camera, spawn_right_eye_camera)
                .chain()
                .in_set(SceneStartupSet::Camera),
        )
        .add_systems(
            Update,
            (toggle_stereo, orbit_camera).in_set(SceneUpdateSet::Input),
        )
        .add_systems(Update, apply_stereo_layout.in_set(SceneUpdateSet::Rendering));
    }
}

pub fn hex_color(hex: u32) -> Color {
    let [red, green, blue] = srgb_hex_components(hex);
    Color::srgb(red, green, blue)
}

/// Every camera that looks at the scene shares this projection, so depth
/// captures line up with the main view pixel for pixel.
pub fn main_camera_projection(settings: &CameraSettings) -> Projection {
    Projection::Perspective(PerspectiveProjection {
        fov: settings.fov_degrees.to_radians(),
        near: settings.near,
        far: settings.far,
        ..default()
    })
}

fn spawn_main_camera(mut commands: Commands, settings: Res<SceneSettings>) {
    let camera = &settings.camera;
    let orbit = OrbitState::from_eye(camera.position, camera.focus, &camera.orbit);
    let background = hex_color(camera.background);

    commands.spawn((
        Name::new("main camera"),
        MainCamera,
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(background),
            ..default()
        },
        main_camera_projection(camera),
        orbit_transform(&orbit),
        DistanceFog {
            color: background,
            falloff: FogFalloff::Linear {
                start: camera.fog_start,
                end: camera.fog_end,
            },
            ..default()
        },
        RenderLayers::from_layers(&[SCENE_LAYER, WATER_LAYER, DEBUG_LAYER]),
        IsDefaultUiCamera,
        OrbitCamera(orbit),
    ));
    info!(
        "Main camera at {:?} looking at {:?}",
        orbit.eye_position(),
        orbit.focus
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use canyon_shared::config::SceneConfig;

    #[test]
    fn test_projection_uses_configured_planes() {
        let settings = CameraSettings::default();
        let Projection::Perspective(perspective) = main_camera_projection(&settings) else {
            panic!("expected a perspective projection");
        };
        assert!((perspective.fov - 7.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(perspective.near, 1.0);
        assert_eq!(perspective.far, 1000.0);
    }

    #[test]
    fn test_hex_color_white() {
        assert_eq!(hex_color(0xffffff), Color::srgb(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_main_camera_starts_on_orbit() {
        let mut app = App::new();
        app.insert_resource(SceneSettings(SceneConfig::default()))
            .add_systems(Startup, spawn_main_camera);
        app.update();

        let world = app.world_mut();
        let mut cameras = world.query_filtered::<(&Transform, &OrbitCamera), With<MainCamera>>();
        let (transform, orbit) = cameras.single(world).unwrap();
        let settings = CameraSettings::default();
        // Configured eye is inside the minimum distance, so it is pushed out
        assert!((orbit.0.radius - settings.orbit.min_distance).abs() < 1e-3);
        assert!((transform.translation - orbit.0.eye_position()).length() < 1e-3);
        let forward = transform.forward();
        let to_focus = (settings.focus - transform.translation).normalize();
        assert!(forward.dot(to_focus) > 0.999);
    }
}
