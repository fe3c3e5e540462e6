//! Side-by-side stereo. The main camera becomes the left eye and a child
//! camera, offset along the local x axis, draws the right half.

use bevy::{
    pbr::{DistanceFog, FogFalloff},
    prelude::*,
    render::{camera::Viewport, view::RenderLayers},
    window::{PrimaryWindow, WindowResized},
};
use canyon_shared::camera::stereo_viewports;

use super::{hex_color, main_camera_projection, MainCamera};
use crate::{
    constants::{DEBUG_LAYER, RIGHT_EYE_CAMERA_ORDER, SCENE_LAYER, WATER_LAYER},
    input::{is_action_just_pressed, KeyMap, SceneAction},
    SceneSettings,
};

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StereoMode {
    pub enabled: bool,
}

#[derive(Component)]
pub struct RightEyeCamera;

/// Viewports for the left and right eye. Mono mode gives the left eye the
/// whole window and disables the right.
pub fn eye_viewports(enabled: bool, window: UVec2) -> (Option<Viewport>, Option<Viewport>) {
    if !enabled {
        return (None, None);
    }
    let [left, right] = stereo_viewports(window).map(|(position, size)| Viewport {
        physical_position: position,
        physical_size: size,
        ..default()
    });
    (Some(left), Some(right))
}

pub fn spawn_right_eye_camera(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    mut stereo: ResMut<StereoMode>,
    main_camera: Query<Entity, With<MainCamera>>,
) {
    stereo.enabled = settings.stereo.start_enabled;
    let Ok(main_camera) = main_camera.single() else {
        warn!("Main camera missing, stereo unavailable");
        return;
    };
    let camera = &settings.camera;
    let background = hex_color(camera.background);

    commands.entity(main_camera).with_children(|parent| {
        parent.spawn((
            Name::new("right eye camera"),
            RightEyeCamera,
            Camera3d::default(),
            Camera {
                order: RIGHT_EYE_CAMERA_ORDER,
                is_active: false,
                clear_color: ClearColorConfig::Custom(background),
                ..default()
            },
            main_camera_projection(camera),
            Transform::from_xyz(settings.stereo.eye_separation, 0.0, 0.0),
            DistanceFog {
                color: background,
                falloff: FogFalloff::Linear {
                    start: camera.fog_start,
                    end: camera.fog_end,
                },
                ..default()
            },
            RenderLayers::from_layers(&[SCENE_LAYER, WATER_LAYER, DEBUG_LAYER]),
        ));
    });
}

pub fn toggle_stereo(
    keyboard: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut stereo: ResMut<StereoMode>,
) {
    if is_action_just_pressed(SceneAction::ToggleStereo, &keyboard, &key_map) {
        stereo.enabled = !stereo.enabled;
        info!(
            "Stereo {}",
            if stereo.enabled { "enabled" } else { "disabled" }
        );
    }
}

/// Recompute both eyes' viewports when stereo is toggled or the window resizes.
pub fn apply_stereo_layout(
    stereo: Res<StereoMode>,
    mut resize_events: EventReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut left: Query<&mut Camera, (With<MainCamera>, Without<RightEyeCamera>)>,
    mut right: Query<&mut Camera, (With<RightEyeCamera>, Without<MainCamera>)>,
) {
    let resized = resize_events.read().last().is_some();
    if !stereo.is_changed() && !resized {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    let (left_viewport, right_viewport) = eye_viewports(stereo.enabled, window.physical_size());

    if let Ok(mut camera) = left.single_mut() {
        camera.viewport = left_viewport;
    }
    if let Ok(mut camera) = right.single_mut() {
        camera.is_active = stereo.enabled;
        camera.viewport = right_viewport;
    }
}
