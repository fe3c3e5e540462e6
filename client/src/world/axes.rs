use bevy::{prelude::*, render::view::RenderLayers};

use crate::{
    constants::DEBUG_LAYER,
    input::{is_action_just_pressed, KeyMap, SceneAction},
    SceneSettings,
};

/// World axes at the origin: x red, y green, z blue.
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct AxesGizmos;

pub fn configure_axes(mut store: ResMut<GizmoConfigStore>, settings: Res<SceneSettings>) {
    let (config, _) = store.config_mut::<AxesGizmos>();
    config.enabled = settings.show_axes;
    config.render_layers = RenderLayers::layer(DEBUG_LAYER);
}

pub fn toggle_axes(
    keyboard: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut store: ResMut<GizmoConfigStore>,
) {
    if is_action_just_pressed(SceneAction::ToggleAxes, &keyboard, &key_map) {
        let (config, _) = store.config_mut::<AxesGizmos>();
        config.enabled = !config.enabled;
    }
}

pub fn draw_axes(mut gizmos: Gizmos<AxesGizmos>, settings: Res<SceneSettings>) {
    gizmos.axes(Transform::IDENTITY, settings.axes_length);
}
