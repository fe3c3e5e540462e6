//! Mouse-driven orbit around a fixed focus point.

use bevy::{
    input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit},
    prelude::*,
};
use canyon_shared::camera::{OrbitLimits, OrbitState};

use crate::{constants::PIXELS_PER_SCROLL_LINE, SceneSettings};

#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitCamera(pub OrbitState);

pub fn orbit_transform(orbit: &OrbitState) -> Transform {
    Transform::from_translation(orbit.eye_position()).looking_at(orbit.focus, Vec3::Y)
}

/// Scroll in lines, positive towards the focus.
pub fn scroll_lines(unit: MouseScrollUnit, delta_y: f32) -> f32 {
    match unit {
        MouseScrollUnit::Line => delta_y,
        MouseScrollUnit::Pixel => delta_y / PIXELS_PER_SCROLL_LINE,
    }
}

/// Returns `true` when the orbit moved.
pub fn apply_orbit_input(
    orbit: &mut OrbitState,
    drag: Option<Vec2>,
    lines: f32,
    limits: &OrbitLimits,
) -> bool {
    let before = *orbit;
    if let Some(drag) = drag {
        orbit.rotate(drag, limits);
    }
    if lines != 0.0 {
        orbit.zoom(lines, limits);
    }
    *orbit != before
}

pub fn orbit_camera(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    settings: Res<SceneSettings>,
    mut cameras: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    let drag = (mouse_buttons.pressed(MouseButton::Left) && motion.delta != Vec2::ZERO)
        .then_some(motion.delta);
    let lines = scroll_lines(scroll.unit, scroll.delta.y);
    let limits = &settings.camera.orbit;

    for (mut orbit, mut transform) in &mut cameras {
        if apply_orbit_input(&mut orbit.0, drag, lines, limits) {
            *transform = orbit_transform(&orbit.0);
        }
    }
}
