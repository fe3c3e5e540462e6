//! Orbit camera and stereo viewport math.

use std::f32::consts::FRAC_PI_2;

use bevy::math::{UVec2, Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::{DEFAULT_MAX_ORBIT_DISTANCE, DEFAULT_MIN_ORBIT_DISTANCE};

/// Keeps the camera off the poles, where yaw becomes degenerate.
const POLE_MARGIN: f32 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitLimits {
    pub min_distance: f32,
    pub max_distance: f32,
    pub zoom_enabled: bool,
    /// Radians per pixel of mouse motion
    pub rotate_speed: f32,
    /// Distance change per scroll line, as a fraction of the current radius
    pub zoom_speed: f32,
}

impl Default for OrbitLimits {
    fn default() -> Self {
        Self {
            min_distance: DEFAULT_MIN_ORBIT_DISTANCE,
            max_distance: DEFAULT_MAX_ORBIT_DISTANCE,
            zoom_enabled: false,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
        }
    }
}

/// Spherical coordinates of the eye around a focus point. Yaw is measured
/// around +Y from +Z, pitch is elevation above the horizontal plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitState {
    pub focus: Vec3,
    pub radius: f32,
    pub yaw: f32,
    pub pitch: f32,
}

impl OrbitState {
    /// State that puts the eye at `eye`, with the radius clamped to the limits.
    pub fn from_eye(eye: Vec3, focus: Vec3, limits: &OrbitLimits) -> Self {
        let offset = eye - focus;
        let radius = offset.length();
        let (yaw, pitch) = if radius > f32::EPSILON {
            (
                offset.x.atan2(offset.z),
                (offset.y / radius).clamp(-1.0, 1.0).asin(),
            )
        } else {
            (0.0, 0.0)
        };
        let mut state = Self {
            focus,
            radius,
            yaw,
            pitch,
        };
        state.clamp(limits);
        state
    }

    pub fn eye_position(&self) -> Vec3 {
        let horizontal = self.radius * self.pitch.cos();
        self.focus
            + Vec3::new(
                horizontal * self.yaw.sin(),
                self.radius * self.pitch.sin(),
                horizontal * self.yaw.cos(),
            )
    }

    /// Apply a mouse drag, in pixels.
    pub fn rotate(&mut self, drag: Vec2, limits: &OrbitLimits) {
        self.yaw -= drag.x * limits.rotate_speed;
        self.pitch += drag.y * limits.rotate_speed;
        self.clamp(limits);
    }

    /// Apply scroll lines; positive moves closer. No-op while zoom is disabled.
    pub fn zoom(&mut self, lines: f32, limits: &OrbitLimits) {
        if !limits.zoom_enabled {
            return;
        }
        self.radius *= 1.0 - lines * limits.zoom_speed;
        self.clamp(limits);
    }

    fn clamp(&mut self, limits: &OrbitLimits) {
        let max_pitch = FRAC_PI_2 - POLE_MARGIN;
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
        let max_distance = limits.max_distance.max(limits.min_distance);
        self.radius = self.radius.clamp(limits.min_distance, max_distance);
    }
}

/// Where each eye renders: `(position, size)` for the left then right half.
pub fn stereo_viewports(window: UVec2) -> [(UVec2, UVec2); 2] {
    let left_width = (window.x / 2).max(1);
    let right_width = window.x.saturating_sub(left_width).max(1);
    let height = window.y.max(1);
    [
        (UVec2::ZERO, UVec2::new(left_width, height)),
        (UVec2::new(left_width, 0), UVec2::new(right_width, height)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_near(a: Vec3, b: Vec3) {
        assert!((a - b).abs().max_element() < 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn test_round_trip_inside_limits() {
        let limits = OrbitLimits::default();
        let focus = Vec3::new(0.0, 3.0, 0.0);
        let eye = Vec3::new(150.0, 50.0, 20.0);
        let state = OrbitState::from_eye(eye, focus, &limits);
        assert_vec3_near(state.eye_position(), eye);
    }

    #[test]
    fn test_start_position_is_pushed_to_min_distance() {
        let limits = OrbitLimits::default();
        let focus = Vec3::new(0.0, 3.0, 0.0);
        let state = OrbitState::from_eye(Vec3::new(15.0, 5.0, 0.0), focus, &limits);
        assert!((state.radius - 100.0).abs() < 1e-4);
        let eye = state.eye_position();
        // Same direction, further out
        let direction = (eye - focus).normalize();
        assert_vec3_near(direction, (Vec3::new(15.0, 2.0, 0.0)).normalize());
    }

    #[test]
    fn test_zoom_disabled_by_default() {
        let limits = OrbitLimits::default();
        let mut state = OrbitState::from_eye(Vec3::new(0.0, 0.0, 200.0), Vec3::ZERO, &limits);
        state.zoom(5.0, &limits);
        assert_eq!(state.radius, 200.0);
    }

    #[test]
    fn test_zoom_is_clamped() {
        let limits = OrbitLimits {
            zoom_enabled: true,
            ..Default::default()
        };
        let mut state = OrbitState::from_eye(Vec3::new(0.0, 0.0, 200.0), Vec3::ZERO, &limits);
        for _ in 0..100 {
            state.zoom(5.0, &limits);
        }
        assert_eq!(state.radius, limits.min_distance);
        for _ in 0..100 {
            state.zoom(-5.0, &limits);
        }
        assert_eq!(state.radius, limits.max_distance);
    }

    #[test]
    fn test_pitch_stops_short_of_the_pole() {
        let limits = OrbitLimits::default();
        let mut state = OrbitState::from_eye(Vec3::new(0.0, 0.0, 200.0), Vec3::ZERO, &limits);
        state.rotate(Vec2::new(0.0, 1.0e6), &limits);
        assert!(state.pitch < FRAC_PI_2);
        assert!(state.eye_position().is_finite());
    }

    #[test]
    fn test_stereo_viewports_cover_the_window() {
        let [(left_pos, left_size), (right_pos, right_size)] =
            stereo_viewports(UVec2::new(1025, 768));
        assert_eq!(left_pos, UVec2::ZERO);
        assert_eq!(left_size, UVec2::new(512, 768));
        assert_eq!(right_pos, UVec2::new(512, 0));
        assert_eq!(right_size, UVec2::new(513, 768));
    }
}
