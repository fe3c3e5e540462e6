//! Water vertex displacement and the monotonic clock that drives it.

use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::{WAVE_AMPLITUDE, WAVE_FREQUENCY};

/// Parameters of the standing-wave displacement applied in the vertex stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaveParams {
    /// Spatial frequency applied to both local x and y
    pub frequency: f32,
    /// Peak vertical offset, in local units
    pub amplitude: f32,
}

impl Default for WaveParams {
    fn default() -> Self {
        Self {
            frequency: WAVE_FREQUENCY,
            amplitude: WAVE_AMPLITUDE,
        }
    }
}

/// Vertical offset for a local-space vertex at time `t`.
///
/// `cos(x * f + t) * a * sin(y * f + t)`, so the result never exceeds the
/// amplitude in magnitude.
#[inline]
pub fn wave_offset(x: f32, y: f32, t: f32, params: &WaveParams) -> f32 {
    (x * params.frequency + t).cos() * params.amplitude * (y * params.frequency + t).sin()
}

/// Displaced local position of a water vertex. Only `z` changes; the mesh
/// lies in its local XY plane.
pub fn displace_vertex(position: Vec3, t: f32, params: &WaveParams) -> Vec3 {
    Vec3::new(
        position.x,
        position.y,
        position.z + wave_offset(position.x, position.y, t, params),
    )
}

/// Elapsed time fed to the water uniforms.
///
/// Never goes backwards: negative or non-finite deltas are dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WaterClock {
    elapsed: f32,
}

impl WaterClock {
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn advance(&mut self, delta_seconds: f32) -> f32 {
        if delta_seconds.is_finite() && delta_seconds > 0.0 {
            self.elapsed += delta_seconds;
        }
        self.elapsed
    }
}
