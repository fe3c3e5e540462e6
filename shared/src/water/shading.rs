//! Fragment compositing for the water surface.
//!
//! Foam comes from differencing two depth captures of the same view: one of
//! the scene alone, one of the scene with the water surface drawn opaque. Where
//! the two nearly coincide the water touches geometry, and the colour is
//! boosted.

use bevy::math::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::{
    FOAM_BOOST, FOAM_THRESHOLD, MASK_COLOR, RIPPLE_SCROLL_RATE, RIPPLE_STRENGTH, RIPPLE_TILING,
    WATER_BASE_COLOR,
};

/// How raw depth-buffer values map to distance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DepthConvention {
    /// `0` at the near plane, `1` at the far plane, perspective-divided.
    #[default]
    Standard,
    /// `1` at the near plane, tending to `0` at infinity. What Bevy writes.
    ReverseInfinite,
}

/// Tunables of the fragment stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterShading {
    pub base_color: Vec4,
    /// Fraction of the ripple texture's red channel added to the colour
    pub ripple_strength: f32,
    /// Texture units per second the ripple texture scrolls along v
    pub ripple_scroll_rate: f32,
    /// How many times the ripple texture repeats across the surface
    pub ripple_tiling: f32,
    pub foam_threshold: f32,
    pub foam_boost: f32,
}

impl Default for WaterShading {
    fn default() -> Self {
        Self {
            base_color: WATER_BASE_COLOR,
            ripple_strength: RIPPLE_STRENGTH,
            ripple_scroll_rate: RIPPLE_SCROLL_RATE,
            ripple_tiling: RIPPLE_TILING,
            foam_threshold: FOAM_THRESHOLD,
            foam_boost: FOAM_BOOST,
        }
    }
}

/// Per-pixel inputs of the fragment stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FragmentInputs {
    pub time: f32,
    /// Red channel of the ripple texture at `ripple_uv(..)`
    pub ripple_red: f32,
    /// Raw sample of the scene-only depth capture
    pub scene_depth: f32,
    /// Raw sample of the scene-plus-water depth capture
    pub scene_with_water_depth: f32,
    pub near: f32,
    pub far: f32,
    pub mask: bool,
    pub convention: DepthConvention,
}

/// Texture coordinate the ripple texture is sampled at: the mesh UV tiled,
/// then scrolled along v and wrapped into `[0, 1)`. The sampler repeats, so u
/// is left unwrapped.
pub fn ripple_uv(uv: Vec2, time: f32, shading: &WaterShading) -> Vec2 {
    let tiled = uv * shading.ripple_tiling;
    Vec2::new(
        tiled.x,
        (tiled.y + shading.ripple_scroll_rate * time).rem_euclid(1.0),
    )
}

/// Linear depth in `[0, 1]` between the near and far planes.
pub fn linear_depth(raw: f32, near: f32, far: f32, convention: DepthConvention) -> f32 {
    match convention {
        DepthConvention::Standard => {
            let view_z = (near * far) / ((far - near) * raw - far);
            (view_z + near) / (near - far)
        }
        DepthConvention::ReverseInfinite => {
            if raw <= 0.0 {
                // Cleared depth, nothing was drawn
                return 1.0;
            }
            let distance = near / raw;
            (distance - near) / (far - near)
        }
    }
}

/// `clamp(scene - scene_with_water, 0, 1)`. A NaN difference reads as `1.0`,
/// i.e. no foam, so NaN never reaches the output colour.
pub fn foam_line(scene_depth: f32, scene_with_water_depth: f32) -> f32 {
    let difference = scene_depth - scene_with_water_depth;
    if difference.is_nan() {
        return 1.0;
    }
    difference.clamp(0.0, 1.0)
}

/// Output colour of one water fragment, before any clamping by the backend.
pub fn shade_fragment(inputs: &FragmentInputs, shading: &WaterShading) -> Vec4 {
    if inputs.mask {
        return MASK_COLOR;
    }

    let mut color = shading.base_color;
    let ripple = if inputs.ripple_red.is_finite() {
        inputs.ripple_red
    } else {
        0.0
    };
    color += Vec4::splat(ripple * shading.ripple_strength);

    let scene = linear_depth(inputs.scene_depth, inputs.near, inputs.far, inputs.convention);
    let with_water = linear_depth(
        inputs.scene_with_water_depth,
        inputs.near,
        inputs.far,
        inputs.convention,
    );
    if foam_line(scene, with_water) < shading.foam_threshold {
        color += Vec4::splat(shading.foam_boost);
    }

    color
}
