//! Water shader uniform data
//!
//! Separated into its own module to isolate the `#![allow(dead_code)]` directive,
//! which is required due to the ShaderType derive macro generating internal
//! `check` functions that trigger warnings.

#![allow(dead_code)]

use bevy::{prelude::*, render::render_resource::ShaderType};
use canyon_shared::{
    config::WaterSettings,
    water::{WaterShading, WaveParams},
};

/// Uniform data for the water shader (matches the WGSL `WaterUniforms` struct)
#[derive(ShaderType, Debug, Clone, Copy, PartialEq)]
pub struct WaterUniforms {
    /// Base colour, straight alpha
    pub base_color: Vec4,
    /// `(w, h, 1/w, 1/h)` of the depth captures, in physical pixels
    pub screen_size: Vec4,
    /// Elapsed seconds, never decreasing
    pub time: f32,
    pub wave_amplitude: f32,
    pub wave_frequency: f32,
    pub ripple_strength: f32,
    pub ripple_scroll_rate: f32,
    pub ripple_tiling: f32,
    pub foam_threshold: f32,
    pub foam_boost: f32,
    pub camera_near: f32,
    pub camera_far: f32,
    /// Non-zero draws solid white, for the scene-with-water depth capture
    pub mask: u32,
}

impl WaterUniforms {
    pub fn new(settings: &WaterSettings, near: f32, far: f32, screen_size: Vec4) -> Self {
        let WaveParams {
            frequency,
            amplitude,
        } = settings.wave;
        let WaterShading {
            base_color,
            ripple_strength,
            ripple_scroll_rate,
            ripple_tiling,
            foam_threshold,
            foam_boost,
        } = settings.shading;
        Self {
            base_color,
            screen_size,
            time: 0.0,
            wave_amplitude: amplitude,
            wave_frequency: frequency,
            ripple_strength,
            ripple_scroll_rate,
            ripple_tiling,
            foam_threshold,
            foam_boost,
            camera_near: near,
            camera_far: far,
            mask: 0,
        }
    }

    pub fn masked(mut self) -> Self {
        self.mask = 1;
        self
    }
}
