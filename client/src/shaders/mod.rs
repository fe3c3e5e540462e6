//! Custom shaders for the scene.
//!
//! ## Water Shader
//! `water.wgsl` displaces the water mesh with a standing wave and composites
//! a translucent colour with scrolling ripples and depth-based shoreline foam.
//! `canyon_shared::water` holds the matching CPU reference.
//!
//! The shader is embedded in the binary so the app runs from any working
//! directory.

pub mod water_uniforms;

use bevy::{asset::embedded_asset, prelude::*};

/// Shader asset paths
pub mod paths {
    pub const WATER_SHADER: &str = "embedded://canyon_client/shaders/water.wgsl";
}

pub struct ShadersPlugin;

impl Plugin for ShadersPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "water.wgsl");
    }
}
