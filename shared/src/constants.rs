use bevy::prelude::*;

pub const WATER_BASE_COLOR: Vec4 = Vec4::new(0.0, 0.7, 1.0, 0.5);
pub const WAVE_FREQUENCY: f32 = 5.0;
pub const WAVE_AMPLITUDE: f32 = 0.1;
pub const RIPPLE_SCROLL_RATE: f32 = 0.002;
pub const RIPPLE_STRENGTH: f32 = 0.1;
pub const RIPPLE_TILING: f32 = 4.0;
pub const FOAM_THRESHOLD: f32 = 0.001;
pub const FOAM_BOOST: f32 = 0.2;
pub const MASK_COLOR: Vec4 = Vec4::ONE;

pub const DEFAULT_CAMERA_FOV_DEGREES: f32 = 7.0;
pub const DEFAULT_CAMERA_NEAR: f32 = 1.0;
pub const DEFAULT_CAMERA_FAR: f32 = 1000.0;
pub const DEFAULT_MIN_ORBIT_DISTANCE: f32 = 100.0;
pub const DEFAULT_MAX_ORBIT_DISTANCE: f32 = 500.0;

pub const TERRAIN_COLOR_HEX: u32 = 0x6B8E23;
pub const CONFIG_READ_ERROR: &str = "Failed to read scene config";
pub const CONFIG_PARSE_ERROR: &str = "Failed to parse scene config";
