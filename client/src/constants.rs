use bevy::render::view::Layer;

pub const BINDS_PATH: &str = "keybindings.ron";
pub const DEFAULT_CONFIG_DIR: &str = ".";
pub const DEFAULT_ASSETS_DIR: &str = "assets";

/// Terrain, props and characters. Bevy's default layer.
pub const SCENE_LAYER: Layer = 0;
/// The translucent water the main view shows.
pub const WATER_LAYER: Layer = 1;
/// The opaque water used only by the scene-with-water depth capture.
pub const WATER_MASK_LAYER: Layer = 2;

pub const SCENE_DEPTH_CAMERA_ORDER: isize = -2;
pub const SCENE_WITH_WATER_DEPTH_CAMERA_ORDER: isize = -1;
pub const RIGHT_EYE_CAMERA_ORDER: isize = 1;

/// Logical pixels per scroll line when the wheel reports pixels.
pub const PIXELS_PER_SCROLL_LINE: f32 = 16.0;
/// Debug gizmos. Only the window cameras see it, so the depth captures stay clean.
pub const DEBUG_LAYER: Layer = 3;
