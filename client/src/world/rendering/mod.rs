pub mod depth_capture;
pub mod depth_targets;
pub mod ripple_texture;
pub mod water;
pub mod water_material;

pub use depth_capture::*;
pub use depth_targets::*;
pub use water::*;
pub use water_material::*;

use bevy::prelude::*;

/// Water surface plus the depth captures it samples.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((DepthCapturePlugin, WaterPlugin));
    }
}
