pub mod axes;
pub mod lighting;
pub mod props;
pub mod rendering;
pub mod terrain;

pub use axes::*;
pub use rendering::*;

use bevy::prelude::*;
use canyon_shared::sets::{SceneStartupSet, SceneUpdateSet};

/// Everything static in the scene, plus the water.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RenderingPlugin)
            .init_gizmo_group::<AxesGizmos>()
            .add_systems(
                Startup,
                (
                    lighting::setup_lighting,
                    terrain::spawn_terrain,
                    props::spawn_props,
                    configure_axes,
                )
                    .in_set(SceneStartupSet::World),
            )
            .add_systems(Update, toggle_axes.in_set(SceneUpdateSet::Input))
            .add_systems(Update, draw_axes.in_set(SceneUpdateSet::Rendering));
    }
}
