pub mod hud;
pub mod style;

use bevy::prelude::*;
use canyon_shared::sets::{SceneStartupSet, SceneUpdateSet};

use crate::ui::hud::{
    key_hints::setup_key_hints,
    loading_overlay::{setup_loading_overlay, update_load_status, update_loading_overlay},
};

pub struct SceneUiPlugin;

impl Plugin for SceneUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Startup,
            (setup_loading_overlay, setup_key_hints)
                .chain()
                .in_set(SceneStartupSet::Ui),
        )
        .add_systems(
            Update,
            (update_loading_overlay, update_load_status).in_set(SceneUpdateSet::Ui),
        );
    }
}
