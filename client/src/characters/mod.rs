pub mod goat;

pub use goat::*;

use bevy::prelude::*;
use canyon_shared::sets::{SceneStartupSet, SceneUpdateSet};

pub struct CharactersPlugin;

impl Plugin for CharactersPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_goats.in_set(SceneStartupSet::Characters))
            .add_systems(Update, restart_goats.in_set(SceneUpdateSet::Input))
            .add_systems(
                Update,
                (
                    bind_animation_players,
                    learn_clip_durations,
                    advance_goats,
                    sync_animation_players,
                )
                    .chain()
                    .in_set(SceneUpdateSet::Animation),
            );
    }
}
