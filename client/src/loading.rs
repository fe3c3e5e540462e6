//! Polls the asset server and records outcomes in the `LoadLedger`.

use bevy::{asset::RecursiveDependencyLoadState, prelude::*};
use canyon_shared::{
    loading::{AssetStatus, LoadLedger},
    sets::SceneUpdateSet,
};

pub struct LoadingPlugin;

impl Plugin for LoadingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadLedger>()
            .init_resource::<TrackedAssets>()
            .add_systems(Update, poll_asset_loads.in_set(SceneUpdateSet::Loading));
    }
}

/// Handles whose load outcome the ledger reports, by ledger name.
#[derive(Resource, Default)]
pub struct TrackedAssets {
    handles: Vec<(String, UntypedHandle)>,
}

impl TrackedAssets {
    pub fn track(
        &mut self,
        ledger: &mut LoadLedger,
        name: impl Into<String>,
        handle: impl Into<UntypedHandle>,
    ) {
        let name = name.into();
        ledger.register(name.clone());
        self.handles.push((name, handle.into()));
    }
}

pub fn status_from_load_state(state: &RecursiveDependencyLoadState) -> AssetStatus {
    match state {
        RecursiveDependencyLoadState::Loaded => AssetStatus::Ready,
        RecursiveDependencyLoadState::Failed(err) => AssetStatus::Failed(err.to_string()),
        RecursiveDependencyLoadState::NotLoaded | RecursiveDependencyLoadState::Loading => {
            AssetStatus::Pending
        }
    }
}

fn poll_asset_loads(
    asset_server: Res<AssetServer>,
    tracked: Res<TrackedAssets>,
    mut ledger: ResMut<LoadLedger>,
) {
    for (name, handle) in &tracked.handles {
        if !ledger.status(name).is_some_and(AssetStatus::is_pending) {
            continue;
        }
        let Some(state) = asset_server.get_recursive_dependency_load_state(handle.id()) else {
            continue;
        };
        let status = status_from_load_state(&state);
        let ready = status.is_ready();
        if ledger.settle(name, status) && ready {
            info!("Loaded {}", name);
        }
    }
}
