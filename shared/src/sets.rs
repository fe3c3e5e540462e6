use bevy::prelude::*;

/// Ordering of the per-frame scene step. Only systems in these sets mutate
/// shared scene state.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneUpdateSet {
    Input,
    Loading,
    Animation,
    Water,
    Rendering,
    Ui,
}

/// Ordering of scene construction. Depth cameras attach to the main camera,
/// so the camera must exist before the water step runs.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SceneStartupSet {
    Camera,
    World,
    Water,
    Characters,
    Ui,
}
