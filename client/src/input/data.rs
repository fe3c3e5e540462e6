use std::collections::BTreeMap;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SceneAction {
    ToggleStereo,
    ToggleAxes,
    RestartAnimations,
}

impl SceneAction {
    pub const ALL: [SceneAction; 3] = [
        SceneAction::ToggleStereo,
        SceneAction::ToggleAxes,
        SceneAction::RestartAnimations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SceneAction::ToggleStereo => "stereo",
            SceneAction::ToggleAxes => "axes",
            SceneAction::RestartAnimations => "restart goats",
        }
    }
}

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyMap {
    #[serde(default = "super::keyboard::default_key_map")]
    pub map: BTreeMap<SceneAction, Vec<KeyCode>>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            map: super::keyboard::default_key_map(),
        }
    }
}
