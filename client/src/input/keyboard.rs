use crate::{
    constants::BINDS_PATH,
    input::data::{KeyMap, SceneAction},
};
use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use std::{
    collections::BTreeMap,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

/// Something that went wrong while loading or writing the keybindings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingsIssue {
    Unreadable(String),
    Malformed(String),
    NotWritten(String),
}

/// Where the keybindings came from, reported once logging is up.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct BindingsOrigin {
    pub path: PathBuf,
    /// False when the defaults are in use
    pub loaded: bool,
    pub issues: Vec<BindingsIssue>,
}

fn write_keybindings_to_path(key_map: &KeyMap, binds_path: &Path) -> Result<(), std::io::Error> {
    let pretty_config = PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true);

    let serialized = ron::ser::to_string_pretty(key_map, pretty_config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
    if let Some(parent) = binds_path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(binds_path)?;
    file.write_all(serialized.as_bytes())
}

pub fn is_action_just_pressed(
    action: SceneAction,
    keyboard_input: &ButtonInput<KeyCode>,
    key_map: &KeyMap,
) -> bool {
    key_map
        .map
        .get(&action)
        .is_some_and(|keys| keys.iter().any(|key| keyboard_input.just_pressed(*key)))
}

pub fn get_action_keys(action: SceneAction, key_map: &KeyMap) -> Vec<KeyCode> {
    key_map.map.get(&action).cloned().unwrap_or_default()
}

pub(crate) fn default_key_map() -> BTreeMap<SceneAction, Vec<KeyCode>> {
    let mut map = BTreeMap::new();
    map.insert(SceneAction::ToggleStereo, vec![KeyCode::KeyV]);
    map.insert(SceneAction::ToggleAxes, vec![KeyCode::KeyX]);
    map.insert(SceneAction::RestartAnimations, vec![KeyCode::KeyR]);
    map
}

/// Bindings from `<config_dir>/keybindings.ron`. A missing or unreadable
/// file is replaced with the defaults.
pub fn get_bindings(config_dir: &Path) -> (KeyMap, BindingsOrigin) {
    let binds_path = config_dir.join(BINDS_PATH);
    let mut issues = Vec::new();

    match fs::read_to_string(&binds_path) {
        Ok(content) => match from_str::<KeyMap>(&content) {
            Ok(key_map) => {
                let origin = BindingsOrigin {
                    path: binds_path,
                    loaded: true,
                    issues,
                };
                return (key_map, origin);
            }
            Err(e) => issues.push(BindingsIssue::Malformed(e.to_string())),
        },
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => {
            issues.push(BindingsIssue::Unreadable(e.to_string()));
        }
        Err(_) => {}
    }

    let key_map = KeyMap::default();
    if let Err(e) = write_keybindings_to_path(&key_map, &binds_path) {
        issues.push(BindingsIssue::NotWritten(e.to_string()));
    }
    let origin = BindingsOrigin {
        path: binds_path,
        loaded: false,
        issues,
    };
    (key_map, origin)
}

pub fn report_bindings_origin(origin: Res<BindingsOrigin>) {
    let path = &origin.path;
    if origin.loaded {
        info!("Loaded keybindings from {:?}", path);
    } else if origin.issues.is_empty() {
        info!("Wrote default keybindings to {:?}", path);
    }
    for issue in &origin.issues {
        match issue {
            BindingsIssue::Unreadable(e) => {
                error!("Failed to read keybindings {:?}: {}; using defaults", path, e)
            }
            BindingsIssue::Malformed(e) => {
                warn!("Ignoring malformed keybindings {:?}: {}", path, e)
            }
            BindingsIssue::NotWritten(e) => warn!(
                "Failed to create default keybindings file at {:?}: {}",
                path, e
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "canyon-keybindings-{}-{}",
            name,
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = scratch_dir("missing");
        let (key_map, origin) = get_bindings(&dir);
        assert_eq!(key_map, KeyMap::default());
        assert!(!origin.loaded);
        assert!(origin.issues.is_empty());
        let written = fs::read_to_string(dir.join(BINDS_PATH)).unwrap();
        assert_eq!(from_str::<KeyMap>(&written).unwrap(), key_map);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_custom_bindings_are_loaded() {
        let dir = scratch_dir("custom");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(BINDS_PATH),
            "(map: {ToggleStereo: [KeyS], ToggleAxes: [KeyX], RestartAnimations: [KeyR]})",
        )
        .unwrap();
        let (key_map, origin) = get_bindings(&dir);
        assert!(origin.loaded);
        assert_eq!(origin.path, dir.join(BINDS_PATH));
        assert_eq!(
            get_action_keys(SceneAction::ToggleStereo, &key_map),
            vec![KeyCode::KeyS]
        );
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_malformed_bindings_fall_back() {
        let dir = scratch_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(BINDS_PATH), "(map: {").unwrap();
        let (key_map, origin) = get_bindings(&dir);
        assert_eq!(key_map, KeyMap::default());
        assert!(!origin.loaded);
        assert!(matches!(
            origin.issues.as_slice(),
            [BindingsIssue::Malformed(_)]
        ));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_unwritable_config_dir_is_reported() {
        // A plain file where the config directory should be
        let dir = scratch_dir("unwritable");
        fs::write(&dir, "not a directory").unwrap();
        let (key_map, origin) = get_bindings(&dir);
        assert_eq!(key_map, KeyMap::default());
        assert!(matches!(
            origin.issues.last(),
            Some(BindingsIssue::NotWritten(_))
        ));
        let _ = fs::remove_file(&dir);
    }

    #[test]
    fn test_report_handles_every_issue() {
        let mut app = App::new();
        app.insert_resource(BindingsOrigin {
            path: PathBuf::from("config/keybindings.ron"),
            loaded: false,
            issues: vec![
                BindingsIssue::Unreadable("permission denied".into()),
                BindingsIssue::NotWritten("read-only file system".into()),
            ],
        })
        .add_systems(PreStartup, report_bindings_origin);
        app.update();
        assert!(!app.world().resource::<BindingsOrigin>().loaded);
    }

    #[test]
    fn test_just_pressed_matches_any_bound_key() {
        let mut key_map = KeyMap::default();
        key_map
            .map
            .insert(SceneAction::ToggleAxes, vec![KeyCode::KeyX, KeyCode::KeyZ]);
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyZ);
        assert!(is_action_just_pressed(
            SceneAction::ToggleAxes,
            &keyboard,
            &key_map
        ));
        assert!(!is_action_just_pressed(
            SceneAction::ToggleStereo,
            &keyboard,
            &key_map
        ));
    }
}
