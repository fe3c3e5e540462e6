//! Static glTF props: the log and the canyon walls.

use bevy::{math::EulerRot, prelude::*};
use canyon_shared::{config::PropSpawn, loading::LoadLedger};

use crate::{loading::TrackedAssets, SceneSettings};

pub fn prop_transform(prop: &PropSpawn) -> Transform {
    Transform::from_translation(prop.position)
        .with_rotation(Quat::from_euler(
            EulerRot::XYZ,
            prop.rotation.x,
            prop.rotation.y,
            prop.rotation.z,
        ))
        .with_scale(prop.scale)
}

pub fn spawn_props(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    asset_server: Res<AssetServer>,
    mut ledger: ResMut<LoadLedger>,
    mut tracked: ResMut<TrackedAssets>,
) {
    for prop in &settings.props {
        let scene: Handle<Scene> =
            asset_server.load(GltfAssetLabel::Scene(0).from_asset(prop.path.clone()));
        tracked.track(&mut ledger, prop.name.clone(), scene.clone());
        commands.spawn((
            Name::new(prop.name.clone()),
            SceneRoot(scene),
            prop_transform(prop),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canyon_shared::config::SceneConfig;

    #[test]
    fn test_canyon_is_flipped_about_x() {
        let config = SceneConfig::default();
        let canyon = config
            .props
            .iter()
            .find(|prop| prop.name == "left canyon")
            .unwrap();
        let transform = prop_transform(canyon);
        let up = transform.rotation * Vec3::Y;
        assert!((up - Vec3::NEG_Y).length() < 1e-5);
        assert_eq!(transform.translation, Vec3::new(20.0, 1.0, -1.0));
    }

    #[test]
    fn test_log_scale() {
        let config = SceneConfig::default();
        let log = config.props.iter().find(|prop| prop.name == "log").unwrap();
        assert_eq!(prop_transform(log).scale, Vec3::new(0.01, 0.01, 0.04));
    }
}
