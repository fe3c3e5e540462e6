use bevy::{color::Mix, pbr::DirectionalLightShadowMap, prelude::*};
use canyon_shared::config::LightingSettings;

use crate::{camera::hex_color, SceneSettings};

pub fn sun_color(settings: &LightingSettings) -> Color {
    let [hue, saturation, lightness] = settings.sun_hsl;
    Color::hsl(hue, saturation, lightness)
}

/// Sun with shadows, and an ambient term standing in for a sky/ground
/// hemisphere light.
pub fn setup_lighting(mut commands: Commands, settings: Res<SceneSettings>) {
    let lighting = &settings.lighting;
    let sky = hex_color(lighting.ambient_sky);
    let ground = hex_color(lighting.ambient_ground);

    commands.insert_resource(DirectionalLightShadowMap {
        size: lighting.shadow_map_size,
    });
    commands.insert_resource(AmbientLight {
        color: sky.mix(&ground, 0.5),
        brightness: lighting.ambient_brightness,
        ..default()
    });
    commands.spawn((
        Name::new("sun"),
        DirectionalLight {
            color: sun_color(lighting),
            illuminance: lighting.sun_illuminance,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(lighting.sun_position).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_is_warm_white() {
        let color = sun_color(&LightingSettings::default()).to_srgba();
        assert!(color.red >= color.green && color.green >= color.blue);
        assert!(color.blue > 0.85);
    }
}
