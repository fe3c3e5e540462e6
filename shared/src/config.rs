//! Scene configuration, read from a RON file.
//!
//! Every field has a default matching the stock scene, and every struct is
//! `#[serde(default)]`, so a config file only needs the values it changes.

use std::{
    f32::consts::PI,
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use bevy::math::{Vec2, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    camera::OrbitLimits,
    terrain::TerrainSettings,
    water::{RippleTextureSettings, WaterShading, WaveParams},
    CONFIG_PARSE_ERROR, CONFIG_READ_ERROR, DEFAULT_CAMERA_FAR, DEFAULT_CAMERA_FOV_DEGREES,
    DEFAULT_CAMERA_NEAR,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{} {}: {}", CONFIG_READ_ERROR, .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} {}: {}", CONFIG_PARSE_ERROR, .path.display(), .message)]
    Parse { path: PathBuf, message: String },
}

impl ConfigError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == ErrorKind::NotFound)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub focus: Vec3,
    pub orbit: OrbitLimits,
    /// `0xRRGGBB`
    pub background: u32,
    pub fog_start: f32,
    pub fog_end: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_CAMERA_FOV_DEGREES,
            near: DEFAULT_CAMERA_NEAR,
            far: DEFAULT_CAMERA_FAR,
            position: Vec3::new(15.0, 5.0, 0.0),
            focus: Vec3::ZERO,
            orbit: OrbitLimits::default(),
            background: 0xffffff,
            fog_start: 0.0,
            fog_end: 750.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingSettings {
    /// Hue, saturation, lightness of the sun
    pub sun_hsl: [f32; 3],
    pub sun_position: Vec3,
    pub sun_illuminance: f32,
    pub shadow_map_size: usize,
    pub ambient_sky: u32,
    pub ambient_ground: u32,
    pub ambient_brightness: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            sun_hsl: [0.1 * 360.0, 1.0, 0.95],
            sun_position: Vec3::new(-1.0, 50.0, 1.0) * 30.0,
            sun_illuminance: 10_000.0,
            shadow_map_size: 2048,
            ambient_sky: 0xffffbb,
            ambient_ground: 0x080820,
            ambient_brightness: 400.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterSettings {
    pub position: Vec3,
    pub size: Vec2,
    pub subdivisions: u32,
    pub wave: WaveParams,
    pub shading: WaterShading,
    pub ripple_texture: RippleTextureSettings,
}

impl Default for WaterSettings {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 1.5, 0.0),
            size: Vec2::new(40.0, 40.0),
            subdivisions: 256,
            wave: WaveParams::default(),
            shading: WaterShading::default(),
            ripple_texture: RippleTextureSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoatSpawn {
    pub position: Vec3,
    pub rotation_y: f32,
    pub scale: f32,
    /// Where in the clip this goat starts playing
    pub start_time: f32,
}

impl Default for GoatSpawn {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 3.5, 0.0),
            rotation_y: 0.0,
            scale: 1.0,
            start_time: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropSpawn {
    pub name: String,
    pub path: String,
    pub position: Vec3,
    /// Euler XYZ, radians
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for PropSpawn {
    fn default() -> Self {
        Self {
            name: String::new(),
            path: String::new(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StereoSettings {
    /// Distance between the two eye cameras
    pub eye_separation: f32,
    pub start_enabled: bool,
}

impl Default for StereoSettings {
    fn default() -> Self {
        Self {
            eye_separation: 0.064,
            start_enabled: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub camera: CameraSettings,
    pub lighting: LightingSettings,
    pub terrain: TerrainSettings,
    pub water: WaterSettings,
    pub goat_model: String,
    pub goats: Vec<GoatSpawn>,
    pub props: Vec<PropSpawn>,
    pub stereo: StereoSettings,
    pub show_axes: bool,
    pub axes_length: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        let canyon = PropSpawn {
            name: "left canyon".into(),
            path: "models/canyon/mountain_canyon_01.glb".into(),
            position: Vec3::new(20.0, 1.0, -1.0),
            // 180 radians about x, not a half turn
            rotation: Vec3::new(180.0, 0.0, 0.0),
            ..Default::default()
        };
        Self {
            camera: CameraSettings::default(),
            lighting: LightingSettings::default(),
            terrain: TerrainSettings::default(),
            water: WaterSettings::default(),
            goat_model: "models/goat/scene.gltf".into(),
            goats: vec![
                GoatSpawn::default(),
                GoatSpawn {
                    position: Vec3::new(0.0, 3.5, 3.0),
                    rotation_y: PI,
                    start_time: 0.75,
                    ..Default::default()
                },
            ],
            props: vec![
                PropSpawn {
                    name: "log".into(),
                    path: "models/log/low_poly_log.glb".into(),
                    position: Vec3::new(0.0, 3.0, 0.0),
                    scale: Vec3::new(0.01, 0.01, 0.04),
                    ..Default::default()
                },
                PropSpawn {
                    name: "right canyon".into(),
                    position: Vec3::new(20.0, 1.0, 10.0),
                    ..canyon.clone()
                },
                canyon,
            ],
            stereo: StereoSettings::default(),
            show_axes: true,
            axes_length: 500.0,
        }
    }
}

impl SceneConfig {
    pub fn from_ron_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        ron::de::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&content, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_stock_scene() {
        let config = SceneConfig::default();
        assert_eq!(config.camera.fov_degrees, 7.0);
        assert_eq!(config.camera.near, 1.0);
        assert_eq!(config.camera.far, 1000.0);
        assert_eq!(config.camera.orbit.min_distance, 100.0);
        assert_eq!(config.camera.orbit.max_distance, 500.0);
        assert!(!config.camera.orbit.zoom_enabled);
        assert_eq!(config.goats.len(), 2);
        assert_eq!(config.props.len(), 3);
        assert_eq!(config.lighting.shadow_map_size, 2048);
        assert_eq!(config.camera.focus, Vec3::ZERO);
        assert_eq!(config.water.shading.ripple_tiling, 4.0);
    }

    #[test]
    fn test_both_canyons_share_the_authored_rotation() {
        let config = SceneConfig::default();
        let canyons: Vec<_> = config
            .props
            .iter()
            .filter(|prop| prop.name.ends_with("canyon"))
            .collect();
        assert_eq!(canyons.len(), 2);
        for canyon in canyons {
            assert_eq!(canyon.rotation, Vec3::new(180.0, 0.0, 0.0));
        }
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let path = Path::new("scene.ron");
        let config = SceneConfig::from_ron_str("(show_axes: false, axes_length: 10.0)", path)
            .expect("partial config should parse");
        assert!(!config.show_axes);
        assert_eq!(config.axes_length, 10.0);
        assert_eq!(config.camera, CameraSettings::default());
        assert_eq!(config.water, WaterSettings::default());
    }

    #[test]
    fn test_nested_override() {
        let path = Path::new("scene.ron");
        let config = SceneConfig::from_ron_str(
            "(camera: (fov_degrees: 45.0, orbit: (zoom_enabled: true)))",
            path,
        )
        .expect("nested config should parse");
        assert_eq!(config.camera.fov_degrees, 45.0);
        assert!(config.camera.orbit.zoom_enabled);
        assert_eq!(config.camera.orbit.min_distance, 100.0);
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let path = Path::new("broken.ron");
        let err = SceneConfig::from_ron_str("(camera: (fov_degrees: ", path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().starts_with(CONFIG_PARSE_ERROR));
        assert!(err.to_string().contains("broken.ron"));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = SceneConfig::load(Path::new("/definitely/not/here/scene.ron")).unwrap_err();
        assert!(err.is_not_found());
    }
}
