mod camera;
mod characters;
mod constants;
mod input;
mod loading;
mod shaders;
mod ui;
mod world;

use std::path::{Path, PathBuf};

use bevy::{prelude::*, window::PresentMode};
use bevy_inspector_egui::{bevy_egui::EguiPlugin, quick::WorldInspectorPlugin};
use canyon_shared::{
    config::{ConfigError, SceneConfig},
    sets::{SceneStartupSet, SceneUpdateSet},
};
use clap::Parser;
use constants::{DEFAULT_ASSETS_DIR, DEFAULT_CONFIG_DIR};
use input::{get_bindings, report_bindings_origin};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[arg(
        short,
        long,
        help = "Scene config file (RON); built-in defaults when omitted"
    )]
    config: Option<PathBuf>,

    #[arg(long, default_value = DEFAULT_CONFIG_DIR, help = "Directory holding keybindings.ron")]
    config_dir: PathBuf,

    #[arg(short, long, default_value = DEFAULT_ASSETS_DIR, help = "Asset root for the glTF models")]
    assets: String,

    #[arg(long, help = "Show the world inspector")]
    inspector: bool,

    #[arg(long, help = "Start in side-by-side stereo")]
    stereo: bool,
}

/// The scene configuration every startup system reads.
#[derive(Resource, Debug, Deref)]
pub struct SceneSettings(pub SceneConfig);

/// Where the scene configuration came from, reported once logging is up.
#[derive(Resource, Debug)]
pub enum ConfigOrigin {
    Defaults,
    File(PathBuf),
    Fallback { error: ConfigError },
}

fn load_scene_config(path: Option<&Path>) -> (SceneConfig, ConfigOrigin) {
    let Some(path) = path else {
        return (SceneConfig::default(), ConfigOrigin::Defaults);
    };
    match SceneConfig::load(path) {
        Ok(config) => (config, ConfigOrigin::File(path.to_path_buf())),
        Err(error) => (SceneConfig::default(), ConfigOrigin::Fallback { error }),
    }
}

fn report_config_origin(origin: Res<ConfigOrigin>) {
    match origin.into_inner() {
        ConfigOrigin::Defaults => info!("Using built-in scene configuration"),
        ConfigOrigin::File(path) => info!("Loaded scene configuration from {:?}", path),
        ConfigOrigin::Fallback { error } if error.is_not_found() => {
            warn!("{}; using built-in scene configuration", error)
        }
        ConfigOrigin::Fallback { error } => {
            error!("{}; using built-in scene configuration", error)
        }
    }
}

fn main() {
    let args = Args::parse();

    let (mut config, origin) = load_scene_config(args.config.as_deref());
    let (key_map, bindings_origin) = get_bindings(&args.config_dir);
    config.stereo.start_enabled |= args.stereo;

    println!("Starting with asset root {}", args.assets);

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(AssetPlugin {
                file_path: args.assets.clone(),
                ..Default::default()
            })
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Goat Canyon".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            }),
    );

    if args.inspector {
        app.add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: true,
        })
        .add_plugins(WorldInspectorPlugin::new());
    }

    app.configure_sets(
        Startup,
        (
            SceneStartupSet::Camera,
            SceneStartupSet::World,
            SceneStartupSet::Water,
            SceneStartupSet::Characters,
            SceneStartupSet::Ui,
        )
            .chain(),
    )
    .configure_sets(
        Update,
        (
            SceneUpdateSet::Input,
            SceneUpdateSet::Loading,
            SceneUpdateSet::Animation,
            SceneUpdateSet::Water,
            SceneUpdateSet::Rendering,
            SceneUpdateSet::Ui,
        )
            .chain(),
    )
    .insert_resource(key_map)
    .insert_resource(bindings_origin)
    .insert_resource(SceneSettings(config))
    .insert_resource(origin)
    .add_systems(PreStartup, (report_config_origin, report_bindings_origin))
    .add_plugins((
        shaders::ShadersPlugin,
        loading::LoadingPlugin,
        camera::CameraPlugin,
        world::WorldPlugin,
        characters::CharactersPlugin,
        ui::SceneUiPlugin,
    ))
    .run();
}
