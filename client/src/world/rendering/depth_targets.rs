//! Off-screen targets for the two depth captures.
//!
//! Each capture is an auxiliary camera parented to the main camera, so it
//! shares its pose. The camera renders colour into an image nobody samples;
//! what matters is its depth buffer, which `DepthCapturePlugin` copies into a
//! `Depth32Float` image the water material reads. In stereo the captures
//! are the left eye's size and both eyes sample them.

use bevy::{
    asset::RenderAssetUsages,
    core_pipeline::tonemapping::Tonemapping,
    prelude::*,
    render::{
        camera::RenderTarget,
        render_resource::{Extent3d, TextureDimension, TextureFormat, TextureUsages},
        view::RenderLayers,
    },
    window::PrimaryWindow,
};
use canyon_shared::water::ViewportSize;

use super::{depth_capture::DepthCapture, water_material::WaterMaterial};
use crate::{
    camera::{main_camera_projection, MainCamera, StereoMode},
    constants::{
        SCENE_DEPTH_CAMERA_ORDER, SCENE_LAYER, SCENE_WITH_WATER_DEPTH_CAMERA_ORDER,
        WATER_MASK_LAYER,
    },
    SceneSettings,
};

/// The colour image a capture camera renders into, and the image its depth
/// is copied to.
#[derive(Debug, Clone)]
pub struct DepthTarget {
    pub color: Handle<Image>,
    pub depth: Handle<Image>,
}

#[derive(Resource, Debug, Clone)]
pub struct DepthTargets {
    pub scene: DepthTarget,
    pub scene_with_water: DepthTarget,
    pub size: ViewportSize,
}

/// Which capture a camera feeds.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthCaptureCamera {
    Scene,
    SceneWithWater,
}

fn extent(size: ViewportSize) -> Extent3d {
    Extent3d {
        width: size.width,
        height: size.height,
        depth_or_array_layers: 1,
    }
}

fn color_target_image(size: ViewportSize) -> Image {
    let mut image = Image::new_fill(
        extent(size),
        TextureDimension::D2,
        &[0, 0, 0, 0],
        TextureFormat::Bgra8UnormSrgb,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING
        | TextureUsages::COPY_DST
        | TextureUsages::RENDER_ATTACHMENT;
    image
}

fn depth_capture_image(size: ViewportSize) -> Image {
    // GPU only: depth formats cannot be uploaded from the CPU
    let mut image = Image::new_uninit(
        extent(size),
        TextureDimension::D2,
        TextureFormat::Depth32Float,
        RenderAssetUsages::default(),
    );
    image.texture_descriptor.usage = TextureUsages::TEXTURE_BINDING | TextureUsages::COPY_DST;
    image
}

fn resize_image(image: &mut Image, size: ViewportSize) {
    if image.data.is_some() {
        image.resize(extent(size));
    } else {
        image.texture_descriptor.size = extent(size);
    }
}

impl DepthTarget {
    fn allocate(images: &mut Assets<Image>, size: ViewportSize) -> Self {
        Self {
            color: images.add(color_target_image(size)),
            depth: images.add(depth_capture_image(size)),
        }
    }

    fn handles(&self) -> [&Handle<Image>; 2] {
        [&self.color, &self.depth]
    }
}

impl DepthTargets {
    pub fn allocate(images: &mut Assets<Image>, size: ViewportSize) -> Self {
        Self {
            scene: DepthTarget::allocate(images, size),
            scene_with_water: DepthTarget::allocate(images, size),
            size,
        }
    }

    pub fn handles(&self) -> impl Iterator<Item = &Handle<Image>> {
        self.scene
            .handles()
            .into_iter()
            .chain(self.scene_with_water.handles())
    }

    /// True once every image exists in the asset store.
    pub fn is_allocated(&self, images: &Assets<Image>) -> bool {
        self.handles().all(|handle| images.contains(handle))
    }

    fn resize(&mut self, images: &mut Assets<Image>, size: ViewportSize) {
        for handle in [
            &self.scene.color,
            &self.scene.depth,
            &self.scene_with_water.color,
            &self.scene_with_water.depth,
        ] {
            if let Some(image) = images.get_mut(handle) {
                resize_image(image, size);
            }
        }
        self.size = size;
    }
}

/// Reallocate both captures and update the screen-size uniform of every water
/// material in one step, so no frame samples a target of the wrong size.
/// Returns `false` when nothing changed.
pub fn resize_viewport(
    targets: &mut DepthTargets,
    images: &mut Assets<Image>,
    materials: &mut Assets<WaterMaterial>,
    size: ViewportSize,
) -> bool {
    if targets.size == size {
        return false;
    }
    targets.resize(images, size);
    let screen_size = size.screen_size_uniform();
    for (_, material) in materials.iter_mut() {
        material.uniforms.screen_size = screen_size;
    }
    true
}

/// Capture size for the primary window: the whole window in mono, the left
/// eye in stereo.
pub fn capture_viewport_size(window: &Window, stereo: bool) -> Option<ViewportSize> {
    ViewportSize::for_capture(window.physical_size(), stereo)
}

pub fn allocate_depth_targets(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    stereo: Option<Res<StereoMode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let stereo = stereo.is_some_and(|mode| mode.enabled);
    let size = windows
        .single()
        .ok()
        .and_then(|window| capture_viewport_size(window, stereo))
        .or_else(|| ViewportSize::new(1280, 720));
    let Some(size) = size else {
        return;
    };
    let targets = DepthTargets::allocate(&mut images, size);
    debug!(
        "Allocated depth capture targets at {}x{}",
        size.width, size.height
    );
    commands.insert_resource(targets);
}

pub fn spawn_depth_cameras(
    mut commands: Commands,
    targets: Option<Res<DepthTargets>>,
    settings: Res<SceneSettings>,
    main_camera: Query<Entity, With<MainCamera>>,
) {
    let Some(targets) = targets else {
        warn!("Depth targets missing, water foam disabled");
        return;
    };
    let Ok(main_camera) = main_camera.single() else {
        warn!("Main camera missing, water foam disabled");
        return;
    };

    let captures = [
        (
            DepthCaptureCamera::Scene,
            &targets.scene,
            SCENE_DEPTH_CAMERA_ORDER,
            RenderLayers::layer(SCENE_LAYER),
        ),
        (
            DepthCaptureCamera::SceneWithWater,
            &targets.scene_with_water,
            SCENE_WITH_WATER_DEPTH_CAMERA_ORDER,
            RenderLayers::from_layers(&[SCENE_LAYER, WATER_MASK_LAYER]),
        ),
    ];

    commands.entity(main_camera).with_children(|parent| {
        for (kind, target, order, layers) in captures {
            parent.spawn((
                Name::new(format!("{:?} depth camera", kind)),
                kind,
                Camera3d {
                    depth_texture_usages: (TextureUsages::RENDER_ATTACHMENT
                        | TextureUsages::TEXTURE_BINDING
                        | TextureUsages::COPY_SRC)
                        .into(),
                    ..default()
                },
                Camera {
                    order,
                    target: RenderTarget::Image(target.color.clone().into()),
                    clear_color: ClearColorConfig::Custom(Color::BLACK),
                    ..default()
                },
                main_camera_projection(&settings.camera),
                Msaa::Off,
                Tonemapping::None,
                layers,
                DepthCapture {
                    target: target.depth.clone(),
                },
                Transform::IDENTITY,
            ));
        }
    });
}

/// Keep the captures and the water shader's screen-size uniform in step with
/// the window and the stereo layout.
pub fn sync_capture_size(
    windows: Query<&Window, With<PrimaryWindow>>,
    stereo: Option<Res<StereoMode>>,
    targets: Option<ResMut<DepthTargets>>,
    mut images: ResMut<Assets<Image>>,
    mut materials: ResMut<Assets<WaterMaterial>>,
) {
    let Some(mut targets) = targets else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let stereo = stereo.is_some_and(|mode| mode.enabled);
    // Minimised windows report zero; keep the last good size
    let Some(size) = capture_viewport_size(window, stereo) else {
        return;
    };
    if resize_viewport(&mut targets, &mut images, &mut materials, size) {
        debug!(
            "Reallocated depth capture targets at {}x{}",
            size.width, size.height
        );
    }
}
