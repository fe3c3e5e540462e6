use bevy::{
    core_pipeline::core_3d::graph::{Core3d, Node3d},
    ecs::query::QueryItem,
    prelude::*,
    render::{
        extract_component::{ExtractComponent, ExtractComponentPlugin},
        render_asset::RenderAssets,
        render_graph::{
            NodeRunError, RenderGraphApp, RenderGraphContext, RenderLabel, ViewNode, ViewNodeRunner,
        },
        renderer::RenderContext,
        texture::GpuImage,
        view::ViewDepthTexture,
        RenderApp,
    },
};

/// Copies this camera's main-pass depth buffer into `target` every frame.
///
/// The camera needs `COPY_SRC` in its `depth_texture_usages` and MSAA off;
/// `target` must be a `Depth32Float` image of the same size as the view.
#[derive(Component, Clone, Debug, ExtractComponent)]
pub struct DepthCapture {
    pub target: Handle<Image>,
}

pub struct DepthCapturePlugin;

impl Plugin for DepthCapturePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(ExtractComponentPlugin::<DepthCapture>::default());

        let Some(render_app) = app.get_sub_app_mut(RenderApp) else {
            return;
        };

        render_app
            .add_render_graph_node::<ViewNodeRunner<DepthCaptureNode>>(Core3d, DepthCaptureLabel)
            .add_render_graph_edges(
                Core3d,
                (Node3d::EndMainPass, DepthCaptureLabel, Node3d::Tonemapping),
            );
    }
}

#[derive(Debug, Hash, PartialEq, Eq, Clone, RenderLabel)]
struct DepthCaptureLabel;

#[derive(Default)]
struct DepthCaptureNode;

impl ViewNode for DepthCaptureNode {
    type ViewQuery = (&'static ViewDepthTexture, &'static DepthCapture);

    fn run(
        &self,
        _graph: &mut RenderGraphContext,
        render_context: &mut RenderContext,
        (depth, capture): QueryItem<Self::ViewQuery>,
        world: &World,
    ) -> Result<(), NodeRunError> {
        let gpu_images = world.resource::<RenderAssets<GpuImage>>();
        let Some(target) = gpu_images.get(&capture.target) else {
            return Ok(());
        };

        // Mid-resize the view and the target can disagree for a frame
        let size = depth.texture.size();
        if size != target.texture.size() {
            return Ok(());
        }

        render_context.command_encoder().copy_texture_to_texture(
            depth.texture.as_image_copy(),
            target.texture.as_image_copy(),
            size,
        );

        Ok(())
    }
}
