//! Water material.
//!
//! An unlit `Material` driven entirely by `water.wgsl`. The same material type
//! serves two roles: the translucent surface the main view shows, and an
//! opaque white mask that only the scene-with-water depth capture sees, so
//! that capture's depth buffer contains the water plane.

use bevy::{
    pbr::{MaterialPipeline, MaterialPipelineKey},
    prelude::*,
    render::{
        mesh::MeshVertexBufferLayoutRef,
        render_resource::{
            AsBindGroup, RenderPipelineDescriptor, ShaderRef, SpecializedMeshPipelineError,
        },
    },
};

use super::depth_targets::DepthTargets;
use crate::shaders::{paths::WATER_SHADER, water_uniforms::WaterUniforms};

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct WaterMaterial {
    #[uniform(0)]
    pub uniforms: WaterUniforms,

    /// Tiling monochrome ripple texture, sampled with repeat addressing
    #[texture(1)]
    #[sampler(2)]
    pub ripple_texture: Handle<Image>,

    /// Depth of the scene without water
    #[texture(3, sample_type = "depth")]
    pub scene_depth: Handle<Image>,

    /// Depth of the scene with the water mask drawn
    #[texture(4, sample_type = "depth")]
    pub scene_with_water_depth: Handle<Image>,

    pub alpha_mode: AlphaMode,
}

impl WaterMaterial {
    /// The translucent surface seen by the main view.
    pub fn surface(
        uniforms: WaterUniforms,
        ripple_texture: Handle<Image>,
        targets: &DepthTargets,
    ) -> Self {
        Self {
            uniforms,
            ripple_texture,
            scene_depth: targets.scene.depth.clone(),
            scene_with_water_depth: targets.scene_with_water.depth.clone(),
            alpha_mode: AlphaMode::Blend,
        }
    }

    /// The opaque mask drawn into the scene-with-water depth capture.
    pub fn mask(
        uniforms: WaterUniforms,
        ripple_texture: Handle<Image>,
        targets: &DepthTargets,
    ) -> Self {
        Self {
            uniforms: uniforms.masked(),
            alpha_mode: AlphaMode::Opaque,
            ..Self::surface(uniforms, ripple_texture, targets)
        }
    }
}

impl Material for WaterMaterial {
    fn vertex_shader() -> ShaderRef {
        WATER_SHADER.into()
    }

    fn fragment_shader() -> ShaderRef {
        WATER_SHADER.into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        self.alpha_mode
    }

    fn specialize(
        _pipeline: &MaterialPipeline<Self>,
        descriptor: &mut RenderPipelineDescriptor,
        layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        let vertex_layout = layout.0.get_layout(&[
            Mesh::ATTRIBUTE_POSITION.at_shader_location(0),
            Mesh::ATTRIBUTE_UV_0.at_shader_location(1),
        ])?;
        descriptor.vertex.buffers = vec![vertex_layout];
        // Visible from below as well as above
        descriptor.primitive.cull_mode = None;
        Ok(())
    }
}
