//! Jittered ground plane.

use bevy::math::Vec3;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::TERRAIN_COLOR_HEX;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainSettings {
    /// Edge length of the square plane
    pub size: f32,
    /// Quads per edge
    pub segments: u32,
    /// Maximum horizontal displacement of a vertex, each way
    pub horizontal_jitter: f32,
    /// Maximum upward displacement of a vertex
    pub vertical_jitter: f32,
    pub seed: u64,
    /// sRGB colour as `0xRRGGBB`
    pub color: u32,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            size: 20000.0,
            segments: 100,
            horizontal_jitter: 10.0,
            vertical_jitter: 2.0,
            seed: 42,
            color: TERRAIN_COLOR_HEX,
        }
    }
}

/// Indexed horizontal grid centred on the origin.
#[derive(Debug, Clone)]
pub struct TerrainGrid {
    pub positions: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl TerrainGrid {
    pub fn generate(settings: &TerrainSettings) -> Self {
        let segments = settings.segments.max(1);
        let row = segments + 1;
        let step = settings.size / segments as f32;
        let half = settings.size * 0.5;
        let mut rng = StdRng::seed_from_u64(settings.seed);

        let mut positions = Vec::with_capacity((row * row) as usize);
        for iz in 0..row {
            for ix in 0..row {
                let mut vertex = Vec3::new(ix as f32 * step - half, 0.0, iz as f32 * step - half);
                vertex.x += jitter(&mut rng, settings.horizontal_jitter);
                vertex.y += rng.gen::<f32>() * settings.vertical_jitter;
                vertex.z += jitter(&mut rng, settings.horizontal_jitter);
                positions.push(vertex);
            }
        }

        let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
        for iz in 0..segments {
            for ix in 0..segments {
                let a = iz * row + ix;
                let b = a + 1;
                let c = a + row;
                let d = c + 1;
                // Counter-clockwise seen from above
                indices.extend_from_slice(&[a, c, b, b, c, d]);
            }
        }

        Self { positions, indices }
    }

    /// One vertex per triangle corner, so every face can be flat-shaded.
    pub fn to_triangle_list(&self) -> Vec<Vec3> {
        self.indices
            .iter()
            .map(|&i| self.positions[i as usize])
            .collect()
    }
}

fn jitter(rng: &mut StdRng, extent: f32) -> f32 {
    rng.gen::<f32>() * extent * 2.0 - extent
}

/// Normalised components of a `0xRRGGBB` sRGB colour.
pub fn srgb_hex_components(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}
