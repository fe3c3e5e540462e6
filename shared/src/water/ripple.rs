//! Procedural ripple texture.
//!
//! Perlin noise sampled on a 4D torus, so the texture tiles on both axes
//! without a seam when the sampler repeats.

use std::f64::consts::TAU;

use noise::{NoiseFn, Perlin};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RippleTextureSettings {
    /// Edge length in texels (the texture is square)
    pub size: u32,
    pub seed: u32,
    /// Radius of the sampling torus; larger means busier ripples
    pub frequency: f64,
}

impl Default for RippleTextureSettings {
    fn default() -> Self {
        Self {
            size: 256,
            seed: 7,
            frequency: 1.5,
        }
    }
}

/// A single-channel, row-major texture.
#[derive(Debug, Clone)]
pub struct RippleTexture {
    pub size: u32,
    pub texels: Vec<u8>,
}

struct TorusNoise {
    perlin: Perlin,
    radius: f64,
}

impl TorusNoise {
    fn new(settings: &RippleTextureSettings) -> Self {
        Self {
            perlin: Perlin::new(settings.seed),
            radius: settings.frequency,
        }
    }

    /// Noise in `[0, 1]` at a tiling coordinate; `u` and `u + 1` agree.
    fn sample(&self, u: f64, v: f64) -> f64 {
        let (su, cu) = (u * TAU).sin_cos();
        let (sv, cv) = (v * TAU).sin_cos();
        let r = self.radius;
        let value = self.perlin.get([cu * r, su * r, cv * r, sv * r]);
        (value * 0.5 + 0.5).clamp(0.0, 1.0)
    }
}

impl RippleTexture {
    pub fn generate(settings: &RippleTextureSettings) -> Self {
        let size = settings.size.max(1);
        let noise = TorusNoise::new(settings);
        let mut texels = Vec::with_capacity((size * size) as usize);
        for y in 0..size {
            for x in 0..size {
                let u = x as f64 / size as f64;
                let v = y as f64 / size as f64;
                texels.push((noise.sample(u, v) * 255.0).round() as u8);
            }
        }
        Self { size, texels }
    }

    /// Red channel at `(u, v)` with repeat wrapping and nearest filtering,
    /// normalised to `[0, 1]`.
    pub fn sample_red(&self, u: f32, v: f32) -> f32 {
        let size = self.size as f32;
        let x = ((u.rem_euclid(1.0) * size) as u32).min(self.size - 1);
        let y = ((v.rem_euclid(1.0) * size) as u32).min(self.size - 1);
        self.texels[(y * self.size + x) as usize] as f32 / 255.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_has_expected_size() {
        let settings = RippleTextureSettings {
            size: 32,
            ..Default::default()
        };
        let texture = RippleTexture::generate(&settings);
        assert_eq!(texture.texels.len(), 32 * 32);
    }

    #[test]
    fn test_noise_tiles_seamlessly() {
        let noise = TorusNoise::new(&RippleTextureSettings::default());
        for i in 0..16 {
            let v = i as f64 / 16.0;
            assert!((noise.sample(0.0, v) - noise.sample(1.0, v)).abs() < 1e-9);
            assert!((noise.sample(v, 0.0) - noise.sample(v, 1.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_texture_is_not_flat() {
        let texture = RippleTexture::generate(&RippleTextureSettings::default());
        let min = texture.texels.iter().min().copied().unwrap_or(0);
        let max = texture.texels.iter().max().copied().unwrap_or(0);
        assert!(max > min);
    }

    #[test]
    fn test_sampling_wraps() {
        let texture = RippleTexture::generate(&RippleTextureSettings {
            size: 16,
            ..Default::default()
        });
        assert_eq!(texture.sample_red(0.25, 0.5), texture.sample_red(1.25, -0.5));
    }

    #[test]
    fn test_same_seed_same_texture() {
        let settings = RippleTextureSettings::default();
        assert_eq!(
            RippleTexture::generate(&settings).texels,
            RippleTexture::generate(&settings).texels
        );
    }
}
