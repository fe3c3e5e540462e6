use bevy::math::{IVec2, UVec2, Vec2, Vec4};

use crate::camera::stereo_viewports;

/// Physical size of the drawable surface, in pixels. Never zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ViewportSize {
    pub width: u32,
    pub height: u32,
}

impl ViewportSize {
    /// Returns `None` for a degenerate (minimised) surface.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self { width, height })
    }

    /// Size of the depth captures for a window. In stereo both eyes share the
    /// left eye's captures, so they take the left viewport's size.
    pub fn for_capture(window: UVec2, stereo: bool) -> Option<Self> {
        let size = if stereo && window.x > 0 && window.y > 0 {
            let [(_, left), _] = stereo_viewports(window);
            left
        } else {
            window
        };
        Self::new(size.x, size.y)
    }

    /// `(w, h, 1/w, 1/h)`, the layout the water shader expects.
    pub fn screen_size_uniform(&self) -> Vec4 {
        let w = self.width as f32;
        let h = self.height as f32;
        Vec4::new(w, h, 1.0 / w, 1.0 / h)
    }
}

/// Texel of a depth capture under a fragment. `frag_coord` is in window
/// pixels; the current viewport's origin is removed first so each eye maps
/// onto the whole capture.
pub fn capture_texel(
    frag_coord: Vec2,
    viewport_origin: Vec2,
    screen_size: Vec4,
    dimensions: UVec2,
) -> UVec2 {
    let screen_uv = (frag_coord - viewport_origin) * Vec2::new(screen_size.z, screen_size.w);
    let texel = (screen_uv * dimensions.as_vec2()).as_ivec2();
    let max = dimensions.as_ivec2() - 1;
    texel.clamp(IVec2::ZERO, max.max(IVec2::ZERO)).as_uvec2()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_size_uniform_after_resize() {
        let before = ViewportSize::new(800, 600).unwrap();
        assert_eq!(
            before.screen_size_uniform(),
            Vec4::new(800.0, 600.0, 1.0 / 800.0, 1.0 / 600.0)
        );
        let after = ViewportSize::new(1024, 768).unwrap();
        assert_eq!(
            after.screen_size_uniform(),
            Vec4::new(1024.0, 768.0, 1.0 / 1024.0, 1.0 / 768.0)
        );
    }

    #[test]
    fn test_zero_sized_viewport_is_rejected() {
        assert!(ViewportSize::new(0, 768).is_none());
        assert!(ViewportSize::new(1024, 0).is_none());
        assert!(ViewportSize::for_capture(UVec2::new(0, 768), true).is_none());
    }

    #[test]
    fn test_capture_follows_eye_viewport() {
        let window = UVec2::new(801, 600);
        assert_eq!(
            ViewportSize::for_capture(window, false),
            ViewportSize::new(801, 600)
        );
        assert_eq!(
            ViewportSize::for_capture(window, true),
            ViewportSize::new(400, 600)
        );
    }

    #[test]
    fn test_right_eye_fragment_maps_into_capture() {
        let size = ViewportSize::for_capture(UVec2::new(800, 600), true).unwrap();
        let dimensions = UVec2::new(size.width, size.height);
        let uniform = size.screen_size_uniform();

        // Centre of the right eye, whose viewport starts at x = 400.
        // Fragment coordinates sit on pixel centres.
        let centre = capture_texel(
            Vec2::new(600.5, 300.5),
            Vec2::new(400.0, 0.0),
            uniform,
            dimensions,
        );
        assert_eq!(centre, UVec2::new(200, 300));

        // Same relative pixel in the left eye lands on the same texel
        let left = capture_texel(Vec2::new(200.5, 300.5), Vec2::ZERO, uniform, dimensions);
        assert_eq!(left, centre);
    }

    #[test]
    fn test_capture_texel_clamps_to_the_capture() {
        let size = ViewportSize::new(400, 600).unwrap();
        let texel = capture_texel(
            Vec2::new(1000.0, 700.0),
            Vec2::ZERO,
            size.screen_size_uniform(),
            UVec2::new(400, 600),
        );
        assert_eq!(texel, UVec2::new(399, 599));
    }
}
