//! CPU-side model of the water surface.
//!
//! Mirrors `client/src/shaders/water.wgsl`: vertex displacement, fragment
//! compositing and depth linearization. Changes to one must land in both.

pub mod ripple;
pub mod shading;
pub mod surface;
pub mod viewport;

pub use ripple::*;
pub use shading::*;
pub use surface::*;
pub use viewport::*;
