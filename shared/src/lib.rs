pub mod animation;
pub mod camera;
pub mod config;
pub mod constants;
pub mod loading;
pub mod sets;
pub mod terrain;
pub mod water;

pub use constants::*;
