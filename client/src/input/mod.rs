pub mod data;
pub mod keyboard;

pub use data::*;
pub use keyboard::*;
