pub mod key_hints;
pub mod loading_overlay;
