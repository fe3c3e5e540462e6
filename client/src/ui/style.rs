use bevy::prelude::*;

pub const TEXT_COLOR: Color = Color::WHITE;
pub const SECONDARY_TEXT_COLOR: Color = Color::srgba(0.8, 0.8, 0.8, 1.0);
pub const ERROR_TEXT_COLOR: Color = Color::srgb(1.0, 0.35, 0.3);
pub const PANEL_BACKGROUND: Color = Color::srgba(0.0, 0.0, 0.0, 0.5);

pub const TITLE_FONT_SIZE: f32 = 32.0;
pub const DETAIL_FONT_SIZE: f32 = 18.0;
pub const HUD_FONT_SIZE: f32 = 16.0;

pub fn text_font(font_size: f32) -> TextFont {
    TextFont {
        font_size,
        ..Default::default()
    }
}
