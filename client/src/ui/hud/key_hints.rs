use bevy::prelude::*;

use crate::{
    input::{get_action_keys, KeyMap, SceneAction},
    ui::style::{text_font, HUD_FONT_SIZE, PANEL_BACKGROUND, TEXT_COLOR},
};

/// `KeyV: stereo` style label; unbound actions are skipped.
pub fn key_hint(action: SceneAction, key_map: &KeyMap) -> Option<String> {
    let keys = get_action_keys(action, key_map);
    if keys.is_empty() {
        return None;
    }
    let keys: Vec<String> = keys.iter().map(|key| format!("{:?}", key)).collect();
    Some(format!("{}: {}", keys.join("/"), action.label()))
}

pub fn setup_key_hints(mut commands: Commands, key_map: Res<KeyMap>) {
    let hints: Vec<String> = SceneAction::ALL
        .iter()
        .filter_map(|action| key_hint(*action, &key_map))
        .collect();

    commands.spawn((
        Name::new("key hints"),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(1.),
            bottom: Val::Percent(1.),
            padding: UiRect::all(Val::Px(4.0)),
            ..default()
        },
        BackgroundColor(PANEL_BACKGROUND),
        Text::new(hints.join("   ")),
        text_font(HUD_FONT_SIZE),
        TextColor(TEXT_COLOR),
    ));
}
