use bevy::prelude::*;
use canyon_shared::loading::{LoadCounts, LoadLedger};

use crate::ui::style::{
    text_font, DETAIL_FONT_SIZE, ERROR_TEXT_COLOR, HUD_FONT_SIZE, SECONDARY_TEXT_COLOR,
    TEXT_COLOR, TITLE_FONT_SIZE,
};

/// Marker component for the loading overlay UI
#[derive(Component)]
pub struct LoadingOverlay;

#[derive(Component)]
pub struct LoadingProgressText;

/// Corner line reporting failed loads once loading has settled.
#[derive(Component)]
pub struct LoadStatusText;

pub fn progress_text(counts: &LoadCounts) -> String {
    format!(
        "{} of {} models ready",
        counts.ready + counts.failed,
        counts.total()
    )
}

/// `None` while loading is in flight or nothing failed.
pub fn failure_text(ledger: &LoadLedger) -> Option<String> {
    if !ledger.is_settled() {
        return None;
    }
    let names: Vec<&str> = ledger.failures().map(|(name, _)| name).collect();
    if names.is_empty() {
        return None;
    }
    Some(format!(
        "{} model(s) failed to load: {}",
        names.len(),
        names.join(", ")
    ))
}

/// Spawns the loading overlay UI (hidden by default)
pub fn setup_loading_overlay(mut commands: Commands) {
    commands
        .spawn((
            Name::new("loading overlay"),
            LoadingOverlay,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.7)),
            Visibility::Hidden,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Loading models..."),
                text_font(TITLE_FONT_SIZE),
                TextColor(TEXT_COLOR),
            ));
            parent.spawn((
                LoadingProgressText,
                Text::new(""),
                text_font(DETAIL_FONT_SIZE),
                TextColor(SECONDARY_TEXT_COLOR),
                Node {
                    margin: UiRect::top(Val::Px(10.0)),
                    ..default()
                },
            ));
        });

    commands.spawn((
        Name::new("load status"),
        LoadStatusText,
        Node {
            position_type: PositionType::Absolute,
            right: Val::Percent(1.),
            top: Val::Percent(1.),
            ..default()
        },
        Text::new(""),
        text_font(HUD_FONT_SIZE),
        TextColor(ERROR_TEXT_COLOR),
        Visibility::Hidden,
    ));
}

/// Shows the overlay while any tracked asset is still pending
pub fn update_loading_overlay(
    ledger: Res<LoadLedger>,
    mut overlay_query: Query<&mut Visibility, With<LoadingOverlay>>,
    mut progress_query: Query<&mut Text, With<LoadingProgressText>>,
) {
    if !ledger.is_changed() {
        return;
    }
    let Ok(mut visibility) = overlay_query.single_mut() else {
        return;
    };

    let counts = ledger.counts();
    visibility.set_if_neq(if counts.pending > 0 {
        Visibility::Visible
    } else {
        Visibility::Hidden
    });
    if let Ok(mut text) = progress_query.single_mut() {
        **text = progress_text(&counts);
    }
}

pub fn update_load_status(
    ledger: Res<LoadLedger>,
    mut status_query: Query<(&mut Text, &mut Visibility), With<LoadStatusText>>,
) {
    if !ledger.is_changed() {
        return;
    }
    let Ok((mut text, mut visibility)) = status_query.single_mut() else {
        return;
    };
    match failure_text(&ledger) {
        Some(message) => {
            **text = message;
            *visibility = Visibility::Visible;
        }
        None => *visibility = Visibility::Hidden,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canyon_shared::loading::AssetStatus;

    fn overlay_app(ledger: LoadLedger) -> App {
        let mut app = App::new();
        app.insert_resource(ledger)
            .add_systems(Startup, setup_loading_overlay)
            .add_systems(Update, (update_loading_overlay, update_load_status));
        app
    }

    fn visibility<T: Component>(app: &mut App) -> Visibility {
        let world = app.world_mut();
        let mut query = world.query_filtered::<&Visibility, With<T>>();
        *query.single(world).unwrap()
    }

    #[test]
    fn test_overlay_visible_while_pending() {
        let mut ledger = LoadLedger::default();
        ledger.register("goat");
        ledger.register("log");
        ledger.settle("log", AssetStatus::Ready);
        let mut app = overlay_app(ledger);
        app.update();

        assert_eq!(visibility::<LoadingOverlay>(&mut app), Visibility::Visible);
        assert_eq!(visibility::<LoadStatusText>(&mut app), Visibility::Hidden);
    }

    #[test]
    fn test_failures_reported_after_settling() {
        let mut ledger = LoadLedger::default();
        ledger.register("goat");
        ledger.register("log");
        ledger.settle("goat", AssetStatus::Ready);
        ledger.settle("log", AssetStatus::Failed("missing file".into()));
        let mut app = overlay_app(ledger);
        app.update();

        assert_eq!(visibility::<LoadingOverlay>(&mut app), Visibility::Hidden);
        assert_eq!(visibility::<LoadStatusText>(&mut app), Visibility::Visible);
        let world = app.world_mut();
        let mut query = world.query_filtered::<&Text, With<LoadStatusText>>();
        assert_eq!(
            query.single(world).unwrap().0,
            "1 model(s) failed to load: log"
        );
    }

    #[test]
    fn test_progress_counts_settled_assets() {
        let counts = LoadCounts {
            pending: 1,
            ready: 2,
            failed: 1,
        };
        assert_eq!(progress_text(&counts), "3 of 4 models ready");
    }
}
