//! Animated goats.
//!
//! Bevy's `AnimationPlayer` only evaluates poses here. It is held paused and
//! every frame is seeked to the cursor of the goat's own `AnimationMixer`,
//! which advances by wall-clock time.

use bevy::prelude::*;
use canyon_shared::{
    animation::{Animatable, AnimationMixer},
    config::GoatSpawn,
    loading::{AssetStatus, LoadLedger},
};

use crate::{
    input::{is_action_just_pressed, KeyMap, SceneAction},
    loading::TrackedAssets,
    SceneSettings,
};

#[derive(Component, Debug)]
pub struct Goat {
    pub mixer: AnimationMixer,
    pub clip: Handle<AnimationClip>,
    pub graph: Handle<AnimationGraph>,
    pub node: AnimationNodeIndex,
    /// Ledger name of the glTF this goat comes from
    pub model: String,
    pub start_time: f32,
    /// The scene entity carrying the `AnimationPlayer`, once spawned
    pub player: Option<Entity>,
}

impl Goat {
    pub fn new(
        model: impl Into<String>,
        clip: Handle<AnimationClip>,
        graph: Handle<AnimationGraph>,
        node: AnimationNodeIndex,
        start_time: f32,
    ) -> Self {
        let mut mixer = AnimationMixer::with_playing_action();
        mixer.seek(start_time);
        Self {
            mixer,
            clip,
            graph,
            node,
            model: model.into(),
            start_time,
            player: None,
        }
    }

    /// Mixer cursor, in seconds into the clip.
    pub fn time(&self) -> f32 {
        self.mixer
            .current_action()
            .map_or(0.0, |action| action.time())
    }

    pub fn restart(&mut self) {
        let start_time = self.start_time;
        self.seek(start_time);
    }
}

impl Animatable for Goat {
    fn advance(&mut self, delta_seconds: f32) {
        self.mixer.advance(delta_seconds);
    }

    fn seek(&mut self, time: f32) {
        self.mixer.seek(time);
    }
}

fn goat_transform(spawn: &GoatSpawn) -> Transform {
    Transform::from_translation(spawn.position)
        .with_rotation(Quat::from_rotation_y(spawn.rotation_y))
        .with_scale(Vec3::splat(spawn.scale))
}

pub fn spawn_goats(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    asset_server: Res<AssetServer>,
    mut graphs: ResMut<Assets<AnimationGraph>>,
    mut ledger: ResMut<LoadLedger>,
    mut tracked: ResMut<TrackedAssets>,
) {
    if settings.goats.is_empty() {
        return;
    }
    let model = settings.goat_model.clone();
    let scene: Handle<Scene> = asset_server.load(GltfAssetLabel::Scene(0).from_asset(model.clone()));
    let clip: Handle<AnimationClip> =
        asset_server.load(GltfAssetLabel::Animation(0).from_asset(model.clone()));
    let (graph, node) = AnimationGraph::from_clip(clip.clone());
    let graph = graphs.add(graph);
    tracked.track(&mut ledger, model.clone(), scene.clone());

    for (index, spawn) in settings.goats.iter().enumerate() {
        commands.spawn((
            Name::new(format!("goat {}", index)),
            Goat::new(
                model.clone(),
                clip.clone(),
                graph.clone(),
                node,
                spawn.start_time,
            ),
            SceneRoot(scene.clone()),
            goat_transform(spawn),
        ));
    }
    info!("Spawning {} goats from {}", settings.goats.len(), model);
}

/// Attach each goat's graph to the `AnimationPlayer` the glTF scene spawned
/// below it, and hold the animation paused.
pub fn bind_animation_players(
    mut commands: Commands,
    ledger: Res<LoadLedger>,
    mut players: Query<(Entity, &mut AnimationPlayer), Without<AnimationGraphHandle>>,
    parents: Query<&ChildOf>,
    mut goats: Query<&mut Goat>,
) {
    for (entity, mut player) in &mut players {
        let Some(goat_entity) = parents
            .iter_ancestors(entity)
            .find(|ancestor| goats.contains(*ancestor))
        else {
            continue;
        };
        let Ok(mut goat) = goats.get_mut(goat_entity) else {
            continue;
        };
        if !ledger.status(&goat.model).is_some_and(AssetStatus::is_ready) {
            continue;
        }

        let time = goat.time();
        player.play(goat.node).repeat().pause().seek_to(time);
        commands
            .entity(entity)
            .insert(AnimationGraphHandle(goat.graph.clone()));
        goat.player = Some(entity);
        debug!("Bound animation player {:?} to goat {:?}", entity, goat_entity);
    }
}

/// Clip lengths are only known once the clip asset is in.
pub fn learn_clip_durations(clips: Res<Assets<AnimationClip>>, mut goats: Query<&mut Goat>) {
    for mut goat in &mut goats {
        if goat
            .mixer
            .current_action()
            .is_some_and(|action| action.duration().is_some())
        {
            continue;
        }
        let Some(duration) = clips.get(&goat.clip).map(AnimationClip::duration) else {
            continue;
        };
        if let Some(action) = goat.mixer.action_mut(0) {
            action.set_duration(duration);
        }
    }
}

/// Only goats whose model is on screen advance.
pub fn advance_goats(time: Res<Time>, mut goats: Query<&mut Goat>) {
    let delta = time.delta_secs();
    for mut goat in &mut goats {
        if goat.player.is_some() {
            goat.advance(delta);
        }
    }
}

pub fn sync_animation_players(goats: Query<&Goat>, mut players: Query<&mut AnimationPlayer>) {
    for goat in &goats {
        let Some(mut player) = goat.player.and_then(|entity| players.get_mut(entity).ok()) else {
            continue;
        };
        let time = goat.time();
        if let Some(active) = player.animation_mut(goat.node) {
            active.seek_to(time);
        }
    }
}

pub fn restart_goats(
    keyboard: Res<ButtonInput<KeyCode>>,
    key_map: Res<KeyMap>,
    mut goats: Query<&mut Goat>,
) {
    if !is_action_just_pressed(SceneAction::RestartAnimations, &keyboard, &key_map) {
        return;
    }
    for mut goat in &mut goats {
        goat.restart();
    }
    info!("Restarted goat animations");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    const MODEL: &str = "models/goat/scene.gltf";

    fn goat(start_time: f32) -> Goat {
        let (_, node) = AnimationGraph::from_clip(Handle::default());
        Goat::new(MODEL, Handle::default(), Handle::default(), node, start_time)
    }

    fn animation_app(ready: bool) -> App {
        let mut app = App::new();
        let mut ledger = LoadLedger::default();
        ledger.register(MODEL);
        if ready {
            ledger.settle(MODEL, AssetStatus::Ready);
        }
        app.insert_resource(ledger)
            .init_resource::<Time>()
            .init_resource::<Assets<AnimationClip>>()
            .add_systems(
                Update,
                (
                    bind_animation_players,
                    learn_clip_durations,
                    advance_goats,
                    sync_animation_players,
                )
                    .chain(),
            );
        app
    }

    fn tick(app: &mut App, seconds: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(seconds));
        app.update();
    }

    #[test]
    fn test_goat_starts_at_its_offset() {
        let goat = goat(0.75);
        assert!((goat.time() - 0.75).abs() < 1e-6);
        assert!(goat.mixer.current_action().is_some_and(|a| a.is_playing()));
    }

    #[test]
    fn test_player_below_goat_is_bound_and_paused() {
        let mut app = animation_app(true);
        let goat_entity = app.world_mut().spawn(goat(0.0)).id();
        let player_entity = app
            .world_mut()
            .spawn((AnimationPlayer::default(), ChildOf(goat_entity)))
            .id();
        tick(&mut app, 0.0);

        let goat = app.world().get::<Goat>(goat_entity).unwrap();
        assert_eq!(goat.player, Some(player_entity));
        assert!(app
            .world()
            .get::<AnimationGraphHandle>(player_entity)
            .is_some());
        let player = app.world().get::<AnimationPlayer>(player_entity).unwrap();
        assert!(player.animation(goat.node).is_some_and(|a| a.is_paused()));
    }

    #[test]
    fn test_binding_waits_for_model() {
        let mut app = animation_app(false);
        let goat_entity = app.world_mut().spawn(goat(0.0)).id();
        app.world_mut()
            .spawn((AnimationPlayer::default(), ChildOf(goat_entity)));
        tick(&mut app, 0.5);

        let goat = app.world().get::<Goat>(goat_entity).unwrap();
        assert_eq!(goat.player, None);
        assert_eq!(goat.time(), 0.0);
    }

    #[test]
    fn test_player_follows_mixer_cursor() {
        let mut app = animation_app(true);
        let goat_entity = app.world_mut().spawn(goat(0.75)).id();
        let player_entity = app
            .world_mut()
            .spawn((AnimationPlayer::default(), ChildOf(goat_entity)))
            .id();
        tick(&mut app, 0.0);
        tick(&mut app, 0.25);

        let goat = app.world().get::<Goat>(goat_entity).unwrap();
        assert!((goat.time() - 1.0).abs() < 1e-5);
        let player = app.world().get::<AnimationPlayer>(player_entity).unwrap();
        let active = player.animation(goat.node).unwrap();
        assert!((active.seek_time() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_restart_returns_to_start_time() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<KeyMap>()
            .add_systems(Update, restart_goats);
        let mut goat = goat(0.75);
        goat.advance(2.0);
        let goat_entity = app.world_mut().spawn(goat).id();
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(KeyCode::KeyR);
        app.update();

        let goat = app.world().get::<Goat>(goat_entity).unwrap();
        assert!((goat.time() - 0.75).abs() < 1e-6);
    }
}
