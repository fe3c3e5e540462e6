//! Time-based animation playback state.
//!
//! A mixer owns the actions of one character and moves their time cursors by
//! wall-clock deltas, so playback speed does not depend on frame rate. The
//! engine only evaluates poses at the cursor it is handed.

use serde::{Deserialize, Serialize};

/// Something that can be driven by the per-frame step.
pub trait Animatable {
    /// Advance playback by `delta_seconds` of wall-clock time.
    fn advance(&mut self, delta_seconds: f32);

    /// Jump to `time` and resume playing from there.
    fn seek(&mut self, time: f32);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    #[default]
    Stopped,
    Playing,
    Paused,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LoopMode {
    Once,
    #[default]
    Repeat,
}

/// One clip instance with its own cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationAction {
    time: f32,
    state: PlaybackState,
    duration: Option<f32>,
    loop_mode: LoopMode,
}

impl Default for AnimationAction {
    fn default() -> Self {
        Self::new(LoopMode::Repeat)
    }
}

impl AnimationAction {
    pub fn new(loop_mode: LoopMode) -> Self {
        Self {
            time: 0.0,
            state: PlaybackState::Stopped,
            duration: None,
            loop_mode,
        }
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// Clip length, known once the clip asset has loaded. Non-positive
    /// durations are ignored.
    pub fn set_duration(&mut self, duration: f32) {
        if duration.is_finite() && duration > 0.0 {
            self.duration = Some(duration);
            self.time = self.wrap(self.time);
        }
    }

    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    /// Set the cursor and play from there.
    pub fn play_from(&mut self, time: f32) {
        if time.is_finite() {
            self.time = self.wrap(time.max(0.0));
        }
        self.play();
    }

    fn step(&mut self, delta_seconds: f32) {
        if self.state != PlaybackState::Playing {
            return;
        }
        self.time = self.wrap(self.time + delta_seconds);
    }

    fn wrap(&mut self, time: f32) -> f32 {
        match (self.duration, self.loop_mode) {
            (Some(duration), LoopMode::Repeat) if time >= duration => time % duration,
            (Some(duration), LoopMode::Once) if time >= duration => {
                self.state = PlaybackState::Paused;
                duration
            }
            _ => time,
        }
    }
}

/// Per-character playback controller.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationMixer {
    actions: Vec<AnimationAction>,
    /// Multiplier applied to every delta
    pub time_scale: f32,
}

impl Default for AnimationMixer {
    fn default() -> Self {
        Self {
            actions: Vec::new(),
            time_scale: 1.0,
        }
    }
}

impl AnimationMixer {
    /// A mixer with a single looping action, already playing.
    pub fn with_playing_action() -> Self {
        let mut mixer = Self::default();
        let index = mixer.add_action(AnimationAction::default());
        mixer.actions[index].play();
        mixer
    }

    pub fn add_action(&mut self, action: AnimationAction) -> usize {
        self.actions.push(action);
        self.actions.len() - 1
    }

    pub fn action_mut(&mut self, index: usize) -> Option<&mut AnimationAction> {
        self.actions.get_mut(index)
    }

    /// The action the character is showing; the first one added.
    pub fn current_action(&self) -> Option<&AnimationAction> {
        self.actions.first()
    }

    pub fn update(&mut self, delta_seconds: f32) {
        if !delta_seconds.is_finite() || delta_seconds < 0.0 {
            return;
        }
        let scaled = delta_seconds * self.time_scale;
        for action in &mut self.actions {
            action.step(scaled);
        }
    }
}

impl Animatable for AnimationMixer {
    fn advance(&mut self, delta_seconds: f32) {
        self.update(delta_seconds);
    }

    fn seek(&mut self, time: f32) {
        if let Some(action) = self.actions.first_mut() {
            action.play_from(time);
        }
    }
}
