//! Playback controls for a recorded storyboard.

use arbor_scene::Scene;
use serde::{Deserialize, Serialize};

/// Playback speed level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackSpeed {
    /// Level 1, 1.5x the base interval
    Slowest,
    /// Level 2
    Slow,
    /// Level 3, the base interval
    #[default]
    Normal,
    /// Level 4
    Fast,
    /// Level 5, half the base interval
    Fastest,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 5] = [
        PlaybackSpeed::Slowest,
        PlaybackSpeed::Slow,
        PlaybackSpeed::Normal,
        PlaybackSpeed::Fast,
        PlaybackSpeed::Fastest,
    ];

    /// Level from 1 (slowest) to 5 (fastest).
    pub fn level(&self) -> u8 {
        match self {
            PlaybackSpeed::Slowest => 1,
            PlaybackSpeed::Slow => 2,
            PlaybackSpeed::Normal => 3,
            PlaybackSpeed::Fast => 4,
            PlaybackSpeed::Fastest => 5,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level).checked_sub(1)?).copied()
    }

    /// Interval multiplier: `1.75 - 0.25 * level`.
    pub fn multiplier(&self) -> f64 {
        1.75 - 0.25 * f64::from(self.level())
    }

    /// Milliseconds between steps at this speed.
    pub fn ms_per_step(&self, base_ms: u64) -> u64 {
        (base_ms as f64 * self.multiplier()).round() as u64
    }
}

/// Current state of playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackState {
    /// Nothing loaded; the base scene is shown
    Idle,
    /// Advancing on every tick
    Playing,
    /// Holding the current step
    Paused,
    /// Last step reached
    Finished,
}

/// Playback controller over one storyboard.
///
/// While a storyboard is loaded and its last scene has not been shown yet the
/// controller reports [`is_animating`](Self::is_animating). Once the last
/// scene is shown it becomes the base scene and the gate opens again.
#[derive(Debug, Clone)]
pub struct Playback {
    scenes: Vec<Scene>,
    base: Scene,
    current: usize,
    state: PlaybackState,
    speed: PlaybackSpeed,
    base_ms: u64,
    autoplay: bool,
    animating: bool,
}

impl Playback {
    /// Create an idle controller showing `base`.
    pub fn new(base: Scene, base_ms: u64) -> Self {
        Self {
            scenes: Vec::new(),
            base,
            current: 0,
            state: PlaybackState::Idle,
            speed: PlaybackSpeed::Normal,
            base_ms,
            autoplay: true,
            animating: false,
        }
    }

    /// Load a fresh storyboard from its first scene.
    ///
    /// With autoplay on and more than one scene, playback starts right away.
    pub fn load(&mut self, scenes: Vec<Scene>) {
        self.scenes = scenes;
        self.current = 0;
        if self.scenes.is_empty() {
            self.animating = false;
            self.state = PlaybackState::Idle;
            return;
        }
        self.animating = true;
        self.state = if self.autoplay && self.scenes.len() > 1 {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        };
        self.settle();
    }

    /// Drop the storyboard and show `scene`.
    pub fn reset_to(&mut self, scene: Scene) {
        self.base = scene;
        self.scenes.clear();
        self.current = 0;
        self.state = PlaybackState::Idle;
        self.animating = false;
    }

    /// The scene to display: the current step, or the base scene when idle.
    pub fn current_scene(&self) -> &Scene {
        self.scenes.get(self.current).unwrap_or(&self.base)
    }

    pub fn base_scene(&self) -> &Scene {
        &self.base
    }

    pub fn scenes(&self) -> &[Scene] {
        &self.scenes
    }

    pub fn current_step(&self) -> usize {
        self.current
    }

    pub fn total_scenes(&self) -> usize {
        self.scenes.len()
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn can_step_forward(&self) -> bool {
        self.current + 1 < self.scenes.len()
    }

    pub fn can_step_back(&self) -> bool {
        self.current > 0
    }

    /// Jump to `step` and pause. Out-of-range steps are ignored.
    pub fn seek(&mut self, step: usize) -> bool {
        if step >= self.scenes.len() {
            return false;
        }
        self.current = step;
        self.state = PlaybackState::Paused;
        self.settle();
        true
    }

    pub fn step_forward(&mut self) -> bool {
        self.can_step_forward() && self.seek(self.current + 1)
    }

    pub fn step_backward(&mut self) -> bool {
        self.can_step_back() && self.seek(self.current - 1)
    }

    pub fn rewind(&mut self) -> bool {
        self.seek(0)
    }

    pub fn fast_forward(&mut self) -> bool {
        match self.scenes.len() {
            0 => false,
            len => self.seek(len - 1),
        }
    }

    /// Start advancing. Does nothing at the last step.
    pub fn play(&mut self) {
        if self.can_step_forward() {
            self.state = PlaybackState::Playing;
        }
    }

    pub fn pause(&mut self) {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
    }

    pub fn toggle(&mut self) {
        if self.state == PlaybackState::Playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Advance one step if playing. Returns whether the step changed.
    pub fn tick(&mut self) -> bool {
        if self.state != PlaybackState::Playing || !self.can_step_forward() {
            return false;
        }
        self.current += 1;
        self.settle();
        true
    }

    pub fn set_speed(&mut self, speed: PlaybackSpeed) {
        self.speed = speed;
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    /// Milliseconds between ticks at the current speed.
    pub fn ms_per_step(&self) -> u64 {
        self.speed.ms_per_step(self.base_ms)
    }

    /// Progress through the storyboard (0.0 - 1.0).
    pub fn progress(&self) -> f64 {
        match self.scenes.len() {
            0 | 1 => 1.0,
            len => self.current as f64 / (len - 1) as f64,
        }
    }

    pub fn status(&self) -> PlaybackStatus {
        PlaybackStatus::from(self)
    }

    /// Close the animation once the last scene is on screen.
    fn settle(&mut self) {
        if self.scenes.is_empty() || self.can_step_forward() {
            return;
        }
        if self.animating {
            self.base = self.scenes[self.current].clone();
            self.animating = false;
        }
        self.state = PlaybackState::Finished;
    }
}

/// Playback status for sending to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackStatus {
    pub current_step: usize,
    pub total_scenes: usize,
    pub state: PlaybackState,
    pub speed: PlaybackSpeed,
    pub ms_per_step: u64,
    pub progress: f64,
    pub can_step_back: bool,
    pub can_step_forward: bool,
    pub is_animating: bool,
    pub autoplay: bool,
}

impl From<&Playback> for PlaybackStatus {
    fn from(playback: &Playback) -> Self {
        Self {
            current_step: playback.current,
            total_scenes: playback.total_scenes(),
            state: playback.state,
            speed: playback.speed,
            ms_per_step: playback.ms_per_step(),
            progress: playback.progress(),
            can_step_back: playback.can_step_back(),
            can_step_forward: playback.can_step_forward(),
            is_animating: playback.animating,
            autoplay: playback.autoplay,
        }
    }
}
