//! One visualizer session: a structure, its producer and its playback.

use arbor_layout::Value;
use arbor_scene::{NullSink, Scene, SceneProducer};
use arbor_structures::{Operation, Structure, StructureKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::config::VisConfig;
use crate::error::{Error, Result};
use crate::playback::Playback;

/// Default and maximum number of values added by [`Session::populate`].
pub const DEFAULT_POPULATE_COUNT: usize = 10;
pub const MAX_POPULATE_COUNT: usize = 20;

/// Random values are drawn from `0..POPULATE_VALUE_LIMIT`.
pub const POPULATE_VALUE_LIMIT: Value = 100;

pub struct Session {
    kind: StructureKind,
    structure: Box<dyn Structure + Send + Sync>,
    producer: SceneProducer,
    playback: Playback,
}

impl Session {
    /// A session over the kind's initial values.
    pub fn new(kind: StructureKind, config: &VisConfig) -> Self {
        Self::with_structure(kind.seeded(), config)
    }

    /// A session over an empty structure.
    pub fn empty(kind: StructureKind, config: &VisConfig) -> Self {
        Self::with_structure(kind.build(), config)
    }

    fn with_structure(structure: Box<dyn Structure + Send + Sync>, config: &VisConfig) -> Self {
        let mut playback = Playback::new(Scene::from_layout(structure.layout()), config.step_ms);
        playback.set_autoplay(config.autoplay);
        Self {
            kind: structure.kind(),
            structure,
            producer: SceneProducer::new(),
            playback,
        }
    }

    pub fn kind(&self) -> StructureKind {
        self.kind
    }

    pub fn structure(&self) -> &dyn Structure {
        self.structure.as_ref()
    }

    pub fn playback(&self) -> &Playback {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut Playback {
        &mut self.playback
    }

    pub fn current_scene(&self) -> &Scene {
        self.playback.current_scene()
    }

    pub fn is_animating(&self) -> bool {
        self.playback.is_animating()
    }

    fn ensure_idle(&self, what: &str) -> Result<()> {
        if self.is_animating() {
            warn!(kind = %self.kind, what, "rejected: animation in progress");
            return Err(Error::AnimationInProgress);
        }
        Ok(())
    }

    /// Run `op` and load its storyboard into playback.
    ///
    /// Rejected while the previous storyboard is still playing.
    pub fn run(&mut self, op: Operation) -> Result<&[Scene]> {
        self.ensure_idle("operation")?;
        info!(kind = %self.kind, %op, "running operation");

        self.producer.start(Scene::from_layout(self.structure.layout()));
        self.structure.apply(op, &mut self.producer);
        let scenes = self.producer.finish();
        debug!(kind = %self.kind, scenes = scenes.len(), "storyboard recorded");

        self.playback.load(scenes);
        Ok(self.playback.scenes())
    }

    /// Remove every value.
    pub fn clear(&mut self) -> Result<()> {
        self.ensure_idle("clear")?;
        info!(kind = %self.kind, "clearing structure");
        self.structure.clear();
        self.reset();
        Ok(())
    }

    /// Add `count` pseudo-random values without animation.
    ///
    /// `count` defaults to 10 and is capped at 20. Returns the values drawn;
    /// duplicates among them leave a tree unchanged.
    pub fn populate(&mut self, count: Option<usize>, seed: u64) -> Result<Vec<Value>> {
        self.ensure_idle("populate")?;
        let count = count
            .filter(|&c| c > 0)
            .unwrap_or(DEFAULT_POPULATE_COUNT)
            .min(MAX_POPULATE_COUNT);

        let mut rng = StdRng::seed_from_u64(seed);
        let values: Vec<Value> = (0..count)
            .map(|_| rng.gen_range(0..POPULATE_VALUE_LIMIT))
            .collect();
        info!(kind = %self.kind, count, seed, "populating structure");

        for &value in &values {
            self.structure.insert(value, &mut NullSink);
        }
        self.reset();
        Ok(values)
    }

    fn reset(&mut self) {
        self.playback.reset_to(Scene::from_layout(self.structure.layout()));
    }
}
