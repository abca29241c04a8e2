//! One play-through: phases, schedules, vitality, dialogue and the field.
//!
//! [`Session::advance`] is called once per animation frame with the frame
//! timestamp. The vitality interval, the typewriter interval, the transition and
//! post-choice timeouts are all polled from it, so the whole session runs on one
//! thread without callbacks racing each other.

use glam::DVec2;
use rand::Rng;

use crate::config::{ParticleConfig, SessionTiming};
use crate::dialogue::DialogueMachine;
use crate::emotion::EmotionState;
use crate::field::{Motion, ParticleField};
use crate::particle::Pursuit;
use crate::render::Surface;
use crate::script::{Choice, DialogueEntry};
use crate::timer::{Interval, Timeout};
use crate::vitality::{DialoguePacer, Vitality};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Menu,
    Transitioning,
    Active,
}

impl Phase {
    fn motion(self) -> Motion {
        match self {
            Phase::Menu => Motion::Drift,
            Phase::Transitioning => Motion::Disperse,
            Phase::Active => Motion::Pursue,
        }
    }
}

pub struct Session {
    config: ParticleConfig,
    timing: SessionTiming,
    script: &'static [DialogueEntry],
    phase: Phase,
    cursor: DVec2,
    field: ParticleField,
    vitality: Vitality,
    pacer: DialoguePacer,
    dialogue: DialogueMachine,
    status: EmotionState,
    transition: Timeout,
    vitality_timer: Interval,
    typing_timer: Interval,
    last_frame_ms: f64,
}

impl Session {
    pub fn new<R: Rng>(
        rng: &mut R,
        config: ParticleConfig,
        timing: SessionTiming,
        script: &'static [DialogueEntry],
        viewport: DVec2,
    ) -> Self {
        let config = config.clamped();
        Self {
            field: ParticleField::new(rng, viewport, &config),
            config,
            timing,
            script,
            phase: Phase::Menu,
            cursor: DVec2::ZERO,
            vitality: Vitality::default(),
            pacer: DialoguePacer::new(script.len()),
            dialogue: DialogueMachine::new(timing.choice_delay_ms),
            status: EmotionState::default(),
            transition: Timeout::default(),
            vitality_timer: Interval::new(timing.vitality_period_ms),
            typing_timer: Interval::new(timing.typing_period_ms),
            last_frame_ms: 0.0,
        }
    }

    // --- Inputs --------------------------------------------------------------

    /// Start button: Menu → Transitioning. Ignored in any other phase.
    pub fn begin(&mut self, now: f64) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.phase = Phase::Transitioning;
        self.transition.arm(now, self.timing.transition_ms);
        tracing::info!("transition started");
        true
    }

    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if self.config.interactive {
            self.cursor = DVec2::new(x, y);
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.field.resize(DVec2::new(width, height));
    }

    pub fn select_choice(&mut self, index: usize, now: f64) -> bool {
        let taken = self.dialogue.select(index, now);
        if taken {
            tracing::debug!(index, response = self.dialogue.last_response(), "choice made");
        }
        taken
    }

    /// Swap knobs at runtime. A new count rebuilds the ambient swarm.
    pub fn reconfigure<R: Rng>(&mut self, rng: &mut R, config: ParticleConfig) {
        let config = config.clamped();
        if config.count != self.config.count {
            self.field.respawn(rng, &config);
        }
        self.config = config;
        tracing::info!(?config, "particle config applied");
    }

    // --- Frame ---------------------------------------------------------------

    pub fn advance(&mut self, now: f64) {
        self.last_frame_ms = now;

        if self.phase == Phase::Transitioning && self.transition.fired(now) {
            self.enter_active(now);
        }

        if self.phase == Phase::Active {
            for _ in 0..self.vitality_timer.due(now) {
                if !self.vitality.tick() {
                    self.vitality_timer.stop();
                    break;
                }
                if self.vitality.is_depleted() {
                    self.vitality_timer.stop();
                    tracing::info!(score = self.vitality.score(), "vitality depleted");
                }
                self.watch(now);
            }

            if self.dialogue.poll(now) {
                self.typing_timer.start(now);
            }
            for _ in 0..self.typing_timer.due(now) {
                self.dialogue.type_step();
            }
            self.watch(now);
        }

        let input = Pursuit { cursor: self.cursor, energy: self.vitality.fraction(), now_ms: now };
        if let Some(emotion) = self.field.step(self.phase.motion(), &self.config, input) {
            if !self.vitality.is_depleted() && emotion != self.status {
                tracing::debug!(?emotion, "emotion changed");
                self.status = emotion;
            }
        }
    }

    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        let energy = match self.phase {
            Phase::Active => self.vitality.fraction(),
            _ => 1.0,
        };
        self.field.render(surface, self.phase.motion(), &self.config, self.cursor, energy);
    }

    /// Stop every schedule. The session keeps its last state for inspection.
    pub fn end(&mut self) {
        self.transition.cancel();
        self.vitality_timer.stop();
        self.typing_timer.stop();
        tracing::info!(phase = ?self.phase, "session ended");
    }

    fn enter_active(&mut self, now: f64) {
        self.phase = Phase::Active;
        self.vitality = Vitality::default();
        self.pacer = DialoguePacer::new(self.script.len());
        self.dialogue.reset();
        self.vitality_timer.start(now);
        tracing::info!(entries = self.script.len(), "session active");
        self.surface(0, now);
    }

    /// Vitality watcher: forced jump first, then the regular trigger when the
    /// dialogue box is free.
    fn watch(&mut self, now: f64) {
        let v = self.vitality.value();
        if let Some(last) = self.pacer.forced(v) {
            self.surface(last, now);
            return;
        }
        if !self.dialogue.accepts_next() {
            return;
        }
        if let Some(next) = self.pacer.due(v) {
            self.surface(next, now);
        }
    }

    fn surface(&mut self, index: usize, now: f64) {
        let Some(entry) = self.script.get(index) else { return };
        self.pacer.surfaced(index, self.vitality.value());
        self.dialogue.surface(entry);
        self.typing_timer.start(now);
        tracing::debug!(index, vitality = self.vitality.value(), "dialogue surfaced");
    }

    // --- Snapshot ------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn vitality(&self) -> u32 {
        self.vitality.value()
    }

    pub fn score(&self) -> u32 {
        self.vitality.score()
    }

    pub fn status(&self) -> EmotionState {
        self.status
    }

    pub fn cursor(&self) -> DVec2 {
        self.cursor
    }

    pub fn config(&self) -> &ParticleConfig {
        &self.config
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn dialogue(&self) -> &DialogueMachine {
        &self.dialogue
    }

    pub fn dialogue_text(&self) -> &'static str {
        self.dialogue.visible_text()
    }

    pub fn choices(&self) -> &[Choice] {
        self.dialogue.choices()
    }

    pub fn last_response(&self) -> Option<&'static str> {
        self.dialogue.last_response()
    }

    /// Index of the entry that will surface next (`script.len()` once done).
    pub fn next_entry(&self) -> usize {
        self.pacer.next_index()
    }

    pub fn next_trigger(&self) -> i64 {
        self.pacer.next_trigger()
    }

    pub fn is_vitality_running(&self) -> bool {
        self.vitality_timer.is_running()
    }

    pub fn last_frame_ms(&self) -> f64 {
        self.last_frame_ms
    }
}
