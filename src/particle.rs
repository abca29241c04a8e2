//! Ambient particles and the protagonist, one type told apart by its kind.

use glam::DVec2;
use rand::Rng;

use crate::emotion::EmotionState;
use crate::render::{Rgba, Surface};

const TRANSITION_PUSH: f64 = 0.05;
const TRANSITION_FADE: f64 = 0.003;

const DESCENT_SPEED: f64 = 0.4;
const ARRIVAL_HEIGHT: f64 = 0.45;
const SPAWN_ABOVE: f64 = -100.0;
const SIZE_SCALE: f64 = 1.8;

const MAX_SPEED: f64 = 0.6;
const MIN_ENERGY_FACTOR: f64 = 0.1;
const BRAKING_DISTANCE: f64 = 150.0;
const SNAP_DISTANCE: f64 = 2.0;
const SPEED_SMOOTHING: f64 = 0.04;
const WOBBLE_SMOOTHING: f64 = 0.05;
const WOBBLE_SCALE: f64 = 0.15;
const WOBBLE_CLOCK: f64 = 0.0006;
const FREEZE_DECAY: f64 = 0.95;

const TETHER_RANGE: f64 = 300.0;
const TETHER_DASH: [f64; 2] = [3.0, 6.0];

/// Per-frame inputs for the protagonist.
#[derive(Clone, Copy, Debug)]
pub struct Pursuit {
    pub cursor: DVec2,
    /// Vitality as a 0..=1 fraction.
    pub energy: f64,
    pub now_ms: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ProtagonistState {
    pub pulse: f64,
    pub arrived: bool,
    pub wobble: f64,
    pub speed: f64,
    pub emotion: Option<EmotionState>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParticleKind {
    Ambient,
    Protagonist(ProtagonistState),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: DVec2,
    pub vel: DVec2,
    pub size: f64,
    pub opacity: f64,
    pub kind: ParticleKind,
}

impl Particle {
    /// Ambient particle at a random spot with a random drift in `[-speed/2, speed/2)`.
    pub fn ambient<R: Rng>(rng: &mut R, bounds: DVec2, size: f64, speed: f64) -> Self {
        let half = speed / 2.0;
        let drift = |rng: &mut R| if half > 0.0 { rng.gen_range(-half..half) } else { 0.0 };
        Self {
            pos: DVec2::new(rng.gen_range(0.0..bounds.x.max(1.0)), rng.gen_range(0.0..bounds.y.max(1.0))),
            vel: DVec2::new(drift(rng), drift(rng)),
            size,
            opacity: 1.0,
            kind: ParticleKind::Ambient,
        }
    }

    /// Protagonist, parked above the top edge until it descends.
    pub fn protagonist(bounds: DVec2, size: f64) -> Self {
        Self {
            pos: DVec2::new(bounds.x / 2.0, SPAWN_ABOVE),
            vel: DVec2::ZERO,
            size: size * SIZE_SCALE,
            opacity: 1.0,
            kind: ParticleKind::Protagonist(ProtagonistState::default()),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }

    pub fn protagonist_state(&self) -> Option<&ProtagonistState> {
        match &self.kind {
            ParticleKind::Protagonist(p) => Some(p),
            ParticleKind::Ambient => None,
        }
    }

    /// Free drift, bouncing off the viewport edges.
    pub fn drift(&mut self, bounds: DVec2) {
        self.pos += self.vel;
        if self.pos.x < 0.0 || self.pos.x > bounds.x {
            self.vel.x = -self.vel.x;
        }
        if self.pos.y < 0.0 || self.pos.y > bounds.y {
            self.vel.y = -self.vel.y;
        }
    }

    /// Outward push from the centre plus a linear fade.
    pub fn disperse(&mut self, bounds: DVec2) {
        let away = self.pos - bounds / 2.0;
        let dist = nonzero_length(away);
        self.vel += away / dist * TRANSITION_PUSH;
        self.opacity = (self.opacity - TRANSITION_FADE).max(0.0);
        self.pos += self.vel;
    }

    /// One protagonist frame. Returns the emotion when it differs from the one
    /// last reported. No-op for ambient particles.
    pub fn pursue(&mut self, bounds: DVec2, input: Pursuit) -> Option<EmotionState> {
        let ParticleKind::Protagonist(state) = &mut self.kind else { return None };

        if !state.arrived {
            self.pos.y += DESCENT_SPEED;
            if self.pos.y >= bounds.y * ARRIVAL_HEIGHT {
                state.arrived = true;
            }
            return None;
        }

        if input.energy <= 0.0 {
            state.speed *= FREEZE_DECAY;
            state.wobble *= FREEZE_DECAY;
            return None;
        }

        let to_cursor = input.cursor - self.pos;
        let dist = to_cursor.length();
        let emotion = EmotionState::from_distance(dist);

        let energy_factor = input.energy.max(MIN_ENERGY_FACTOR);
        let max_speed = MAX_SPEED * energy_factor;
        let target_speed = if dist < SNAP_DISTANCE {
            0.0
        } else if dist < BRAKING_DISTANCE {
            dist / BRAKING_DISTANCE * max_speed
        } else {
            max_speed
        };
        state.speed += (target_speed - state.speed) * SPEED_SMOOTHING;
        if dist > 1.0 {
            self.pos += to_cursor / dist * state.speed;
        }

        state.wobble += (emotion.target_wobble() - state.wobble) * WOBBLE_SMOOTHING;
        let t = input.now_ms * WOBBLE_CLOCK;
        self.pos += DVec2::new((t * 2.1).sin(), (t * 1.7).cos()) * state.wobble * WOBBLE_SCALE;

        state.pulse += emotion.pulse_rate() * energy_factor;

        let changed = state.emotion != Some(emotion);
        state.emotion = Some(emotion);
        changed.then_some(emotion)
    }

    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S, base_opacity: f64, cursor: DVec2, energy: f64) {
        if !self.is_visible() {
            return;
        }
        match &self.kind {
            ParticleKind::Ambient => {
                surface.fill_circle(self.pos, self.size, Rgba::white(self.opacity * base_opacity));
            }
            ParticleKind::Protagonist(state) => self.draw_protagonist(surface, state, cursor, energy),
        }
    }

    fn draw_protagonist<S: Surface + ?Sized>(&self, surface: &mut S, state: &ProtagonistState, cursor: DVec2, energy: f64) {
        let breathing = (self.size + state.pulse.sin() * 0.4 * energy).max(0.0);
        let alive = energy > 0.0;

        let dist = self.pos.distance(cursor);
        if state.arrived && alive && dist < TETHER_RANGE {
            let alpha = (1.0 - dist / TETHER_RANGE) * 0.1 * energy;
            surface.stroke_line(self.pos, cursor, 0.5, Rgba::white(alpha), &TETHER_DASH);
        }

        if alive {
            surface.fill_circle(self.pos, breathing * 4.0, Rgba::white(0.03 * energy));
        }

        surface.fill_circle(self.pos, breathing, Rgba::white(0.3 + 0.6 * energy));
    }
}

/// Vector length with zero replaced by 1 so it can be divided by.
pub fn nonzero_length(v: DVec2) -> f64 {
    let len = v.length();
    if len > 0.0 { len } else { 1.0 }
}
