//! Particle field knobs and session timing.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Tunable particle field parameters. Ranges mirror the sliders the
/// experience was designed around; see [`ParticleConfig::clamped`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct ParticleConfig {
    pub count: usize,
    pub speed: f64,
    pub connection_distance: f64,
    pub particle_size: f64,
    pub base_opacity: f64,
    pub line_thickness: f64,
    /// When false the protagonist ignores pointer movement.
    pub interactive: bool,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self {
            count: 80,
            speed: 0.1,
            connection_distance: 160.0,
            particle_size: 1.2,
            base_opacity: 0.25,
            line_thickness: 0.5,
            interactive: true,
        }
    }
}

pub const COUNT_RANGE: (usize, usize) = (10, 200);
pub const SPEED_RANGE: (f64, f64) = (0.1, 3.0);
pub const CONNECTION_RANGE: (f64, f64) = (50.0, 400.0);
pub const OPACITY_RANGE: (f64, f64) = (0.1, 1.0);

impl ParticleConfig {
    /// Pull every knob back into its allowed range. Non-finite floats fall back to
    /// the default value for that knob.
    pub fn clamped(self) -> Self {
        let d = Self::default();
        let fix = |v: f64, fallback: f64, (lo, hi): (f64, f64)| {
            if v.is_finite() { v.clamp(lo, hi) } else { fallback }
        };
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            count: self.count.clamp(COUNT_RANGE.0, COUNT_RANGE.1),
            speed: fix(self.speed, d.speed, SPEED_RANGE),
            connection_distance: fix(self.connection_distance, d.connection_distance, CONNECTION_RANGE),
            particle_size: positive(self.particle_size, d.particle_size),
            base_opacity: fix(self.base_opacity, d.base_opacity, OPACITY_RANGE),
            line_thickness: positive(self.line_thickness, d.line_thickness),
            interactive: self.interactive,
        }
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let cfg: ParticleConfig = serde_json::from_str(json)?;
        Ok(cfg.clamped())
    }
}

/// Fixed schedule periods, in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionTiming {
    pub vitality_period_ms: f64,
    pub typing_period_ms: f64,
    pub choice_delay_ms: f64,
    pub transition_ms: f64,
}

impl Default for SessionTiming {
    fn default() -> Self {
        Self {
            vitality_period_ms: 2500.0,
            typing_period_ms: 30.0,
            choice_delay_ms: 400.0,
            transition_ms: 2000.0,
        }
    }
}
