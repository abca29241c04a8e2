//! Protagonist mood, derived from how far the cursor is.

/// Mood bands ordered by distance. Upper bounds are exclusive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EmotionState {
    Comfort,
    #[default]
    Tranquil,
    Anxiety,
    Fear,
    Panic,
}

const BANDS: [(f64, EmotionState); 4] = [
    (120.0, EmotionState::Comfort),
    (280.0, EmotionState::Tranquil),
    (500.0, EmotionState::Anxiety),
    (750.0, EmotionState::Fear),
];

impl EmotionState {
    pub fn from_distance(distance: f64) -> Self {
        BANDS
            .iter()
            .find(|(limit, _)| distance < *limit)
            .map(|&(_, state)| state)
            .unwrap_or(EmotionState::Panic)
    }

    /// Positional jitter amplitude the protagonist eases toward.
    pub fn target_wobble(self) -> f64 {
        match self {
            EmotionState::Comfort => 0.05,
            EmotionState::Tranquil => 0.15,
            EmotionState::Anxiety => 0.6,
            EmotionState::Fear => 1.2,
            EmotionState::Panic => 2.5,
        }
    }

    /// Breathing speed before vitality scaling.
    pub fn pulse_rate(self) -> f64 {
        match self {
            EmotionState::Panic => 0.08,
            EmotionState::Fear => 0.04,
            _ => 0.02,
        }
    }

    /// HUD caption.
    pub fn label(self) -> &'static str {
        match self {
            EmotionState::Comfort => "Умиротворение",
            EmotionState::Tranquil => "Спокойствие",
            EmotionState::Anxiety => "Тревога",
            EmotionState::Fear => "Страх",
            EmotionState::Panic => "Паника",
        }
    }

    /// HUD indicator colour.
    pub fn color(self) -> &'static str {
        match self {
            EmotionState::Comfort => "#67e8f9",
            EmotionState::Tranquil => "#34d399",
            EmotionState::Anxiety => "#facc15",
            EmotionState::Fear => "#f97316",
            EmotionState::Panic => "#e11d48",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_sample_distances() {
        assert_eq!(EmotionState::from_distance(100.0), EmotionState::Comfort);
        assert_eq!(EmotionState::from_distance(200.0), EmotionState::Tranquil);
        assert_eq!(EmotionState::from_distance(400.0), EmotionState::Anxiety);
        assert_eq!(EmotionState::from_distance(600.0), EmotionState::Fear);
        assert_eq!(EmotionState::from_distance(900.0), EmotionState::Panic);
    }

    #[test]
    fn band_limits_are_exclusive() {
        assert_eq!(EmotionState::from_distance(119.999), EmotionState::Comfort);
        assert_eq!(EmotionState::from_distance(120.0), EmotionState::Tranquil);
        assert_eq!(EmotionState::from_distance(280.0), EmotionState::Anxiety);
        assert_eq!(EmotionState::from_distance(500.0), EmotionState::Fear);
        assert_eq!(EmotionState::from_distance(750.0), EmotionState::Panic);
        assert_eq!(EmotionState::from_distance(0.0), EmotionState::Comfort);
    }

    #[test]
    fn wobble_grows_with_distance() {
        let order = [
            EmotionState::Comfort,
            EmotionState::Tranquil,
            EmotionState::Anxiety,
            EmotionState::Fear,
            EmotionState::Panic,
        ];
        for pair in order.windows(2) {
            assert!(pair[0].target_wobble() < pair[1].target_wobble());
        }
        assert!(EmotionState::Panic.pulse_rate() > EmotionState::Fear.pulse_rate());
        assert!(EmotionState::Fear.pulse_rate() > EmotionState::Comfort.pulse_rate());
    }
}
