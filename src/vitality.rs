//! Vitality decay and the dialogue pacing rule it drives.

pub const MAX_VITALITY: u32 = 100;

/// Decaying life resource plus the score that mirrors every decrement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Vitality {
    value: u32,
    score: u32,
}

impl Default for Vitality {
    fn default() -> Self {
        Self { value: MAX_VITALITY, score: 0 }
    }
}

impl Vitality {
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// `value / 100`, the factor most visuals scale by.
    pub fn fraction(&self) -> f64 {
        self.value as f64 / MAX_VITALITY as f64
    }

    pub fn is_depleted(&self) -> bool {
        self.value == 0
    }

    /// One decay step. Returns false (and changes nothing) once depleted.
    pub fn tick(&mut self) -> bool {
        if self.value == 0 {
            return false;
        }
        self.value -= 1;
        self.score += 1;
        true
    }
}

/// Gap between the vitality an entry surfaced at and the vitality the next one
/// should surface at. Never below 1.
pub fn pacing_gap(vitality: u32, remaining: usize) -> u32 {
    let slots = remaining as u32 + 1;
    (vitality / slots).max(1)
}

/// Tracks which entry comes next and at what vitality it is due.
#[derive(Clone, Copy, Debug)]
pub struct DialoguePacer {
    total: usize,
    next_index: usize,
    next_trigger: i64,
}

impl DialoguePacer {
    pub fn new(total: usize) -> Self {
        Self { total, next_index: 0, next_trigger: MAX_VITALITY as i64 - 1 }
    }

    pub fn next_index(&self) -> usize {
        self.next_index
    }

    pub fn next_trigger(&self) -> i64 {
        self.next_trigger
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_index >= self.total
    }

    /// Record that entry `index` was surfaced at `vitality` and recompute the
    /// trigger. Returns the new trigger, or `None` for an out-of-range index.
    pub fn surfaced(&mut self, index: usize, vitality: u32) -> Option<i64> {
        if index >= self.total {
            return None;
        }
        let remaining = self.total - (index + 1);
        let gap = pacing_gap(vitality, remaining);
        self.next_index = index + 1;
        self.next_trigger = vitality as i64 - gap as i64;
        tracing::trace!(index, vitality, gap, next_trigger = self.next_trigger, "dialogue paced");
        Some(self.next_trigger)
    }

    /// Next entry whose trigger vitality has been reached.
    pub fn due(&self, vitality: u32) -> Option<usize> {
        (!self.is_exhausted() && vitality as i64 <= self.next_trigger).then_some(self.next_index)
    }

    /// At zero vitality the final entry is shown even if earlier ones were not.
    pub fn forced(&self, vitality: u32) -> Option<usize> {
        (vitality == 0 && !self.is_exhausted()).then(|| self.total - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vitality_never_goes_below_zero() {
        let mut v = Vitality::default();
        let mut last = v.value();
        for _ in 0..250 {
            v.tick();
            assert!(v.value() <= last);
            last = v.value();
        }
        assert_eq!(v.value(), 0);
        assert!(v.is_depleted());
        assert!(!v.tick());
    }

    #[test]
    fn score_mirrors_decrements() {
        let mut v = Vitality::default();
        for _ in 0..130 {
            v.tick();
        }
        assert_eq!(v.score(), 100);
        assert_eq!(v.value() + v.score(), MAX_VITALITY);
    }

    #[test]
    fn first_gap_for_full_script() {
        let mut p = DialoguePacer::new(26);
        assert_eq!(p.surfaced(0, 100), Some(97));
        assert_eq!(pacing_gap(100, 25), 3);
        assert_eq!(p.next_index(), 1);
    }

    #[test]
    fn trigger_is_always_below_vitality() {
        for total in 1..=30usize {
            for index in 0..total {
                for vitality in 0..=MAX_VITALITY {
                    let mut p = DialoguePacer::new(total);
                    let trigger = p.surfaced(index, vitality).unwrap();
                    assert!(trigger < vitality as i64);
                    assert!(pacing_gap(vitality, total - index - 1) >= 1);
                }
            }
        }
    }

    #[test]
    fn gaps_shrink_late_in_the_script() {
        let early = pacing_gap(100, 25);
        let late = pacing_gap(20, 2);
        assert!(late > 0 && early > 0);
        assert_eq!(pacing_gap(3, 10), 1);
    }

    #[test]
    fn due_only_after_trigger() {
        let mut p = DialoguePacer::new(26);
        p.surfaced(0, 100);
        assert_eq!(p.due(98), None);
        assert_eq!(p.due(97), Some(1));
        assert_eq!(p.due(50), Some(1));
    }

    #[test]
    fn out_of_range_surface_is_noop() {
        let mut p = DialoguePacer::new(3);
        p.surfaced(1, 60);
        assert_eq!(p.surfaced(3, 10), None);
        assert_eq!(p.next_index(), 2);
    }

    #[test]
    fn forced_jump_targets_last_entry_at_zero() {
        let mut p = DialoguePacer::new(26);
        p.surfaced(4, 40);
        assert_eq!(p.forced(1), None);
        assert_eq!(p.forced(0), Some(25));
        p.surfaced(25, 0);
        assert!(p.is_exhausted());
        assert_eq!(p.forced(0), None);
        assert_eq!(p.due(0), None);
    }
}
