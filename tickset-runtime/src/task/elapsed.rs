use super::clock::Clock;

/// Time since the previous update of a task set, capped at its elapsed ceiling
///
/// The cap is applied in seconds. [`seconds`](Elapsed::seconds) is exactly
/// `min(raw, ceiling)`; [`ticks`](Elapsed::ticks) is capped at the whole number
/// of ticks that fit under the ceiling, so it never exceeds it either.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Elapsed {
    raw_ticks: u64,
    ceiling: f64,
    clock: Clock,
}

impl Elapsed {
    /// `ceiling` is in seconds; negative or NaN ceilings behave as zero
    pub fn new(raw_ticks: u64, ceiling: f64, clock: Clock) -> Self {
        Self {
            raw_ticks,
            ceiling: ceiling.max(0.0),
            clock,
        }
    }

    pub fn ticks(&self) -> u64 {
        self.raw_ticks.min(self.clock.whole_ticks(self.ceiling))
    }

    pub fn seconds(&self) -> f64 {
        self.clock.ticks_to_seconds(self.raw_ticks).min(self.ceiling)
    }

    /// Ticks actually counted since the previous update, before the cap
    pub fn raw_ticks(&self) -> u64 {
        self.raw_ticks
    }

    pub fn is_clamped(&self) -> bool {
        self.clock.ticks_to_seconds(self.raw_ticks) > self.ceiling
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn below_ceiling_passes_through() {
        let elapsed = Elapsed::new(15, 1.0, Clock::new(60));
        assert_eq!(elapsed.ticks(), 15);
        assert_eq!(elapsed.seconds(), 0.25);
        assert!(!elapsed.is_clamped());
    }

    #[test]
    fn ceiling_between_ticks_caps_seconds_exactly() {
        // 0.2 s is 0.6 ticks at 3 Hz
        let elapsed = Elapsed::new(9, 0.2, Clock::new(3));
        assert_eq!(elapsed.seconds(), 0.2);
        assert_eq!(elapsed.ticks(), 0);
        assert_eq!(elapsed.raw_ticks(), 9);
        assert!(elapsed.is_clamped());

        let elapsed = Elapsed::new(5, 0.4, Clock::new(1));
        assert_eq!(elapsed.seconds(), 0.4);
        assert_eq!(elapsed.ticks(), 0);
    }

    #[test]
    fn ticks_never_exceed_ceiling() {
        let clock = Clock::new(1000);
        let elapsed = Elapsed::new(5000, 0.0125, clock);
        assert_eq!(elapsed.ticks(), 12);
        assert!(clock.ticks_to_seconds(elapsed.ticks()) <= 0.0125);
        assert_eq!(elapsed.seconds(), 0.0125);
    }

    #[test]
    fn invalid_ceilings_behave_as_zero() {
        let clock = Clock::new(60);
        for ceiling in [-1.0, f64::NAN] {
            let elapsed = Elapsed::new(30, ceiling, clock);
            assert_eq!(elapsed.ticks(), 0);
            assert_eq!(elapsed.seconds(), 0.0);
        }
    }

    #[test]
    fn unconfigured_clock_reports_nothing() {
        let elapsed = Elapsed::new(500, 1.0, Clock::default());
        assert_eq!(elapsed.ticks(), 0);
        assert_eq!(elapsed.seconds(), 0.0);
        assert!(!elapsed.is_clamped());
    }
}
