use std::time::Duration;

/// Conversion between ticks of the external counter and seconds
///
/// A clock with frequency 0 is unconfigured: every duration converts to zero
/// in both directions instead of dividing by zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Clock {
    frequency: u64,
}

impl Clock {
    pub const fn new(frequency: u64) -> Self {
        Self { frequency }
    }

    /// Ticks per second
    pub fn frequency(&self) -> u64 {
        self.frequency
    }

    pub fn is_configured(&self) -> bool {
        self.frequency > 0
    }

    pub fn ticks_to_seconds(&self, ticks: u64) -> f64 {
        if self.frequency == 0 {
            return 0.0;
        }
        ticks as f64 / self.frequency as f64
    }

    /// Rounds to the nearest tick. NaN maps to 0, out-of-range values saturate.
    pub fn seconds_to_ticks(&self, seconds: f64) -> i64 {
        (seconds * self.frequency as f64).round() as i64
    }

    /// Whole ticks that fit in `seconds`, rounded down. NaN and negative
    /// values map to 0.
    pub fn whole_ticks(&self, seconds: f64) -> u64 {
        (seconds * self.frequency as f64).floor() as u64
    }

    /// Whole ticks contained in `duration`, rounded down
    pub fn duration_to_ticks(&self, duration: Duration) -> u64 {
        let ticks = duration.as_nanos() * u128::from(self.frequency) / 1_000_000_000;
        u64::try_from(ticks).unwrap_or(u64::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_between_ticks_and_seconds() {
        let clock = Clock::new(60);
        assert_eq!(clock.seconds_to_ticks(1.0 / 60.0), 1);
        assert_eq!(clock.seconds_to_ticks(0.5), 30);
        assert_eq!(clock.seconds_to_ticks(-0.5), -30);
        assert_eq!(clock.ticks_to_seconds(30), 0.5);
    }

    #[test]
    fn rounds_to_nearest_tick() {
        let clock = Clock::new(1000);
        assert_eq!(clock.seconds_to_ticks(0.0104), 10);
        assert_eq!(clock.seconds_to_ticks(0.0106), 11);
    }

    #[test]
    fn unconfigured_clock_never_divides_by_zero() {
        let clock = Clock::default();
        assert!(!clock.is_configured());
        assert_eq!(clock.ticks_to_seconds(1234), 0.0);
        assert_eq!(clock.seconds_to_ticks(5.0), 0);
        assert_eq!(clock.duration_to_ticks(Duration::from_secs(3)), 0);
    }

    #[test]
    fn non_finite_seconds_do_not_panic() {
        let clock = Clock::new(1000);
        assert_eq!(clock.seconds_to_ticks(f64::NAN), 0);
        assert_eq!(clock.seconds_to_ticks(f64::INFINITY), i64::MAX);
    }

    #[test]
    fn whole_ticks_round_down() {
        let clock = Clock::new(3);
        assert_eq!(clock.whole_ticks(0.2), 0);
        assert_eq!(clock.whole_ticks(0.7), 2);
        assert_eq!(clock.whole_ticks(-1.0), 0);
        assert_eq!(clock.whole_ticks(f64::NAN), 0);
        assert_eq!(Clock::new(1000).whole_ticks(0.1), 100);
    }

    #[test]
    fn durations_truncate_to_whole_ticks() {
        let clock = Clock::new(60);
        assert_eq!(clock.duration_to_ticks(Duration::from_millis(1000)), 60);
        assert_eq!(clock.duration_to_ticks(Duration::from_millis(33)), 1);
        assert_eq!(clock.duration_to_ticks(Duration::from_millis(16)), 0);
    }
}
