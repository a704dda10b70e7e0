/// Time unit for durations written in configuration files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Microseconds,
    Milliseconds,
    Seconds,
    Minutes,
}

impl TimeUnit {
    pub fn to_seconds(&self, value: f64) -> f64 {
        match self {
            TimeUnit::Microseconds => value / 1_000_000.0,
            TimeUnit::Milliseconds => value / 1_000.0,
            TimeUnit::Seconds => value,
            TimeUnit::Minutes => value * 60.0,
        }
    }

    /// Parse a duration string like "250ms", "0.5s", "16us", "2m"
    /// Returns (value, TimeUnit) if successful
    ///
    /// Strict rules:
    /// - Only lowercase suffixes are accepted: "us", "ms", "s", "m"
    /// - Format must be: <number><suffix>, the number may carry a fractional part
    /// - No spaces allowed between number and suffix
    pub fn parse_duration(s: &str) -> Option<(f64, TimeUnit)> {
        let s = s.trim();

        let split_pos = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(s.len());

        if split_pos == 0 || split_pos == s.len() {
            return None;
        }

        let (num_str, unit_str) = s.split_at(split_pos);
        let value = num_str.parse::<f64>().ok()?;

        let time_unit = match unit_str {
            "us" => TimeUnit::Microseconds,
            "ms" => TimeUnit::Milliseconds,
            "s" => TimeUnit::Seconds,
            "m" => TimeUnit::Minutes,
            _ => return None,
        };

        Some((value, time_unit))
    }

    /// Parse either a shorthand duration ("250ms") or a bare number of seconds ("0.25")
    pub fn parse_seconds(s: &str) -> Option<f64> {
        if let Some((value, unit)) = Self::parse_duration(s) {
            return Some(unit.to_seconds(value));
        }
        s.trim().parse::<f64>().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_shorthand_durations() {
        assert_eq!(TimeUnit::parse_duration("250ms"), Some((250.0, TimeUnit::Milliseconds)));
        assert_eq!(TimeUnit::parse_duration("0.5s"), Some((0.5, TimeUnit::Seconds)));
        assert_eq!(TimeUnit::parse_duration(" 16us "), Some((16.0, TimeUnit::Microseconds)));
        assert_eq!(TimeUnit::parse_duration("2m"), Some((2.0, TimeUnit::Minutes)));
    }

    #[test]
    fn rejects_malformed_shorthand() {
        assert_eq!(TimeUnit::parse_duration("ms"), None);
        assert_eq!(TimeUnit::parse_duration("100"), None);
        assert_eq!(TimeUnit::parse_duration("100MS"), None);
        assert_eq!(TimeUnit::parse_duration("100 ms"), None);
        assert_eq!(TimeUnit::parse_duration("1.2.3s"), None);
    }

    #[test]
    fn parse_seconds_accepts_both_forms() {
        assert_eq!(TimeUnit::parse_seconds("100ms"), Some(0.1));
        assert_eq!(TimeUnit::parse_seconds("0.25"), Some(0.25));
        assert_eq!(TimeUnit::parse_seconds("1m"), Some(60.0));
        assert_eq!(TimeUnit::parse_seconds("soon"), None);
    }
}
