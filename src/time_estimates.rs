//! Score mapping and crack time display.

use crate::types::{AttackScenario, CrackTime, Score};
use std::collections::BTreeMap;

/// log10 guesses a password must reach for scores 1, 2, 3 and 4.
pub const SCORE_THRESHOLDS: [f64; 4] = [3.0, 6.0, 8.0, 10.0];

const MINUTE: f64 = 60.0;
const HOUR: f64 = MINUTE * 60.0;
const DAY: f64 = HOUR * 24.0;
const MONTH: f64 = DAY * 31.0;
const YEAR: f64 = MONTH * 12.0;
const CENTURY: f64 = YEAR * 100.0;

/// Number of thresholds reached by `guesses_log10`.
pub fn score_from_log10(guesses_log10: f64) -> Score {
    let reached = SCORE_THRESHOLDS
        .iter()
        .filter(|threshold| guesses_log10 >= **threshold)
        .count();
    Score::new(reached as u8)
}

/// Crack time under every [`AttackScenario`].
pub fn crack_times(guesses: f64) -> BTreeMap<AttackScenario, CrackTime> {
    AttackScenario::ALL
        .iter()
        .map(|scenario| {
            let seconds = guesses / scenario.guesses_per_second();
            (
                *scenario,
                CrackTime {
                    seconds,
                    display: display_time(seconds),
                },
            )
        })
        .collect()
}

/// Human readable duration, floored to the coarsest unit.
pub fn display_time(seconds: f64) -> String {
    let (value, unit) = if seconds < 1.0 {
        return "less than a second".to_string();
    } else if seconds < MINUTE {
        (seconds, "second")
    } else if seconds < HOUR {
        (seconds / MINUTE, "minute")
    } else if seconds < DAY {
        (seconds / HOUR, "hour")
    } else if seconds < MONTH {
        (seconds / DAY, "day")
    } else if seconds < YEAR {
        (seconds / MONTH, "month")
    } else if seconds < CENTURY {
        (seconds / YEAR, "year")
    } else {
        return "centuries".to_string();
    };

    let value = value.floor() as u64;
    if value == 1 {
        format!("{} {}", value, unit)
    } else {
        format!("{} {}s", value, unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_thresholds() {
        assert_eq!(score_from_log10(0.0).value(), 0);
        assert_eq!(score_from_log10(2.99).value(), 0);
        assert_eq!(score_from_log10(3.0).value(), 1);
        assert_eq!(score_from_log10(7.5).value(), 2);
        assert_eq!(score_from_log10(8.28).value(), 3);
        assert_eq!(score_from_log10(10.0).value(), 4);
        assert_eq!(score_from_log10(f64::INFINITY).value(), 4);
    }

    #[test]
    fn test_score_is_monotone() {
        let mut last = 0;
        for tenth in 0..150 {
            let score = score_from_log10(tenth as f64 / 10.0).value();
            assert!(score >= last);
            last = score;
        }
    }

    #[test]
    fn test_display_time() {
        assert_eq!(display_time(0.0), "less than a second");
        assert_eq!(display_time(0.999), "less than a second");
        assert_eq!(display_time(1.0), "1 second");
        assert_eq!(display_time(59.9), "59 seconds");
        assert_eq!(display_time(60.0), "1 minute");
        assert_eq!(display_time(7200.0), "2 hours");
        assert_eq!(display_time(DAY * 3.5), "3 days");
        assert_eq!(display_time(MONTH * 2.0), "2 months");
        assert_eq!(display_time(YEAR * 42.0), "42 years");
        assert_eq!(display_time(CENTURY), "centuries");
        assert_eq!(display_time(f64::INFINITY), "centuries");
    }

    #[test]
    fn test_crack_times_cover_every_scenario() {
        let times = crack_times(1e10);
        assert_eq!(times.len(), 4);
        let fast = &times[&AttackScenario::OfflineFastHashing];
        assert_eq!(fast.seconds, 1.0);
        assert_eq!(fast.display, "1 second");
        let throttled = &times[&AttackScenario::OnlineThrottling];
        assert_eq!(throttled.display, "centuries");
    }
}
