//! Exponential freshness decay

use crate::config::DecayUnit;
use chrono::{DateTime, Utc};
use ownergraph_domain::Timestamp;

/// Age of `timestamp` relative to `now`, in `unit`s
///
/// Negative for timestamps after `now`. `None` when the timestamp does not
/// parse.
pub fn age_in_units(timestamp: &Timestamp, now: DateTime<Utc>, unit: DecayUnit) -> Option<f64> {
    let observed = timestamp.parse()?;
    let millis = now.signed_duration_since(observed).num_milliseconds() as f64;
    Some(millis / 1000.0 / unit.seconds())
}

/// Freshness multiplier `exp(-rate × age)`
///
/// Future timestamps yield a multiplier above 1; only the final score is
/// clamped. An unparsable timestamp yields exactly 1.0.
pub fn freshness_multiplier(
    timestamp: &Timestamp,
    now: DateTime<Utc>,
    rate: f64,
    unit: DecayUnit,
) -> f64 {
    match age_in_units(timestamp, now, unit) {
        Some(age) => (-rate * age).exp(),
        None => 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_current_timestamp_is_one() {
        let ts = Timestamp::from(now());
        let m = freshness_multiplier(&ts, now(), 0.01, DecayUnit::Days);
        assert!((m - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unparsable_is_exactly_one() {
        let ts = Timestamp::new("sometime last week");
        assert_eq!(freshness_multiplier(&ts, now(), 5.0, DecayUnit::Seconds), 1.0);
        assert_eq!(freshness_multiplier(&Timestamp::new(""), now(), 5.0, DecayUnit::Days), 1.0);
    }

    #[test]
    fn test_one_unit_of_decay() {
        let ts = Timestamp::from(now() - Duration::days(10));
        let m = freshness_multiplier(&ts, now(), 0.1, DecayUnit::Days);
        assert!((m - (-1.0f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn test_unit_scales_age() {
        let ts = Timestamp::from(now() - Duration::hours(2));
        assert!((age_in_units(&ts, now(), DecayUnit::Hours).unwrap() - 2.0).abs() < 1e-9);
        assert!((age_in_units(&ts, now(), DecayUnit::Seconds).unwrap() - 7200.0).abs() < 1e-9);
        assert!((age_in_units(&ts, now(), DecayUnit::Days).unwrap() - 2.0 / 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_future_timestamp_above_one() {
        let ts = Timestamp::from(now() + Duration::days(3));
        assert!(age_in_units(&ts, now(), DecayUnit::Days).unwrap() < 0.0);
        assert!(freshness_multiplier(&ts, now(), 0.01, DecayUnit::Days) > 1.0);
    }

    #[test]
    fn test_zero_rate_never_decays() {
        let ts = Timestamp::new("2001-01-01");
        assert_eq!(freshness_multiplier(&ts, now(), 0.0, DecayUnit::Days), 1.0);
    }
}
