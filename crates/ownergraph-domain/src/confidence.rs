//! Confidence value helpers
//!
//! Every confidence that leaves a stage is a plain `f64` in `[0.0, 1.0]`.

/// Lowest representable confidence
pub const MIN_CONFIDENCE: f64 = 0.0;

/// Highest representable confidence
pub const MAX_CONFIDENCE: f64 = 1.0;

/// Clamp a confidence into `[0.0, 1.0]`
///
/// NaN maps to `0.0` so that a malformed source value can never poison
/// downstream arithmetic.
///
/// # Examples
///
/// ```
/// use ownergraph_domain::clamp_confidence;
///
/// assert_eq!(clamp_confidence(1.4), 1.0);
/// assert_eq!(clamp_confidence(-0.2), 0.0);
/// assert_eq!(clamp_confidence(f64::NAN), 0.0);
/// ```
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_CONFIDENCE;
    }
    value.clamp(MIN_CONFIDENCE, MAX_CONFIDENCE)
}

/// Check whether a value is a valid confidence
pub fn is_valid_confidence(value: f64) -> bool {
    (MIN_CONFIDENCE..=MAX_CONFIDENCE).contains(&value)
}
