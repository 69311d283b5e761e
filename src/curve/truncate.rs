//! Truncation of a curve once cumulative abundance reaches 1.
//!
//! Bins past the point where the running sum hits 1 carry no abundance
//! (they are zeros of a sample that are non-zero elsewhere) and would draw
//! a flat tail along y = 1. The running sum rarely lands on exactly 1.0 in
//! floating point, so the cut uses a threshold just below it.

/// Cumulative abundance above which the curve is considered complete.
pub const DEFAULT_TRUNCATION_THRESHOLD: f64 = 0.999999;

/// Number of leading values to keep.
///
/// Returns the position of the first value strictly greater than
/// `threshold`, plus one. If no value exceeds the threshold the whole
/// sequence is kept.
pub fn truncation_point(cumulative: &[f64], threshold: f64) -> usize {
    cumulative
        .iter()
        .position(|&c| c > threshold)
        .map(|i| i + 1)
        .unwrap_or(cumulative.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_value_reaching_one() {
        let c = [0.6, 0.9, 1.0, 1.0, 1.0];
        assert_eq!(truncation_point(&c, DEFAULT_TRUNCATION_THRESHOLD), 3);
    }

    #[test]
    fn test_tolerates_accumulation_error() {
        let c = [0.7, 0.9999999, 0.9999999];
        assert_eq!(truncation_point(&c, DEFAULT_TRUNCATION_THRESHOLD), 2);
    }

    #[test]
    fn test_last_value_hits_threshold() {
        let c = [0.5, 0.8, 1.0];
        assert_eq!(truncation_point(&c, DEFAULT_TRUNCATION_THRESHOLD), 3);
    }

    #[test]
    fn test_never_reaches_threshold() {
        let c = [0.5, 0.8, 0.9999];
        assert_eq!(truncation_point(&c, DEFAULT_TRUNCATION_THRESHOLD), 3);
    }

    #[test]
    fn test_threshold_is_strict() {
        let c = [0.5, 0.999999, 1.0];
        assert_eq!(truncation_point(&c, 0.999999), 3);
    }

    #[test]
    fn test_empty() {
        assert_eq!(truncation_point(&[], DEFAULT_TRUNCATION_THRESHOLD), 0);
    }
}
