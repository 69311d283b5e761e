//! Running sums along a ranked sample.

/// Cumulative relative abundance: `c[0] = a[0]`, `c[i] = a[i] + c[i - 1]`.
pub fn cumulative_abundance(abundances: &[f64]) -> Vec<f64> {
    abundances
        .iter()
        .scan(0.0, |acc, &a| {
            *acc += a;
            Some(*acc)
        })
        .collect()
}

/// Cumulative rank proportion over `m` retained bins: `i / m` for `i = 1..=m`.
///
/// The last value is exactly 1.0 for any `m > 0`.
pub fn rank_proportions(m: usize) -> Vec<f64> {
    let total = m as f64;
    (1..=m).map(|i| i as f64 / total).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cumulative_abundance() {
        let c = cumulative_abundance(&[0.5, 0.3, 0.2]);
        assert_eq!(c.len(), 3);
        assert_relative_eq!(c[0], 0.5);
        assert_relative_eq!(c[1], 0.8, epsilon = 1e-12);
        assert_relative_eq!(c[2], 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cumulative_non_decreasing() {
        let c = cumulative_abundance(&[0.4, 0.0, 0.3, 0.2, 0.1, 0.0]);
        assert!(c.windows(2).all(|w| w[1] >= w[0]));
    }

    #[test]
    fn test_cumulative_empty() {
        assert!(cumulative_abundance(&[]).is_empty());
    }

    #[test]
    fn test_rank_proportions() {
        assert_eq!(rank_proportions(4), vec![0.25, 0.5, 0.75, 1.0]);
        assert_eq!(rank_proportions(1), vec![1.0]);
        assert!(rank_proportions(0).is_empty());
    }

    #[test]
    fn test_rank_proportions_end_exactly_at_one() {
        for m in 1..50 {
            assert_eq!(*rank_proportions(m).last().unwrap(), 1.0);
        }
    }
}
