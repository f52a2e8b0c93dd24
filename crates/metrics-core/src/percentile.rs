//! Percentile interpolation over a sorted sample of real values.

/// Returns the `p`-th percentile (0-100) of `sorted_values`, which must
/// already be sorted ascending. Rank `r = (n-1) * p / 100`; interpolates
/// linearly between the elements bracketing a fractional rank. A
/// single-element slice returns that element; an empty slice returns `None`.
pub fn percentile(sorted_values: &[f64], p: f64) -> Option<f64> {
    match sorted_values.len() {
        0 => None,
        1 => Some(sorted_values[0]),
        n => {
            let rank = (n - 1) as f64 * p / 100.0;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            if lower == upper {
                Some(sorted_values[lower])
            } else {
                let fraction = rank - lower as f64;
                Some(sorted_values[lower] + (sorted_values[upper] - sorted_values[lower]) * fraction)
            }
        }
    }
}

/// Sorts a copy of `values` and reports its 95th percentile.
pub fn percentile_95_of(values: &[f64]) -> Option<f64> {
    percentile_of(values, 95.0)
}

/// Sorts a copy of `values` and reports its `p`-th percentile.
pub fn percentile_of(values: &[f64], p: f64) -> Option<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    percentile(&sorted, p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slice_is_none() {
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn single_element_returns_itself_for_any_percentile() {
        assert_eq!(percentile(&[7.0], 0.0), Some(7.0));
        assert_eq!(percentile(&[7.0], 99.0), Some(7.0));
    }

    #[test]
    fn interpolates_between_brackets() {
        let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 100.0), Some(5.0));
        assert_eq!(percentile(&values, 50.0), Some(3.0));
        // rank = 4 * 25 / 100 = 1.0 -> exact index 1
        assert_eq!(percentile(&values, 25.0), Some(2.0));
    }

    #[test]
    fn monotonic_in_percentile() {
        let values = vec![0.1, 0.4, 0.5, 2.0, 9.0, 9.5];
        let p50 = percentile(&values, 50.0).unwrap();
        let p95 = percentile(&values, 95.0).unwrap();
        assert!(p50 <= p95);
    }

    proptest::proptest! {
        #[test]
        fn percentile_is_monotonic_in_p(
            mut values in proptest::collection::vec(-1000.0f64..1000.0, 1..64),
            p1 in 0.0f64..100.0,
            p2 in 0.0f64..100.0,
        ) {
            values.sort_by(|a, b| a.total_cmp(b));
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let lower = percentile(&values, lo).unwrap();
            let upper = percentile(&values, hi).unwrap();
            proptest::prop_assert!(lower <= upper + 1e-9);
        }
    }
}
