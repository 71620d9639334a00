//! Dispersion statistics over a daily-return column.

/// The defined entries of an indicator column.
pub fn defined(values: &[Option<f64>]) -> Vec<f64> {
    values.iter().flatten().copied().collect()
}

/// Arithmetic mean; `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator); `None` below two values.
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

/// Volatility of a daily-return column, in the same percent units.
pub fn volatility(daily_returns: &[Option<f64>]) -> Option<f64> {
    sample_std_dev(&defined(daily_returns))
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn matches_hand_computed_sample_std() {
        // mean 5, squared deviations sum to 32, n - 1 = 7
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = sample_std_dev(&v).unwrap();
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn undefined_below_two_returns() {
        assert_eq!(volatility(&[]), None);
        assert_eq!(volatility(&[None]), None);
        assert_eq!(volatility(&[None, Some(1.5)]), None);
        assert_eq!(volatility(&[None, Some(1.0), Some(1.0)]), Some(0.0));
    }

    #[test]
    fn mean_of_defined_entries() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&defined(&[None, Some(1.0), Some(3.0)])), Some(2.0));
    }

    proptest! {
        #[test]
        fn shift_invariant_and_non_negative(
            values in proptest::collection::vec(-50.0f64..50.0, 2..40),
            shift in -100.0f64..100.0,
        ) {
            let sd = sample_std_dev(&values).unwrap();
            let shifted: Vec<f64> = values.iter().map(|v| v + shift).collect();
            let sd_shifted = sample_std_dev(&shifted).unwrap();
            prop_assert!(sd >= 0.0);
            prop_assert!((sd - sd_shifted).abs() < 1e-6);
        }
    }
}
