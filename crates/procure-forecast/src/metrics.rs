//! Forecast accuracy metrics (§4.B "Error metric definitions").
//!
//! Definitions are pinned exactly: WAPE and MAPE must agree with the
//! original implementation bit for bit on the zero-denominator edge cases,
//! since those edge cases are what a naive reimplementation gets wrong.

/// `Sum(|a-f|) / Sum(|a|)`, 0 when the denominator is 0.
pub fn wape(actual: &[f64], forecast: &[f64]) -> f64 {
    let denom: f64 = actual.iter().map(|a| a.abs()).sum();
    if denom == 0.0 {
        return 0.0;
    }
    let numer: f64 = actual.iter().zip(forecast).map(|(a, f)| (a - f).abs()).sum();
    numer / denom
}

/// `mean(|a-f|/|a|)` over indices where `a != 0`, in percent; 0 when no
/// such index exists.
pub fn mape(actual: &[f64], forecast: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut count = 0usize;
    for (a, f) in actual.iter().zip(forecast) {
        if *a != 0.0 {
            sum += (a - f).abs() / a.abs();
            count += 1;
        }
    }
    if count == 0 {
        return 0.0;
    }
    (sum / count as f64) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wape_is_zero_for_all_zero_actuals() {
        assert_eq!(wape(&[0.0, 0.0], &[5.0, 3.0]), 0.0);
    }

    #[test]
    fn wape_matches_hand_computation() {
        let actual = [10.0, 20.0, 30.0];
        let forecast = [8.0, 22.0, 33.0];
        let expected = (2.0 + 2.0 + 3.0) / 60.0;
        assert!((wape(&actual, &forecast) - expected).abs() < 1e-9);
    }

    #[test]
    fn mape_skips_zero_actuals_and_reports_percent() {
        let actual = [0.0, 10.0, 20.0];
        let forecast = [5.0, 11.0, 18.0];
        let expected = ((0.1 + 0.1) / 2.0) * 100.0;
        assert!((mape(&actual, &forecast) - expected).abs() < 1e-9);
    }

    #[test]
    fn mape_is_zero_when_mask_is_empty() {
        assert_eq!(mape(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
