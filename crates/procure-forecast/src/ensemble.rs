//! Candidate scoring and fallback (§4.B steps 4-5).

use crate::metrics::wape;
use crate::models::{arima, ets, naive, prophet, ModelFit};

pub struct Selected {
    pub model_used: String,
    pub fit: ModelFit,
}

/// Fit every candidate on `train`, score by WAPE against `validation`, and
/// return the winner. Falls back to the naive model if every candidate
/// fails to fit.
pub fn select_best(train: &[f64], validation: &[f64], seasonal_periods: usize) -> Selected {
    let horizon = validation.len();

    if is_constant(train) {
        return Selected {
            model_used: "naive".to_string(),
            fit: naive::fit(train, horizon),
        };
    }

    let mut candidates: Vec<(&'static str, ModelFit)> = Vec::new();

    if let Ok(fit) = arima::fit(train, horizon) {
        candidates.push(("arima", fit));
    }
    if let Ok(fit) = ets::fit(train, horizon, seasonal_periods) {
        candidates.push(("ets", fit));
    }
    if let Ok(fit) = prophet::fit(train, horizon, seasonal_periods) {
        candidates.push(("prophet", fit));
    }

    let mut best: Option<(&'static str, ModelFit, f64)> = None;
    for (name, fit) in candidates {
        let compare_len = fit.p50.len().min(validation.len());
        let score = wape(validation, &fit.p50[..compare_len]);
        if best.as_ref().map_or(true, |(_, _, best_score)| score < *best_score) {
            best = Some((name, fit, score));
        }
    }

    match best {
        Some((name, fit, _)) => Selected { model_used: name.to_string(), fit },
        None => Selected {
            model_used: "naive".to_string(),
            fit: naive::fit(train, horizon),
        },
    }
}

/// Refit the named model type on `series` for the final `horizon`-length
/// forecast (§4.B step 6). Any failure on refit falls back to naive, which
/// cannot itself fail.
pub fn refit(model_used: &str, series: &[f64], horizon: usize, seasonal_periods: usize) -> ModelFit {
    let result = match model_used {
        "arima" => arima::fit(series, horizon),
        "ets" => ets::fit(series, horizon, seasonal_periods),
        "prophet" => prophet::fit(series, horizon, seasonal_periods),
        _ => return naive::fit(series, horizon),
    };
    result.unwrap_or_else(|_| naive::fit(series, horizon))
}

/// A zero-variance series has no trend/seasonality for ARIMA/ETS/Prophet to
/// fit against; the naive carry-forward is exact and cheaper, so skip
/// straight to it rather than let an intercept-only ARIMA win on a series
/// with nothing to model.
fn is_constant(series: &[f64]) -> bool {
    match series.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_naive_when_series_too_short() {
        let train = vec![1.0, 2.0];
        let validation = vec![3.0, 4.0];
        let selected = select_best(&train, &validation, 52);
        assert_eq!(selected.model_used, "naive");
    }

    #[test]
    fn picks_a_real_candidate_for_a_well_behaved_series() {
        let train: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let validation: Vec<f64> = (30..38).map(|i| 100.0 + i as f64).collect();
        let selected = select_best(&train, &validation, 52);
        assert_ne!(selected.model_used, "naive");
    }

    #[test]
    fn falls_back_to_naive_for_a_constant_series() {
        let train = vec![50.0; 16];
        let validation = vec![50.0; 4];
        let selected = select_best(&train, &validation, 52);
        assert_eq!(selected.model_used, "naive");
        assert!((selected.fit.p50[0] - 50.0).abs() < 1e-9);
    }
}
