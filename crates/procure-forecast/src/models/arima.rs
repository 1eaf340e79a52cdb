//! ARIMA with auto-order grid search (§4.B step 4, first bullet).
//!
//! `statsmodels`' `ARIMA` is not in this corpus's dependency graph, so the
//! (p,d,q) model is estimated with Hannan-Rissanen: a long autoregression
//! first supplies proxy innovations, then AR and MA terms are fit together
//! by ordinary least squares (via [`crate::linalg::ols_fit`]) against those
//! proxy residuals. This is the standard non-iterative estimator for ARMA
//! models and keeps every fit a single linear solve, consistent with the
//! rest of this crate's models.

use anyhow::{anyhow, Result};

use crate::linalg::ols_fit;
use crate::models::ModelFit;

#[derive(Debug, Clone, Copy)]
struct Order {
    p: usize,
    d: usize,
    q: usize,
}

/// Grid search `(p,d,q) in {0,1,2} x {0,1} x {0,1,2}`, refit the minimum-AIC
/// order, and forecast `horizon` steps ahead.
pub fn fit(series: &[f64], horizon: usize) -> Result<ModelFit> {
    let mut best: Option<(f64, ModelFit)> = None;
    for p in 0..=2 {
        for d in 0..=1 {
            for q in 0..=2 {
                let order = Order { p, d, q };
                if let Ok((aic, candidate)) = fit_order(series, order, horizon) {
                    let better = best.as_ref().map_or(true, |(best_aic, _)| aic < *best_aic);
                    if better {
                        best = Some((aic, candidate));
                    }
                }
            }
        }
    }
    best.map(|(_, fit)| fit).ok_or_else(|| anyhow!("no ARIMA order converged for this series"))
}

fn difference(series: &[f64], d: usize) -> Vec<f64> {
    let mut current = series.to_vec();
    for _ in 0..d {
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
    }
    current
}

/// Integrates a forecast on the differenced scale back onto the original
/// scale. Only `d in {0, 1}` is ever requested by [`fit`].
fn undifference(forecast_diffed: &[f64], original: &[f64], d: usize) -> Vec<f64> {
    if d == 0 {
        return forecast_diffed.to_vec();
    }
    let mut running = original.last().copied().unwrap_or(0.0);
    forecast_diffed
        .iter()
        .map(|&delta| {
            running += delta;
            running
        })
        .collect()
}

/// A long AR fit used only to produce proxy innovations for the MA terms.
fn proxy_residuals(diffed: &[f64], proxy_order: usize) -> Result<Vec<f64>> {
    let n = diffed.len();
    if proxy_order == 0 || n <= proxy_order {
        return Ok(vec![0.0; n]);
    }
    let mut rows = Vec::with_capacity(n - proxy_order);
    let mut y = Vec::with_capacity(n - proxy_order);
    for t in proxy_order..n {
        let mut row = Vec::with_capacity(proxy_order + 1);
        row.push(1.0);
        for lag in 1..=proxy_order {
            row.push(diffed[t - lag]);
        }
        rows.push(row);
        y.push(diffed[t]);
    }
    let beta = ols_fit(&rows, &y)?;

    let mut residuals = vec![0.0; n];
    for t in proxy_order..n {
        let mut pred = beta[0];
        for lag in 1..=proxy_order {
            pred += beta[lag] * diffed[t - lag];
        }
        residuals[t] = diffed[t] - pred;
    }
    Ok(residuals)
}

fn fit_order(series: &[f64], order: Order, horizon: usize) -> Result<(f64, ModelFit)> {
    let Order { p, d, q } = order;
    if series.len() < 8 {
        return Err(anyhow!("series too short for any ARIMA order"));
    }
    let diffed = difference(series, d);

    let proxy_order = if q > 0 {
        (p.max(q) + 2).min(diffed.len().saturating_sub(1)).max(1)
    } else {
        0
    };
    let proxy_resid = proxy_residuals(&diffed, proxy_order)?;

    let start_t = p.max(q).max(proxy_order);
    if diffed.len() <= start_t || diffed.len() - start_t < p + q + 1 {
        return Err(anyhow!("not enough differenced observations for order ({p},{d},{q})"));
    }

    let mut rows = Vec::with_capacity(diffed.len() - start_t);
    let mut y = Vec::with_capacity(diffed.len() - start_t);
    for t in start_t..diffed.len() {
        let mut row = Vec::with_capacity(p + q + 1);
        row.push(1.0);
        for lag in 1..=p {
            row.push(diffed[t - lag]);
        }
        for lag in 1..=q {
            row.push(proxy_resid[t - lag]);
        }
        rows.push(row);
        y.push(diffed[t]);
    }

    let beta = ols_fit(&rows, &y)?;

    let mut residuals = vec![0.0; diffed.len()];
    for t in start_t..diffed.len() {
        let mut pred = beta[0];
        for lag in 1..=p {
            pred += beta[lag] * diffed[t - lag];
        }
        for lag in 1..=q {
            pred += beta[1 + p + lag - 1] * proxy_resid[t - lag];
        }
        residuals[t] = diffed[t] - pred;
    }

    let fitted_count = (diffed.len() - start_t) as f64;
    let rss: f64 = residuals[start_t..].iter().map(|r| r * r).sum();
    let resid_var = (rss / fitted_count).max(1e-9);
    let k = (p + q + 1) as f64;
    let aic = fitted_count * resid_var.ln() + 2.0 * k;

    let mut extended = diffed.clone();
    let mut resid_ext = residuals;
    let mut forecast_diffed = Vec::with_capacity(horizon);
    for _ in 0..horizon {
        let n = extended.len();
        let mut pred = beta[0];
        for lag in 1..=p {
            pred += beta[lag] * extended[n - lag];
        }
        for lag in 1..=q {
            pred += beta[1 + p + lag - 1] * resid_ext.get(n - lag).copied().unwrap_or(0.0);
        }
        extended.push(pred);
        resid_ext.push(0.0);
        forecast_diffed.push(pred);
    }

    let p50: Vec<f64> = undifference(&forecast_diffed, series, d)
        .into_iter()
        .map(|v| v.max(0.0))
        .collect();

    // 80% CI upper bound would be p50 + 1.28*sigma; the residual std itself
    // is sigma, growing with the square root of the step as uncertainty
    // compounds over a multi-step recursive forecast.
    let resid_std = resid_var.sqrt();
    let std: Vec<f64> = (1..=horizon).map(|h| resid_std * (h as f64).sqrt()).collect();

    Ok((aic, ModelFit { p50, std }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synthetic_series(n: usize) -> Vec<f64> {
        (0..n).map(|i| 100.0 + 2.0 * i as f64 + (i as f64 * 0.5).sin() * 5.0).collect()
    }

    #[test]
    fn fits_and_forecasts_a_trending_series() {
        let series = synthetic_series(40);
        let fit = fit(&series, 8).unwrap();
        assert_eq!(fit.p50.len(), 8);
        assert_eq!(fit.std.len(), 8);
        assert!(fit.p50.iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn forecast_uncertainty_grows_with_horizon() {
        let series = synthetic_series(40);
        let fit = fit(&series, 6).unwrap();
        assert!(fit.std[5] >= fit.std[0]);
    }

    #[test]
    fn rejects_series_shorter_than_eight_observations() {
        let series = vec![1.0, 2.0, 3.0];
        assert!(fit(&series, 4).is_err());
    }
}
