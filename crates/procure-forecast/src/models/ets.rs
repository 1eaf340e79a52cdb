//! Holt-Winters exponential smoothing, additive trend with optional
//! additive seasonality (§4.B step 4, second bullet).
//!
//! Smoothing parameters are chosen by grid search over in-sample SSE
//! rather than by the numerical optimiser `statsmodels` uses — with only
//! three parameters on a fixed grid, search is simpler than pulling in an
//! optimisation crate for one fit.

use anyhow::{anyhow, Result};

use crate::models::ModelFit;

const GRID: [f64; 5] = [0.1, 0.3, 0.5, 0.7, 0.9];

struct FittedState {
    level: f64,
    trend: f64,
    season: Vec<f64>,
    resid_std: f64,
}

pub fn fit(train: &[f64], horizon: usize, seasonal_periods: usize) -> Result<ModelFit> {
    if train.len() < 4 {
        return Err(anyhow!("series too short to fit ETS"));
    }
    let use_seasonal = seasonal_periods > 0 && train.len() >= 2 * seasonal_periods;
    let m = if use_seasonal { seasonal_periods } else { 0 };

    let state = grid_search(train, m)?;

    let last_season: Vec<f64> = if m > 0 {
        let n = state.season.len();
        state.season[n - m..n].to_vec()
    } else {
        Vec::new()
    };

    let mut forecast = Vec::with_capacity(horizon);
    for h in 1..=horizon {
        let seasonal = if m > 0 { last_season[(h - 1) % m] } else { 0.0 };
        let value = state.level + h as f64 * state.trend + seasonal;
        forecast.push(value.max(0.0));
    }

    Ok(ModelFit {
        p50: forecast,
        std: vec![state.resid_std; horizon],
    })
}

fn run_once(train: &[f64], alpha: f64, beta: f64, gamma: f64, m: usize) -> (FittedState, f64) {
    let n = train.len();
    let mut level;
    let mut trend;
    let mut season = vec![0.0; n];

    if m > 0 {
        let first: f64 = train[..m].iter().sum::<f64>() / m as f64;
        let second: f64 = train[m..2 * m].iter().sum::<f64>() / m as f64;
        level = first;
        trend = (second - first) / m as f64;
        for i in 0..m {
            season[i] = train[i] - first;
        }
    } else {
        level = train[0];
        trend = train[1] - train[0];
    }

    let mut fitted = vec![0.0; n];
    let start = if m > 0 { m } else { 1 };
    for t in start..n {
        let seasonal_term = if m > 0 { season[t - m] } else { 0.0 };
        fitted[t] = level + trend + seasonal_term;

        let prev_level = level;
        level = alpha * (train[t] - seasonal_term) + (1.0 - alpha) * (prev_level + trend);
        trend = beta * (level - prev_level) + (1.0 - beta) * trend;
        if m > 0 {
            season[t] = gamma * (train[t] - level) + (1.0 - gamma) * seasonal_term;
        }
    }

    let sse: f64 = (start..n).map(|t| (train[t] - fitted[t]).powi(2)).sum();
    let resid_var = sse / (n - start).max(1) as f64;

    (
        FittedState {
            level,
            trend,
            season,
            resid_std: resid_var.max(0.0).sqrt(),
        },
        sse,
    )
}

fn grid_search(train: &[f64], m: usize) -> Result<FittedState> {
    let mut best: Option<(f64, FittedState)> = None;
    for &alpha in GRID.iter() {
        for &beta in GRID.iter() {
            if m > 0 {
                for &gamma in GRID.iter() {
                    let (state, sse) = run_once(train, alpha, beta, gamma, m);
                    if best.as_ref().map_or(true, |(best_sse, _)| sse < *best_sse) {
                        best = Some((sse, state));
                    }
                }
            } else {
                let (state, sse) = run_once(train, alpha, beta, 0.0, m);
                if best.as_ref().map_or(true, |(best_sse, _)| sse < *best_sse) {
                    best = Some((sse, state));
                }
            }
        }
    }
    best.map(|(_, state)| state).ok_or_else(|| anyhow!("grid search produced no candidate"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fits_a_trending_series_without_seasonality() {
        let train: Vec<f64> = (0..20).map(|i| 10.0 + 2.0 * i as f64).collect();
        let fit = fit(&train, 5, 52).unwrap();
        assert_eq!(fit.p50.len(), 5);
        assert!(fit.p50[4] > fit.p50[0]);
    }

    #[test]
    fn uses_seasonal_component_when_history_is_long_enough() {
        let mut train = Vec::new();
        for cycle in 0..3 {
            for week in 0..52 {
                let seasonal = (week as f64 / 52.0 * std::f64::consts::TAU).sin() * 10.0;
                train.push(100.0 + cycle as f64 * 2.0 + seasonal);
            }
        }
        let fit = fit(&train, 10, 52).unwrap();
        assert_eq!(fit.p50.len(), 10);
        assert!(fit.p50.iter().all(|v| *v >= 0.0));
    }
}
