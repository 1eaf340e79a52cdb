//! Prophet-style trend + multiplicative-seasonality decomposition
//! (§4.B step 4, third bullet).
//!
//! `prophet` itself pulls in a Stan backend unavailable to this corpus's
//! dependency graph. This reproduces the shape of its output — a linear
//! trend multiplied by a per-phase seasonal index fit from the ratio of
//! actuals to trend — via the same [`crate::linalg::ols_fit`] this crate
//! uses everywhere else.

use anyhow::{anyhow, Result};

use crate::linalg::ols_fit;
use crate::models::{std_dev, ModelFit};

pub fn fit(train: &[f64], horizon: usize, seasonal_period: usize) -> Result<ModelFit> {
    let n = train.len();
    if n < 4 {
        return Err(anyhow!("series too short to fit a trend"));
    }

    let rows: Vec<Vec<f64>> = (0..n).map(|t| vec![1.0, t as f64]).collect();
    let beta = ols_fit(&rows, train)?;
    let (intercept, slope) = (beta[0], beta[1]);
    let trend_at = |t: f64| (intercept + slope * t).max(1e-6);

    let use_seasonal = seasonal_period > 0 && n >= seasonal_period;
    let mut seasonal_index = vec![1.0; seasonal_period.max(1)];
    if use_seasonal {
        let mut sums = vec![0.0; seasonal_period];
        let mut counts = vec![0usize; seasonal_period];
        for t in 0..n {
            let ratio = train[t] / trend_at(t as f64);
            sums[t % seasonal_period] += ratio;
            counts[t % seasonal_period] += 1;
        }
        for i in 0..seasonal_period {
            if counts[i] > 0 {
                seasonal_index[i] = sums[i] / counts[i] as f64;
            }
        }
    }

    let fitted: Vec<f64> = (0..n)
        .map(|t| {
            let idx = if use_seasonal { seasonal_index[t % seasonal_period] } else { 1.0 };
            trend_at(t as f64) * idx
        })
        .collect();
    let residuals: Vec<f64> = train.iter().zip(&fitted).map(|(a, f)| a - f).collect();
    let resid_std = std_dev(&residuals);

    let p50: Vec<f64> = (1..=horizon)
        .map(|h| {
            let t = (n - 1 + h) as f64;
            let idx = if use_seasonal {
                seasonal_index[(n - 1 + h) % seasonal_period]
            } else {
                1.0
            };
            (trend_at(t) * idx).max(0.0)
        })
        .collect();

    Ok(ModelFit {
        p50,
        std: vec![resid_std; horizon],
    })
}
