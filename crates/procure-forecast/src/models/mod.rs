//! Candidate forecasting models (§4.B step 4).
//!
//! Every model fits on a training slice and returns a `ModelFit`: a length-
//! `horizon` mean forecast plus a per-step standard deviation used to widen
//! the P50 into a P90.

pub mod arima;
pub mod ets;
pub mod naive;
pub mod prophet;

#[derive(Debug, Clone)]
pub struct ModelFit {
    pub p50: Vec<f64>,
    pub std: Vec<f64>,
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}
