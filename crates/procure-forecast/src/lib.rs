//! Component B: ensemble demand forecasting.
//!
//! Fits ARIMA, Holt-Winters (ETS) and a Prophet-style decomposition on each
//! (product, location) series, selects the lowest-WAPE candidate on a
//! held-out validation window, and refits the winner on the full series
//! for the published forecast.

pub mod ensemble;
pub mod forecast;
pub mod linalg;
pub mod metrics;
pub mod models;
pub mod resample;

pub use forecast::{forecast, ForecastDeps};
