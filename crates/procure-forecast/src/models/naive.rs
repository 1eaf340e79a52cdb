//! The last-resort forecast when every other candidate fails to fit
//! (§4.B step 5): repeat the last observed value, width from historical
//! spread.

use super::{std_dev, ModelFit};

pub fn fit(train: &[f64], horizon: usize) -> ModelFit {
    let last = train.last().copied().unwrap_or(0.0).max(0.0);
    ModelFit {
        p50: vec![last; horizon],
        std: vec![std_dev(train); horizon],
    }
}
