use anyhow::Result;
use procure_core::repo::ForecastRepo;
use procure_core::{ForecastRunRecord, Settings};

use crate::app::{forecast_deps, seed};

pub fn run(products: usize, seed_value: u64, horizon: Option<u32>) -> Result<()> {
    let (store, _catalog) = seed(products, seed_value);
    let settings = Settings::global();

    let run = ForecastRunRecord::new(
        horizon.unwrap_or(settings.forecast_horizon_days),
        settings.forecast_frequency.clone(),
    );
    let run_id = run.run_id;
    store.create_run(run);

    let deps = forecast_deps(&store);
    let finished = procure_forecast::forecast(&deps, run_id, None)?;
    let results = store.results_for_run(run_id);

    let summary = serde_json::json!({
        "run": finished,
        "result_rows": results.len(),
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
