use anyhow::Result;
use procure_core::repo::{ForecastRepo, InventoryRepo, OptimisationRepo, ScraperRepo};
use procure_core::{
    ForecastRunRecord, InventoryPolicyRunRecord, OptimisationRunRecord, ScraperJobRecord, Settings,
};

use crate::app::{forecast_deps, inventory_deps, offer_deps, seed, solver_deps};

const DEFAULT_PERIODS_PER_YEAR: u32 = 52;

#[allow(clippy::too_many_arguments)]
pub fn run(
    products: usize,
    seed_value: u64,
    horizon: Option<u32>,
    use_p90: bool,
    max_suppliers_per_product: u32,
) -> Result<()> {
    let (store, catalog) = seed(products, seed_value);
    let settings = Settings::global();

    let skus: Vec<String> = catalog.products.iter().map(|p| p.sku.clone()).collect();
    let job = ScraperJobRecord::new(skus, Vec::new());
    let job_id = job.job_id;
    ScraperRepo::create_job(store.as_ref(), job);
    procure_offers::acquire(&offer_deps(&store), job_id, settings.scraper_ttl_hours)?;

    let forecast_run = ForecastRunRecord::new(
        horizon.unwrap_or(settings.forecast_horizon_days),
        settings.forecast_frequency.clone(),
    );
    let forecast_run_id = forecast_run.run_id;
    ForecastRepo::create_run(store.as_ref(), forecast_run);
    procure_forecast::forecast(&forecast_deps(&store), forecast_run_id, None)?;

    let inventory_run = InventoryPolicyRunRecord::new(forecast_run_id, DEFAULT_PERIODS_PER_YEAR);
    let inventory_run_id = inventory_run.run_id;
    InventoryRepo::create_run(store.as_ref(), inventory_run);
    procure_inventory::compute_policies(&inventory_deps(&store), inventory_run_id)?;

    let optimisation_run = OptimisationRunRecord::new(
        forecast_run_id,
        inventory_run_id,
        use_p90,
        max_suppliers_per_product,
    );
    let optimisation_run_id = optimisation_run.run_id;
    OptimisationRepo::create_run(store.as_ref(), optimisation_run);

    let finished = procure_solver::solve(&solver_deps(&store), optimisation_run_id, None)?;
    let allocations = OptimisationRepo::allocations_for_run(store.as_ref(), optimisation_run_id);

    let summary = serde_json::json!({
        "run": finished,
        "allocations": allocations,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
