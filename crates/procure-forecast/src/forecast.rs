//! Component B's public operation: `forecast` (§4.B).

use std::sync::Arc;

use chrono::Utc;

use procure_core::repo::{DemandHistoryRepo, ForecastRepo, LocationRepo, ProductRepo};
use procure_core::{ForecastResult, ForecastResultRow, ForecastRunRecord, ProcureResult, ProductId, RunId, RunStatus};

use crate::ensemble::{refit, select_best};
use crate::metrics::{mape, wape};
use crate::resample::{resample, Frequency};

/// Held-out periods for model selection (§4.B step 3).
const VALIDATION_PERIODS: usize = 8;
/// Minimum resampled observations before a (product, location) is fit at
/// all (§4.B step 2).
const MIN_OBSERVATIONS: usize = 16;
/// z-score for the 90th percentile of a normal distribution (§4.B step 6).
const Z_90: f64 = 1.2816;

#[derive(Clone)]
pub struct ForecastDeps {
    pub products: Arc<dyn ProductRepo>,
    pub locations: Arc<dyn LocationRepo>,
    pub demand_history: Arc<dyn DemandHistoryRepo>,
    pub forecasts: Arc<dyn ForecastRepo>,
}

/// Run a previously-created [`ForecastRunRecord`] to completion for every
/// (product, location) pair with sufficient history.
pub fn forecast(
    deps: &ForecastDeps,
    run_id: RunId,
    product_ids: Option<&[ProductId]>,
) -> ProcureResult<ForecastRunRecord> {
    let mut run = deps
        .forecasts
        .get_run(run_id)
        .ok_or_else(|| procure_core::ProcureError::NotFound(format!("forecast run {run_id}")))?;

    run.status = run.status.transition(RunStatus::Running)?;
    deps.forecasts.update_run(run.clone())?;

    let frequency = Frequency::parse(&run.frequency);
    let seasonal_periods = frequency.seasonal_periods();
    let horizon = run.horizon as usize;

    let products = match product_ids {
        Some(ids) => ids.iter().filter_map(|id| deps.products.by_id(*id)).collect(),
        None => deps.products.all(),
    };
    let locations = deps.locations.all();

    let mut model_versions = std::collections::HashMap::new();

    for product in &products {
        for location in &locations {
            let rows = deps.demand_history.history(product.id, location.id);
            let periods = resample(&rows, frequency);
            if periods.len() < MIN_OBSERVATIONS {
                continue;
            }

            let qty: Vec<f64> = periods.iter().map(|p| p.qty).collect();
            let split = qty.len() - VALIDATION_PERIODS;
            let (train, validation) = qty.split_at(split);

            let selected = select_best(train, validation, seasonal_periods);
            let val_mape = mape(validation, &selected.fit.p50);
            let val_wape = wape(validation, &selected.fit.p50);

            let final_fit = refit(&selected.model_used, &qty, horizon, seasonal_periods);
            let last_date = periods.last().expect("checked non-empty above").date;
            let step = frequency.step();

            for i in 0..horizon {
                let p50 = final_fit.p50.get(i).copied().unwrap_or(0.0).max(0.0);
                let std = final_fit.std.get(i).copied().unwrap_or(0.0);
                let p90 = p50 + Z_90 * std;
                let date = last_date + step * (i as i32 + 1);

                deps.forecasts.insert_result(ForecastResultRow {
                    result: ForecastResult {
                        run_id,
                        product_id: product.id,
                        location_id: location.id,
                        date,
                        p50,
                        p90,
                        mape: (val_mape * 100.0).round() / 100.0,
                        wape: (val_wape * 10000.0).round() / 10000.0,
                    },
                    model_used: selected.model_used.clone(),
                });
            }

            model_versions.insert(format!("{}_{}", product.sku, location.id), selected.model_used.clone());
        }
    }

    run.model_versions = model_versions;
    run.status = run.status.transition(RunStatus::Done)?;
    run.completed_at = Some(Utc::now());
    deps.forecasts.update_run(run.clone())?;

    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use procure_core::{DemandHistory, Location, LocationType, Product};
    use std::sync::RwLock;

    #[derive(Default)]
    struct MiniStore {
        products: RwLock<Vec<Product>>,
        locations: RwLock<Vec<Location>>,
        history: RwLock<Vec<DemandHistory>>,
        runs: RwLock<Vec<ForecastRunRecord>>,
        results: RwLock<Vec<ForecastResultRow>>,
    }

    impl ProductRepo for MiniStore {
        fn all(&self) -> Vec<Product> {
            self.products.read().unwrap().clone()
        }
        fn by_sku(&self, sku: &str) -> Option<Product> {
            self.products.read().unwrap().iter().find(|p| p.sku == sku).cloned()
        }
        fn by_id(&self, id: ProductId) -> Option<Product> {
            self.products.read().unwrap().iter().find(|p| p.id == id).cloned()
        }
        fn first_n(&self, n: usize) -> Vec<Product> {
            self.products.read().unwrap().iter().take(n).cloned().collect()
        }
    }

    impl LocationRepo for MiniStore {
        fn all(&self) -> Vec<Location> {
            self.locations.read().unwrap().clone()
        }
        fn by_id(&self, id: procure_core::LocationId) -> Option<Location> {
            self.locations.read().unwrap().iter().find(|l| l.id == id).cloned()
        }
    }

    impl DemandHistoryRepo for MiniStore {
        fn history(&self, product_id: ProductId, location_id: procure_core::LocationId) -> Vec<DemandHistory> {
            self.history
                .read()
                .unwrap()
                .iter()
                .filter(|r| r.product_id == product_id && r.location_id == location_id)
                .cloned()
                .collect()
        }
        fn insert(&self, row: DemandHistory) {
            self.history.write().unwrap().push(row);
        }
    }

    impl ForecastRepo for MiniStore {
        fn create_run(&self, run: ForecastRunRecord) {
            self.runs.write().unwrap().push(run);
        }
        fn get_run(&self, run_id: RunId) -> Option<ForecastRunRecord> {
            self.runs.read().unwrap().iter().find(|r| r.run_id == run_id).cloned()
        }
        fn update_run(&self, run: ForecastRunRecord) -> ProcureResult<()> {
            let mut runs = self.runs.write().unwrap();
            let slot = runs
                .iter_mut()
                .find(|r| r.run_id == run.run_id)
                .ok_or_else(|| procure_core::ProcureError::NotFound("run".into()))?;
            *slot = run;
            Ok(())
        }
        fn insert_result(&self, row: ForecastResultRow) {
            self.results.write().unwrap().push(row);
        }
        fn results_for_run(&self, run_id: RunId) -> Vec<ForecastResultRow> {
            self.results.read().unwrap().iter().filter(|r| r.result.run_id == run_id).cloned().collect()
        }
    }

    fn make_deps() -> (Arc<MiniStore>, ForecastDeps) {
        let store = Arc::new(MiniStore::default());
        let deps = ForecastDeps {
            products: store.clone(),
            locations: store.clone(),
            demand_history: store.clone(),
            forecasts: store.clone(),
        };
        (store, deps)
    }

    #[test]
    fn skips_series_shorter_than_sixteen_observations() {
        let (store, deps) = make_deps();
        let product = Product::new("SKU-1", "Widget");
        let location = Location::new("WH1", LocationType::Warehouse, "US");
        store.products.write().unwrap().push(product.clone());
        store.locations.write().unwrap().push(location.clone());

        let now = Utc::now();
        for i in 0..10 {
            store.history.write().unwrap().push(DemandHistory {
                product_id: product.id,
                location_id: location.id,
                date: now - Duration::weeks(10 - i),
                qty: 100.0,
            });
        }

        let run = ForecastRunRecord::new(8, "W");
        let run_id = run.run_id;
        store.runs.write().unwrap().push(run);

        let finished = forecast(&deps, run_id, None).unwrap();
        assert_eq!(finished.status, RunStatus::Done);
        assert!(store.results.read().unwrap().is_empty());
    }

    #[test]
    fn produces_a_forecast_row_per_horizon_period() {
        let (store, deps) = make_deps();
        let product = Product::new("SKU-1", "Widget");
        let location = Location::new("WH1", LocationType::Warehouse, "US");
        store.products.write().unwrap().push(product.clone());
        store.locations.write().unwrap().push(location.clone());

        let now = Utc::now();
        for i in 0..30 {
            store.history.write().unwrap().push(DemandHistory {
                product_id: product.id,
                location_id: location.id,
                date: now - Duration::weeks(30 - i),
                qty: 100.0 + i as f64,
            });
        }

        let run = ForecastRunRecord::new(6, "W");
        let run_id = run.run_id;
        store.runs.write().unwrap().push(run);

        let finished = forecast(&deps, run_id, None).unwrap();
        assert_eq!(finished.status, RunStatus::Done);
        let results = store.results.read().unwrap();
        assert_eq!(results.len(), 6);
        for row in results.iter() {
            assert!(row.result.p90 >= row.result.p50);
        }
    }
}
