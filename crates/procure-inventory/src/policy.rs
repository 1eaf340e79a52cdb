//! Component C's public operation: `compute_policies` (§4.C).

use std::sync::Arc;

use chrono::Utc;

use procure_core::repo::{CostParameterRepo, ForecastRepo, LocationRepo, OfferRepo, ProductRepo};
use procure_core::{
    InventoryPolicyResult, InventoryPolicyRunRecord, ProcureError, ProcureResult, RunStatus,
};

use crate::quantile::normal_inv_cdf;

/// Default lead time when a product has no supplier offers at all (§4.C
/// step 1): 28 days, i.e. 4 weeks under the weekly cadence `DAYS_PER_PERIOD`
/// converts against.
const DEFAULT_LEAD_TIME_DAYS: f64 = 28.0;

/// Cadence used to turn a lead time in days into a count of periods (§4.C
/// step 1: `days / 7`). Fixed at a week regardless of `periods_per_year`,
/// which only scales annualised demand/cost, not this conversion.
const DAYS_PER_PERIOD: f64 = 7.0;

#[derive(Clone)]
pub struct InventoryDeps {
    pub products: Arc<dyn ProductRepo>,
    pub locations: Arc<dyn LocationRepo>,
    pub offers: Arc<dyn OfferRepo>,
    pub cost_parameters: Arc<dyn CostParameterRepo>,
    pub forecasts: Arc<dyn ForecastRepo>,
    pub inventory: Arc<dyn procure_core::repo::InventoryRepo>,
}

/// Run a previously-created [`InventoryPolicyRunRecord`] to completion,
/// reading `forecast_run_id` and `periods_per_year` off the record itself
/// (the same contract [`procure_forecast::forecast`] uses for its own run
/// parameters).
pub fn compute_policies(
    deps: &InventoryDeps,
    run_id: procure_core::RunId,
) -> ProcureResult<InventoryPolicyRunRecord> {
    let mut run = deps
        .inventory
        .get_run(run_id)
        .ok_or_else(|| ProcureError::NotFound(format!("inventory policy run {run_id}")))?;

    run.status = run.status.transition(RunStatus::Running)?;
    deps.inventory.update_run(run.clone())?;

    let periods_per_year = run.periods_per_year.max(1) as f64;

    let products = deps.products.all();
    let locations = deps.locations.all();

    for product in &products {
        for location in &locations {
            let forecasts = deps.forecasts.results_for(run.forecast_run_id, product.id, location.id);
            if forecasts.is_empty() {
                continue;
            }
            let Some(cost_param) = deps.cost_parameters.get(product.id, location.id) else {
                continue;
            };

            let p50: Vec<f64> = forecasts.iter().map(|f| f.p50).collect();
            let mu = mean(&p50);
            let sigma = std_dev(&p50);

            let lead_time_days = deps
                .offers
                .cheapest_for_product(product.id)
                .map(|o| o.lead_time_days as f64)
                .unwrap_or(DEFAULT_LEAD_TIME_DAYS);
            let lead_time_periods = lead_time_days / DAYS_PER_PERIOD;

            let annual_demand = mu * periods_per_year;
            let annual_holding = cost_param.holding_cost_per_unit_period * periods_per_year;

            let eoq = economic_order_quantity(annual_demand, cost_param.setup_cost, annual_holding);

            // Lead time is treated as deterministic (sigma_L = 0): the
            // engine has no per-offer lead-time variance signal, only a
            // single cheapest-offer point estimate. The second term
            // therefore always vanishes regardless of which variance it
            // multiplies; see DESIGN.md for the preserved textbook
            // discrepancy this formula carries when sigma_L != 0.
            let lead_time_variance = 0.0_f64;
            let z = normal_inv_cdf(cost_param.service_level);
            let safety_stock = (z
                * (sigma.powi(2) * lead_time_periods + sigma.powi(2) * lead_time_variance).sqrt())
            .max(0.0);
            let safety_stock = (safety_stock * 10.0).round() / 10.0;

            let rop = mu * lead_time_periods + safety_stock;

            let annual_ordering_cost = if eoq > 0.0 {
                (annual_demand / eoq) * cost_param.setup_cost
            } else {
                0.0
            };
            let annual_holding_cost = (eoq / 2.0) * annual_holding;

            deps.inventory.insert_result(InventoryPolicyResult {
                run_id,
                product_id: product.id,
                location_id: location.id,
                eoq,
                rop,
                safety_stock,
                avg_demand: mu,
                demand_std: sigma,
                lead_time_days,
                service_level: cost_param.service_level,
                annual_holding_cost,
                annual_ordering_cost,
            });
        }
    }

    run.status = run.status.transition(RunStatus::Done)?;
    run.completed_at = Some(Utc::now());
    deps.inventory.update_run(run.clone())?;

    Ok(run)
}

/// `max(1, sqrt(2*D*S/H))`, falling back to `max(1, D)` when `H` or `D`
/// are non-positive (§4.C step 3).
fn economic_order_quantity(annual_demand: f64, setup_cost: f64, annual_holding: f64) -> f64 {
    if annual_holding <= 0.0 || annual_demand <= 0.0 {
        return annual_demand.max(1.0);
    }
    (2.0 * annual_demand * setup_cost / annual_holding).sqrt().max(1.0)
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use procure_core::repo::{
        CostParameterRepo, ForecastRepo, InventoryRepo, LocationRepo, OfferRepo, ProductRepo,
    };
    use procure_core::{
        CostParameter, ForecastResult, ForecastResultRow, Location, LocationType, Product, SupplierOffer,
    };
    use std::sync::RwLock;

    #[derive(Default)]
    struct MiniStore {
        products: RwLock<Vec<Product>>,
        locations: RwLock<Vec<Location>>,
        offers: RwLock<Vec<SupplierOffer>>,
        cost_parameters: RwLock<Vec<CostParameter>>,
        forecast_results: RwLock<Vec<ForecastResultRow>>,
        runs: RwLock<Vec<InventoryPolicyRunRecord>>,
        results: RwLock<Vec<InventoryPolicyResult>>,
    }

    impl ProductRepo for MiniStore {
        fn all(&self) -> Vec<Product> {
            self.products.read().unwrap().clone()
        }
        fn by_sku(&self, sku: &str) -> Option<Product> {
            self.products.read().unwrap().iter().find(|p| p.sku == sku).cloned()
        }
        fn by_id(&self, id: procure_core::ProductId) -> Option<Product> {
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

    impl OfferRepo for MiniStore {
        fn fresh_offer_exists(
            &self,
            _supplier_id: procure_core::SupplierId,
            _product_id: procure_core::ProductId,
            _now: chrono::DateTime<Utc>,
            _ttl: chrono::Duration,
        ) -> bool {
            false
        }
        fn insert(&self, offer: SupplierOffer) {
            self.offers.write().unwrap().push(offer);
        }
        fn offers_for_product(&self, product_id: procure_core::ProductId) -> Vec<SupplierOffer> {
            let mut offers: Vec<SupplierOffer> = self
                .offers
                .read()
                .unwrap()
                .iter()
                .filter(|o| o.product_id == product_id)
                .cloned()
                .collect();
            offers.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap());
            offers
        }
        fn by_id(&self, id: procure_core::OfferId) -> Option<SupplierOffer> {
            self.offers.read().unwrap().iter().find(|o| o.id == id).cloned()
        }
    }

    impl CostParameterRepo for MiniStore {
        fn all(&self) -> Vec<CostParameter> {
            self.cost_parameters.read().unwrap().clone()
        }
        fn get(&self, product_id: procure_core::ProductId, location_id: procure_core::LocationId) -> Option<CostParameter> {
            self.cost_parameters
                .read()
                .unwrap()
                .iter()
                .find(|c| c.product_id == product_id && c.location_id == location_id)
                .copied()
        }
        fn upsert(&self, param: CostParameter) {
            self.cost_parameters.write().unwrap().push(param);
        }
    }

    impl ForecastRepo for MiniStore {
        fn create_run(&self, _run: procure_core::ForecastRunRecord) {}
        fn get_run(&self, _run_id: procure_core::RunId) -> Option<procure_core::ForecastRunRecord> {
            None
        }
        fn update_run(&self, _run: procure_core::ForecastRunRecord) -> ProcureResult<()> {
            Ok(())
        }
        fn insert_result(&self, row: ForecastResultRow) {
            self.forecast_results.write().unwrap().push(row);
        }
        fn results_for_run(&self, run_id: procure_core::RunId) -> Vec<ForecastResultRow> {
            self.forecast_results
                .read()
                .unwrap()
                .iter()
                .filter(|r| r.result.run_id == run_id)
                .cloned()
                .collect()
        }
    }

    impl InventoryRepo for MiniStore {
        fn create_run(&self, run: InventoryPolicyRunRecord) {
            self.runs.write().unwrap().push(run);
        }
        fn get_run(&self, run_id: procure_core::RunId) -> Option<InventoryPolicyRunRecord> {
            self.runs.read().unwrap().iter().find(|r| r.run_id == run_id).cloned()
        }
        fn update_run(&self, run: InventoryPolicyRunRecord) -> ProcureResult<()> {
            let mut runs = self.runs.write().unwrap();
            let slot = runs
                .iter_mut()
                .find(|r| r.run_id == run.run_id)
                .ok_or_else(|| ProcureError::NotFound("run".into()))?;
            *slot = run;
            Ok(())
        }
        fn insert_result(&self, row: InventoryPolicyResult) {
            self.results.write().unwrap().push(row);
        }
        fn results_for_run(&self, run_id: procure_core::RunId) -> Vec<InventoryPolicyResult> {
            self.results.read().unwrap().iter().filter(|r| r.run_id == run_id).copied().collect()
        }
    }

    fn make_deps() -> (Arc<MiniStore>, InventoryDeps) {
        let store = Arc::new(MiniStore::default());
        let deps = InventoryDeps {
            products: store.clone(),
            locations: store.clone(),
            offers: store.clone(),
            cost_parameters: store.clone(),
            forecasts: store.clone(),
            inventory: store.clone(),
        };
        (store, deps)
    }

    fn push_forecast(
        store: &MiniStore,
        run_id: procure_core::RunId,
        product_id: procure_core::ProductId,
        location_id: procure_core::LocationId,
        p50: f64,
    ) {
        store.forecast_results.write().unwrap().push(ForecastResultRow {
            result: ForecastResult {
                run_id,
                product_id,
                location_id,
                date: Utc::now(),
                p50,
                p90: p50,
                mape: 0.0,
                wape: 0.0,
            },
            model_used: "naive".to_string(),
        });
    }

    #[test]
    fn skips_pairs_with_no_forecast_or_no_cost_parameter() {
        let (store, deps) = make_deps();
        let product = Product::new("SKU-1", "Widget");
        let location = Location::new("WH1", LocationType::Warehouse, "US");
        store.products.write().unwrap().push(product.clone());
        store.locations.write().unwrap().push(location.clone());

        let forecast_run_id = procure_core::RunId::new();
        let run = InventoryPolicyRunRecord::new(forecast_run_id, 52);
        let run_id = run.run_id;
        store.runs.write().unwrap().push(run);

        let finished = compute_policies(&deps, run_id).unwrap();
        assert_eq!(finished.status, procure_core::RunStatus::Done);
        assert!(store.results.read().unwrap().is_empty());
    }

    #[test]
    fn eoq_matches_textbook_example() {
        // D = 10000, S = 100, H = 5 => EOQ ~= 632.5
        let eoq = economic_order_quantity(10000.0, 100.0, 5.0);
        assert!((eoq - 632.455).abs() < 0.1);
    }

    #[test]
    fn zero_demand_falls_back_to_eoq_one() {
        assert_eq!(economic_order_quantity(0.0, 50.0, 5.0), 1.0);
    }

    #[test]
    fn safety_stock_matches_deterministic_lead_time_example() {
        // sigma = 50, L = 4, SL = 0.95 => 1.645 * 50 * 2 = 164.5
        let z = normal_inv_cdf(0.95);
        let ss = z * (50f64.powi(2) * 4.0).sqrt();
        assert!((ss - 164.5).abs() < 0.5);
    }

    #[test]
    fn computes_a_policy_and_keeps_rop_identity() {
        let (store, deps) = make_deps();
        let product = Product::new("SKU-1", "Widget");
        let location = Location::new("WH1", LocationType::Warehouse, "US");
        store.products.write().unwrap().push(product.clone());
        store.locations.write().unwrap().push(location.clone());
        store.cost_parameters.write().unwrap().push(CostParameter {
            product_id: product.id,
            location_id: location.id,
            holding_cost_per_unit_period: 0.5,
            setup_cost: 100.0,
            stockout_penalty: 10.0,
            service_level: 0.95,
        });

        let forecast_run_id = procure_core::RunId::new();
        for _ in 0..4 {
            push_forecast(&store, forecast_run_id, product.id, location.id, 200.0);
        }

        let run = InventoryPolicyRunRecord::new(forecast_run_id, 52);
        let run_id = run.run_id;
        store.runs.write().unwrap().push(run);

        let finished = compute_policies(&deps, run_id).unwrap();
        assert_eq!(finished.status, procure_core::RunStatus::Done);

        let results = store.results.read().unwrap();
        assert_eq!(results.len(), 1);
        let policy = results[0];
        assert!((policy.rop - (policy.avg_demand * (policy.lead_time_days / 7.0) + policy.safety_stock)).abs() < 0.1);
        assert!(policy.eoq >= 1.0);
    }
}
