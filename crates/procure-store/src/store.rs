//! In-memory repository implementation.
//!
//! Every collection is a `RwLock<Vec<_>>` guarded independently, the same
//! locking granularity `gat_core::solver::registry` uses for its global
//! registry: readers never block each other, writers take an exclusive
//! lock on one collection at a time. Each stage owns its own run/result
//! rows by `run_id` (§5), so cross-stage writers never contend.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use procure_core::repo::{
    CostParameterRepo, DecisionRepo, DemandHistoryRepo, ForecastRepo, InventoryRepo, LocationRepo,
    OfferRepo, OptimisationRepo, ProductRepo, ScraperRepo, SupplierRepo,
};
use procure_core::{
    CostParameter, DecisionRun, DemandHistory, ForecastResultRow, ForecastRunRecord,
    InventoryPolicyResult, InventoryPolicyRunRecord, JobId, Location, LocationId,
    OptimisationAllocation, OptimisationRunRecord, ProcureError, ProcureResult, Product, ProductId,
    RunId, ScraperJobRecord, Supplier, SupplierId, SupplierOffer,
};

#[derive(Default)]
pub struct Store {
    products: RwLock<Vec<Product>>,
    locations: RwLock<Vec<Location>>,
    suppliers: RwLock<Vec<Supplier>>,
    offers: RwLock<Vec<SupplierOffer>>,
    demand_history: RwLock<Vec<DemandHistory>>,
    cost_parameters: RwLock<Vec<CostParameter>>,

    scraper_jobs: RwLock<Vec<ScraperJobRecord>>,
    forecast_runs: RwLock<Vec<ForecastRunRecord>>,
    forecast_results: RwLock<Vec<ForecastResultRow>>,
    inventory_runs: RwLock<Vec<InventoryPolicyRunRecord>>,
    inventory_results: RwLock<Vec<InventoryPolicyResult>>,
    optimisation_runs: RwLock<Vec<OptimisationRunRecord>>,
    optimisation_allocations: RwLock<Vec<OptimisationAllocation>>,
    decision_runs: RwLock<Vec<DecisionRun>>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_product(&self, product: Product) {
        self.products.write().unwrap().push(product);
    }

    pub fn add_location(&self, location: Location) {
        self.locations.write().unwrap().push(location);
    }

    pub fn add_demand_history(&self, row: DemandHistory) {
        self.demand_history.write().unwrap().push(row);
    }

    pub fn add_cost_parameter(&self, param: CostParameter) {
        self.cost_parameters.write().unwrap().push(param);
    }
}

impl ProductRepo for Store {
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

impl LocationRepo for Store {
    fn all(&self) -> Vec<Location> {
        self.locations.read().unwrap().clone()
    }

    fn by_id(&self, id: LocationId) -> Option<Location> {
        self.locations.read().unwrap().iter().find(|l| l.id == id).cloned()
    }
}

impl SupplierRepo for Store {
    fn by_name(&self, name: &str) -> Option<Supplier> {
        self.suppliers.read().unwrap().iter().find(|s| s.name == name).cloned()
    }

    fn by_id(&self, id: SupplierId) -> Option<Supplier> {
        self.suppliers.read().unwrap().iter().find(|s| s.id == id).cloned()
    }

    fn insert(&self, supplier: Supplier) {
        self.suppliers.write().unwrap().push(supplier);
    }
}

impl OfferRepo for Store {
    fn fresh_offer_exists(
        &self,
        supplier_id: SupplierId,
        product_id: ProductId,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> bool {
        self.offers.read().unwrap().iter().any(|o| {
            o.supplier_id == supplier_id && o.product_id == product_id && o.is_fresh(now, ttl)
        })
    }

    fn insert(&self, offer: SupplierOffer) {
        self.offers.write().unwrap().push(offer);
    }

    fn offers_for_product(&self, product_id: ProductId) -> Vec<SupplierOffer> {
        let mut offers: Vec<SupplierOffer> = self
            .offers
            .read()
            .unwrap()
            .iter()
            .filter(|o| o.product_id == product_id)
            .cloned()
            .collect();
        offers.sort_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal));
        offers
    }

    fn by_id(&self, id: procure_core::OfferId) -> Option<SupplierOffer> {
        self.offers.read().unwrap().iter().find(|o| o.id == id).cloned()
    }
}

impl DemandHistoryRepo for Store {
    fn history(&self, product_id: ProductId, location_id: LocationId) -> Vec<DemandHistory> {
        let mut rows: Vec<DemandHistory> = self
            .demand_history
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.product_id == product_id && r.location_id == location_id)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.date);
        rows
    }

    fn insert(&self, row: DemandHistory) {
        self.demand_history.write().unwrap().push(row);
    }
}

impl CostParameterRepo for Store {
    fn all(&self) -> Vec<CostParameter> {
        self.cost_parameters.read().unwrap().clone()
    }

    fn get(&self, product_id: ProductId, location_id: LocationId) -> Option<CostParameter> {
        self.cost_parameters
            .read()
            .unwrap()
            .iter()
            .find(|c| c.product_id == product_id && c.location_id == location_id)
            .copied()
    }

    fn upsert(&self, param: CostParameter) {
        let mut params = self.cost_parameters.write().unwrap();
        if let Some(existing) = params
            .iter_mut()
            .find(|c| c.product_id == param.product_id && c.location_id == param.location_id)
        {
            *existing = param;
        } else {
            params.push(param);
        }
    }
}

impl ScraperRepo for Store {
    fn create_job(&self, job: ScraperJobRecord) {
        self.scraper_jobs.write().unwrap().push(job);
    }

    fn get_job(&self, job_id: JobId) -> Option<ScraperJobRecord> {
        self.scraper_jobs.read().unwrap().iter().find(|j| j.job_id == job_id).cloned()
    }

    fn update_job(&self, job: ScraperJobRecord) -> ProcureResult<()> {
        let mut jobs = self.scraper_jobs.write().unwrap();
        let slot = jobs
            .iter_mut()
            .find(|j| j.job_id == job.job_id)
            .ok_or_else(|| ProcureError::NotFound(format!("scraper job {}", job.job_id)))?;
        *slot = job;
        Ok(())
    }
}

impl ForecastRepo for Store {
    fn create_run(&self, run: ForecastRunRecord) {
        self.forecast_runs.write().unwrap().push(run);
    }

    fn get_run(&self, run_id: RunId) -> Option<ForecastRunRecord> {
        self.forecast_runs.read().unwrap().iter().find(|r| r.run_id == run_id).cloned()
    }

    fn update_run(&self, run: ForecastRunRecord) -> ProcureResult<()> {
        let mut runs = self.forecast_runs.write().unwrap();
        let slot = runs
            .iter_mut()
            .find(|r| r.run_id == run.run_id)
            .ok_or_else(|| ProcureError::NotFound(format!("forecast run {}", run.run_id)))?;
        *slot = run;
        Ok(())
    }

    fn insert_result(&self, row: ForecastResultRow) {
        self.forecast_results.write().unwrap().push(row);
    }

    fn results_for_run(&self, run_id: RunId) -> Vec<ForecastResultRow> {
        self.forecast_results
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.result.run_id == run_id)
            .cloned()
            .collect()
    }
}

impl InventoryRepo for Store {
    fn create_run(&self, run: InventoryPolicyRunRecord) {
        self.inventory_runs.write().unwrap().push(run);
    }

    fn get_run(&self, run_id: RunId) -> Option<InventoryPolicyRunRecord> {
        self.inventory_runs.read().unwrap().iter().find(|r| r.run_id == run_id).cloned()
    }

    fn update_run(&self, run: InventoryPolicyRunRecord) -> ProcureResult<()> {
        let mut runs = self.inventory_runs.write().unwrap();
        let slot = runs
            .iter_mut()
            .find(|r| r.run_id == run.run_id)
            .ok_or_else(|| ProcureError::NotFound(format!("inventory run {}", run.run_id)))?;
        *slot = run;
        Ok(())
    }

    fn insert_result(&self, row: InventoryPolicyResult) {
        self.inventory_results.write().unwrap().push(row);
    }

    fn results_for_run(&self, run_id: RunId) -> Vec<InventoryPolicyResult> {
        self.inventory_results
            .read()
            .unwrap()
            .iter()
            .filter(|r| r.run_id == run_id)
            .copied()
            .collect()
    }
}

impl OptimisationRepo for Store {
    fn create_run(&self, run: OptimisationRunRecord) {
        self.optimisation_runs.write().unwrap().push(run);
    }

    fn get_run(&self, run_id: RunId) -> Option<OptimisationRunRecord> {
        self.optimisation_runs.read().unwrap().iter().find(|r| r.run_id == run_id).cloned()
    }

    fn update_run(&self, run: OptimisationRunRecord) -> ProcureResult<()> {
        let mut runs = self.optimisation_runs.write().unwrap();
        let slot = runs
            .iter_mut()
            .find(|r| r.run_id == run.run_id)
            .ok_or_else(|| ProcureError::NotFound(format!("optimisation run {}", run.run_id)))?;
        *slot = run;
        Ok(())
    }

    fn insert_allocation(&self, row: OptimisationAllocation) {
        self.optimisation_allocations.write().unwrap().push(row);
    }

    fn allocations_for_run(&self, run_id: RunId) -> Vec<OptimisationAllocation> {
        self.optimisation_allocations
            .read()
            .unwrap()
            .iter()
            .filter(|a| a.run_id == run_id)
            .copied()
            .collect()
    }
}

impl DecisionRepo for Store {
    fn create(&self, run: DecisionRun) {
        self.decision_runs.write().unwrap().push(run);
    }

    fn get(&self, run_id: RunId) -> Option<DecisionRun> {
        self.decision_runs.read().unwrap().iter().find(|r| r.run_id == run_id).cloned()
    }

    fn update(&self, run: DecisionRun) -> ProcureResult<()> {
        let mut runs = self.decision_runs.write().unwrap();
        let slot = runs
            .iter_mut()
            .find(|r| r.run_id == run.run_id)
            .ok_or_else(|| ProcureError::NotFound(format!("decision run {}", run.run_id)))?;
        *slot = run;
        Ok(())
    }
}
