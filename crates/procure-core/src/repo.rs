//! Repository capabilities each stage depends on.
//!
//! Per the specification's design notes, the source threads a request-scoped
//! DB session through every function; here each stage instead takes one
//! narrow trait object per entity family. `procure-store` provides the
//! in-memory reference implementation; a real deployment would implement
//! the same traits against a relational store without any stage code
//! changing.

use chrono::{DateTime, Utc};

use crate::entities::{CostParameter, DemandHistory, Location, Product, Supplier, SupplierOffer};
use crate::error::ProcureResult;
use crate::ids::{JobId, LocationId, OfferId, ProductId, RunId, SupplierId};
use crate::results::{ForecastResultRow, InventoryPolicyResult, OptimisationAllocation};
use crate::run::{
    DecisionRun, ForecastRunRecord, InventoryPolicyRunRecord, OptimisationRunRecord, ScraperJobRecord,
};

pub trait ProductRepo: Send + Sync {
    fn all(&self) -> Vec<Product>;
    fn by_sku(&self, sku: &str) -> Option<Product>;
    fn by_id(&self, id: ProductId) -> Option<Product>;
    /// First `n` products by insertion order; backs the orchestrator's
    /// demo cap on automatic product selection (§4.E step 1, §9).
    fn first_n(&self, n: usize) -> Vec<Product>;
}

pub trait LocationRepo: Send + Sync {
    fn all(&self) -> Vec<Location>;
    fn by_id(&self, id: LocationId) -> Option<Location>;
}

pub trait SupplierRepo: Send + Sync {
    fn by_name(&self, name: &str) -> Option<Supplier>;
    fn by_id(&self, id: SupplierId) -> Option<Supplier>;
    fn insert(&self, supplier: Supplier);
}

pub trait OfferRepo: Send + Sync {
    fn fresh_offer_exists(
        &self,
        supplier_id: SupplierId,
        product_id: ProductId,
        now: DateTime<Utc>,
        ttl: chrono::Duration,
    ) -> bool;
    fn insert(&self, offer: SupplierOffer);
    /// All offers for a product, cheapest first.
    fn offers_for_product(&self, product_id: ProductId) -> Vec<SupplierOffer>;
    /// The cheapest `max_per_product` offers for a product.
    fn top_offers_for_product(&self, product_id: ProductId, max_per_product: usize) -> Vec<SupplierOffer> {
        let mut offers = self.offers_for_product(product_id);
        offers.truncate(max_per_product);
        offers
    }
    fn cheapest_for_product(&self, product_id: ProductId) -> Option<SupplierOffer> {
        self.offers_for_product(product_id).into_iter().next()
    }
    fn by_id(&self, id: OfferId) -> Option<SupplierOffer>;
}

pub trait DemandHistoryRepo: Send + Sync {
    /// Ordered by date ascending.
    fn history(&self, product_id: ProductId, location_id: LocationId) -> Vec<DemandHistory>;
    fn insert(&self, row: DemandHistory);
}

pub trait CostParameterRepo: Send + Sync {
    fn all(&self) -> Vec<CostParameter>;
    fn get(&self, product_id: ProductId, location_id: LocationId) -> Option<CostParameter>;
    fn upsert(&self, param: CostParameter);
}

pub trait ScraperRepo: Send + Sync {
    fn create_job(&self, job: ScraperJobRecord);
    fn get_job(&self, job_id: JobId) -> Option<ScraperJobRecord>;
    fn update_job(&self, job: ScraperJobRecord) -> ProcureResult<()>;
}

pub trait ForecastRepo: Send + Sync {
    fn create_run(&self, run: ForecastRunRecord);
    fn get_run(&self, run_id: RunId) -> Option<ForecastRunRecord>;
    fn update_run(&self, run: ForecastRunRecord) -> ProcureResult<()>;
    fn insert_result(&self, row: ForecastResultRow);
    fn results_for_run(&self, run_id: RunId) -> Vec<ForecastResultRow>;
    fn results_for(
        &self,
        run_id: RunId,
        product_id: ProductId,
        location_id: LocationId,
    ) -> Vec<ForecastResultRow> {
        self.results_for_run(run_id)
            .into_iter()
            .filter(|r| r.result.product_id == product_id && r.result.location_id == location_id)
            .collect()
    }
}

pub trait InventoryRepo: Send + Sync {
    fn create_run(&self, run: InventoryPolicyRunRecord);
    fn get_run(&self, run_id: RunId) -> Option<InventoryPolicyRunRecord>;
    fn update_run(&self, run: InventoryPolicyRunRecord) -> ProcureResult<()>;
    fn insert_result(&self, row: InventoryPolicyResult);
    fn results_for_run(&self, run_id: RunId) -> Vec<InventoryPolicyResult>;
}

pub trait OptimisationRepo: Send + Sync {
    fn create_run(&self, run: OptimisationRunRecord);
    fn get_run(&self, run_id: RunId) -> Option<OptimisationRunRecord>;
    fn update_run(&self, run: OptimisationRunRecord) -> ProcureResult<()>;
    fn insert_allocation(&self, row: OptimisationAllocation);
    fn allocations_for_run(&self, run_id: RunId) -> Vec<OptimisationAllocation>;
}

pub trait DecisionRepo: Send + Sync {
    fn create(&self, run: DecisionRun);
    fn get(&self, run_id: RunId) -> Option<DecisionRun>;
    fn update(&self, run: DecisionRun) -> ProcureResult<()>;
}
