//! Aggregates the tabular inputs the MILP is built from (§4.D "Inputs
//! aggregated") out of the repository traits, independent of the solver
//! backend in [`crate::solve`].

use std::collections::HashMap;
use std::sync::Arc;

use procure_core::repo::{CostParameterRepo, ForecastRepo, InventoryRepo, LocationRepo, OfferRepo, ProductRepo};
use procure_core::{CostParameter, Location, Product, RunId, SupplierOffer};

/// Offers are capped at 8 per product (§4.D).
pub const MAX_OFFERS_PER_PRODUCT: usize = 8;

pub const DEFAULT_HOLDING_COST: f64 = 0.5;
pub const DEFAULT_PENALTY: f64 = 10.0;

#[derive(Clone)]
pub struct SolverDeps {
    pub products: Arc<dyn ProductRepo>,
    pub locations: Arc<dyn LocationRepo>,
    pub offers: Arc<dyn OfferRepo>,
    pub cost_parameters: Arc<dyn CostParameterRepo>,
    pub forecasts: Arc<dyn ForecastRepo>,
    pub inventory: Arc<dyn InventoryRepo>,
    pub optimisation: Arc<dyn procure_core::repo::OptimisationRepo>,
}

/// Everything the solver needs to build variables and constraints for one
/// run, already resolved from the store.
pub struct ProblemInput {
    pub products: Vec<Product>,
    pub locations: Vec<Location>,
    pub offers: HashMap<procure_core::ProductId, Vec<SupplierOffer>>,
    pub demand: HashMap<(procure_core::ProductId, procure_core::LocationId), f64>,
    pub cost_params: HashMap<(procure_core::ProductId, procure_core::LocationId), CostParameter>,
    pub safety_stock: HashMap<(procure_core::ProductId, procure_core::LocationId), f64>,
}

impl ProblemInput {
    pub fn cost_param_or_default(&self, product_id: procure_core::ProductId, location_id: procure_core::LocationId) -> CostParameter {
        self.cost_params.get(&(product_id, location_id)).copied().unwrap_or(CostParameter {
            product_id,
            location_id,
            holding_cost_per_unit_period: DEFAULT_HOLDING_COST,
            setup_cost: 0.0,
            stockout_penalty: DEFAULT_PENALTY,
            service_level: 0.95,
        })
    }

    pub fn safety_stock_or_zero(&self, product_id: procure_core::ProductId, location_id: procure_core::LocationId) -> f64 {
        self.safety_stock.get(&(product_id, location_id)).copied().unwrap_or(0.0)
    }
}

/// Aggregate demand, offers, cost parameters and safety stocks for the
/// given products (all products if `product_ids` is `None`), across every
/// location.
pub fn aggregate(
    deps: &SolverDeps,
    forecast_run_id: RunId,
    inventory_run_id: RunId,
    product_ids: Option<&[procure_core::ProductId]>,
    use_p90: bool,
) -> ProblemInput {
    let products = match product_ids {
        Some(ids) => ids.iter().filter_map(|id| deps.products.by_id(*id)).collect(),
        None => deps.products.all(),
    };
    let locations = deps.locations.all();

    let mut offers = HashMap::new();
    let mut demand = HashMap::new();
    let mut cost_params = HashMap::new();

    for product in &products {
        let product_offers = deps.offers.top_offers_for_product(product.id, MAX_OFFERS_PER_PRODUCT);
        if !product_offers.is_empty() {
            offers.insert(product.id, product_offers);
        }

        for location in &locations {
            let rows = deps.forecasts.results_for(forecast_run_id, product.id, location.id);
            if rows.is_empty() {
                continue;
            }
            let total: f64 = rows.iter().map(|r| if use_p90 { r.result.p90 } else { r.result.p50 }).sum();
            demand.insert((product.id, location.id), total);

            if let Some(param) = deps.cost_parameters.get(product.id, location.id) {
                cost_params.insert((product.id, location.id), param);
            }
        }
    }

    let mut safety_stock = HashMap::new();
    for row in deps.inventory.results_for_run(inventory_run_id) {
        safety_stock.insert((row.product_id, row.location_id), row.safety_stock);
    }

    ProblemInput {
        products,
        locations,
        offers,
        demand,
        cost_params,
        safety_stock,
    }
}
