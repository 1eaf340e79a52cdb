//! Wires a fresh in-memory [`Store`] up to every stage's narrow dependency
//! bundle, the way `gat-cli`'s command handlers build a `SolverKind`/
//! `BatchRunnerConfig` right before dispatch rather than threading a shared
//! app-state struct through the whole binary.

use std::sync::Arc;

use procure_forecast::ForecastDeps;
use procure_inventory::InventoryDeps;
use procure_offers::OfferAcquisitionDeps;
use procure_pipeline::PipelineDeps;
use procure_solver::SolverDeps;
use procure_store::{build_demo_catalog, DemoCatalog, Store};

pub fn seed(num_products: usize, seed: u64) -> (Arc<Store>, DemoCatalog) {
    let store = Arc::new(Store::new());
    let catalog = build_demo_catalog(&store, num_products, seed);
    (store, catalog)
}

pub fn pipeline_deps(store: &Arc<Store>) -> PipelineDeps {
    PipelineDeps {
        products: store.clone(),
        locations: store.clone(),
        suppliers: store.clone(),
        offers: store.clone(),
        demand_history: store.clone(),
        cost_parameters: store.clone(),
        jobs: store.clone(),
        forecasts: store.clone(),
        inventory: store.clone(),
        optimisation: store.clone(),
        decisions: store.clone(),
    }
}

pub fn offer_deps(store: &Arc<Store>) -> OfferAcquisitionDeps {
    OfferAcquisitionDeps {
        products: store.clone(),
        suppliers: store.clone(),
        offers: store.clone(),
        jobs: store.clone(),
    }
}

pub fn forecast_deps(store: &Arc<Store>) -> ForecastDeps {
    ForecastDeps {
        products: store.clone(),
        locations: store.clone(),
        demand_history: store.clone(),
        forecasts: store.clone(),
    }
}

pub fn inventory_deps(store: &Arc<Store>) -> InventoryDeps {
    InventoryDeps {
        products: store.clone(),
        locations: store.clone(),
        offers: store.clone(),
        cost_parameters: store.clone(),
        forecasts: store.clone(),
        inventory: store.clone(),
    }
}

pub fn solver_deps(store: &Arc<Store>) -> SolverDeps {
    SolverDeps {
        products: store.clone(),
        locations: store.clone(),
        offers: store.clone(),
        cost_parameters: store.clone(),
        forecasts: store.clone(),
        inventory: store.clone(),
        optimisation: store.clone(),
    }
}
