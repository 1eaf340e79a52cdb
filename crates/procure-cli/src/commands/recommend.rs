use anyhow::Result;
use procure_pipeline::{recommend as run_pipeline, RecommendRequest};

use crate::app::{pipeline_deps, seed};

#[allow(clippy::too_many_arguments)]
pub fn run(
    products: usize,
    seed_value: u64,
    skus: Vec<String>,
    sources: Vec<String>,
    use_p90: bool,
    max_suppliers_per_product: Option<u32>,
    horizon_periods: Option<u32>,
) -> Result<()> {
    let (store, catalog) = seed(products, seed_value);
    let skus = if skus.is_empty() {
        catalog.products.iter().map(|p| p.sku.clone()).collect()
    } else {
        skus
    };

    let deps = pipeline_deps(&store);
    let request = RecommendRequest {
        skus,
        sources,
        use_p90_demand: use_p90,
        max_suppliers_per_product,
        horizon_periods,
    };

    let decision = run_pipeline(&deps, request)?;
    println!("{}", serde_json::to_string_pretty(&decision)?);
    Ok(())
}
