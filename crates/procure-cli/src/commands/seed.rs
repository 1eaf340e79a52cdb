use anyhow::Result;
use procure_core::repo::DemandHistoryRepo;

use crate::app::seed;

pub fn run(products: usize, seed_value: u64) -> Result<()> {
    let (store, catalog) = seed(products, seed_value);
    let history_rows: usize = catalog
        .products
        .iter()
        .flat_map(|p| catalog.locations.iter().map(move |l| (p.id, l.id)))
        .map(|(product_id, location_id)| store.history(product_id, location_id).len())
        .sum();

    let summary = serde_json::json!({
        "products": catalog.products.len(),
        "locations": catalog.locations.len(),
        "demand_history_rows": history_rows,
        "seed": seed_value,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
