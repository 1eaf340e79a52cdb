//! Deterministic synthetic fixture builder (§8, end-to-end scenarios).
//!
//! Mirrors the source scraper's habit of seeding every random draw from
//! `hash(sku, source)` so fixtures are reproducible across runs: here the
//! whole catalog is seeded from one `u64`, via `rand_chacha::ChaCha8Rng`
//! rather than the OS RNG, so `build_demo_catalog(7)` always returns byte-
//! identical history for identical inputs.

use chrono::{Duration, Utc};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use procure_core::{CostParameter, DemandHistory, Location, LocationType, Product, ProductId};

use crate::store::Store;

const CATEGORIES: &[&str] = &["electronics", "apparel", "home_goods", "industrial"];
const WEEKS_OF_HISTORY: i64 = 104;

/// The product and location dimension rows produced by [`build_demo_catalog`],
/// kept around so callers (the CLI, integration tests) can address specific
/// rows without re-querying the store.
#[derive(Debug, Clone)]
pub struct DemoCatalog {
    pub products: Vec<Product>,
    pub locations: Vec<Location>,
}

/// Populate `store` with `num_products` products, three locations (one
/// warehouse, one distribution center, one retail site), `WEEKS_OF_HISTORY`
/// weeks of synthetic demand history per (product, location), and a cost
/// parameter row per (product, location). Fully determined by `seed`.
pub fn build_demo_catalog(store: &Store, num_products: usize, seed: u64) -> DemoCatalog {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let locations = vec![
        Location::new("Central Warehouse", LocationType::Warehouse, "US"),
        Location::new("West Distribution Center", LocationType::DistributionCenter, "US"),
        Location::new("Flagship Retail", LocationType::Retail, "US"),
    ];
    for location in &locations {
        store.add_location(location.clone());
    }

    let mut products = Vec::with_capacity(num_products);
    for i in 0..num_products {
        let sku = format!("SKU-{i:04}");
        let name = format!("Demo Product {i}");
        let mut product = Product::new(sku, name);
        product.category = Some(CATEGORIES[i % CATEGORIES.len()].to_string());
        product.pack_size = 1 + (i as u32 % 12);
        store.add_product(product.clone());
        products.push(product);
    }

    for product in &products {
        for location in &locations {
            seed_demand_history(store, &mut rng, product.id, location.id);
            seed_cost_parameter(store, &mut rng, product.id, location.id);
        }
    }

    DemoCatalog { products, locations }
}

fn seed_demand_history(
    store: &Store,
    rng: &mut ChaCha8Rng,
    product_id: ProductId,
    location_id: procure_core::LocationId,
) {
    let base = rng.gen_range(50.0..500.0);
    let trend = rng.gen_range(-1.0..2.0);
    let seasonal_amplitude = base * rng.gen_range(0.05..0.25);
    let noise_std = base * rng.gen_range(0.05..0.15);
    let now = Utc::now();

    for week in 0..WEEKS_OF_HISTORY {
        let seasonal = seasonal_amplitude * (2.0 * std::f64::consts::PI * week as f64 / 52.0).sin();
        let qty = (base + trend * week as f64 + seasonal + sample_normal(rng, 0.0, noise_std)).max(0.0);
        store.add_demand_history(DemandHistory {
            product_id,
            location_id,
            date: now - Duration::weeks(WEEKS_OF_HISTORY - week),
            qty,
        });
    }
}

fn seed_cost_parameter(
    store: &Store,
    rng: &mut ChaCha8Rng,
    product_id: ProductId,
    location_id: procure_core::LocationId,
) {
    store.add_cost_parameter(CostParameter {
        product_id,
        location_id,
        holding_cost_per_unit_period: rng.gen_range(0.2..1.5),
        setup_cost: rng.gen_range(20.0..150.0),
        stockout_penalty: rng.gen_range(5.0..25.0),
        service_level: 0.95,
    });
}

/// Box-Muller transform; the corpus has no normal-sampling crate in its
/// dependency graph, so this draws two uniforms from the seeded RNG rather
/// than pulling in a distributions crate for one call site.
fn sample_normal(rng: &mut ChaCha8Rng, mean: f64, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return mean;
    }
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z0
}
