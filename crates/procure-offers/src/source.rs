//! Synthetic source fetch (§4.A: "a source is a capability exposing
//! `fetch(sku) -> [OfferCandidate]`").
//!
//! Every draw is seeded from `hash(sku, source)` so the same (sku, source)
//! pair always yields the same candidate offers, the property the reference
//! scraper relies on for reproducible tests.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::profile::{profile_for, SUPPLIER_NAMES};

#[derive(Debug, Clone)]
pub struct OfferCandidate {
    pub supplier_name: String,
    pub price: f64,
    pub currency: String,
    pub moq: u32,
    pub lead_time_days: u32,
    pub capacity_units: u32,
    pub rating: f64,
    pub confidence: f64,
}

fn deterministic_hash(parts: &[&str]) -> u64 {
    let mut hasher = DefaultHasher::new();
    for part in parts {
        part.hash(&mut hasher);
    }
    hasher.finish()
}

/// Synthetic candidate offers for one (sku, source) pair.
///
/// Cheaper suppliers get slightly lower ratings and confidence, the same
/// correlated-noise shape the reference scraper uses to mimic a real
/// marketplace: quality tracks price.
pub fn fetch(sku: &str, source: &str, n_suppliers: usize) -> Vec<OfferCandidate> {
    let profile = profile_for(source);
    let mut rng = ChaCha8Rng::seed_from_u64(deterministic_hash(&[sku, source]));

    let base_price = 10.0 + (deterministic_hash(&[sku]) % 490) as f64;

    let mut offers = Vec::with_capacity(n_suppliers);
    for _ in 0..n_suppliers {
        let factor = rng.gen_range(profile.price_factor_range.0..profile.price_factor_range.1);
        let noise = sample_normal(&mut rng, 0.0, 0.05);
        let price = (base_price * factor * (1.0 + noise)).max(1.0);
        let price = (price * 100.0).round() / 100.0;

        let price_percentile = (price - base_price * 0.8) / (base_price * 0.3 + 1.0);
        let rating_base = rng.gen_range(profile.rating_range.0..profile.rating_range.1);
        let rating = (rating_base + price_percentile * 0.3).min(5.0);

        let moq = profile.moq_options[rng.gen_range(0..profile.moq_options.len())];
        let lead_time_days = rng.gen_range(profile.lead_time_range.0..=profile.lead_time_range.1);
        let confidence = rng.gen_range(profile.confidence_range.0..profile.confidence_range.1);
        let supplier_name = SUPPLIER_NAMES[rng.gen_range(0..SUPPLIER_NAMES.len())].to_string();

        offers.push(OfferCandidate {
            supplier_name,
            price,
            currency: "USD".to_string(),
            moq,
            lead_time_days,
            capacity_units: rng.gen_range(5000..80000),
            rating: (rating * 10.0).round() / 10.0,
            confidence: (confidence * 100.0).round() / 100.0,
        });
    }
    offers
}

fn sample_normal(rng: &mut ChaCha8Rng, mean: f64, std_dev: f64) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    mean + std_dev * z0
}
