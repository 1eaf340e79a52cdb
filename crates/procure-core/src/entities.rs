//! Dimension and fact entities (§3 of the specification).
//!
//! Dimension rows ([`Product`], [`Location`], [`Supplier`]) are created
//! out-of-band and never mutated by the pipeline. Fact rows
//! ([`SupplierOffer`], [`DemandHistory`]) are appended by Component A or
//! loaded from history; [`CostParameter`] rows are configuration, not
//! pipeline output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, ProductId, SupplierId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub category: Option<String>,
    pub uom: String,
    pub pack_size: u32,
}

impl Product {
    pub fn new(sku: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ProductId::new(),
            sku: sku.into(),
            name: name.into(),
            category: None,
            uom: "unit".to_string(),
            pack_size: 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationType {
    Warehouse,
    DistributionCenter,
    Retail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub location_type: LocationType,
    pub country: String,
}

impl Location {
    pub fn new(name: impl Into<String>, location_type: LocationType, country: impl Into<String>) -> Self {
        Self {
            id: LocationId::new(),
            name: name.into(),
            location_type,
            country: country.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: String,
    /// 0–5
    pub rating: f64,
    pub region: String,
    pub country: String,
    pub supported_incoterms: Vec<String>,
    pub active: bool,
}

impl Supplier {
    pub fn new(name: impl Into<String>, rating: f64) -> Self {
        Self {
            id: SupplierId::new(),
            name: name.into(),
            rating: rating.clamp(0.0, 5.0),
            region: "Asia".to_string(),
            country: "CN".to_string(),
            supported_incoterms: vec!["FOB".to_string(), "CIF".to_string()],
            active: true,
        }
    }
}

/// A priced, time-varying offer from a supplier for a product.
///
/// An offer is "fresh" iff `captured_at >= now - ttl`; see
/// [`SupplierOffer::is_fresh`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierOffer {
    pub id: crate::ids::OfferId,
    pub supplier_id: SupplierId,
    pub product_id: ProductId,
    pub price: f64,
    pub currency: String,
    pub moq: u32,
    pub lead_time_days: u32,
    pub capacity_units: u32,
    pub captured_at: DateTime<Utc>,
    pub source: String,
    /// 0–1 data-quality score
    pub confidence: f64,
}

impl SupplierOffer {
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> bool {
        self.captured_at >= now - ttl
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandHistory {
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub date: DateTime<Utc>,
    pub qty: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostParameter {
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub holding_cost_per_unit_period: f64,
    pub setup_cost: f64,
    pub stockout_penalty: f64,
    /// (0, 1)
    pub service_level: f64,
}

impl Default for CostParameter {
    fn default() -> Self {
        Self {
            product_id: ProductId::new(),
            location_id: LocationId::new(),
            holding_cost_per_unit_period: 0.5,
            setup_cost: 50.0,
            stockout_penalty: 10.0,
            service_level: 0.95,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offer_freshness_respects_ttl() {
        let now = Utc::now();
        let offer = SupplierOffer {
            id: crate::ids::OfferId::new(),
            supplier_id: SupplierId::new(),
            product_id: ProductId::new(),
            price: 10.0,
            currency: "USD".to_string(),
            moq: 100,
            lead_time_days: 14,
            capacity_units: 5000,
            captured_at: now - chrono::Duration::hours(23),
            source: "mock_alibaba".to_string(),
            confidence: 0.9,
        };
        assert!(offer.is_fresh(now, chrono::Duration::hours(24)));
        assert!(!offer.is_fresh(now, chrono::Duration::hours(1)));
    }
}
