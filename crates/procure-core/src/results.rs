//! Persisted result rows produced by Components B, C and D, plus the
//! derived summary types assembled by the orchestrator (Component E).
//!
//! These play the role the teacher's `gat-schemas` crate plays for Arrow
//! tables; since nothing downstream needs a columnar/Arrow representation
//! here, the DTOs live alongside the entities instead of in a separate
//! crate (see DESIGN.md).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, ProductId, RunId, SupplierId};

/// One future period's demand distribution for a (product, location) pair.
///
/// Invariant: `0 <= p50 <= p90`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastResult {
    pub run_id: RunId,
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub date: DateTime<Utc>,
    pub p50: f64,
    pub p90: f64,
    pub mape: f64,
    pub wape: f64,
}

/// `model_used` is free text rather than an enum: "naive" is always a
/// legal value and new candidate models should not require a schema change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResultRow {
    #[serde(flatten)]
    pub result: ForecastResult,
    pub model_used: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InventoryPolicyResult {
    pub run_id: RunId,
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub eoq: f64,
    pub rop: f64,
    pub safety_stock: f64,
    pub avg_demand: f64,
    pub demand_std: f64,
    pub lead_time_days: f64,
    pub service_level: f64,
    pub annual_holding_cost: f64,
    pub annual_ordering_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptimisationAllocation {
    pub run_id: RunId,
    pub supplier_id: SupplierId,
    pub product_id: ProductId,
    pub location_id: LocationId,
    pub qty: f64,
    pub unit_cost: f64,
    pub ship_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub procurement: f64,
    pub shipping: f64,
    pub holding: f64,
    pub penalty: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.procurement + self.shipping + self.holding + self.penalty
    }

    /// Each component as a percentage of the total, rounded to 1 decimal;
    /// zero total yields all-zero percentages rather than dividing by zero.
    pub fn as_percentages(&self) -> CostBreakdown {
        let total = self.total();
        if total <= 0.0 {
            return CostBreakdown::default();
        }
        let pct = |v: f64| (v / total * 100.0 * 10.0).round() / 10.0;
        CostBreakdown {
            procurement: pct(self.procurement),
            shipping: pct(self.shipping),
            holding: pct(self.holding),
            penalty: pct(self.penalty),
        }
    }
}

impl Default for CostBreakdown {
    fn default() -> Self {
        Self {
            procurement: 0.0,
            shipping: 0.0,
            holding: 0.0,
            penalty: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopAllocation {
    pub product_sku: String,
    pub supplier_name: String,
    pub location_id: LocationId,
    pub qty: f64,
    pub unit_cost: f64,
    pub total_cost: f64,
}

/// The human-readable recommendation summary a [`crate::run::DecisionRun`]
/// carries once Component E finishes (§4.E step 6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSummary {
    pub products_optimised: u32,
    pub total_cost: f64,
    pub cost_reduction_estimate_pct: f64,
    pub cost_breakdown: CostBreakdown,
    pub solver_status: String,
    pub solve_time_ms: u64,
    pub top_recommendations: Vec<TopAllocation>,
    pub binding_constraints: Vec<String>,
}
