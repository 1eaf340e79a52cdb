//! The run-status state machine and the run/record types every stage owns.
//!
//! Centralising the transition logic here (per the specification's design
//! notes) means every stage calls the same guarded [`RunStatus::transition`]
//! instead of re-deriving "which statuses are terminal" in four places.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ProcureError;
use crate::ids::{JobId, RunId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Running,
    Done,
    Failed,
    Optimal,
    Infeasible,
}

impl RunStatus {
    /// A run that has reached one of these will never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            RunStatus::Done | RunStatus::Failed | RunStatus::Optimal | RunStatus::Infeasible
        )
    }

    /// Validate and perform `self -> next`, per the monotonic state machine
    /// `pending -> running -> {done, failed, optimal, infeasible}`.
    pub fn transition(self, next: RunStatus) -> Result<RunStatus, ProcureError> {
        let allowed = matches!(
            (self, next),
            (RunStatus::Pending, RunStatus::Running)
                | (RunStatus::Pending, RunStatus::Failed)
                | (
                    RunStatus::Running,
                    RunStatus::Done
                        | RunStatus::Failed
                        | RunStatus::Optimal
                        | RunStatus::Infeasible
                )
        );
        if allowed {
            Ok(next)
        } else {
            Err(ProcureError::Stage(format!(
                "illegal run-status transition {self:?} -> {next:?}"
            )))
        }
    }
}

impl Default for RunStatus {
    fn default() -> Self {
        RunStatus::Pending
    }
}

/// Component A's run record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperJobRecord {
    pub job_id: JobId,
    pub skus: Vec<String>,
    pub sources: Vec<String>,
    pub status: RunStatus,
    pub offers_collected: u32,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScraperJobRecord {
    pub fn new(skus: Vec<String>, sources: Vec<String>) -> Self {
        Self {
            job_id: JobId::new(),
            skus,
            sources,
            status: RunStatus::Pending,
            offers_collected: 0,
            error: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// Component B's run record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRunRecord {
    pub run_id: RunId,
    pub horizon: u32,
    pub frequency: String,
    pub status: RunStatus,
    pub model_versions: std::collections::HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl ForecastRunRecord {
    pub fn new(horizon: u32, frequency: impl Into<String>) -> Self {
        Self {
            run_id: RunId::new(),
            horizon,
            frequency: frequency.into(),
            status: RunStatus::Pending,
            model_versions: std::collections::HashMap::new(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// Component C's run record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryPolicyRunRecord {
    pub run_id: RunId,
    pub forecast_run_id: RunId,
    pub periods_per_year: u32,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl InventoryPolicyRunRecord {
    pub fn new(forecast_run_id: RunId, periods_per_year: u32) -> Self {
        Self {
            run_id: RunId::new(),
            forecast_run_id,
            periods_per_year,
            status: RunStatus::Pending,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// Component D's run record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimisationRunRecord {
    pub run_id: RunId,
    pub forecast_run_id: RunId,
    pub inventory_run_id: RunId,
    pub use_p90: bool,
    pub max_suppliers_per_product: u32,
    pub solver: String,
    pub status: RunStatus,
    pub total_cost: f64,
    pub solve_time_ms: u64,
    pub binding_constraints: Vec<String>,
    pub cost_breakdown: crate::results::CostBreakdown,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl OptimisationRunRecord {
    pub fn new(
        forecast_run_id: RunId,
        inventory_run_id: RunId,
        use_p90: bool,
        max_suppliers_per_product: u32,
    ) -> Self {
        Self {
            run_id: RunId::new(),
            forecast_run_id,
            inventory_run_id,
            use_p90,
            max_suppliers_per_product,
            solver: "good_lp/highs".to_string(),
            status: RunStatus::Pending,
            total_cost: 0.0,
            solve_time_ms: 0,
            binding_constraints: Vec::new(),
            cost_breakdown: crate::results::CostBreakdown::default(),
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

/// Component E's run record: threads the other run IDs together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionRun {
    pub run_id: RunId,
    pub status: RunStatus,
    pub scraper_job_id: Option<JobId>,
    pub forecast_run_id: Option<RunId>,
    pub inventory_run_id: Option<RunId>,
    pub optimisation_run_id: Option<RunId>,
    pub summary: Option<crate::results::DecisionSummary>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl DecisionRun {
    pub fn new() -> Self {
        Self {
            run_id: RunId::new(),
            status: RunStatus::Pending,
            scraper_job_id: None,
            forecast_run_id: None,
            inventory_run_id: None,
            optimisation_run_id: None,
            summary: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

impl Default for DecisionRun {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pending_to_running_is_allowed() {
        assert_eq!(
            RunStatus::Pending.transition(RunStatus::Running).unwrap(),
            RunStatus::Running
        );
    }

    #[test]
    fn running_to_optimal_is_allowed_but_not_reversible() {
        let optimal = RunStatus::Running.transition(RunStatus::Optimal).unwrap();
        assert!(optimal.is_terminal());
        assert!(optimal.transition(RunStatus::Running).is_err());
    }

    #[test]
    fn pending_cannot_jump_to_done() {
        assert!(RunStatus::Pending.transition(RunStatus::Done).is_err());
    }
}
