//! # procure-core: procurement decision pipeline foundations
//!
//! Provides the entities, opaque identifiers, run-status lifecycle,
//! repository contracts and error type shared by every stage of the
//! procurement decision pipeline: offer acquisition, demand forecasting,
//! inventory policy, and cost-minimising allocation.
//!
//! ## Design philosophy
//!
//! Dimension rows ([`entities::Product`], [`entities::Location`],
//! [`entities::Supplier`]) are immutable once created. Each pipeline stage
//! owns its run record exclusively (see [`run::RunStatus`]) and depends only
//! on the narrow [`repo`] traits for its inputs and outputs, never on a
//! concrete storage engine — `procure-store` is one implementation of those
//! traits, not a dependency any stage crate takes on directly.
//!
//! ## Modules
//!
//! - [`ids`] — opaque, type-safe identifiers
//! - [`entities`] — dimension and fact rows
//! - [`run`] — the run-status state machine and per-stage run records
//! - [`results`] — persisted result rows and the orchestrator's summary DTOs
//! - [`repo`] — repository capability traits
//! - [`error`] — the unified [`error::ProcureError`] type
//! - [`settings`] — the process-wide configuration singleton

pub mod entities;
pub mod error;
pub mod ids;
pub mod repo;
pub mod results;
pub mod run;
pub mod settings;

pub use entities::{CostParameter, DemandHistory, Location, LocationType, Product, Supplier, SupplierOffer};
pub use error::{ProcureError, ProcureResult};
pub use ids::{JobId, LocationId, OfferId, ProductId, RunId, SupplierId};
pub use results::{
    CostBreakdown, DecisionSummary, ForecastResult, ForecastResultRow, InventoryPolicyResult,
    OptimisationAllocation, TopAllocation,
};
pub use run::{
    DecisionRun, ForecastRunRecord, InventoryPolicyRunRecord, OptimisationRunRecord, RunStatus,
    ScraperJobRecord,
};
pub use settings::Settings;
