//! Component E: the pipeline orchestrator.
//!
//! Sequences offer acquisition, demand forecasting, inventory policy and
//! cost-minimising allocation under a single [`procure_core::DecisionRun`],
//! the way `gat_batch::run_batch` sequences a fan-out of independent power
//! flow jobs under one `BatchSummary` — except here the four stages are
//! strictly ordered rather than run in parallel, since each reads the
//! previous stage's durably persisted output.

pub mod orchestrate;

pub use orchestrate::{recommend, PipelineDeps, RecommendRequest};
