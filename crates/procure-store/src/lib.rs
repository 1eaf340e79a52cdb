//! In-memory reference implementation of `procure_core::repo`, plus a
//! deterministic synthetic fixture builder used by the CLI's `seed`
//! command and by integration tests across the workspace.

pub mod seed;
pub mod store;

pub use seed::{build_demo_catalog, DemoCatalog};
pub use store::Store;
