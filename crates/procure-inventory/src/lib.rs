//! Component C: inventory policy engine.
//!
//! Turns a forecast run and per-(product, location) cost parameters into
//! an EOQ / reorder-point / safety-stock policy, using the cheapest
//! supplier offer's lead time as the lead-time estimate.

pub mod policy;
pub mod quantile;

pub use policy::{compute_policies, InventoryDeps};
pub use quantile::normal_inv_cdf;
