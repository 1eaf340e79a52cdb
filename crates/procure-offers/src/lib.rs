//! Component A: supplier offer acquisition.
//!
//! Queries one or more synthetic marketplace sources per requested SKU,
//! resolves supplier identity by name, and persists only offers not
//! already represented by a fresh duplicate within the configured TTL.

pub mod acquire;
pub mod profile;
pub mod source;

pub use acquire::{acquire, OfferAcquisitionDeps};
pub use source::OfferCandidate;
