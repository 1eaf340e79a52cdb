//! Opaque, stable identifiers for every entity and run record.
//!
//! Newtype wrappers around [`Uuid`] keep a product ID from being passed
//! where a supplier ID is expected, the same role `BusId`/`GenId`/`LoadId`
//! play in a power-network graph.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! opaque_id {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            #[inline]
            pub fn new() -> Self {
                $name(Uuid::new_v4())
            }

            #[inline]
            pub fn from_uuid(value: Uuid) -> Self {
                $name(value)
            }

            #[inline]
            pub fn value(&self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok($name(Uuid::parse_str(s)?))
            }
        }
    };
}

opaque_id!(ProductId);
opaque_id!(LocationId);
opaque_id!(SupplierId);
opaque_id!(OfferId);
opaque_id!(RunId);
opaque_id!(JobId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_round_trip_through_display_and_parse() {
        let id = ProductId::new();
        let parsed: ProductId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn distinct_id_types_do_not_compare() {
        let product = ProductId::new();
        let location = LocationId::new();
        assert_ne!(product.value(), Uuid::nil());
        assert_ne!(location.value(), Uuid::nil());
    }
}
