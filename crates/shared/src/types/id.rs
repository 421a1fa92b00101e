//! Typed IDs for type-safe entity references.
//!
//! The backend assigns integer keys to every entity. Wrapping them prevents
//! accidentally passing an `AccountId` where a `CurrencyId` is expected.

use serde::{Deserialize, Serialize};

/// Macro to generate typed ID wrappers around backend integer keys.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Creates an ID from a raw backend key.
            #[must_use]
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Returns the raw backend key.
            #[must_use]
            pub const fn into_inner(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().parse()?))
            }
        }
    };
}

typed_id!(AccountId, "Identifier of an account in the chart of accounts.");
typed_id!(CategoryId, "Identifier of an account category.");
typed_id!(CurrencyId, "Identifier of a currency.");
typed_id!(ClassificationId, "Identifier of a classification tag.");
typed_id!(TransactionId, "Identifier of a persisted transaction.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_round_trips_raw_key() {
        let id = AccountId::new(42);
        assert_eq!(id.into_inner(), 42);
        assert_eq!(AccountId::from(42), id);
    }

    #[test]
    fn test_typed_id_display() {
        assert_eq!(CurrencyId::new(7).to_string(), "7");
    }

    #[test]
    fn test_typed_id_from_str() {
        assert_eq!(TransactionId::from_str(" 15 ").unwrap(), TransactionId::new(15));
        assert!(TransactionId::from_str("abc").is_err());
    }

    #[test]
    fn test_typed_id_serializes_as_plain_integer() {
        let json = serde_json::to_string(&ClassificationId::new(3)).unwrap();
        assert_eq!(json, "3");

        let id: ClassificationId = serde_json::from_str("9").unwrap();
        assert_eq!(id, ClassificationId::new(9));
    }
}
