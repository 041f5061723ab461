//! Typed IDs for type-safe entity references.
//!
//! Using typed IDs prevents accidentally passing a `DealId` where an `InvoiceId` is expected.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Macro to generate typed ID wrappers.
macro_rules! typed_id {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Uuid);

        impl $name {
            /// Creates a new random ID using UUID v7 (time-ordered).
            #[must_use]
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            /// Creates an ID from an existing UUID.
            #[must_use]
            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            /// Returns the inner UUID.
            #[must_use]
            pub const fn into_inner(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

typed_id!(
    AccountId,
    "Unique identifier for a chart of accounts entry."
);
typed_id!(VoucherId, "Unique identifier for a voucher.");
typed_id!(JournalEntryId, "Unique identifier for a posted journal entry.");
typed_id!(LedgerRowId, "Unique identifier for a ledger row.");
typed_id!(ClientId, "Unique identifier for a client.");
typed_id!(DealerId, "Unique identifier for a dealer.");
typed_id!(PropertyId, "Unique identifier for a property.");
typed_id!(TenantId, "Unique identifier for a tenant.");
typed_id!(DealId, "Unique identifier for a deal.");
typed_id!(InvoiceId, "Unique identifier for an invoice.");
typed_id!(PaymentId, "Unique identifier for a payment.");
typed_id!(PaymentPlanId, "Unique identifier for a payment plan.");
typed_id!(InstallmentId, "Unique identifier for a plan installment.");
typed_id!(ImportBatchId, "Unique identifier for a lead import batch.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_typed_id_round_trips_through_display() {
        let id = DealId::new();
        assert_eq!(DealId::from_str(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn test_typed_id_from_uuid() {
        let uuid = Uuid::new_v4();
        assert_eq!(AccountId::from_uuid(uuid).into_inner(), uuid);
    }

    #[test]
    fn test_typed_id_from_str_error() {
        assert!(InvoiceId::from_str("not-a-uuid").is_err());
    }
}
