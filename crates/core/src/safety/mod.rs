//! Accounting safety checks.
//!
//! Each mutation that can reach the ledger (invoice creation, payment
//! creation, deal payment, free-form transaction) has one precondition check
//! here. Checks are deterministic functions of the payload plus the minimal
//! reference data the caller looks up and passes in.

pub mod error;
pub mod service;
pub mod types;

pub use error::SafetyError;
pub use service::{AccountingSafetyService, check_balanced, ensure_not_posted};
pub use types::{
    InvoiceBalance, InvoiceDraft, LifecycleContext, PaymentDraft, PaymentKind, TransactionDraft,
    TransactionLine,
};
