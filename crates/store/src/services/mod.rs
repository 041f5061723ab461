//! Orchestration services.
//!
//! Each service prefetches what the pure checks in `tenura-core` need, runs
//! them, and hands every multi-row write to a single repository call.

pub mod installments;
pub mod safety_gate;
pub mod unified_ledger;
pub mod voucher_posting;

pub use installments::{InstallmentService, PaymentReceipt, ReceiptOutcome};
pub use safety_gate::AccountingSafetyGate;
pub use unified_ledger::{DealLedgerSource, UnifiedLedgerService};
pub use voucher_posting::{PostedVoucher, VoucherPostingService};
