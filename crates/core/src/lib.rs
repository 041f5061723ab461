//! Core accounting logic for Tenura.
//!
//! This crate contains pure business logic with no storage or async
//! dependencies. All domain types, posting rules, and calculations live here.
//!
//! # Modules
//!
//! - `accounts` - Chart-of-accounts classification
//! - `voucher` - BPV/BRV/CPV/CRV/JV assembly and posting rules
//! - `safety` - Lifecycle precondition checks for invoices, payments, and transactions
//! - `ledger` - Running-balance derivation for client/dealer/property ledgers
//! - `payment_plan` - Installment schedules and FIFO payment allocation
//! - `posting` - Journal drafts and reversals
//! - `deal` - Deal records consumed by the above
//! - `import` - Lead import staging

pub mod accounts;
pub mod deal;
pub mod import;
pub mod ledger;
pub mod payment_plan;
pub mod posting;
pub mod safety;
pub mod voucher;
