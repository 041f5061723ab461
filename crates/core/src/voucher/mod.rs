//! Voucher posting rules.
//!
//! Five voucher kinds are supported:
//! - BPV / CPV: bank / cash payment, control account credited automatically
//! - BRV / CRV: bank / cash receipt, control account debited automatically
//! - JV: journal voucher, no control account, balanced user lines
//!
//! Vouchers are assembled by [`VoucherBuilder`], which synthesizes the control
//! line, and checked by [`VoucherValidationEngine`] against the static rule
//! table in [`rules`]. Validation is a pure pass; nothing is written here.

pub mod builder;
pub mod engine;
pub mod error;
pub mod rules;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use builder::VoucherBuilder;
pub use engine::VoucherValidationEngine;
pub use error::VoucherError;
pub use rules::{ControlRule, VoucherRule};
pub use types::{
    EntryType, LineOrigin, Voucher, VoucherLine, VoucherLineInput, VoucherPayload, VoucherType,
};
