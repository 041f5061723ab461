//! Payment plans and installment allocation.
//!
//! - [`schedule`] turns a [`PlanRequest`] into installments that sum exactly
//!   to the plan total
//! - [`status`] derives an installment's status from its amounts and due date
//! - [`allocation`] spreads an incoming payment over installments oldest first

pub mod allocation;
pub mod error;
pub mod schedule;
pub mod status;
pub mod types;

#[cfg(test)]
mod schedule_props;

pub use allocation::{AllocationOutcome, AllocationSlice, allocate, completes_deal};
pub use error::PaymentPlanError;
pub use schedule::generate_schedule;
pub use status::derive_status;
pub use types::{Cadence, Installment, InstallmentStatus, PaymentPlan, PlanRequest};
