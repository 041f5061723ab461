//! JSON snapshots for seeding the in-memory backend.

use serde::{Deserialize, Serialize};
use tenura_core::accounts::Account;
use tenura_core::deal::Deal;
use tenura_core::ledger::{LedgerRow, LedgerSourceKind};
use tenura_core::payment_plan::PaymentPlan;
use tenura_core::safety::InvoiceBalance;

use crate::error::StoreError;

/// An invoice and how many ledger rows it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceRecord {
    /// Invoice balance.
    #[serde(flatten)]
    pub balance: InvoiceBalance,
    /// Ledger rows written for the invoice.
    #[serde(default)]
    pub ledger_rows: usize,
}

/// A point-in-time copy of everything the backend holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSnapshot {
    /// Chart of accounts.
    pub accounts: Vec<Account>,
    /// Deals with their payments.
    pub deals: Vec<Deal>,
    /// Invoices.
    pub invoices: Vec<InvoiceRecord>,
    /// Payment plans.
    pub plans: Vec<PaymentPlan>,
    /// Ledger-engine rows.
    pub ledger_rows: Vec<LedgerRow>,
    /// Rows of the legacy projection.
    pub legacy_rows: Vec<LedgerRow>,
    /// Sources absent from the deployment being mirrored.
    pub unavailable_sources: Vec<LedgerSourceKind>,
}

impl StoreSnapshot {
    /// Parses a snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Backend(format!("invalid snapshot: {e}")))
    }
}
