//! Ledger derivation for client, dealer, and property statements.
//!
//! Ledgers are never stored as balances. Every request collects the rows of
//! one source, sorts them by date, applies the caller's filters, and folds a
//! running balance. Sources are tried in priority order by the store layer;
//! this module only turns a row set into a statement.

pub mod derivation;
pub mod synthetic;
pub mod types;

#[cfg(test)]
mod derivation_props;

pub use derivation::LedgerDerivation;
pub use synthetic::synthetic_rows;
pub use types::{
    EntityRef, LedgerFilters, LedgerLine, LedgerResponse, LedgerRow, LedgerSourceKind,
    LedgerSummary, SourceType,
};
