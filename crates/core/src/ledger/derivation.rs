//! Running-balance derivation.

use rust_decimal::Decimal;
use tenura_shared::types::round2;

use super::types::{
    EntityRef, LedgerFilters, LedgerLine, LedgerResponse, LedgerRow, LedgerSourceKind,
    LedgerSummary, SourceType,
};

/// Default label of the opening line.
pub const OPENING_BALANCE_LABEL: &str = "Opening Balance";

/// Turns the rows of one source into a statement.
#[derive(Debug, Clone)]
pub struct LedgerDerivation {
    opening_label: String,
}

impl Default for LedgerDerivation {
    fn default() -> Self {
        Self::new(OPENING_BALANCE_LABEL)
    }
}

impl LedgerDerivation {
    /// Creates a derivation with a custom opening-line label.
    #[must_use]
    pub fn new(opening_label: impl Into<String>) -> Self {
        Self {
            opening_label: opening_label.into(),
        }
    }

    /// Builds the statement for `entity` from the winning source's rows.
    ///
    /// Steps:
    /// 1. Stable sort by date (ties keep source order)
    /// 2. Apply `filters`
    /// 3. Fold `balance = round2(balance + debit - credit)`
    /// 4. Prepend a zero opening line when there is at least one row
    #[must_use]
    pub fn derive(
        &self,
        entity: EntityRef,
        source: Option<LedgerSourceKind>,
        mut rows: Vec<LedgerRow>,
        filters: &LedgerFilters,
    ) -> LedgerResponse {
        rows.sort_by_key(|r| r.date);

        let mut summary = LedgerSummary {
            has_legacy_entries: source == Some(LedgerSourceKind::Legacy),
            ..LedgerSummary::default()
        };
        let mut entries = Vec::with_capacity(rows.len() + 1);
        let mut balance = Decimal::ZERO;

        for row in rows.into_iter().filter(|r| filters.matches(r)) {
            if entries.is_empty() {
                entries.push(LedgerLine {
                    date: row.date,
                    reference: None,
                    description: self.opening_label.clone(),
                    debit: Decimal::ZERO,
                    credit: Decimal::ZERO,
                    running_balance: Decimal::ZERO,
                    source_type: None,
                });
            }

            balance = round2(balance + row.debit - row.credit);
            summary.total_debit += row.debit;
            summary.total_credit += row.credit;
            match row.source_type {
                SourceType::Deal => summary.deal_value += row.debit,
                SourceType::Payment => summary.received += row.credit,
                _ => {}
            }

            entries.push(LedgerLine {
                date: row.date,
                reference: row.reference,
                description: row.narration,
                debit: row.debit,
                credit: row.credit,
                running_balance: balance,
                source_type: Some(row.source_type),
            });
        }

        summary.closing_balance = balance;
        summary.outstanding = balance;

        LedgerResponse {
            entity,
            entries,
            summary,
            source,
            unavailable_sources: Vec::new(),
        }
    }
}
