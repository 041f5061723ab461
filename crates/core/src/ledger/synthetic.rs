//! Ledger rows derived directly from deals.
//!
//! Used when an entity has no posted ledger rows: each qualifying deal
//! contributes one debit for its full value at the deal date, and each live
//! payment on it contributes one credit at the payment date.

use rust_decimal::Decimal;
use tenura_shared::types::LedgerRowId;

use super::types::{EntityRef, LedgerRow, SourceType};
use crate::deal::Deal;

/// Derives rows for `entity` from its deals, in deal order.
///
/// Deleted, cancelled and lost deals are skipped.
#[must_use]
pub fn synthetic_rows(entity: EntityRef, deals: &[Deal]) -> Vec<LedgerRow> {
    let mut rows = Vec::new();

    for deal in deals.iter().filter(|d| d.qualifies_for_ledger()) {
        rows.push(LedgerRow {
            // Row IDs mirror the originating record so repeated derivations agree.
            id: LedgerRowId::from_uuid(deal.id.into_inner()),
            entity,
            account_id: None,
            date: deal.deal_date,
            debit: deal.deal_amount,
            credit: Decimal::ZERO,
            source_type: SourceType::Deal,
            narration: format!("Deal {}", deal.code),
            reference: Some(deal.code.clone()),
        });

        for payment in deal.live_payments() {
            rows.push(LedgerRow {
                id: LedgerRowId::from_uuid(payment.id.into_inner()),
                entity,
                account_id: None,
                date: payment.date,
                debit: Decimal::ZERO,
                credit: payment.amount,
                source_type: SourceType::Payment,
                narration: format!("Payment received ({}) for {}", payment.mode, deal.code),
                reference: payment.reference.clone(),
            });
        }
    }

    rows
}
