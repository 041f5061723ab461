//! Reversing entries for posted journals.

use chrono::NaiveDate;

use super::journal::{JournalDraft, JournalLine};

/// Builds the draft that cancels a posted journal.
///
/// For each original line:
/// - Debits become credits and credits become debits
/// - Account and entity are preserved
/// - Memo is prefixed with "Reversal: "
#[must_use]
pub fn reverse(original: &JournalDraft, date: NaiveDate, reason: &str) -> JournalDraft {
    let lines = original
        .lines
        .iter()
        .map(|line| JournalLine {
            account_id: line.account_id,
            debit: line.credit,
            credit: line.debit,
            memo: Some(format!(
                "Reversal: {}",
                line.memo.as_deref().unwrap_or(&original.narration)
            )),
            entity: line.entity,
        })
        .collect();

    JournalDraft {
        date,
        reference: original.reference.clone(),
        narration: format!("Reversal of {}. Reason: {reason}", original.narration),
        source_type: original.source_type,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{EntityRef, SourceType};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use tenura_shared::types::{AccountId, ClientId};

    fn original() -> JournalDraft {
        JournalDraft::payment_pair(
            NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
            AccountId::new(),
            AccountId::new(),
            dec!(250),
            EntityRef::Client(ClientId::new()),
            "Installment 1".to_string(),
            None,
        )
    }

    #[test]
    fn test_reverse_swaps_sides() {
        let original = original();
        let reversal = reverse(&original, NaiveDate::from_ymd_opt(2025, 9, 5).unwrap(), "Bounced cheque");

        assert_eq!(reversal.lines.len(), 2);
        assert_eq!(reversal.lines[0].debit, Decimal::ZERO);
        assert_eq!(reversal.lines[0].credit, dec!(250));
        assert_eq!(reversal.lines[1].debit, dec!(250));
        assert_eq!(reversal.lines[1].account_id, original.lines[1].account_id);
        assert_eq!(reversal.source_type, SourceType::Payment);
        assert!(reversal.is_balanced());
        assert!(reversal.lines[0].memo.as_deref().unwrap().starts_with("Reversal: "));
        assert_eq!(
            reversal.narration,
            "Reversal of Installment 1. Reason: Bounced cheque"
        );
    }

    #[test]
    fn test_reversal_nets_entity_ledger_to_zero() {
        let original = original();
        let reversal = reverse(&original, original.date, "Duplicate entry");

        let net: Decimal = original
            .ledger_rows()
            .iter()
            .chain(reversal.ledger_rows().iter())
            .map(|r| r.debit - r.credit)
            .sum();
        assert_eq!(net, Decimal::ZERO);
    }
}
