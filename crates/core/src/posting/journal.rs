//! Journal drafts.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tenura_shared::types::{AccountId, LedgerRowId, within_tolerance};

use crate::deal::Deal;
use crate::ledger::{EntityRef, LedgerRow, SourceType};
use crate::voucher::Voucher;

/// One journal line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalLine {
    /// Account posted to.
    pub account_id: AccountId,
    /// Debit amount.
    pub debit: Decimal,
    /// Credit amount.
    pub credit: Decimal,
    /// Line memo.
    pub memo: Option<String>,
    /// Entity whose ledger shows this line, if any.
    pub entity: Option<EntityRef>,
}

/// A balanced set of lines ready to be written in one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalDraft {
    /// Posting date.
    pub date: NaiveDate,
    /// Reference number.
    pub reference: Option<String>,
    /// Narration.
    pub narration: String,
    /// Originating operation.
    pub source_type: SourceType,
    /// Lines.
    pub lines: Vec<JournalLine>,
}

impl JournalDraft {
    /// Builds a draft from a voucher that passed validation.
    #[must_use]
    pub fn from_voucher(voucher: &Voucher) -> Self {
        let narration = voucher
            .narration
            .clone()
            .unwrap_or_else(|| format!("{} voucher", voucher.voucher_type));
        Self {
            date: voucher.date,
            reference: voucher.reference.clone(),
            narration,
            source_type: SourceType::Voucher,
            lines: voucher
                .lines
                .iter()
                .map(|line| JournalLine {
                    account_id: line.account_id,
                    debit: line.debit,
                    credit: line.credit,
                    memo: line.description.clone(),
                    entity: None,
                })
                .collect(),
        }
    }

    /// Builds the debit cash/bank, credit receivable pair for a received payment.
    ///
    /// The receivable line is tagged with `entity` so it shows on that
    /// entity's ledger.
    #[must_use]
    pub fn payment_pair(
        date: NaiveDate,
        deposit_account: AccountId,
        receivable_account: AccountId,
        amount: Decimal,
        entity: EntityRef,
        narration: String,
        reference: Option<String>,
    ) -> Self {
        Self {
            date,
            reference,
            narration: narration.clone(),
            source_type: SourceType::Payment,
            lines: vec![
                JournalLine {
                    account_id: deposit_account,
                    debit: amount,
                    credit: Decimal::ZERO,
                    memo: Some(narration.clone()),
                    entity: None,
                },
                JournalLine {
                    account_id: receivable_account,
                    debit: Decimal::ZERO,
                    credit: amount,
                    memo: Some(narration),
                    entity: Some(entity),
                },
            ],
        }
    }

    /// Books a deal's full value: debit receivable (tagged to the client),
    /// credit revenue, at the deal date.
    #[must_use]
    pub fn deal_booking(deal: &Deal, receivable_account: AccountId, revenue_account: AccountId) -> Self {
        let narration = format!("Deal {}", deal.code);
        Self {
            date: deal.deal_date,
            reference: Some(deal.code.clone()),
            narration: narration.clone(),
            source_type: SourceType::Deal,
            lines: vec![
                JournalLine {
                    account_id: receivable_account,
                    debit: deal.deal_amount,
                    credit: Decimal::ZERO,
                    memo: Some(narration.clone()),
                    entity: Some(EntityRef::Client(deal.client_id)),
                },
                JournalLine {
                    account_id: revenue_account,
                    debit: Decimal::ZERO,
                    credit: deal.deal_amount,
                    memo: Some(narration),
                    entity: None,
                },
            ],
        }
    }

    /// Everything a deal has produced so far: its booking, then one payment
    /// pair per live payment, deposited to `holding_account`.
    ///
    /// The client ledger rows of the result match what
    /// [`crate::ledger::synthetic_rows`] derives for the same deal.
    #[must_use]
    pub fn deal_history(
        deal: &Deal,
        receivable_account: AccountId,
        revenue_account: AccountId,
        holding_account: AccountId,
    ) -> Vec<Self> {
        let entity = EntityRef::Client(deal.client_id);
        std::iter::once(Self::deal_booking(deal, receivable_account, revenue_account))
            .chain(deal.live_payments().map(|payment| {
                Self::payment_pair(
                    payment.date,
                    holding_account,
                    receivable_account,
                    payment.amount,
                    entity,
                    format!("Payment received ({}) for {}", payment.mode, deal.code),
                    payment.reference.clone(),
                )
            }))
            .collect()
    }

    /// Returns `(total_debit, total_credit)`.
    #[must_use]
    pub fn totals(&self) -> (Decimal, Decimal) {
        let debit: Decimal = self.lines.iter().map(|l| l.debit).sum();
        let credit: Decimal = self.lines.iter().map(|l| l.credit).sum();
        (debit, credit)
    }

    /// Returns true if debits equal credits within the tolerance.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        let (debit, credit) = self.totals();
        within_tolerance(debit, credit)
    }

    /// Ledger rows for every entity-tagged line.
    #[must_use]
    pub fn ledger_rows(&self) -> Vec<LedgerRow> {
        self.lines
            .iter()
            .filter_map(|line| {
                let entity = line.entity?;
                Some(LedgerRow {
                    id: LedgerRowId::new(),
                    entity,
                    account_id: Some(line.account_id),
                    date: self.date,
                    debit: line.debit,
                    credit: line.credit,
                    source_type: self.source_type,
                    narration: line.memo.clone().unwrap_or_else(|| self.narration.clone()),
                    reference: self.reference.clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deal::{DealPayment, DealStatus, PaymentMode};
    use crate::ledger::synthetic_rows;
    use crate::voucher::{VoucherBuilder, VoucherLineInput, VoucherType};
    use rust_decimal_macros::dec;
    use tenura_shared::types::{ClientId, DealId, PaymentId};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
    }

    #[test]
    fn test_from_voucher_keeps_control_line() {
        let bank = AccountId::new();
        let rent = AccountId::new();
        let voucher = VoucherBuilder::new(VoucherType::Bpv, date())
            .with_control_account(bank)
            .with_line(VoucherLineInput::debit(rent, dec!(5000)))
            .with_reference("BPV-0001")
            .build()
            .unwrap();

        let draft = JournalDraft::from_voucher(&voucher);
        assert_eq!(draft.lines.len(), 2);
        assert_eq!(draft.narration, "BPV voucher");
        assert_eq!(draft.reference.as_deref(), Some("BPV-0001"));
        assert_eq!(draft.source_type, SourceType::Voucher);
        assert!(draft.is_balanced());
        assert!(draft.ledger_rows().is_empty());
    }

    #[test]
    fn test_payment_pair() {
        let client = EntityRef::Client(ClientId::new());
        let draft = JournalDraft::payment_pair(
            date(),
            AccountId::new(),
            AccountId::new(),
            dec!(700),
            client,
            "Installment 2".to_string(),
            Some("TRX-55".to_string()),
        );

        assert_eq!(draft.totals(), (dec!(700), dec!(700)));
        let rows = draft.ledger_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].entity, client);
        assert_eq!(rows[0].credit, dec!(700));
        assert_eq!(rows[0].source_type, SourceType::Payment);
        assert_eq!(rows[0].reference.as_deref(), Some("TRX-55"));
    }

    #[test]
    fn test_deal_history_matches_synthetic_rows() {
        let mut deal = Deal {
            id: DealId::new(),
            client_id: ClientId::new(),
            dealer_id: None,
            property_id: None,
            code: "D-77".to_string(),
            status: DealStatus::Active,
            deal_amount: dec!(1300),
            deal_date: date(),
            deleted: false,
            payments: Vec::new(),
        };
        for (amount, deleted) in [(dec!(200), false), (dec!(50), true)] {
            deal.payments.push(DealPayment {
                id: PaymentId::new(),
                amount,
                date: date(),
                mode: PaymentMode::Cash,
                reference: None,
                deleted,
            });
        }

        let drafts = JournalDraft::deal_history(
            &deal,
            AccountId::new(),
            AccountId::new(),
            AccountId::new(),
        );
        assert_eq!(drafts.len(), 2);
        assert!(drafts.iter().all(JournalDraft::is_balanced));
        assert_eq!(drafts[0].source_type, SourceType::Deal);

        let entity = EntityRef::Client(deal.client_id);
        let posted: Vec<_> = drafts
            .iter()
            .flat_map(JournalDraft::ledger_rows)
            .map(|r| (r.entity, r.date, r.debit, r.credit, r.source_type, r.narration))
            .collect();
        let derived: Vec<_> = synthetic_rows(entity, std::slice::from_ref(&deal))
            .into_iter()
            .map(|r| (r.entity, r.date, r.debit, r.credit, r.source_type, r.narration))
            .collect();
        assert_eq!(posted, derived);
    }
}
