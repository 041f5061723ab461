//! Deal records as seen by the accounting layer.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tenura_shared::types::{ClientId, DealId, DealerId, PaymentId, PropertyId};

/// Deal lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealStatus {
    /// Being drafted.
    Draft,
    /// Awaiting approval.
    Pending,
    /// Approved, no payments yet required.
    Approved,
    /// In progress, collecting payments.
    Active,
    /// Fully paid and closed.
    ClosedWon,
    /// Lost before completion.
    ClosedLost,
    /// Cancelled.
    Cancelled,
}

impl DealStatus {
    /// Returns true if invoices and payments may be raised against the deal.
    #[must_use]
    pub const fn accepts_billing(self) -> bool {
        matches!(self, Self::Approved | Self::Active)
    }

    /// Returns true if the deal is closed in any way.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::ClosedWon | Self::ClosedLost | Self::Cancelled)
    }

    /// Returns true if the deal still counts towards a client's receivable.
    #[must_use]
    pub const fn is_receivable(self) -> bool {
        !matches!(self, Self::ClosedLost | Self::Cancelled)
    }
}

/// Mode a payment was received in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Cash over the counter.
    Cash,
    /// Bank transfer.
    BankTransfer,
    /// Cheque.
    Cheque,
    /// Online gateway.
    Online,
    /// Card.
    Card,
}

impl PaymentMode {
    /// Returns true if the payment lands in a cash account rather than a bank account.
    #[must_use]
    pub const fn is_cash(self) -> bool {
        matches!(self, Self::Cash)
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Cash => "cash",
            Self::BankTransfer => "bank_transfer",
            Self::Cheque => "cheque",
            Self::Online => "online",
            Self::Card => "card",
        };
        f.write_str(s)
    }
}

/// A payment recorded against a deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealPayment {
    /// Payment ID.
    pub id: PaymentId,
    /// Amount received.
    pub amount: Decimal,
    /// Date received.
    pub date: NaiveDate,
    /// Payment mode.
    pub mode: PaymentMode,
    /// External reference (cheque number, transfer ID).
    #[serde(default)]
    pub reference: Option<String>,
    /// Soft-delete flag.
    #[serde(default)]
    pub deleted: bool,
}

/// A sale or rental deal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    /// Deal ID.
    pub id: DealId,
    /// Buyer or tenant.
    pub client_id: ClientId,
    /// Dealer who brokered the deal.
    #[serde(default)]
    pub dealer_id: Option<DealerId>,
    /// Property sold or let.
    #[serde(default)]
    pub property_id: Option<PropertyId>,
    /// Human-readable deal code.
    pub code: String,
    /// Lifecycle status.
    pub status: DealStatus,
    /// Agreed deal value.
    pub deal_amount: Decimal,
    /// Date the deal was struck.
    pub deal_date: NaiveDate,
    /// Soft-delete flag.
    #[serde(default)]
    pub deleted: bool,
    /// Payments received.
    #[serde(default)]
    pub payments: Vec<DealPayment>,
}

impl Deal {
    /// Sum of non-deleted payments.
    #[must_use]
    pub fn total_paid(&self) -> Decimal {
        self.live_payments().map(|p| p.amount).sum()
    }

    /// Non-deleted payments in recorded order.
    pub fn live_payments(&self) -> impl Iterator<Item = &DealPayment> {
        self.payments.iter().filter(|p| !p.deleted)
    }

    /// Returns true if the deal contributes rows to a derived ledger.
    #[must_use]
    pub fn qualifies_for_ledger(&self) -> bool {
        !self.deleted && self.status.is_receivable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn deal(status: DealStatus) -> Deal {
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        Deal {
            id: DealId::new(),
            client_id: ClientId::new(),
            dealer_id: None,
            property_id: None,
            code: "DL-0001".to_string(),
            status,
            deal_amount: dec!(1000000),
            deal_date: date,
            deleted: false,
            payments: vec![
                DealPayment {
                    id: PaymentId::new(),
                    amount: dec!(250000),
                    date,
                    mode: PaymentMode::Cheque,
                    reference: Some("CHQ-1".to_string()),
                    deleted: false,
                },
                DealPayment {
                    id: PaymentId::new(),
                    amount: dec!(100000),
                    date,
                    mode: PaymentMode::Cash,
                    reference: None,
                    deleted: true,
                },
            ],
        }
    }

    #[test]
    fn test_total_paid_skips_deleted() {
        assert_eq!(deal(DealStatus::Active).total_paid(), dec!(250000));
    }

    #[test]
    fn test_billing_statuses() {
        assert!(DealStatus::Approved.accepts_billing());
        assert!(DealStatus::Active.accepts_billing());
        assert!(!DealStatus::Pending.accepts_billing());
        assert!(!DealStatus::ClosedWon.accepts_billing());
    }

    #[test]
    fn test_ledger_qualification() {
        assert!(deal(DealStatus::ClosedWon).qualifies_for_ledger());
        assert!(!deal(DealStatus::Cancelled).qualifies_for_ledger());
        assert!(!deal(DealStatus::ClosedLost).qualifies_for_ledger());

        let mut deleted = deal(DealStatus::Active);
        deleted.deleted = true;
        assert!(!deleted.qualifies_for_ledger());
    }

    #[test]
    fn test_status_serde() {
        let json = serde_json::to_string(&DealStatus::ClosedWon).unwrap();
        assert_eq!(json, "\"closed_won\"");
    }
}
