//! Payloads checked by the safety service.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tenura_shared::types::{
    AccountId, DealId, DealerId, InstallmentId, InvoiceId, JournalEntryId, PropertyId, TenantId,
    round2,
};

use crate::deal::PaymentMode;

/// Invoice about to be created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceDraft {
    /// Invoice number.
    pub number: String,
    /// Billed tenant.
    pub tenant_id: Option<TenantId>,
    /// Linked deal, if any.
    #[serde(default)]
    pub deal_id: Option<DealId>,
    /// Linked property, if any.
    #[serde(default)]
    pub property_id: Option<PropertyId>,
    /// Net amount before tax and discount.
    pub amount: Decimal,
    /// Tax added.
    #[serde(default)]
    pub tax: Decimal,
    /// Discount subtracted.
    #[serde(default)]
    pub discount: Decimal,
    /// Debit side (accounts receivable).
    #[serde(default)]
    pub receivable_account: Option<AccountId>,
    /// Credit side (income).
    #[serde(default)]
    pub revenue_account: Option<AccountId>,
    /// Invoice date.
    pub date: NaiveDate,
}

impl InvoiceDraft {
    /// Invoice total: `amount + tax - discount`, rounded to cents.
    #[must_use]
    pub fn total(&self) -> Decimal {
        round2(self.amount + self.tax - self.discount)
    }
}

/// Payment classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Settles an invoice or installment.
    #[default]
    Regular,
    /// Received ahead of billing.
    Advance,
    /// Token money securing a deal.
    Token,
}

impl PaymentKind {
    /// Returns true if the payment may exceed what is currently billed.
    #[must_use]
    pub const fn is_prepayment(self) -> bool {
        matches!(self, Self::Advance | Self::Token)
    }
}

/// Payment about to be recorded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentDraft {
    /// Deal the payment belongs to.
    pub deal_id: Option<DealId>,
    /// Invoice being settled, if any.
    #[serde(default)]
    pub invoice_id: Option<InvoiceId>,
    /// Installment being settled, if any.
    #[serde(default)]
    pub installment_id: Option<InstallmentId>,
    /// Amount received.
    pub amount: Decimal,
    /// Payment mode.
    pub mode: PaymentMode,
    /// Payment kind.
    #[serde(default)]
    pub kind: PaymentKind,
    /// External reference (cheque number, transfer ID).
    #[serde(default)]
    pub reference: Option<String>,
    /// Date received.
    pub date: NaiveDate,
}

impl PaymentDraft {
    /// Trimmed, non-empty reference number.
    #[must_use]
    pub fn normalized_reference(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty())
    }
}

/// Invoice state needed to check a payment against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceBalance {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Invoice number.
    pub number: String,
    /// Invoice total.
    pub total: Decimal,
    /// Amount already paid.
    pub paid: Decimal,
    /// Journal entry generated when the invoice was posted.
    #[serde(default)]
    pub journal_entry: Option<JournalEntryId>,
}

impl InvoiceBalance {
    /// Amount still owed, never negative.
    #[must_use]
    pub fn remaining(&self) -> Decimal {
        (self.total - self.paid).max(Decimal::ZERO)
    }
}

/// Business objects a free-form transaction is attached to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleContext {
    /// Invoice reference.
    pub invoice_id: Option<InvoiceId>,
    /// Tenant reference.
    pub tenant_id: Option<TenantId>,
    /// Dealer reference.
    pub dealer_id: Option<DealerId>,
}

impl LifecycleContext {
    /// Returns true if no business object is referenced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invoice_id.is_none() && self.tenant_id.is_none() && self.dealer_id.is_none()
    }
}

/// One line of a free-form transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionLine {
    /// Account posted to.
    pub account_id: AccountId,
    /// Debit amount.
    #[serde(default)]
    pub debit: Decimal,
    /// Credit amount.
    #[serde(default)]
    pub credit: Decimal,
}

/// A free-form transaction about to be written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    /// Linked business objects.
    #[serde(default)]
    pub context: LifecycleContext,
    /// Lines.
    pub lines: Vec<TransactionLine>,
    /// Narration.
    #[serde(default)]
    pub narration: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn invoice(amount: Decimal, tax: Decimal, discount: Decimal) -> InvoiceDraft {
        InvoiceDraft {
            number: "INV-1".to_string(),
            tenant_id: Some(TenantId::new()),
            deal_id: None,
            property_id: None,
            amount,
            tax,
            discount,
            receivable_account: None,
            revenue_account: None,
            date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        }
    }

    #[test]
    fn test_invoice_total() {
        assert_eq!(invoice(dec!(1000), dec!(170), dec!(50)).total(), dec!(1120));
        assert_eq!(invoice(dec!(99.995), dec!(0), dec!(0)).total(), dec!(100.00));
        assert_eq!(invoice(dec!(100), dec!(0), dec!(100)).total(), dec!(0));
    }

    #[test]
    fn test_invoice_remaining_never_negative() {
        let balance = InvoiceBalance {
            id: InvoiceId::new(),
            number: "INV-2".to_string(),
            total: dec!(500),
            paid: dec!(600),
            journal_entry: None,
        };
        assert_eq!(balance.remaining(), Decimal::ZERO);
    }

    #[test]
    fn test_prepayment_kinds() {
        assert!(!PaymentKind::Regular.is_prepayment());
        assert!(PaymentKind::Advance.is_prepayment());
        assert!(PaymentKind::Token.is_prepayment());
    }

    #[test]
    fn test_lifecycle_context_empty() {
        assert!(LifecycleContext::default().is_empty());
        let ctx = LifecycleContext {
            dealer_id: Some(DealerId::new()),
            ..LifecycleContext::default()
        };
        assert!(!ctx.is_empty());
    }
}
