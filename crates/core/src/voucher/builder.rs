//! Voucher assembly.
//!
//! The control line of a payment/receipt voucher is never taken from the
//! caller. [`VoucherBuilder::build`] appends exactly one synthesized control
//! line on the side given by the rule table, for the total of the user lines
//! on the opposite side.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tenura_shared::types::AccountId;

use super::error::VoucherError;
use super::types::{
    EntryType, LineOrigin, Voucher, VoucherLine, VoucherLineInput, VoucherPayload, VoucherType,
};

/// Builder for [`Voucher`].
#[derive(Debug, Clone)]
pub struct VoucherBuilder {
    voucher_type: VoucherType,
    date: NaiveDate,
    control_account: Option<AccountId>,
    lines: Vec<VoucherLineInput>,
    reference: Option<String>,
    narration: Option<String>,
}

impl VoucherBuilder {
    /// Starts a voucher of the given kind.
    #[must_use]
    pub fn new(voucher_type: VoucherType, date: NaiveDate) -> Self {
        Self {
            voucher_type,
            date,
            control_account: None,
            lines: Vec::new(),
            reference: None,
            narration: None,
        }
    }

    /// Starts a builder from a raw payload, parsing its voucher type.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVoucherType` if the type is not one of the five kinds.
    pub fn from_payload(payload: VoucherPayload) -> Result<Self, VoucherError> {
        let voucher_type = payload.voucher_type.parse::<VoucherType>()?;
        Ok(Self {
            voucher_type,
            date: payload.date,
            control_account: payload.control_account,
            lines: payload.lines,
            reference: payload.reference,
            narration: payload.narration,
        })
    }

    /// Sets the cash or bank control account.
    #[must_use]
    pub fn with_control_account(mut self, account_id: AccountId) -> Self {
        self.control_account = Some(account_id);
        self
    }

    /// Replaces the user lines.
    #[must_use]
    pub fn with_user_lines(mut self, lines: Vec<VoucherLineInput>) -> Self {
        self.lines = lines;
        self
    }

    /// Appends one user line.
    #[must_use]
    pub fn with_line(mut self, line: VoucherLineInput) -> Self {
        self.lines.push(line);
        self
    }

    /// Sets the document reference.
    #[must_use]
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the narration.
    #[must_use]
    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }

    /// Assembles the voucher.
    ///
    /// Line amounts are not checked here; that is the validation engine's job.
    ///
    /// # Errors
    ///
    /// - `MissingControlAccount` for a payment/receipt voucher without one
    /// - `UnexpectedControlAccount` for a journal voucher with one
    pub fn build(self) -> Result<Voucher, VoucherError> {
        let rule = self.voucher_type.rule();

        let mut lines: Vec<VoucherLine> = self
            .lines
            .into_iter()
            .map(|input| VoucherLine {
                account_id: input.account_id,
                debit: input.debit,
                credit: input.credit,
                description: input.description,
                origin: LineOrigin::User,
            })
            .collect();

        match (rule.control, self.control_account) {
            (Some(_), None) => return Err(VoucherError::MissingControlAccount),
            (None, Some(_)) => return Err(VoucherError::UnexpectedControlAccount),
            (Some(control), Some(account_id)) => {
                let user_side = control.user_side();
                let amount: Decimal = lines
                    .iter()
                    .map(|l| l.amount_on(user_side))
                    .filter(|a| *a > Decimal::ZERO)
                    .sum();
                let (debit, credit) = match control.side {
                    EntryType::Debit => (amount, Decimal::ZERO),
                    EntryType::Credit => (Decimal::ZERO, amount),
                };
                lines.push(VoucherLine {
                    account_id,
                    debit,
                    credit,
                    description: self.narration.clone(),
                    origin: LineOrigin::Control,
                });
            }
            (None, None) => {}
        }

        Ok(Voucher {
            voucher_type: self.voucher_type,
            date: self.date,
            control_account: self.control_account,
            lines,
            reference: self.reference,
            narration: self.narration,
        })
    }
}
