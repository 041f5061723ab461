//! Static posting-rule table per voucher kind.
//!
//! | Type | Control | Control side | User side | Allowed classes on user side |
//! |------|---------|--------------|-----------|------------------------------|
//! | BPV  | Bank    | credit       | debit     | Expense, Asset, Liability     |
//! | CPV  | Cash    | credit       | debit     | Expense, Asset, Liability     |
//! | BRV  | Bank    | debit        | credit    | Income, Asset, Liability, Equity |
//! | CRV  | Cash    | debit        | credit    | Income, Asset, Liability, Equity |
//! | JV   | none    | n/a          | both      | any; no cash/bank/AR/AP       |

use crate::accounts::{AccountCategory, AccountType};

use super::types::{EntryType, VoucherType};

/// The control-account part of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlRule {
    /// Category the control account must classify as.
    pub category: AccountCategory,
    /// Side of the synthesized control line.
    pub side: EntryType,
}

impl ControlRule {
    /// Side on which user lines must carry their amounts.
    #[must_use]
    pub const fn user_side(&self) -> EntryType {
        self.side.opposite()
    }
}

/// Posting rule for one voucher kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoucherRule {
    /// Control account requirement, `None` for JV.
    pub control: Option<ControlRule>,
    /// Account classes allowed on user lines.
    pub allowed_classes: &'static [AccountType],
    /// Categories never allowed on any line.
    pub forbidden_categories: &'static [AccountCategory],
}

const PAYMENT_CLASSES: &[AccountType] =
    &[AccountType::Expense, AccountType::Asset, AccountType::Liability];

const RECEIPT_CLASSES: &[AccountType] = &[
    AccountType::Income,
    AccountType::Asset,
    AccountType::Liability,
    AccountType::Equity,
];

const ALL_CLASSES: &[AccountType] = &[
    AccountType::Asset,
    AccountType::Liability,
    AccountType::Expense,
    AccountType::Equity,
    AccountType::Income,
];

const MONEY_CATEGORIES: &[AccountCategory] = &[AccountCategory::Cash, AccountCategory::Bank];

const CONTROL_CATEGORIES: &[AccountCategory] = &[
    AccountCategory::Cash,
    AccountCategory::Bank,
    AccountCategory::Receivable,
    AccountCategory::Payable,
];

const BPV: VoucherRule = VoucherRule {
    control: Some(ControlRule {
        category: AccountCategory::Bank,
        side: EntryType::Credit,
    }),
    allowed_classes: PAYMENT_CLASSES,
    forbidden_categories: MONEY_CATEGORIES,
};

const CPV: VoucherRule = VoucherRule {
    control: Some(ControlRule {
        category: AccountCategory::Cash,
        side: EntryType::Credit,
    }),
    allowed_classes: PAYMENT_CLASSES,
    forbidden_categories: MONEY_CATEGORIES,
};

const BRV: VoucherRule = VoucherRule {
    control: Some(ControlRule {
        category: AccountCategory::Bank,
        side: EntryType::Debit,
    }),
    allowed_classes: RECEIPT_CLASSES,
    forbidden_categories: MONEY_CATEGORIES,
};

const CRV: VoucherRule = VoucherRule {
    control: Some(ControlRule {
        category: AccountCategory::Cash,
        side: EntryType::Debit,
    }),
    allowed_classes: RECEIPT_CLASSES,
    forbidden_categories: MONEY_CATEGORIES,
};

const JV: VoucherRule = VoucherRule {
    control: None,
    allowed_classes: ALL_CLASSES,
    forbidden_categories: CONTROL_CATEGORIES,
};

impl VoucherType {
    /// Returns the posting rule for this voucher kind.
    #[must_use]
    pub const fn rule(self) -> &'static VoucherRule {
        match self {
            Self::Bpv => &BPV,
            Self::Cpv => &CPV,
            Self::Brv => &BRV,
            Self::Crv => &CRV,
            Self::Jv => &JV,
        }
    }
}

impl VoucherRule {
    /// Returns true if user lines may use accounts of this class.
    #[must_use]
    pub fn allows_class(&self, class: AccountType) -> bool {
        self.allowed_classes.contains(&class)
    }

    /// Returns true if no line may use accounts of this category.
    #[must_use]
    pub fn forbids_category(&self, category: AccountCategory) -> bool {
        self.forbidden_categories.contains(&category)
    }
}
