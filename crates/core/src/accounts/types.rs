//! Account domain types.

use serde::{Deserialize, Serialize};
use tenura_shared::types::AccountId;

/// Broad account class from the chart of accounts.
///
/// Debit-normal: Asset, Expense. Credit-normal: Liability, Equity, Income.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    /// Asset account.
    Asset,
    /// Liability account.
    Liability,
    /// Income (revenue) account.
    #[serde(alias = "revenue")]
    Income,
    /// Expense account.
    Expense,
    /// Equity account.
    Equity,
}

impl std::fmt::Display for AccountType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Asset => write!(f, "asset"),
            Self::Liability => write!(f, "liability"),
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Equity => write!(f, "equity"),
        }
    }
}

impl std::str::FromStr for AccountType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asset" | "assets" => Ok(Self::Asset),
            "liability" | "liabilities" => Ok(Self::Liability),
            "income" | "revenue" => Ok(Self::Income),
            "expense" | "expenses" => Ok(Self::Expense),
            "equity" => Ok(Self::Equity),
            _ => Err(format!("Unknown account type: {s}")),
        }
    }
}

/// Semantic category used by posting rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountCategory {
    /// Cash in hand.
    Cash,
    /// Bank account.
    Bank,
    /// Accounts receivable control account.
    Receivable,
    /// Accounts payable control account.
    Payable,
    /// Any other account.
    Other,
}

impl AccountCategory {
    /// Returns true for cash and bank accounts.
    ///
    /// These are the control accounts of payment/receipt vouchers and are
    /// never accepted as user-supplied voucher lines.
    #[must_use]
    pub fn is_money(self) -> bool {
        matches!(self, Self::Cash | Self::Bank)
    }

    /// Returns true for cash, bank, receivable and payable accounts.
    #[must_use]
    pub fn is_control(self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl std::fmt::Display for AccountCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cash => write!(f, "cash"),
            Self::Bank => write!(f, "bank"),
            Self::Receivable => write!(f, "accounts receivable"),
            Self::Payable => write!(f, "accounts payable"),
            Self::Other => write!(f, "general"),
        }
    }
}

/// A chart of accounts entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// The account ID.
    pub id: AccountId,
    /// Hierarchical account code (e.g. `1120-01`).
    pub code: String,
    /// Display name.
    pub name: String,
    /// Broad account class.
    pub account_type: AccountType,
    /// Depth in the chart of accounts (1 = top level).
    #[serde(default)]
    pub level: u8,
    /// Whether the account is a leaf that accepts ledger lines.
    pub is_postable: bool,
}

impl Account {
    /// Creates a postable leaf account.
    #[must_use]
    pub fn leaf(code: &str, name: &str, account_type: AccountType) -> Self {
        Self {
            id: AccountId::new(),
            code: code.to_string(),
            name: name.to_string(),
            account_type,
            level: 4,
            is_postable: true,
        }
    }

    /// Creates a non-postable header account.
    #[must_use]
    pub fn header(code: &str, name: &str, account_type: AccountType) -> Self {
        Self {
            level: 1,
            is_postable: false,
            ..Self::leaf(code, name, account_type)
        }
    }
}

/// Result of classifying an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    /// Semantic category (cash, bank, receivable, payable, other).
    pub category: AccountCategory,
    /// Broad class.
    pub class: AccountType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_account_type_from_str() {
        assert_eq!(AccountType::from_str("Asset").unwrap(), AccountType::Asset);
        assert_eq!(AccountType::from_str("REVENUE").unwrap(), AccountType::Income);
        assert_eq!(AccountType::from_str("income").unwrap(), AccountType::Income);
        assert_eq!(
            AccountType::from_str(" liability ").unwrap(),
            AccountType::Liability
        );
        assert!(AccountType::from_str("contra").is_err());
    }

    #[test]
    fn test_account_type_serde_alias() {
        let parsed: AccountType = serde_json::from_str("\"revenue\"").unwrap();
        assert_eq!(parsed, AccountType::Income);
    }

    #[test]
    fn test_category_flags() {
        assert!(AccountCategory::Cash.is_money());
        assert!(AccountCategory::Bank.is_money());
        assert!(!AccountCategory::Receivable.is_money());
        assert!(AccountCategory::Payable.is_control());
        assert!(!AccountCategory::Other.is_control());
    }

    #[test]
    fn test_header_is_not_postable() {
        let header = Account::header("1000", "Assets", AccountType::Asset);
        assert!(!header.is_postable);
        assert_eq!(header.level, 1);
    }
}
