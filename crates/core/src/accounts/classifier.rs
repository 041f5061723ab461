//! Account classification by code prefix with a name fallback.
//!
//! Historical charts of accounts are inconsistent about coding discipline, so
//! classification has two paths:
//! 1. The longest configured code prefix that matches decides the category.
//! 2. Only when no prefix matches, a case-insensitive keyword in the account
//!    name decides ("receivable", "payable", "bank", "cash").
//!
//! A prefix match always wins over a name match. The name path only applies
//! to accounts of a compatible class, so an expense called "Cash discounts"
//! stays a general account.

use tenura_shared::config::AccountingConfig;

use super::types::{Account, AccountCategory, AccountType, Classification};

/// Code-prefix ranges per category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierRules {
    /// Prefixes of cash accounts.
    pub cash: Vec<String>,
    /// Prefixes of bank accounts.
    pub bank: Vec<String>,
    /// Prefixes of accounts receivable.
    pub receivable: Vec<String>,
    /// Prefixes of accounts payable.
    pub payable: Vec<String>,
}

impl ClassifierRules {
    /// Builds rules from the accounting configuration.
    #[must_use]
    pub fn from_config(config: &AccountingConfig) -> Self {
        Self {
            cash: config.cash_prefixes.clone(),
            bank: config.bank_prefixes.clone(),
            receivable: config.receivable_prefixes.clone(),
            payable: config.payable_prefixes.clone(),
        }
    }
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self::from_config(&AccountingConfig::default())
    }
}

/// Name keywords in precedence order, with the class they require.
const NAME_KEYWORDS: [(&str, AccountCategory, AccountType); 4] = [
    ("receivable", AccountCategory::Receivable, AccountType::Asset),
    ("payable", AccountCategory::Payable, AccountType::Liability),
    ("bank", AccountCategory::Bank, AccountType::Asset),
    ("cash", AccountCategory::Cash, AccountType::Asset),
];

/// Maps accounts to a semantic category and broad class.
///
/// Pure and deterministic: the same account always classifies the same way.
#[derive(Debug, Clone, Default)]
pub struct AccountClassifier {
    rules: ClassifierRules,
}

impl AccountClassifier {
    /// Creates a classifier with the given prefix rules.
    #[must_use]
    pub fn new(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    /// Classifies an account.
    #[must_use]
    pub fn classify(&self, account: &Account) -> Classification {
        let category = self
            .category_by_code(&account.code)
            .or_else(|| Self::category_by_name(&account.name, account.account_type))
            .unwrap_or(AccountCategory::Other);

        Classification {
            category,
            class: account.account_type,
        }
    }

    /// Returns the category of the longest matching code prefix.
    ///
    /// Equal-length matches resolve in the order cash, bank, receivable,
    /// payable.
    fn category_by_code(&self, code: &str) -> Option<AccountCategory> {
        let code = code.trim();
        let ranges = [
            (AccountCategory::Cash, &self.rules.cash),
            (AccountCategory::Bank, &self.rules.bank),
            (AccountCategory::Receivable, &self.rules.receivable),
            (AccountCategory::Payable, &self.rules.payable),
        ];

        let mut best: Option<(usize, AccountCategory)> = None;
        for (category, prefixes) in ranges {
            for prefix in prefixes {
                if prefix.is_empty() || !code.starts_with(prefix.as_str()) {
                    continue;
                }
                if best.is_none_or(|(len, _)| prefix.len() > len) {
                    best = Some((prefix.len(), category));
                }
            }
        }
        best.map(|(_, category)| category)
    }

    fn category_by_name(name: &str, class: AccountType) -> Option<AccountCategory> {
        let name = name.to_lowercase();
        NAME_KEYWORDS
            .iter()
            .find(|(keyword, _, required)| *required == class && name.contains(keyword))
            .map(|(_, category, _)| *category)
    }
}
