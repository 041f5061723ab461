//! Chart-of-accounts types and account classification.
//!
//! Posting rules never look at raw account codes directly. They ask the
//! [`AccountClassifier`] which semantic category (cash, bank, receivable,
//! payable) and which broad class an account belongs to.

pub mod classifier;
pub mod types;

#[cfg(test)]
mod classifier_props;

pub use classifier::{AccountClassifier, ClassifierRules};
pub use types::{Account, AccountCategory, AccountType, Classification};
