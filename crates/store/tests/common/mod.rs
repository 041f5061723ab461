//! Shared fixtures for store integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tenura_core::accounts::{Account, AccountType};
use tenura_core::deal::{Deal, DealStatus};
use tenura_shared::types::{ClientId, DealId};
use tenura_store::MemoryStore;

/// Chart of accounts seeded into every test store.
pub struct Chart {
    pub cash: Account,
    pub bank: Account,
    pub receivable: Account,
    pub undeposited: Account,
    pub payable: Account,
    pub expense: Account,
    pub income: Account,
    pub header: Account,
}

impl Chart {
    pub fn new() -> Self {
        Self {
            cash: Account::leaf("1110", "Cash in hand", AccountType::Asset),
            bank: Account::leaf("1120", "Bank - Operating", AccountType::Asset),
            receivable: Account::leaf("1130", "Accounts receivable", AccountType::Asset),
            undeposited: Account::leaf("1140", "Undeposited funds", AccountType::Asset),
            payable: Account::leaf("2110", "Accounts payable", AccountType::Liability),
            expense: Account::leaf("5100", "Office rent", AccountType::Expense),
            income: Account::leaf("4100", "Sales revenue", AccountType::Income),
            header: Account::header("5000", "Operating expenses", AccountType::Expense),
        }
    }

    fn all(&self) -> [&Account; 8] {
        [
            &self.cash,
            &self.bank,
            &self.receivable,
            &self.undeposited,
            &self.payable,
            &self.expense,
            &self.income,
            &self.header,
        ]
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn deal(code: &str, status: DealStatus, amount: Decimal) -> Deal {
    Deal {
        id: DealId::new(),
        client_id: ClientId::new(),
        dealer_id: None,
        property_id: None,
        code: code.to_string(),
        status,
        deal_amount: amount,
        deal_date: date(2025, 1, 10),
        deleted: false,
        payments: Vec::new(),
    }
}

/// A store holding the standard chart.
pub async fn seeded_store() -> (Arc<MemoryStore>, Chart) {
    let store = Arc::new(MemoryStore::new());
    let chart = Chart::new();
    for account in chart.all() {
        store.insert_account(account.clone()).await;
    }
    (store, chart)
}
