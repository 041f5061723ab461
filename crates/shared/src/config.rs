//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Accounting rules configuration.
    #[serde(default)]
    pub accounting: AccountingConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Accounting rules configuration.
///
/// The prefix lists drive account classification: an account whose code
/// starts with one of these prefixes is categorized accordingly.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountingConfig {
    /// Code prefixes of cash accounts.
    #[serde(default = "default_cash_prefixes")]
    pub cash_prefixes: Vec<String>,
    /// Code prefixes of bank accounts.
    #[serde(default = "default_bank_prefixes")]
    pub bank_prefixes: Vec<String>,
    /// Code prefixes of accounts receivable.
    #[serde(default = "default_receivable_prefixes")]
    pub receivable_prefixes: Vec<String>,
    /// Code prefixes of accounts payable.
    #[serde(default = "default_payable_prefixes")]
    pub payable_prefixes: Vec<String>,
    /// Code of the system receivable account credited by installment receipts.
    #[serde(default = "default_receivable_account_code")]
    pub receivable_account_code: String,
    /// Code of the income account credited when a deal is booked.
    #[serde(default = "default_deal_revenue_account_code")]
    pub deal_revenue_account_code: String,
    /// Code of the holding account for payments received before a plan existed.
    #[serde(default = "default_undeposited_funds_account_code")]
    pub undeposited_funds_account_code: String,
    /// Narration of the synthetic first row of a derived ledger.
    #[serde(default = "default_opening_balance_label")]
    pub opening_balance_label: String,
}

fn default_cash_prefixes() -> Vec<String> {
    vec!["1010".to_string(), "1110".to_string()]
}

fn default_bank_prefixes() -> Vec<String> {
    vec!["1020".to_string(), "1120".to_string()]
}

fn default_receivable_prefixes() -> Vec<String> {
    vec!["1030".to_string(), "1130".to_string()]
}

fn default_payable_prefixes() -> Vec<String> {
    vec!["2010".to_string(), "2110".to_string()]
}

fn default_receivable_account_code() -> String {
    "1130".to_string()
}

fn default_deal_revenue_account_code() -> String {
    "4100".to_string()
}

fn default_undeposited_funds_account_code() -> String {
    "1140".to_string()
}

fn default_opening_balance_label() -> String {
    "Opening Balance".to_string()
}

impl Default for AccountingConfig {
    fn default() -> Self {
        Self {
            cash_prefixes: default_cash_prefixes(),
            bank_prefixes: default_bank_prefixes(),
            receivable_prefixes: default_receivable_prefixes(),
            payable_prefixes: default_payable_prefixes(),
            receivable_account_code: default_receivable_account_code(),
            deal_revenue_account_code: default_deal_revenue_account_code(),
            undeposited_funds_account_code: default_undeposited_funds_account_code(),
            opening_balance_label: default_opening_balance_label(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_log_filter() -> String {
    "tenura=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("TENURA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}
