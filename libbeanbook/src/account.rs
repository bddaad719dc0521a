use serde::Serialize;
use std::fmt;

use crate::date::LedgerDate;

/// Source account of the pads written for new accounts, hidden from balance reports.
pub const OPENING_BALANCES: &str = "Equity:Opening-Balances";

/// Top level of an account name, e.g. `Assets` for `Assets:Bank:Jawir`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AccountType {
    Assets,
    Liabilities,
    Equity,
    Income,
    Expenses,
    Custom(String),
}

impl AccountType {
    pub fn of(account: &str) -> Self {
        account.split(':').next().unwrap_or_default().into()
    }

    pub fn as_str(&self) -> &str {
        match self {
            AccountType::Assets => "Assets",
            AccountType::Liabilities => "Liabilities",
            AccountType::Equity => "Equity",
            AccountType::Income => "Income",
            AccountType::Expenses => "Expenses",
            AccountType::Custom(s) => s,
        }
    }
}

impl From<&str> for AccountType {
    fn from(s: &str) -> Self {
        match s {
            "Assets" => AccountType::Assets,
            "Liabilities" => AccountType::Liabilities,
            "Equity" => AccountType::Equity,
            "Income" => AccountType::Income,
            "Expenses" => AccountType::Expenses,
            other => AccountType::Custom(other.to_string()),
        }
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `DATE open ACCOUNT [CURRENCY]`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OpenDirective {
    pub account: String,
    pub date: LedgerDate,
    pub currency: Option<String>,
}
