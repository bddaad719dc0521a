use serde::Serialize;

use crate::amount::Amount;
use crate::date::LedgerDate;

/// Label of every transaction synthesized for a balance assertion.
pub const CORRECTION_DESCRIPTION: &str = "Opening Balance Correction";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum TransactionState {
    Settled,   // '*'
    Unsettled, // '!'
    Virtual,   // No symbol, inserted by the resolver
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Posting {
    pub account: String,
    pub amount: Amount,
}

impl Posting {
    pub fn new(account: &str, nominal: f64, currency: &str) -> Self {
        Self {
            account: account.to_string(),
            amount: Amount::new(nominal, currency),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Transaction {
    pub date: LedgerDate,
    pub state: TransactionState,
    pub description: String,
    pub tags: Vec<String>,
    pub postings: Vec<Posting>,
}

impl Transaction {
    /// Moves `nominal` from `source` into `account`, dated `date`.
    pub fn correction(
        date: LedgerDate,
        account: &str,
        source: &str,
        nominal: f64,
        currency: &str,
    ) -> Transaction {
        Transaction {
            date,
            state: TransactionState::Virtual,
            description: CORRECTION_DESCRIPTION.to_string(),
            tags: vec![],
            postings: vec![
                Posting::new(account, nominal, currency),
                Posting::new(source, -nominal, currency),
            ],
        }
    }

    pub fn is_synthetic(&self) -> bool {
        self.state == TransactionState::Virtual
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Sum of all posting amounts. Zero for a balanced transaction.
    pub fn imbalance(&self) -> f64 {
        self.postings.iter().map(|p| p.amount.nominal).sum()
    }

    /// Sum of the positive legs, i.e. how much moved.
    pub fn value(&self) -> f64 {
        self.postings
            .iter()
            .map(|p| p.amount.nominal)
            .filter(|&n| n > 0f64)
            .sum()
    }

    /// Net amount this transaction posts to `account`.
    pub fn posted_to(&self, account: &str) -> f64 {
        self.postings
            .iter()
            .filter(|p| p.account == account)
            .map(|p| p.amount.nominal)
            .sum()
    }
}

/// `DATE pad ACCOUNT SOURCE_ACCOUNT`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PadDirective {
    pub date: LedgerDate,
    pub account: String,
    pub source: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum AssertionStatus {
    /// Not looked at by the resolver yet.
    Pending,
    /// Already held without any correction.
    Balanced,
    /// Held after inserting a correction from its pad.
    Corrected,
    /// Did not hold and no pad was available.
    Unenforced,
}

/// `DATE balance ACCOUNT AMOUNT CURRENCY`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BalanceAssertion {
    pub date: LedgerDate,
    pub account: String,
    pub amount: Amount,
    pub status: AssertionStatus,
}
