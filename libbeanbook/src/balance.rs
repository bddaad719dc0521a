use crate::account::{AccountType, OPENING_BALANCES};
use crate::amount::round2;
use crate::date::LedgerDate;
use crate::ledger::Ledger;
use crate::transaction::Transaction;

use serde::Serialize;
use std::collections::BTreeMap;

/// One row of a balance report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Balance {
    pub account: String,
    pub account_type: AccountType,
    pub start_balance: f64,
    pub end_balance: f64,
    pub difference: f64,
    pub current_balance: f64,
}

impl Balance {
    fn zero(account: &str) -> Self {
        Self {
            account: account.to_string(),
            account_type: AccountType::of(account),
            start_balance: 0f64,
            end_balance: 0f64,
            difference: 0f64,
            current_balance: 0f64,
        }
    }

    fn settle(mut self) -> Self {
        self.difference = self.end_balance - self.start_balance;
        self.start_balance = round2(self.start_balance);
        self.end_balance = round2(self.end_balance);
        self.difference = round2(self.difference);
        self.current_balance = round2(self.current_balance);
        self
    }
}

/// Whether a posting of `txn` belongs to the start balance of an account
/// opened at `opened_at`, for a window starting at `start`.
///
/// Asking for a start before the account even existed shows its opening
/// balance: the correction plus anything strictly before the open date.
fn counts_toward_start(txn: &Transaction, opened_at: Option<&LedgerDate>, start: &str) -> bool {
    match opened_at {
        Some(open) if *open > *start => {
            txn.date <= *open && (txn.is_synthetic() || txn.date < *open)
        }
        _ => txn.date < *start,
    }
}

impl Ledger {
    /// Per account balances for the `start..=end` window, sorted by account.
    ///
    /// Covers every opened account and every account seen in a posting,
    /// except `Equity:Opening-Balances`.
    pub fn balances(&self, start: &str, end: &str) -> Vec<Balance> {
        let mut sheet: BTreeMap<&str, Balance> = self
            .accounts()
            .keys()
            .map(|account| (account.as_str(), Balance::zero(account)))
            .collect();

        for txn in self.transactions() {
            for posting in &txn.postings {
                let account = posting.account.as_str();
                let nominal = posting.amount.nominal;
                let balance = sheet
                    .entry(account)
                    .or_insert_with(|| Balance::zero(account));

                if counts_toward_start(txn, self.open_date(account), start) {
                    balance.start_balance += nominal;
                }
                if txn.date <= *end {
                    balance.end_balance += nominal;
                }
                balance.current_balance += nominal;
            }
        }

        sheet
            .into_values()
            .filter(|b| b.account != OPENING_BALANCES)
            .map(Balance::settle)
            .collect()
    }
}
