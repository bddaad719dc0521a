//! Ledger text for new accounts and transactions, ready to be appended.

use crate::account::{AccountType, OPENING_BALANCES};
use crate::amount::is_negligible;
use crate::date::LedgerDate;

use std::collections::BTreeSet;

/// A new account, optionally with an opening balance.
#[derive(Clone, Debug, PartialEq)]
pub struct AccountEntry {
    pub date: LedgerDate,
    pub account_type: AccountType,
    pub name: String,
    pub currency: String,
    pub opening_balance: f64,
}

impl AccountEntry {
    pub fn account(&self) -> String {
        format!("{}:{}", self.account_type, self.name)
    }

    /// `open`, followed by a `pad` and `balance` pair when the opening
    /// balance is not zero.
    pub fn render(&self) -> String {
        let account = self.account();
        let mut content = format!("{} open {} {}", self.date, account, self.currency);
        if !is_negligible(self.opening_balance) {
            content += &format!("\n{} pad {} {}", self.date, account, OPENING_BALANCES);
            content += &format!(
                "\n{} balance {} {} {}",
                self.date, account, self.opening_balance, self.currency
            );
        }
        content
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransactionKind {
    Expense,
    Income,
    Transfer,
}

/// A new two-legged transaction.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionEntry {
    pub date: LedgerDate,
    pub kind: TransactionKind,
    pub description: String,
    pub tags: Vec<String>,
    pub source: String,
    pub target: String,
    pub amount: f64,
    pub currency: String,
}

impl TransactionEntry {
    /// Renders the transaction, preceded by `open` directives for any of
    /// its accounts missing from `known_accounts`.
    pub fn render(&self, known_accounts: &[String]) -> String {
        let mut content = String::new();

        let mut opened = BTreeSet::new();
        for account in [&self.source, &self.target] {
            if !account.is_empty()
                && !known_accounts.contains(account)
                && opened.insert(account.as_str())
            {
                content += &format!("{} open {} {}\n", self.date, account, self.currency);
            }
        }

        content += &format!("{} * \"{}\"", self.date, escape(&self.description));
        for tag in self.tags.iter().filter(|t| !t.is_empty()) {
            if tag.starts_with('#') {
                content += &format!(" {}", tag);
            } else {
                content += &format!(" #{}", tag);
            }
        }

        // Income flows from the target into the source, the rest the other way.
        let (debit, credit) = match self.kind {
            TransactionKind::Income => (&self.source, &self.target),
            TransactionKind::Expense | TransactionKind::Transfer => (&self.target, &self.source),
        };
        content += &format!("\n  {} {} {}", debit, self.amount, self.currency);
        content += &format!("\n  {} {} {}", credit, -self.amount, self.currency);
        content
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
