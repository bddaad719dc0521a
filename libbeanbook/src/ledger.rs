use crate::{
    account::OpenDirective,
    date::LedgerDate,
    error::{Diagnostic, LineError},
    statement::Statement,
    transaction::{BalanceAssertion, PadDirective, Posting, Transaction},
};

use indexmap::IndexMap;
use log::{debug, warn};

/// Everything one parse produced: the directive store.
///
/// A `Ledger` is built by [`crate::parse`], corrected once by
/// [`Ledger::resolve`] and only read afterwards. Parsing again means
/// building a new `Ledger`.
#[derive(Clone, Debug, Default)]
pub struct Ledger {
    accounts: IndexMap<String, OpenDirective>,
    pads: Vec<PadDirective>,
    balance_asserts: Vec<BalanceAssertion>,
    transactions: Vec<Transaction>,
    diagnostics: Vec<Diagnostic>,
}

impl Ledger {
    pub fn new() -> Ledger {
        Default::default()
    }

    pub(crate) fn process_statement(&mut self, statement: Statement) {
        match statement {
            Statement::OpenAccount(open) => self.open_account(open),
            Statement::Pad(pad) => self.pads.push(pad),
            Statement::Balance(assertion) => self.balance_asserts.push(assertion),
        }
    }

    fn open_account(&mut self, open: OpenDirective) {
        if let Some(previous) = self.accounts.get(&open.account) {
            debug!(
                "account `{}' reopened at {}, was opened at {}",
                open.account, open.date, previous.date
            );
        }
        self.accounts.insert(open.account.clone(), open);
    }

    /// Appends a transaction and returns its index for follow-up postings.
    pub(crate) fn push_transaction(&mut self, txn: Transaction) -> usize {
        self.transactions.push(txn);
        self.transactions.len() - 1
    }

    pub(crate) fn push_posting(&mut self, idx: usize, posting: Posting) {
        if let Some(txn) = self.transactions.get_mut(idx) {
            txn.postings.push(posting);
        }
    }

    pub(crate) fn record(&mut self, line: usize, error: LineError) {
        let diagnostic = Diagnostic { line, error };
        warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Stable sort by date, so same-day transactions keep their relative order.
    pub(crate) fn sort_transactions(&mut self) {
        self.transactions.sort_by(|a, b| a.date.cmp(&b.date));
    }

    pub fn accounts(&self) -> &IndexMap<String, OpenDirective> {
        &self.accounts
    }

    pub fn open_date(&self, account: &str) -> Option<&LedgerDate> {
        self.accounts.get(account).map(|open| &open.date)
    }

    pub fn pads(&self) -> &Vec<PadDirective> {
        &self.pads
    }

    pub fn balance_assertions(&self) -> &Vec<BalanceAssertion> {
        &self.balance_asserts
    }

    pub(crate) fn balance_assertions_mut(&mut self) -> &mut Vec<BalanceAssertion> {
        &mut self.balance_asserts
    }

    pub fn transactions(&self) -> &Vec<Transaction> {
        &self.transactions
    }

    pub fn diagnostics(&self) -> &Vec<Diagnostic> {
        &self.diagnostics
    }

    /// Transactions dated within `start..=end`, in date order.
    pub fn transactions_between(&self, start: &str, end: &str) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.date >= *start && t.date <= *end)
            .collect()
    }

    /// Transactions whose postings do not sum to zero.
    pub fn unbalanced_transactions(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions
            .iter()
            .filter(|t| !crate::amount::is_negligible(t.imbalance()))
    }
}
