//! beanbook - a small plain text double-entry ledger engine
//! ---
//!
//! Reads a restricted [Beancount](https://beancount.github.io) dialect:
//! `open`, `pad` and `balance` directives plus `*`/`!` transactions with
//! single currency postings. Balance assertions are enforced by inserting
//! correcting transactions from their pads, and balances can be reported
//! over any date window.
//!
//! ```
//! let ledger = libbeanbook::load(
//!     "2023-01-01 open Assets:Bank\n\
//!      2023-01-01 pad Assets:Bank Equity:Opening-Balances\n\
//!      2023-01-02 balance Assets:Bank 1000.00 USD\n",
//! );
//! let balances = ledger.balances("2023-01-01", "2023-01-31");
//! assert_eq!(balances[0].end_balance, 1000.0);
//! ```

extern crate pest;
#[macro_use]
extern crate pest_derive;

/// Account names and their `open` directives.
pub mod account;
pub mod amount;
/// Window balances per account.
pub mod balance;
pub mod date;
pub mod entry;
pub mod error;
/// Caller-side narrowing of reports.
pub mod filter;
pub mod io;
/// The directive store.
pub mod ledger;

/// Our main parser entrypoints.
pub mod parser;

mod resolve;
mod statement;
pub mod transaction;

pub use ledger::Ledger;
pub use parser::parse;

/// Parses `input` and resolves its balance assertions.
///
/// The ledger is only handed out once resolved, so nobody observes it
/// halfway through.
pub fn load(input: &str) -> Ledger {
    let mut ledger = parse(input);
    let corrections = ledger.resolve();
    log::debug!(
        "loaded {} transactions, {} corrections, {} diagnostics",
        ledger.transactions().len(),
        corrections,
        ledger.diagnostics().len()
    );
    ledger
}
