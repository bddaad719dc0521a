use crate::ledger::Ledger;
use crate::statement::{self, Statement};

use log::debug;
use pest::iterators::Pair;

#[derive(Parser)]
#[grammar = "ledger.pest"]
pub struct LedgerParser;

/// Where the scanner stands between two lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cursor {
    Idle,
    /// Indented lines append postings to this transaction.
    InTransaction(usize),
}

/// Parses ledger text into a fresh, unresolved [`Ledger`].
///
/// This never fails. Lines that cannot be understood are skipped, and the
/// ones that looked like directives or postings are kept as diagnostics.
pub fn parse(input: &str) -> Ledger {
    let mut ledger = Ledger::new();

    input
        .lines()
        .enumerate()
        .fold(Cursor::Idle, |cursor, (idx, line)| {
            scan_line(&mut ledger, cursor, idx + 1, line)
        });

    ledger.sort_transactions();
    ledger
}

fn scan_line(ledger: &mut Ledger, cursor: Cursor, lineno: usize, line: &str) -> Cursor {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(';') {
        return cursor;
    }

    match trimmed.split_whitespace().nth(1) {
        Some(keyword @ ("open" | "pad" | "balance")) => {
            match Statement::parse(keyword, trimmed) {
                Ok(stmt) => ledger.process_statement(stmt),
                Err(e) => ledger.record(lineno, e),
            }
            return cursor;
        }
        Some("*" | "!") => {
            if let Some(txn) = statement::parse_header(trimmed) {
                return Cursor::InTransaction(ledger.push_transaction(txn));
            }
        }
        _ => {}
    }

    match cursor {
        Cursor::InTransaction(idx) if line.starts_with(char::is_whitespace) => {
            match statement::parse_posting(trimmed) {
                Some(Ok(posting)) => ledger.push_posting(idx, posting),
                Some(Err(e)) => ledger.record(lineno, e),
                None => debug!("line {}: not a posting, ignored", lineno),
            }
            cursor
        }
        _ => Cursor::Idle,
    }
}

pub fn inner_str(token: Pair<Rule>) -> &str {
    token
        .into_inner()
        .next()
        .map(|p| p.as_str())
        .unwrap_or_default()
}
