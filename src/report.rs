//! Plain text tables for the terminal.

use libbeanbook::balance::Balance;
use libbeanbook::transaction::Transaction;

use std::fmt::{self, Write};

fn money(nominal: f64, currency: &str) -> String {
    format!("{:.2} {}", nominal, currency)
}

pub fn balance_table(balances: &[&Balance], currency: &str) -> Result<String, fmt::Error> {
    let width = balances
        .iter()
        .map(|b| b.account.len())
        .chain([7])
        .max()
        .unwrap_or(7);

    let mut out = String::new();
    writeln!(
        out,
        "{:<12} {:<width$} {:>18} {:>18} {:>18} {:>18}",
        "Type", "Account", "Start balance", "End balance", "Difference", "Current balance"
    )?;

    let (mut start, mut end, mut diff, mut current) = (0f64, 0f64, 0f64, 0f64);
    for b in balances {
        writeln!(
            out,
            "{:<12} {:<width$} {:>18} {:>18} {:>18} {:>18}",
            b.account_type.as_str(),
            b.account,
            money(b.start_balance, currency),
            money(b.end_balance, currency),
            money(b.difference, currency),
            money(b.current_balance, currency),
        )?;
        start += b.start_balance;
        end += b.end_balance;
        diff += b.difference;
        current += b.current_balance;
    }

    writeln!(
        out,
        "{:<12} {:<width$} {:>18} {:>18} {:>18} {:>18}",
        "TOTAL",
        format!("({} filtered)", balances.len()),
        money(start, currency),
        money(end, currency),
        money(diff, currency),
        money(current, currency),
    )?;
    Ok(out)
}

pub fn transaction_table(transactions: &[&Transaction], currency: &str) -> Result<String, fmt::Error> {
    let mut out = String::new();
    writeln!(
        out,
        "{:<10}  {:<20}  {:<30}  {:<24}  {:<24}  {:>16}",
        "Date", "Tag", "Description", "Source account", "Target account", "Amount"
    )?;

    let mut total = 0f64;
    for txn in transactions {
        let legs = |positive: bool| {
            txn.postings
                .iter()
                .filter(|p| (p.amount.nominal > 0f64) == positive && p.amount.nominal != 0f64)
                .map(|p| p.account.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        let value = txn.value();
        writeln!(
            out,
            "{:<10}  {:<20}  {:<30}  {:<24}  {:<24}  {:>16}",
            txn.date.as_str(),
            txn.tags.join(" "),
            txn.description,
            legs(false),
            legs(true),
            money(value, currency),
        )?;
        total += value;
    }

    writeln!(out, "{:<118}  {:>16}", "TOTAL", money(total, currency))?;
    Ok(out)
}
