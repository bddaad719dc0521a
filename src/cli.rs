use crate::config::Settings;
use crate::report;

use libbeanbook::account::AccountType;
use libbeanbook::amount;
use libbeanbook::date::LedgerDate;
use libbeanbook::entry::{AccountEntry, TransactionEntry, TransactionKind};
use libbeanbook::filter::{BalanceFilter, TransactionFilter};
use libbeanbook::io;
use libbeanbook::transaction::AssertionStatus;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::info;
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "beanbook", version, about = "Plain text double-entry bookkeeping")]
pub struct Cli {
    /// Settings file
    #[arg(long, global = true, default_value = "beanbook.toml")]
    pub config: PathBuf,

    /// Ledger file, overrides the settings
    #[arg(long, global = true)]
    pub ledger: Option<PathBuf>,

    /// Default currency, overrides the settings
    #[arg(long, global = true)]
    pub currency: Option<String>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// More logging, repeat for even more
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug)]
pub struct Window {
    /// First day of the window
    #[arg(long, default_value = "2000-01-01")]
    pub from: String,

    /// Last day of the window, defaults to today
    #[arg(long)]
    pub to: Option<String>,
}

impl Window {
    fn bounds(&self) -> (String, String) {
        let to = self.to.clone().unwrap_or_else(|| today().to_string());
        (self.from.clone(), to)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Kind {
    Expense,
    Income,
    Transfer,
}

impl From<Kind> for TransactionKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Expense => TransactionKind::Expense,
            Kind::Income => TransactionKind::Income,
            Kind::Transfer => TransactionKind::Transfer,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Balance per account over a date window
    Balances {
        #[command(flatten)]
        window: Window,
        /// Only these account types, e.g. Assets
        #[arg(long = "type")]
        types: Vec<String>,
        /// Only these accounts
        #[arg(long = "account")]
        accounts: Vec<String>,
    },
    /// Transactions within a date window
    Transactions {
        #[command(flatten)]
        window: Window,
        /// Tag substring, `#` optional
        #[arg(long)]
        tag: Option<String>,
        /// Money leaving one of these accounts
        #[arg(long = "source")]
        sources: Vec<String>,
        /// Money entering one of these accounts
        #[arg(long = "target")]
        targets: Vec<String>,
    },
    /// Names of every opened account
    Accounts,
    /// Append an `open` directive, with an optional opening balance
    AddAccount {
        /// Assets, Liabilities, Equity, Income or Expenses
        #[arg(long = "type")]
        account_type: String,
        /// Name below the type, e.g. Bank:Checking
        name: String,
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "0", allow_negative_numbers = true)]
        opening_balance: String,
    },
    /// Append a two-legged transaction
    AddTransaction {
        #[arg(long, value_enum, default_value_t = Kind::Expense)]
        kind: Kind,
        #[arg(long)]
        date: Option<String>,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        source: String,
        #[arg(long)]
        target: String,
        amount: String,
    },
    /// Report dropped lines, unenforced assertions and unbalanced transactions
    Check,
    /// Print the effective settings
    Config,
}

fn today() -> LedgerDate {
    chrono::Local::now().date_naive().into()
}

fn date_or_today(date: &Option<String>) -> LedgerDate {
    date.as_deref().map(LedgerDate::new).unwrap_or_else(today)
}

pub fn run<W: Write>(cli: &Cli, settings: &Settings, out: &mut W) -> Result<()> {
    let currency = settings.currency.as_str();

    match &cli.command {
        Command::Balances {
            window,
            types,
            accounts,
        } => {
            let ledger = io::load_file(&settings.ledger_path)?;
            let (from, to) = window.bounds();
            let filter = BalanceFilter {
                types: types.iter().map(|t| AccountType::from(t.as_str())).collect(),
                accounts: accounts.iter().cloned().collect(),
            };
            let balances = ledger.balances(&from, &to);
            let rows: Vec<_> = balances.iter().filter(|b| filter.matches(b)).collect();
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            } else {
                write!(out, "{}", report::balance_table(&rows, currency)?)?;
            }
        }
        Command::Transactions {
            window,
            tag,
            sources,
            targets,
        } => {
            let ledger = io::load_file(&settings.ledger_path)?;
            let (from, to) = window.bounds();
            let filter = TransactionFilter {
                tag: tag.clone(),
                sources: sources.iter().cloned().collect(),
                targets: targets.iter().cloned().collect(),
            };
            let rows: Vec<_> = ledger
                .transactions_between(&from, &to)
                .into_iter()
                .filter(|t| filter.matches(t))
                .collect();
            if cli.json {
                writeln!(out, "{}", serde_json::to_string_pretty(&rows)?)?;
            } else {
                write!(out, "{}", report::transaction_table(&rows, currency)?)?;
            }
        }
        Command::Accounts => {
            for name in io::list_open_account_names_in(&settings.ledger_path)? {
                writeln!(out, "{}", name)?;
            }
        }
        Command::AddAccount {
            account_type,
            name,
            date,
            opening_balance,
        } => {
            let opening_balance =
                amount::parse_nominal(opening_balance).context("invalid opening balance")?;
            let entry = AccountEntry {
                date: date_or_today(date),
                account_type: AccountType::from(account_type.as_str()),
                name: name.clone(),
                currency: currency.to_string(),
                opening_balance,
            };
            io::append_ledger_text(&settings.ledger_path, &entry.render())?;
            info!("account {} added", entry.account());
            writeln!(out, "Account added to {}", settings.ledger_path.display())?;
        }
        Command::AddTransaction {
            kind,
            date,
            description,
            tags,
            source,
            target,
            amount,
        } => {
            let amount = libbeanbook::amount::parse_nominal(amount).context("invalid amount")?;
            let known = io::list_open_account_names_in(&settings.ledger_path)?;
            let entry = TransactionEntry {
                date: date_or_today(date),
                kind: (*kind).into(),
                description: description.clone(),
                tags: tags.clone(),
                source: source.clone(),
                target: target.clone(),
                amount,
                currency: currency.to_string(),
            };
            io::append_ledger_text(&settings.ledger_path, &entry.render(&known))?;
            writeln!(out, "Transaction added to {}", settings.ledger_path.display())?;
        }
        Command::Check => {
            let ledger = io::load_file(&settings.ledger_path)?;
            let mut problems = 0;
            for diagnostic in ledger.diagnostics() {
                writeln!(out, "{}", diagnostic)?;
                problems += 1;
            }
            for assertion in ledger.balance_assertions() {
                if assertion.status == AssertionStatus::Unenforced {
                    writeln!(
                        out,
                        "{}: balance of {} not enforced, no pad",
                        assertion.date, assertion.account
                    )?;
                    problems += 1;
                }
            }
            for txn in ledger.unbalanced_transactions() {
                writeln!(
                    out,
                    "{}: \"{}\" does not balance, off by {:.2}",
                    txn.date,
                    txn.description,
                    txn.imbalance()
                )?;
                problems += 1;
            }
            if problems == 0 {
                writeln!(out, "ok")?;
            }
        }
        Command::Config => {
            write!(out, "{}", toml::to_string_pretty(settings)?)?;
        }
    }

    Ok(())
}
