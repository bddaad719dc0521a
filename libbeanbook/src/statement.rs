use crate::account::OpenDirective;
use crate::amount::Amount;
use crate::date::LedgerDate;
use crate::error::LineError;
use crate::parser::{inner_str, LedgerParser, Rule};
use crate::transaction::{
    AssertionStatus, BalanceAssertion, PadDirective, Posting, Transaction, TransactionState,
};

use log::debug;
use pest::iterators::Pair;
use pest::Parser;

/// One recognised `open`, `pad` or `balance` line.
#[derive(Debug, PartialEq)]
pub enum Statement {
    OpenAccount(OpenDirective),
    Pad(PadDirective),
    Balance(BalanceAssertion),
}

macro_rules! next_str {
    ($pairs:ident, $keyword:expr) => {
        $pairs
            .next()
            .ok_or_else(|| malformed($keyword))?
            .as_str()
    };
}

fn malformed(keyword: &str) -> LineError {
    LineError::MalformedDirective {
        keyword: keyword.to_string(),
    }
}

impl Statement {
    /// Parses a trimmed line already classified as `keyword` directive.
    pub fn parse(keyword: &str, line: &str) -> Result<Statement, LineError> {
        let rule = match keyword {
            "open" => Rule::open_directive,
            "pad" => Rule::pad_directive,
            "balance" => Rule::balance_directive,
            _ => return Err(malformed(keyword)),
        };

        let directive = LedgerParser::parse(rule, line)
            .map_err(|e| {
                debug!("{} directive rejected: {}", keyword, e);
                malformed(keyword)
            })?
            .next()
            .ok_or_else(|| malformed(keyword))?;

        Self::into_statement(keyword, directive)
    }

    fn into_statement(keyword: &str, directive: Pair<'_, Rule>) -> Result<Self, LineError> {
        let tag = directive.as_rule();
        let mut pairs = directive.into_inner();
        let date = LedgerDate::new(next_str!(pairs, keyword));

        let stmt = match tag {
            Rule::open_directive => Self::OpenAccount(OpenDirective {
                account: next_str!(pairs, keyword).to_string(),
                date,
                currency: pairs
                    .find(|p| p.as_rule() == Rule::word)
                    .map(|p| p.as_str().to_string()),
            }),
            Rule::pad_directive => Self::Pad(PadDirective {
                date,
                account: next_str!(pairs, keyword).to_string(),
                source: next_str!(pairs, keyword).to_string(),
            }),
            Rule::balance_directive => {
                let account = next_str!(pairs, keyword).to_string();
                let literal = next_str!(pairs, keyword);
                let currency = next_str!(pairs, keyword);
                Self::Balance(BalanceAssertion {
                    date,
                    account,
                    amount: Amount::parse(literal, currency)?,
                    status: AssertionStatus::Pending,
                })
            }
            _ => return Err(malformed(keyword)),
        };

        Ok(stmt)
    }
}

/// Parses `DATE (*|!) ["DESCRIPTION"] [#tag ...]` into a transaction
/// without postings, or `None` when the line is not a header.
pub fn parse_header(line: &str) -> Option<Transaction> {
    let header = LedgerParser::parse(Rule::txn_header, line).ok()?.next()?;
    let mut pairs = header.into_inner();

    let date = LedgerDate::new(pairs.next()?.as_str());
    let state = match pairs.next()?.as_str() {
        "!" => TransactionState::Unsettled,
        _ => TransactionState::Settled,
    };

    let mut description = String::new();
    let mut tags = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            Rule::description => description = unescape(inner_str(pair)),
            Rule::word => tags.extend(tag_prefix(pair.as_str()).map(str::to_string)),
            _ => {}
        }
    }

    Some(Transaction {
        date,
        state,
        description,
        tags,
        postings: vec![],
    })
}

/// Parses an indented `ACCOUNT AMOUNT CURRENCY` line.
///
/// `None` means the line does not look like a posting at all, while
/// `Some(Err(_))` is a posting whose amount is not a number.
pub fn parse_posting(line: &str) -> Option<Result<Posting, LineError>> {
    let posting = LedgerParser::parse(Rule::posting, line).ok()?.next()?;
    let mut pairs = posting.into_inner();

    let account = pairs.next()?.as_str();
    let literal = pairs.next()?.as_str();
    let currency = pairs.next()?.as_str();

    Some(Amount::parse(literal, currency).map(|amount| Posting {
        account: account.to_string(),
        amount,
    }))
}

/// Finds `DATE open ACCOUNT` anywhere in `line`.
pub fn mentioned_open_account(line: &str) -> Option<&str> {
    let scan = LedgerParser::parse(Rule::open_scan, line).ok()?.next()?;
    let mention = scan.into_inner().next()?;
    mention
        .into_inner()
        .find(|p| p.as_rule() == Rule::account)
        .map(|p| p.as_str())
}

/// `#food!` carries the tag `#food`, `a#food` carries none.
fn tag_prefix(word: &str) -> Option<&str> {
    let body = word.strip_prefix('#')?;
    let len = body
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(body.len());
    (len > 0).then(|| &word[..len + 1])
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.extend(chars.next());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use crate::account::OpenDirective;
    use crate::amount::Amount;
    use crate::date::LedgerDate;
    use crate::error::LineError;
    use crate::statement::{
        mentioned_open_account, parse_header, parse_posting, tag_prefix, Statement,
    };
    use crate::transaction::{
        AssertionStatus, BalanceAssertion, PadDirective, Posting, TransactionState,
    };

    use anyhow::{anyhow, Result};

    #[test]
    fn parse_open_statement() -> Result<()> {
        let statement = Statement::parse("open", "2021-02-02 open Assets:Bank:Jago")?;
        assert_eq!(
            statement,
            Statement::OpenAccount(OpenDirective {
                account: "Assets:Bank:Jago".to_string(),
                date: LedgerDate::new("2021-02-02"),
                currency: None,
            })
        );

        let statement = Statement::parse("open", "2021-02-02\topen  Assets:Cash_On-Hand IDR")?;
        assert_eq!(
            statement,
            Statement::OpenAccount(OpenDirective {
                account: "Assets:Cash_On-Hand".to_string(),
                date: LedgerDate::new("2021-02-02"),
                currency: Some("IDR".to_string()),
            })
        );
        Ok(())
    }

    #[test]
    fn parse_balance_with_lowercase_currency() -> Result<()> {
        let statement = Statement::parse("balance", "2021-02-28 balance Assets:Cash 10 usd")?;
        assert_eq!(
            statement,
            Statement::Balance(BalanceAssertion {
                date: LedgerDate::new("2021-02-28"),
                account: "Assets:Cash".to_string(),
                amount: Amount::new(10f64, "usd"),
                status: AssertionStatus::Pending,
            })
        );
        Ok(())
    }

    #[test]
    fn parse_pad_statement() -> Result<()> {
        let statement = Statement::parse(
            "pad",
            "2021-11-10 pad Assets:Cash:OnHand Equity:Opening-Balances",
        )?;
        assert_eq!(
            statement,
            Statement::Pad(PadDirective {
                date: LedgerDate::new("2021-11-10"),
                account: "Assets:Cash:OnHand".to_string(),
                source: "Equity:Opening-Balances".to_string(),
            })
        );
        Ok(())
    }

    #[test]
    fn parse_balance_statement() -> Result<()> {
        let statement = Statement::parse(
            "balance",
            "2021-02-28 balance\tAssets:Cash:OnHand \t 65750.55\tUSD",
        )?;
        assert_eq!(
            statement,
            Statement::Balance(BalanceAssertion {
                date: LedgerDate::new("2021-02-28"),
                account: "Assets:Cash:OnHand".to_string(),
                amount: Amount::new(65750.55f64, "USD"),
                status: AssertionStatus::Pending,
            })
        );
        Ok(())
    }

    #[test]
    fn parse_wrong_statement() {
        assert_eq!(
            Statement::parse("balance", "2021-02-28 balance Assets:Cash lots USD"),
            Err(LineError::InvalidAmount {
                literal: "lots".to_string()
            })
        );
        assert_eq!(
            Statement::parse("balance", "2021-02-28 balance Assets:Cash 10"),
            Err(LineError::MalformedDirective {
                keyword: "balance".to_string()
            })
        );
        assert_eq!(
            Statement::parse("pad", "2021-02-28 pad Assets:Cash"),
            Err(LineError::MalformedDirective {
                keyword: "pad".to_string()
            })
        );
        assert_eq!(
            Statement::parse("open", "someday open Assets:Cash"),
            Err(LineError::MalformedDirective {
                keyword: "open".to_string()
            })
        );
    }

    #[test]
    fn parse_transaction_header() -> Result<()> {
        let txn = parse_header(r#"2023-01-10 * "Grocery Store" #food #groceries"#)
            .ok_or(anyhow!("not a header"))?;
        assert_eq!(txn.date, LedgerDate::new("2023-01-10"));
        assert_eq!(txn.state, TransactionState::Settled);
        assert_eq!(txn.description, "Grocery Store");
        assert_eq!(txn.tags, vec!["#food", "#groceries"]);
        assert!(txn.postings.is_empty());

        let txn = parse_header("2023-01-15 ! #pending").ok_or(anyhow!("not a header"))?;
        assert_eq!(txn.state, TransactionState::Unsettled);
        assert_eq!(txn.description, "");
        assert_eq!(txn.tags, vec!["#pending"]);

        let txn = parse_header(r#"2023-01-15 * "Say \"cheese\"" note#x #a #a"#)
            .ok_or(anyhow!("not a header"))?;
        assert_eq!(txn.description, r#"Say "cheese""#);
        assert_eq!(txn.tags, vec!["#a", "#a"]);

        assert_eq!(parse_header(r#"2023-1-15 * "Short date""#), None);
        Ok(())
    }

    #[test]
    fn parse_posting_line() -> Result<()> {
        let posting = parse_posting("Assets:Bank     -150.00 USD")
            .ok_or(anyhow!("not a posting"))??;
        assert_eq!(posting, Posting::new("Assets:Bank", -150f64, "USD"));

        let posting = parse_posting("Expenses:Food 12 USD ; lunch")
            .ok_or(anyhow!("not a posting"))??;
        assert_eq!(posting, Posting::new("Expenses:Food", 12f64, "USD"));

        assert_eq!(parse_posting("Assets:Cash"), None);
        assert_eq!(parse_posting("Assets:Cash 10 usd"), None);
        assert_eq!(
            parse_posting("Assets:Cash 1.2.3 USD"),
            Some(Err(LineError::InvalidAmount {
                literal: "1.2.3".to_string()
            }))
        );
        Ok(())
    }

    #[test]
    fn scan_open_mentions() {
        assert_eq!(
            mentioned_open_account("2023-01-01 open Assets:Bank USD"),
            Some("Assets:Bank")
        );
        assert_eq!(
            mentioned_open_account("   - 2023-01-01  open Expenses:Food"),
            Some("Expenses:Food")
        );
        assert_eq!(mentioned_open_account("2023-01-01 close Assets:Bank"), None);
        assert_eq!(mentioned_open_account("open Assets:Bank"), None);
    }

    #[test]
    fn tag_prefixes() {
        assert_eq!(tag_prefix("#food"), Some("#food"));
        assert_eq!(tag_prefix("#food!"), Some("#food"));
        assert_eq!(tag_prefix("#a-b_c9"), Some("#a-b_c9"));
        assert_eq!(tag_prefix("#"), None);
        assert_eq!(tag_prefix("a#food"), None);
    }
}
