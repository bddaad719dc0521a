use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// A lexical `YYYY-MM-DD` date.
///
/// Ledger dates are compared as strings, which orders correctly because
/// they are zero padded. They are never calendar validated, so
/// `2023-02-30` is a perfectly fine `LedgerDate`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct LedgerDate(String);

impl LedgerDate {
    pub fn new(s: &str) -> Self {
        Self(s.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Calendar view of this date, if it happens to be a real one.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

impl From<NaiveDate> for LedgerDate {
    fn from(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }
}

impl fmt::Display for LedgerDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<str> for LedgerDate {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialOrd<str> for LedgerDate {
    fn partial_cmp(&self, other: &str) -> Option<std::cmp::Ordering> {
        Some(self.0.as_str().cmp(other))
    }
}
