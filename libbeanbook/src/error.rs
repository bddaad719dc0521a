use std::fmt;

/// Why a single ledger line was dropped.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LineError {
    #[error("malformed `{keyword}' directive")]
    MalformedDirective { keyword: String },

    #[error("invalid amount `{literal}'")]
    InvalidAmount { literal: String },
}

/// A dropped line, kept around so callers can report it.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub error: LineError,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}
