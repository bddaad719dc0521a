//! File access for hosts: the engine itself only ever sees text.

use crate::ledger::Ledger;
use crate::statement::mentioned_open_account;

use anyhow::{anyhow, Context, Result};
use log::debug;
use std::collections::BTreeSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

pub fn read_ledger_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("cannot read ledger `{}'", path.display()))
}

/// Appends `content` on a new line. The ledger file must already exist.
pub fn append_ledger_text(path: &Path, content: &str) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("ledger file not found at `{}'", path.display()));
    }
    if !path.is_file() {
        return Err(anyhow!("ledger path `{}' is not a file", path.display()));
    }

    let mut file = OpenOptions::new()
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open ledger `{}'", path.display()))?;
    write!(file, "\n{}", content)
        .with_context(|| format!("cannot append to ledger `{}'", path.display()))?;
    debug!("appended {} bytes to {}", content.len() + 1, path.display());
    Ok(())
}

/// Names of every account with an `open` directive, sorted and unique.
pub fn list_open_account_names(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(mentioned_open_account)
        .map(str::to_string)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn list_open_account_names_in(path: &Path) -> Result<Vec<String>> {
    Ok(list_open_account_names(&read_ledger_text(path)?))
}

/// Reads, parses and resolves the ledger at `path`.
pub fn load_file(path: &Path) -> Result<Ledger> {
    Ok(crate::load(&read_ledger_text(path)?))
}
