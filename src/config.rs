use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Host settings, read from `beanbook.toml`.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// The ledger file everything is read from and appended to.
    pub ledger_path: PathBuf,
    /// Default currency for new entries and report amounts.
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_path: PathBuf::from("accounting.beancount"),
            currency: "USD".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or defaults when there is no such file.
    pub fn load(path: &Path) -> Result<Settings> {
        if !path.exists() {
            debug!("no settings at {}, using defaults", path.display());
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("cannot read settings `{}'", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid settings `{}'", path.display()))
    }

    pub fn with_overrides(mut self, ledger_path: Option<PathBuf>, currency: Option<String>) -> Self {
        if let Some(path) = ledger_path {
            self.ledger_path = path;
        }
        if let Some(currency) = currency {
            self.currency = currency;
        }
        self
    }
}
