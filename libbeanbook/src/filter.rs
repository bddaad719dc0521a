use crate::account::AccountType;
use crate::balance::Balance;
use crate::transaction::Transaction;

use std::collections::BTreeSet;

/// Narrows a balance report. Empty sets let everything through.
#[derive(Clone, Debug, Default)]
pub struct BalanceFilter {
    pub types: BTreeSet<AccountType>,
    pub accounts: BTreeSet<String>,
}

impl BalanceFilter {
    pub fn matches(&self, balance: &Balance) -> bool {
        (self.types.is_empty() || self.types.contains(&balance.account_type))
            && (self.accounts.is_empty() || self.accounts.contains(&balance.account))
    }
}

/// Narrows a transaction listing.
///
/// `sources` are accounts money leaves (negative postings) and `targets`
/// are accounts money enters (positive postings).
#[derive(Clone, Debug, Default)]
pub struct TransactionFilter {
    pub tag: Option<String>,
    pub sources: BTreeSet<String>,
    pub targets: BTreeSet<String>,
}

impl TransactionFilter {
    pub fn matches(&self, txn: &Transaction) -> bool {
        self.matches_tag(txn)
            && (self.sources.is_empty()
                || txn
                    .postings
                    .iter()
                    .any(|p| p.amount.nominal < 0f64 && self.sources.contains(&p.account)))
            && (self.targets.is_empty()
                || txn
                    .postings
                    .iter()
                    .any(|p| p.amount.nominal > 0f64 && self.targets.contains(&p.account)))
    }

    /// Case insensitive substring match against any tag, `#` optional.
    fn matches_tag(&self, txn: &Transaction) -> bool {
        let needle = match self.tag.as_deref() {
            Some(tag) if !tag.is_empty() => tag.strip_prefix('#').unwrap_or(tag).to_lowercase(),
            _ => return true,
        };
        txn.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}
