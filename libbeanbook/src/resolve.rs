use crate::amount::is_negligible;
use crate::date::LedgerDate;
use crate::ledger::Ledger;
use crate::transaction::{AssertionStatus, PadDirective, Transaction};

use log::{debug, info};

impl Ledger {
    /// Balance of `account` at the start of `date`, same-day postings excluded.
    pub fn running_balance(&self, account: &str, date: &LedgerDate) -> f64 {
        self.transactions()
            .iter()
            .filter(|t| t.date < *date)
            .map(|t| t.posted_to(account))
            .sum()
    }

    /// The latest pad for `account` dated on or before `date`.
    /// Among same-day pads the first one parsed wins.
    pub fn pad_for(&self, account: &str, date: &LedgerDate) -> Option<&PadDirective> {
        self.pads()
            .iter()
            .filter(|p| p.account == account && p.date <= *date)
            .fold(None, |best: Option<&PadDirective>, pad| match best {
                Some(b) if b.date >= pad.date => Some(b),
                _ => Some(pad),
            })
    }

    /// Inserts a correction from the matching pad for every balance
    /// assertion that does not hold, in assertion date order. Returns the
    /// number of corrections inserted.
    ///
    /// Each assertion is settled once: resolving again is a no-op.
    pub fn resolve(&mut self) -> usize {
        self.balance_assertions_mut()
            .sort_by(|a, b| a.date.cmp(&b.date));

        let mut inserted = 0;
        for idx in 0..self.balance_assertions().len() {
            let assertion = &self.balance_assertions()[idx];
            if assertion.status != AssertionStatus::Pending {
                continue;
            }

            let running = self.running_balance(&assertion.account, &assertion.date);
            let diff = assertion.amount.nominal - running;
            let (status, correction) = if is_negligible(diff) {
                (AssertionStatus::Balanced, None)
            } else if let Some(pad) = self.pad_for(&assertion.account, &assertion.date) {
                debug!(
                    "padding {} {} into `{}' from `{}' at {}",
                    diff, assertion.amount.currency, assertion.account, pad.source, pad.date
                );
                let correction = Transaction::correction(
                    pad.date.clone(),
                    &assertion.account,
                    &pad.source,
                    diff,
                    &assertion.amount.currency,
                );
                (AssertionStatus::Corrected, Some(correction))
            } else {
                info!(
                    "balance of `{}' at {} is off by {} {} and has no pad",
                    assertion.account, assertion.date, diff, assertion.amount.currency
                );
                (AssertionStatus::Unenforced, None)
            };

            self.balance_assertions_mut()[idx].status = status;
            if let Some(correction) = correction {
                self.push_transaction(correction);
                self.sort_transactions();
                inserted += 1;
            }
        }

        inserted
    }
}

#[cfg(test)]
mod tests {
    use crate::date::LedgerDate;
    use crate::parser::parse;
    use crate::transaction::{AssertionStatus, Posting};

    #[test]
    fn correction_dated_at_pad() {
        let mut ledger = parse(
            r#"
2023-01-01 open Assets:Bank
2023-01-01 pad Assets:Bank Equity:Opening-Balances
2023-01-02 balance Assets:Bank 1000.00 USD
"#,
        );
        assert_eq!(ledger.resolve(), 1);

        let txns = ledger.transactions();
        assert_eq!(txns.len(), 1);
        assert!(txns[0].is_synthetic());
        assert_eq!(txns[0].date, LedgerDate::new("2023-01-01"));
        assert_eq!(
            txns[0].postings,
            vec![
                Posting::new("Assets:Bank", 1000f64, "USD"),
                Posting::new("Equity:Opening-Balances", -1000f64, "USD"),
            ]
        );
        assert_eq!(
            ledger.balance_assertions()[0].status,
            AssertionStatus::Corrected
        );
    }

    #[test]
    fn same_day_postings_do_not_count() {
        let mut ledger = parse(
            r#"
2023-01-01 pad Assets:Bank Equity:Opening-Balances
2023-01-05 * "Deposit"
  Assets:Bank 300 USD
  Income:Gift -300 USD
2023-01-05 balance Assets:Bank 100 USD
"#,
        );
        ledger.resolve();
        let synthetic: Vec<_> = ledger
            .transactions()
            .iter()
            .filter(|t| t.is_synthetic())
            .collect();
        assert_eq!(synthetic.len(), 1);
        assert_eq!(synthetic[0].postings[0].amount.nominal, 100f64);
    }

    #[test]
    fn later_assertions_see_earlier_corrections() {
        let mut ledger = parse(
            r#"
2023-01-01 pad Assets:Bank Equity:Opening-Balances
2023-01-02 balance Assets:Bank 500 USD
2023-01-10 * "Spend"
  Assets:Bank -200 USD
  Expenses:Misc 200 USD
2023-01-20 pad Assets:Bank Income:Found
2023-02-01 balance Assets:Bank 350 USD
"#,
        );
        assert_eq!(ledger.resolve(), 2);

        let synthetic: Vec<_> = ledger
            .transactions()
            .iter()
            .filter(|t| t.is_synthetic())
            .collect();
        assert_eq!(synthetic[0].postings[1].account, "Equity:Opening-Balances");
        assert_eq!(synthetic[1].date, LedgerDate::new("2023-01-20"));
        assert_eq!(synthetic[1].postings[0].amount.nominal, 50f64);
        assert_eq!(synthetic[1].postings[1], Posting::new("Income:Found", -50f64, "USD"));
    }

    #[test]
    fn assertions_resolve_in_date_order() {
        let mut ledger = parse(
            r#"
2023-01-01 pad Assets:Bank Equity:Opening-Balances
2023-03-01 balance Assets:Bank 300 USD
2023-02-01 balance Assets:Bank 100 USD
"#,
        );
        assert_eq!(ledger.resolve(), 2);
        let amounts: Vec<f64> = ledger
            .transactions()
            .iter()
            .map(|t| t.postings[0].amount.nominal)
            .collect();
        assert_eq!(amounts, vec![100f64, 200f64]);
    }

    #[test]
    fn assertion_without_pad_is_unenforced() {
        let mut ledger = parse("2023-01-02 balance Assets:Bank 1000.00 USD\n");
        assert_eq!(ledger.resolve(), 0);
        assert!(ledger.transactions().is_empty());
        assert_eq!(
            ledger.balance_assertions()[0].status,
            AssertionStatus::Unenforced
        );
    }

    #[test]
    fn pad_after_assertion_is_ignored() {
        let mut ledger = parse(
            "2023-01-02 balance Assets:Bank 10 USD\n2023-01-03 pad Assets:Bank Equity:Opening-Balances\n",
        );
        assert_eq!(ledger.resolve(), 0);
    }

    #[test]
    fn holding_assertion_is_balanced() {
        let mut ledger = parse(
            r#"
2023-01-01 pad Assets:Cash Equity:Opening-Balances
2023-01-01 * "ATM"
  Assets:Cash 100 USD
  Assets:Bank -100 USD
2023-01-02 balance Assets:Cash 100.000001 USD
"#,
        );
        assert_eq!(ledger.resolve(), 0);
        assert_eq!(
            ledger.balance_assertions()[0].status,
            AssertionStatus::Balanced
        );
    }

    #[test]
    fn resolve_is_idempotent() {
        let mut ledger = parse(
            r#"
2023-05-01 pad Assets:Wallet Equity:Opening-Balances
2023-05-01 balance Assets:Wallet 40 USD
2023-05-01 pad Assets:Bank Equity:Opening-Balances
2023-05-02 balance Assets:Bank 90 USD
"#,
        );
        assert_eq!(ledger.resolve(), 2);
        let after_first = ledger.transactions().clone();
        assert_eq!(ledger.resolve(), 0);
        assert_eq!(ledger.transactions(), &after_first);
    }

    #[test]
    fn latest_pad_wins() {
        let ledger = parse(
            r#"
2023-01-01 pad Assets:Bank Equity:Opening-Balances
2023-01-05 pad Assets:Bank Income:Misc
2023-01-05 pad Assets:Bank Income:Other
2023-01-09 pad Assets:Bank Income:Late
"#,
        );
        let pad = ledger
            .pad_for("Assets:Bank", &LedgerDate::new("2023-01-08"))
            .map(|p| p.source.as_str());
        assert_eq!(pad, Some("Income:Misc"));
        assert!(ledger
            .pad_for("Assets:Cash", &LedgerDate::new("2023-01-08"))
            .is_none());
    }
}
