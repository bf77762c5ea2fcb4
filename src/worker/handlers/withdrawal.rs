use crate::{
    common::error::LedgerError,
    domain::{ledger::Ledger, transaction::Transaction},
};

pub fn handle(ledger: &mut Ledger, transaction: Transaction) -> Result<(), LedgerError> {
    let allow_negative = ledger.policy().allow_negative_balance;
    let account = ledger.get_or_create_account(transaction.sender());

    account.apply_withdrawal(transaction.amount(), allow_negative)?;
    account.record(transaction);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use chrono::NaiveDateTime;

    use super::*;
    use crate::{
        common::money::Money,
        domain::{policy::LedgerPolicy, transaction::TIMESTAMP_FORMAT},
    };

    // Helper to create Money from a decimal literal for tests
    fn money(v: &str) -> Money {
        Money::from_str(v).unwrap()
    }

    fn withdrawal(at: &str, amount: &str) -> Transaction {
        Transaction::withdrawal(
            NaiveDateTime::parse_from_str(at, TIMESTAMP_FORMAT).unwrap(),
            "alice",
            money(amount),
        )
        .unwrap()
    }

    #[test]
    fn handle_creates_account_and_goes_negative_by_default() {
        let mut ledger = Ledger::default();

        handle(&mut ledger, withdrawal("2024-01-01 10:00:00", "50")).unwrap();

        let acc = ledger.accounts().get("alice").expect("account created");
        assert_eq!(acc.balance(), &money("-50"));
        assert_eq!(acc.history_len(), 1);
    }

    #[test]
    fn handle_sums_a_sequence_of_withdrawals() {
        let mut ledger = Ledger::default();
        let amounts = ["10", "0.25", "3.75", "6"];

        for (i, amount) in amounts.iter().enumerate() {
            let at = format!("2024-01-01 10:0{i}:00");
            handle(&mut ledger, withdrawal(&at, amount)).unwrap();
        }

        let acc = ledger.accounts().get("alice").unwrap();
        assert_eq!(acc.balance(), &money("-20"));
        assert_eq!(acc.history_len(), 4);
    }

    #[test]
    fn handle_reordered_withdrawals_reach_the_same_balance() {
        let mut forward = Ledger::default();
        let mut backward = Ledger::default();
        let first = withdrawal("2024-01-01 10:00:00", "7");
        let second = withdrawal("2024-01-01 11:00:00", "2");

        handle(&mut forward, first.clone()).unwrap();
        handle(&mut forward, second.clone()).unwrap();
        handle(&mut backward, second).unwrap();
        handle(&mut backward, first).unwrap();

        let f = forward.accounts().get("alice").unwrap();
        let b = backward.accounts().get("alice").unwrap();
        assert_eq!(f.balance(), b.balance());
        assert!(f.history().eq(b.history()), "history is ordered by timestamp");
    }

    #[test]
    fn handle_rejects_overdraft_with_floor_and_records_nothing() {
        let mut ledger = Ledger::with_policy(LedgerPolicy {
            allow_negative_balance: false,
            ..LedgerPolicy::default()
        });
        ledger.get_or_create_account("alice").apply_balance_inquiry(&money("30"));

        let err = handle(&mut ledger, withdrawal("2024-01-01 10:00:00", "50")).unwrap_err();

        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));
        let acc = ledger.accounts().get("alice").unwrap();
        assert_eq!(acc.balance(), &money("30"), "balance must not change");
        assert_eq!(acc.history_len(), 0, "rejected withdrawal is not recorded");
    }
}
