use crate::{
    common::error::LedgerError,
    domain::{ledger::Ledger, transaction::Transaction},
};

/// Moves funds between two accounts and records the transfer with the sender
/// (and, when the policy asks for it, with the recipient too).
pub fn handle(ledger: &mut Ledger, transaction: Transaction) -> Result<(), LedgerError> {
    let Some(recipient) = transaction.recipient().map(str::to_owned) else {
        return Err(LedgerError::Inconsistent(format!(
            "transfer by {} without recipient",
            transaction.sender()
        )));
    };

    ledger.transfer(transaction.sender(), &recipient, transaction.amount())?;

    if ledger.policy().record_transfer_for_recipient && recipient != transaction.sender() {
        ledger
            .get_or_create_account(&recipient)
            .record(transaction.clone());
    }
    ledger
        .get_or_create_account(transaction.sender())
        .record(transaction);
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

    fn money(v: &str) -> Money {
        Money::from_str(v).unwrap()
    }

    fn transfer(from: &str, to: &str, amount: &str) -> Transaction {
        Transaction::transfer(
            NaiveDateTime::parse_from_str("2024-01-01 10:10:00", TIMESTAMP_FORMAT).unwrap(),
            from,
            money(amount),
            to,
        )
        .unwrap()
    }

    #[test]
    fn handle_moves_funds_and_records_only_for_sender() {
        let mut ledger = Ledger::new();
        ledger.get_or_create_account("alice").apply_balance_inquiry(&money("100"));

        handle(&mut ledger, transfer("alice", "bob", "20")).unwrap();

        let alice = ledger.account("alice").unwrap();
        let bob = ledger.account("bob").expect("recipient created on first reference");
        assert_eq!(alice.balance(), &money("80"));
        assert_eq!(bob.balance(), &money("20"));
        assert_eq!(alice.history_len(), 1);
        assert_eq!(bob.history_len(), 0);
    }

    #[test]
    fn handle_conserves_the_pair_balance() {
        let mut ledger = Ledger::new();
        ledger.get_or_create_account("alice").apply_balance_inquiry(&money("3.5"));
        ledger.get_or_create_account("bob").apply_balance_inquiry(&money("-1"));

        handle(&mut ledger, transfer("alice", "bob", "9.99")).unwrap();

        let sum = ledger.account("alice").unwrap().balance().clone()
            + ledger.account("bob").unwrap().balance().clone();
        assert_eq!(sum, money("2.5"));
    }

    #[test]
    fn handle_rejects_self_transfer_without_side_effects() {
        let mut ledger = Ledger::new();

        let err = handle(&mut ledger, transfer("alice", "alice", "10")).unwrap_err();

        assert_eq!(
            err,
            LedgerError::SelfTransfer {
                account: "alice".into()
            }
        );
        let alice = ledger.account("alice");
        assert!(alice.is_none_or(|a| a.balance() == &Money::zero() && a.history_len() == 0));
    }

    #[test]
    fn handle_records_self_transfer_when_allowed() {
        let mut ledger = Ledger::with_policy(LedgerPolicy {
            allow_self_transfer: true,
            ..LedgerPolicy::default()
        });

        handle(&mut ledger, transfer("alice", "alice", "10")).unwrap();

        let alice = ledger.account("alice").unwrap();
        assert_eq!(alice.balance(), &Money::zero());
        assert_eq!(alice.history_len(), 1);
    }

    #[test]
    fn handle_records_for_recipient_when_configured() {
        let mut ledger = Ledger::with_policy(LedgerPolicy {
            record_transfer_for_recipient: true,
            ..LedgerPolicy::default()
        });

        handle(&mut ledger, transfer("alice", "bob", "5")).unwrap();

        assert_eq!(ledger.account("alice").unwrap().history_len(), 1);
        assert_eq!(ledger.account("bob").unwrap().history_len(), 1);
    }

    #[test]
    fn handle_rejects_overdraft_when_floor_is_enforced() {
        let mut ledger = Ledger::with_policy(LedgerPolicy {
            allow_negative_balance: false,
            ..LedgerPolicy::default()
        });

        assert!(handle(&mut ledger, transfer("alice", "bob", "5")).is_err());
        assert_eq!(ledger.account("alice").unwrap().history_len(), 0);
        assert_eq!(ledger.account("bob").unwrap().balance(), &Money::zero());
    }
}
