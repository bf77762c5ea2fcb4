use std::collections::BTreeMap;

use chrono::NaiveDateTime;

use crate::common::{error::LedgerError, money::Money};
use crate::domain::transaction::Transaction;

/// Per-account state for one aggregation run.
///
/// `balance` follows the order operations were applied in, not the order of
/// `history`; the two disagree when input files are not chronological.
#[derive(Debug, Clone)]
pub struct Account {
    name: String,
    balance: Money,
    /// Buckets keyed by timestamp; a bucket keeps insertion order.
    history: BTreeMap<NaiveDateTime, Vec<Transaction>>,
    entries: usize,
}

impl Account {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            balance: Money::zero(),
            history: BTreeMap::new(),
            entries: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> &Money {
        &self.balance
    }

    /// History in ascending timestamp order, equal timestamps in insertion order.
    pub fn history(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.history.values().flatten()
    }

    pub fn history_len(&self) -> usize {
        self.entries
    }

    pub fn apply_balance_inquiry(&mut self, amount: &Money) {
        self.balance = amount.clone();
    }

    pub fn apply_withdrawal(
        &mut self,
        amount: &Money,
        allow_negative: bool,
    ) -> Result<(), LedgerError> {
        self.ensure_funds(amount, allow_negative)?;
        self.balance -= amount;
        Ok(())
    }

    /// Moves `amount` from this account to `recipient`. Both sides change or neither does.
    pub fn apply_transfer(
        &mut self,
        amount: &Money,
        recipient: &mut Account,
        allow_negative: bool,
    ) -> Result<(), LedgerError> {
        self.ensure_funds(amount, allow_negative)?;
        self.balance -= amount;
        recipient.balance += amount;
        Ok(())
    }

    /// Inserts into the history unless an equal transaction is already there.
    /// Returns whether the history grew.
    pub fn record(&mut self, transaction: Transaction) -> bool {
        let bucket = self.history.entry(transaction.timestamp()).or_default();
        if bucket.contains(&transaction) {
            return false;
        }
        bucket.push(transaction);
        self.entries += 1;
        true
    }

    fn ensure_funds(
        &self,
        amount: &Money,
        allow_negative: bool,
    ) -> Result<(), LedgerError> {
        if !allow_negative && self.balance < *amount {
            return Err(LedgerError::InsufficientFunds {
                account: self.name.clone(),
                requested: amount.clone(),
                available: self.balance.clone(),
            });
        }
        Ok(())
    }
}
