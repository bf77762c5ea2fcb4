use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::{
    common::{error::LedgerError, money::Money},
    domain::{account::Account, policy::LedgerPolicy},
};

/// The account registry while aggregation runs. Exclusively owned by the worker,
/// so `&mut self` is the only way in and every operation is atomic with respect
/// to every other.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: HashMap<String, Account>,
    policy: LedgerPolicy,
}

impl Ledger {
    pub fn new() -> Self {
        Self::with_policy(LedgerPolicy::default())
    }

    pub fn with_policy(policy: LedgerPolicy) -> Self {
        Self {
            accounts: HashMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> &LedgerPolicy {
        &self.policy
    }

    pub fn accounts(&self) -> &HashMap<String, Account> {
        &self.accounts
    }

    pub fn account(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name)
    }

    pub fn get_or_create_account(&mut self, name: &str) -> &mut Account {
        self.accounts
            .entry(name.to_owned())
            .or_insert_with(|| Account::new(name))
    }

    /// Moves `amount` from `sender` to `recipient`, creating either account on
    /// first reference. On error neither balance changes.
    pub fn transfer(
        &mut self,
        sender: &str,
        recipient: &str,
        amount: &Money,
    ) -> Result<(), LedgerError> {
        if sender == recipient {
            if !self.policy.allow_self_transfer {
                return Err(LedgerError::SelfTransfer {
                    account: sender.to_owned(),
                });
            }
            // debit and credit cancel out
            self.get_or_create_account(sender);
            return Ok(());
        }

        self.get_or_create_account(sender);
        let mut to = self
            .accounts
            .remove(recipient)
            .unwrap_or_else(|| Account::new(recipient));
        let allow_negative = self.policy.allow_negative_balance;
        let result = self
            .get_or_create_account(sender)
            .apply_transfer(amount, &mut to, allow_negative);
        self.accounts.insert(recipient.to_owned(), to);
        result
    }

    /// Ends the run: the registry becomes read-only.
    pub fn freeze(self) -> AccountRegistry {
        AccountRegistry {
            accounts: self
                .accounts
                .into_iter()
                .map(|(name, account)| (name, Arc::new(account)))
                .collect(),
        }
    }
}

/// Read-only view of every account after aggregation, ordered by name.
/// Accounts are shared so concurrent writers can each own a handle.
#[derive(Debug, Clone, Default)]
pub struct AccountRegistry {
    accounts: BTreeMap<String, Arc<Account>>,
}

impl AccountRegistry {
    pub fn get(&self, name: &str) -> Option<&Account> {
        self.accounts.get(name).map(Arc::as_ref)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Account>> + '_ {
        self.accounts.values()
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
