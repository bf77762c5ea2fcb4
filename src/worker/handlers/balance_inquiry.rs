use crate::{
    common::error::LedgerError,
    domain::{ledger::Ledger, transaction::Transaction},
};

/// Overwrites the sender's balance with the reported amount. Never fails.
pub fn handle(ledger: &mut Ledger, transaction: Transaction) -> Result<(), LedgerError> {
    let account = ledger.get_or_create_account(transaction.sender());
    account.apply_balance_inquiry(transaction.amount());
    account.record(transaction);
    Ok(())
}
