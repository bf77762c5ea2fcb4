use crate::{
    common::{error::LedgerError, event::TransactionEvent},
    domain::{ledger::Ledger, transaction::OperationKind},
    worker::handlers::{balance_inquiry, transfer, withdrawal},
};

/// Applies transactions to a ledger, one at a time, and counts the outcomes.
#[derive(Debug, Default)]
pub struct Processor {
    applied: usize,
    rejected: usize,
}

impl Processor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves (or creates) the sender, then dispatches on the operation kind.
    /// A rejected transaction leaves no trace beyond the sender's existence.
    pub fn process(
        &mut self,
        ledger: &mut Ledger,
        event: TransactionEvent,
    ) -> Result<(), LedgerError> {
        let transaction = event.transaction;
        ledger.get_or_create_account(transaction.sender());

        let result = match transaction.kind() {
            OperationKind::BalanceInquiry => balance_inquiry::handle(ledger, transaction),
            OperationKind::Withdrawal => withdrawal::handle(ledger, transaction),
            OperationKind::Transfer => transfer::handle(ledger, transaction),
        };
        match result {
            Ok(()) => self.applied += 1,
            Err(_) => self.rejected += 1,
        }
        result
    }

    pub fn applied(&self) -> usize {
        self.applied
    }

    pub fn rejected(&self) -> usize {
        self.rejected
    }
}
