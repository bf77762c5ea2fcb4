use crate::domain::transaction::Transaction;

/// A parsed transaction handed from the reader to the worker, tagged with the
/// 1-based line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEvent {
    pub line: usize,
    pub transaction: Transaction,
}
