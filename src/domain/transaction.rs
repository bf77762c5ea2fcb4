use std::fmt;

use chrono::NaiveDateTime;

use crate::common::{error::TransactionError, money::Money};

/// Layout of every timestamp in the log format, input and output alike.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    BalanceInquiry,
    Transfer,
    Withdrawal,
}

impl OperationKind {
    /// The verb phrase used for this kind in log lines.
    pub fn verb(self) -> &'static str {
        match self {
            OperationKind::BalanceInquiry => "balance inquiry",
            OperationKind::Transfer => "transferred",
            OperationKind::Withdrawal => "withdrew",
        }
    }

    pub fn from_verb(verb: &str) -> Option<Self> {
        match verb {
            "balance inquiry" => Some(OperationKind::BalanceInquiry),
            "transferred" => Some(OperationKind::Transfer),
            "withdrew" => Some(OperationKind::Withdrawal),
            _ => None,
        }
    }
}

/// One validated account operation. Immutable once built: the amount is strictly
/// positive and `recipient` is set exactly when the kind is `Transfer`.
///
/// Equality compares every field, amounts numerically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    kind: OperationKind,
    sender: String,
    amount: Money,
    recipient: Option<String>,
    timestamp: NaiveDateTime,
}

impl Transaction {
    /// Builds a transaction, validating the amount, the sender and the recipient.
    /// A recipient passed for a non-transfer kind is dropped.
    pub fn new(
        kind: OperationKind,
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        amount: Money,
        recipient: Option<String>,
    ) -> Result<Self, TransactionError> {
        let sender = sender.into();
        if sender.trim().is_empty() {
            return Err(TransactionError::EmptyAccount);
        }
        if !amount.is_positive() {
            return Err(TransactionError::NonPositiveAmount(amount));
        }
        let recipient = match kind {
            OperationKind::Transfer => match recipient {
                Some(r) if !r.trim().is_empty() => Some(r),
                _ => return Err(TransactionError::MissingRecipient),
            },
            OperationKind::BalanceInquiry | OperationKind::Withdrawal => None,
        };

        Ok(Self {
            kind,
            sender,
            amount,
            recipient,
            timestamp,
        })
    }

    pub fn balance_inquiry(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        amount: Money,
    ) -> Result<Self, TransactionError> {
        Self::new(OperationKind::BalanceInquiry, timestamp, sender, amount, None)
    }

    pub fn withdrawal(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        amount: Money,
    ) -> Result<Self, TransactionError> {
        Self::new(OperationKind::Withdrawal, timestamp, sender, amount, None)
    }

    pub fn transfer(
        timestamp: NaiveDateTime,
        sender: impl Into<String>,
        amount: Money,
        recipient: impl Into<String>,
    ) -> Result<Self, TransactionError> {
        Self::new(
            OperationKind::Transfer,
            timestamp,
            sender,
            amount,
            Some(recipient.into()),
        )
    }

    pub fn kind(&self) -> OperationKind {
        self.kind
    }

    pub fn sender(&self) -> &str {
        &self.sender
    }

    pub fn amount(&self) -> &Money {
        &self.amount
    }

    pub fn recipient(&self) -> Option<&str> {
        self.recipient.as_deref()
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }
}

/// Renders the log line this transaction was (or could have been) parsed from.
impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} {}",
            self.timestamp.format(TIMESTAMP_FORMAT),
            self.sender,
            self.kind.verb(),
            self.amount
        )?;
        if let Some(recipient) = &self.recipient {
            write!(f, " to {recipient}")?;
        }
        Ok(())
    }
}
