/// Behaviour switches for the rules that older revisions of the log tooling
/// disagreed on. `Default` is the canonical behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedgerPolicy {
    /// Withdrawals and transfers may take a balance below zero.
    pub allow_negative_balance: bool,
    /// A transfer to the sending account is a recorded no-op instead of an error.
    pub allow_self_transfer: bool,
    /// Transfers are also recorded in the recipient's history.
    pub record_transfer_for_recipient: bool,
}

impl Default for LedgerPolicy {
    fn default() -> Self {
        Self {
            allow_negative_balance: true,
            allow_self_transfer: false,
            record_transfer_for_recipient: false,
        }
    }
}
