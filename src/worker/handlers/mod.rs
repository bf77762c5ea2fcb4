pub mod balance_inquiry;
pub mod transfer;
pub mod withdrawal;
