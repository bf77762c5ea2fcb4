pub mod account;
pub mod ledger;
pub mod policy;
pub mod transaction;
