use std::io::Write;

use crate::domain::ledger::AccountRegistry;

#[derive(serde::Serialize)]
/// Internal CSV output row.
///
/// Headers written (in this order): `account,balance,entries`.
struct SummaryRow<'a> {
    account: &'a str,
    balance: String,
    entries: usize,
}

/// Writes one CSV row per account: its final balance at `balance_scale` decimal
/// places and the number of history entries. Rows follow the registry's account
/// name order, so the output is deterministic.
///
/// # Errors
///
/// Returns a `csv::Error` if writing/serializing any row fails.
///
/// # Examples
///
/// ```
/// use txlog_aggregator::domain::ledger::Ledger;
/// use txlog_aggregator::io::summary::write_summary;
///
/// let mut ledger = Ledger::new();
/// ledger.get_or_create_account("bob");
/// ledger.get_or_create_account("alice");
///
/// let mut out = Vec::new();
/// write_summary(&mut out, &ledger.freeze(), 2).unwrap();
///
/// let s = String::from_utf8(out).unwrap();
/// assert_eq!(s, "account,balance,entries\nalice,0.00,0\nbob,0.00,0\n");
/// ```
pub fn write_summary<W: Write>(
    writer: W,
    registry: &AccountRegistry,
    balance_scale: u32,
) -> Result<(), csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(true)
        .from_writer(writer);

    for account in registry.iter() {
        wtr.serialize(SummaryRow {
            account: account.name(),
            balance: account.balance().to_string_scaled(balance_scale),
            entries: account.history_len(),
        })?;
    }

    wtr.flush()?;
    Ok(())
}
