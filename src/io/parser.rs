use std::str::FromStr;

use chrono::NaiveDateTime;

use crate::{
    common::{error::ParseError, money::Money},
    domain::transaction::{OperationKind, TIMESTAMP_FORMAT, Transaction},
};

const VERBS: [&str; 3] = ["balance inquiry", "transferred", "withdrew"];

/// The pieces of a line that matched the log grammar, before validation.
#[derive(Debug, PartialEq, Eq)]
struct Fields<'a> {
    account: &'a str,
    kind: OperationKind,
    amount: &'a str,
    recipient: Option<&'a str>,
}

/// Parses one log line.
///
/// Grammar: `[<YYYY-MM-DD HH:MM:SS>] <account> <verb> <amount>[ to <account2>]` with
/// `<verb>` one of `balance inquiry`, `transferred`, `withdrew`.
///
/// Returns `Ok(None)` for lines that do not follow the grammar at all (headers,
/// blank lines, unrelated entries). Lines that follow it but carry a bad timestamp,
/// a non-positive amount or a transfer without recipient are errors.
///
/// # Examples
///
/// ```
/// use txlog_aggregator::io::parser::parse_line;
///
/// let tx = parse_line("[2024-01-01 10:10:00] alice transferred 20 to bob")
///     .unwrap()
///     .unwrap();
/// assert_eq!(tx.sender(), "alice");
/// assert_eq!(tx.recipient(), Some("bob"));
///
/// assert!(parse_line("=== nightly export ===").unwrap().is_none());
/// assert!(parse_line("[2024-99-01 10:00:00] alice withdrew 5").is_err());
/// ```
pub fn parse_line(line: &str) -> Result<Option<Transaction>, ParseError> {
    let line = line.trim_end();
    let Some(rest) = line.strip_prefix('[') else {
        return Ok(None);
    };
    let Some((stamp, body)) = rest.split_once("] ") else {
        return Ok(None);
    };
    if stamp.is_empty() {
        return Ok(None);
    }
    let Some(fields) = split_body(body) else {
        return Ok(None);
    };

    let timestamp = parse_timestamp(stamp)?;
    let amount = Money::from_str(fields.amount).map_err(|_| ParseError::Amount {
        value: fields.amount.to_owned(),
    })?;

    let transaction = Transaction::new(
        fields.kind,
        timestamp,
        fields.account,
        amount,
        fields.recipient.map(str::to_owned),
    )?;
    Ok(Some(transaction))
}

/// Strict `YYYY-MM-DD HH:MM:SS`. chrono's format parser alone would also take
/// unpadded fields, a signed year, leading whitespace and second 60.
fn parse_timestamp(stamp: &str) -> Result<NaiveDateTime, ParseError> {
    let malformed = || ParseError::Timestamp {
        value: stamp.to_owned(),
    };
    if !has_timestamp_shape(stamp) {
        return Err(malformed());
    }
    NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).map_err(|_| malformed())
}

fn has_timestamp_shape(stamp: &str) -> bool {
    const SHAPE: &[u8] = b"dddd-dd-dd dd:dd:dd";
    let bytes = stamp.as_bytes();
    bytes.len() == SHAPE.len()
        && bytes.iter().zip(SHAPE).all(|(&b, &expected)| match expected {
            b'd' => b.is_ascii_digit(),
            sep => b == sep,
        })
        && &stamp[17..] < "60"
}

/// Finds the shortest account name after which the rest of the line reads as
/// `<verb> <amount>[ to <account2>]`.
fn split_body(body: &str) -> Option<Fields<'_>> {
    body.match_indices(' ')
        .map(|(idx, _)| idx)
        .filter(|&idx| idx > 0)
        .find_map(|idx| {
            let account = &body[..idx];
            let tail = &body[idx + 1..];
            VERBS.iter().find_map(|verb| {
                let after = tail.strip_prefix(verb)?.strip_prefix(' ')?;
                let (amount, remainder) = match after.split_once(' ') {
                    Some((amount, remainder)) => (amount, Some(remainder)),
                    None => (after, None),
                };
                if !is_amount_literal(amount) {
                    return None;
                }
                let recipient = match remainder {
                    None => None,
                    Some(r) => Some(r.strip_prefix("to ").filter(|r| !r.is_empty())?),
                };
                Some(Fields {
                    account,
                    kind: OperationKind::from_verb(verb)?,
                    amount,
                    recipient,
                })
            })
        })
}

/// Digits, optionally followed by a dot and more digits (`5`, `5.`, `5.25`).
fn is_amount_literal(s: &str) -> bool {
    let (int, frac) = match s.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (s, ""),
    };
    !int.is_empty()
        && int.bytes().all(|b| b.is_ascii_digit())
        && frac.bytes().all(|b| b.is_ascii_digit())
}
