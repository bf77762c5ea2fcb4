use std::io::BufRead;

use crate::{
    common::{error::ReadError, event::TransactionEvent},
    io::parser::parse_line,
};

/// Reads transactions from a line-oriented log stream.
///
/// Lines outside the log grammar are skipped silently; line-shaped entries that
/// fail validation and I/O failures are yielded as errors, with the 1-based line
/// number for parse failures.
///
/// # Examples
///
/// ```
/// use txlog_aggregator::io::reader::read_transactions;
///
/// let data = "export started\n\
/// [2024-01-01 10:00:00] alice withdrew 50\n\
/// [2024-01-01 10:05:00] alice balance inquiry 100\n";
/// let events: Vec<_> = read_transactions(data.as_bytes()).collect();
///
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[0].as_ref().unwrap().line, 2);
/// ```
pub fn read_transactions<R: BufRead>(
    reader: R,
) -> impl Iterator<Item = Result<TransactionEvent, ReadError>> {
    reader
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line_no = idx + 1;
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(ReadError::Io(e))),
            };
            match parse_line(&line) {
                Ok(Some(transaction)) => Some(Ok(TransactionEvent {
                    line: line_no,
                    transaction,
                })),
                Ok(None) => None,
                Err(source) => Some(Err(ReadError::Parse {
                    line: line_no,
                    source,
                })),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{common::error::ParseError, domain::transaction::OperationKind};

    // Helper: collect every item read from an in-memory log.
    fn collect_events(input: &str) -> Vec<Result<TransactionEvent, ReadError>> {
        read_transactions(input.as_bytes()).collect()
    }

    #[test]
    fn reads_transactions_and_skips_noise() {
        let data = "\
# generated by atm-gateway
[2024-01-01 10:00:00] alice withdrew 50

[2024-01-01 10:05:00] alice balance inquiry 100
heartbeat ok
[2024-01-01 10:10:00] alice transferred 20 to bob
";
        let events = collect_events(data);
        assert_eq!(events.len(), 3);

        let events: Vec<TransactionEvent> = events.into_iter().map(Result::unwrap).collect();
        let lines: Vec<usize> = events.iter().map(|e| e.line).collect();
        assert_eq!(lines, [2, 4, 6]);

        let kinds: Vec<OperationKind> = events.iter().map(|e| e.transaction.kind()).collect();
        assert_eq!(
            kinds,
            [
                OperationKind::Withdrawal,
                OperationKind::BalanceInquiry,
                OperationKind::Transfer
            ]
        );
    }

    #[test]
    fn reports_parse_errors_with_line_number() {
        let data = "[2024-01-01 10:00:00] alice withdrew 5\n[2024-01-32 10:00:00] bob withdrew 5\n";
        let mut events = collect_events(data).into_iter();

        assert!(events.next().unwrap().is_ok());
        match events.next().unwrap() {
            Err(ReadError::Parse {
                line: 2,
                source: ParseError::Timestamp { .. },
            }) => {}
            other => panic!("unexpected item: {other:?}"),
        }
        assert!(events.next().is_none());
    }

    #[test]
    fn reports_invalid_utf8_as_io_error() {
        let data: &[u8] = b"[2024-01-01 10:00:00] alice withdrew 5\n\xff\xfe\n";
        let events: Vec<_> = read_transactions(data).collect();
        assert!(matches!(events.last(), Some(Err(ReadError::Io(_)))));
    }
}
