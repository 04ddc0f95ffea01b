//! Per-message correlation engine
//!
//! Consumes a stream of log lines, tokenizes each one, and folds the events
//! into one record per queue id. Malformed lines are data, not errors: they
//! are skipped and the stream keeps going. Only a failed read from the
//! underlying stream surfaces as an error.

mod tokenize;

use crate::record::MessageRecord;
use std::collections::HashMap;
use std::io::{self, BufRead};

/// Correlate a line stream into one record per mail id
///
/// Records come out in first-seen order. The host name is captured once per
/// call, from the first line long enough to carry one, and stamped on every
/// record this call creates; it is never re-derived per line.
///
/// An empty or all-unrecognized stream yields an empty set, which is a
/// normal outcome.
pub fn parse<R: BufRead>(input: R) -> io::Result<Vec<MessageRecord>> {
    let mut records: Vec<MessageRecord> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut hostname = String::new();

    for line in input.lines() {
        let line = line?;

        if line.is_empty() {
            continue;
        }

        if hostname.is_empty() {
            if let Some(host) = tokenize::parse_hostname(&line) {
                hostname = host.to_string();
            }
        }

        let Some((mail_id, event)) = tokenize::tokenize(&line) else {
            continue;
        };

        let idx = match index.get(&mail_id) {
            Some(&idx) => idx,
            None => {
                records.push(MessageRecord::new(mail_id.clone(), hostname.clone()));
                index.insert(mail_id, records.len() - 1);
                records.len() - 1
            }
        };

        records[idx].observe(event);
    }

    tracing::debug!(records = records.len(), "correlated line stream");

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse_str(input: &str) -> Vec<MessageRecord> {
        parse(Cursor::new(input)).unwrap()
    }

    #[test]
    fn correlates_two_lines_into_one_record() {
        let input = "\
Jan  5 10:22:01 mail01 postfix/smtpd[123]: ABC123: from=<a@x.com>, size=100
Jan  5 10:22:05 mail01 postfix/smtpd[123]: ABC123: to=<b@y.com>, status=sent
";
        let records = parse_str(input);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.mail_id, "ABC123");
        assert_eq!(record.hostname, "mail01");
        assert_eq!(record.from, "a@x.com");
        assert_eq!(record.to, "b@y.com");
        assert_eq!(record.status, "sent");
        assert_eq!(record.messages.len(), 2);
    }

    #[test]
    fn records_come_out_in_first_seen_order() {
        let input = "\
Jan  5 10:22:01 mail01 postfix/smtpd[123]: BBB222: from=<a@x.com>,
Jan  5 10:22:02 mail01 postfix/smtpd[123]: AAA111: from=<c@z.com>,
Jan  5 10:22:03 mail01 postfix/smtpd[123]: BBB222: status=sent
";
        let records = parse_str(input);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].mail_id, "BBB222");
        assert_eq!(records[1].mail_id, "AAA111");
        assert_eq!(records[0].messages.len(), 2);
    }

    #[test]
    fn hostname_is_captured_once_per_call() {
        let input = "\
Jan  5 10:22:01 mail01 postfix/smtpd[123]: ABC123: from=<a@x.com>,
Jan  5 10:22:02 mail02 postfix/smtpd[456]: DEF456: from=<c@z.com>,
";
        let records = parse_str(input);

        assert_eq!(records[0].hostname, "mail01");
        assert_eq!(records[1].hostname, "mail01");
    }

    #[test]
    fn hostname_capture_skips_lines_without_payload() {
        let input = "\
noise
Jan  5 10:22:01 mail01 postfix/smtpd[123]: ABC123: from=<a@x.com>,
";
        let records = parse_str(input);

        assert_eq!(records[0].hostname, "mail01");
    }

    #[test]
    fn blank_and_malformed_lines_are_skipped() {
        let input = "\

Jan  5 10:22:01 mail01 postfix/smtpd[123]: statistics: max cache size 3
Jan  5 10:22:02 mail01 postfix/smtpd[123]: ABC123: from=<a@x.com>,
short

";
        let records = parse_str(input);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].mail_id, "ABC123");
    }

    #[test]
    fn empty_stream_is_a_normal_outcome() {
        assert!(parse_str("").is_empty());
        assert!(parse_str("\n\n\n").is_empty());
    }

    #[test]
    fn warning_lines_attach_to_their_message() {
        let input = "\
Jan  5 10:22:01 mail01 postfix/smtpd[123]: ABC123: from=<a@x.com>,
Jan  5 10:22:02 mail01 postfix/qmgr[1]: warning: ABC123: queue file size limit exceeded
";
        let records = parse_str(input);

        assert_eq!(records.len(), 1);
        assert_eq!(
            records[0].messages[1].params["warning"],
            "queue file size limit exceeded"
        );
    }
}
