//! Line classifier and tokenizer
//!
//! Turns one raw log line into a `(mail id, event)` pair, or rejects it as
//! not describing a message event. Lines look like
//!
//! ```text
//! Jan  5 10:22:01 mail01 postfix/smtpd[123]: ABC123: from=<a@x.com>, size=100
//! ```
//!
//! The first 15 bytes are the syslog timestamp, byte 16 starts the payload:
//! host name, process tag, colon-terminated queue id, then parameters and
//! free text.

use crate::record::MessageEvent;
use chrono::{Month, NaiveTime};
use std::collections::HashMap;

/// Zero-value timestamp substituted when the prefix does not parse
const ZERO_DATE: &str = "01-01";
const ZERO_TIME: &str = "00:00:00";

/// Classify one line and extract its mail id and event
///
/// Returns `None` for lines that carry no message event: too short, too few
/// payload fields, no colon-terminated identifier field, or the daily
/// `statistics:` summary.
pub(crate) fn tokenize(line: &str) -> Option<(String, MessageEvent)> {
    let payload = line.get(16..)?;
    let fields: Vec<&str> = payload.split_whitespace().collect();

    if fields.len() < 3 {
        return None;
    }

    let id_field = fields[2];
    if !id_field.ends_with(':') || id_field == "statistics:" {
        return None;
    }

    let mut mail_id = id_field.strip_suffix(':').unwrap_or(id_field);
    let (date, time) = parse_timestamp(line.get(..15).unwrap_or(""));
    let mut params = HashMap::new();

    // warning lines carry the queue id one field later
    if id_field == "warning:" {
        if let Some(inner) = fields.get(3).and_then(|f| f.strip_suffix(':')) {
            mail_id = inner;
            params.insert("warning".to_string(), fields[4..].join(" "));
        }
    }

    let mut comment_start = None;
    let mut relationship = None;

    for (i, field) in fields.iter().enumerate().skip(3) {
        if field.contains('=') {
            // Fields with more than one '=' are dropped, not split on the
            // first occurrence.
            let parts: Vec<&str> = field.split('=').collect();
            if parts.len() == 2 {
                params.insert(parts[0].to_string(), trim_param_value(parts[1]).to_string());
            }
        } else if field.starts_with('(') {
            comment_start = Some(i);
            break;
        } else if field.contains("notification:") {
            relationship = fields.get(i + 1);
            break;
        }
    }

    if let Some(start) = comment_start {
        params.insert("comment".to_string(), trim_comment(&fields[start..].join(" ")));
    }

    if let Some(related) = relationship {
        params.insert("relationship".to_string(), related.to_string());
    }

    let event = MessageEvent {
        date,
        time,
        params,
        raw: fields[1..].join(" "),
    };

    Some((mail_id.to_string(), event))
}

/// Host name of a line: the first payload field, if the line has a payload
pub(crate) fn parse_hostname(line: &str) -> Option<&str> {
    line.get(16..)?.split_whitespace().next()
}

/// Parse the 15-byte `Mon D HH:MM:SS` prefix into `(MM-DD, HH:MM:SS)`
///
/// Source logs carry no year. Failures never abort tokenization; they yield
/// the zero timestamp `01-01 00:00:00` instead.
fn parse_timestamp(prefix: &str) -> (String, String) {
    match try_parse_timestamp(prefix) {
        Some(parsed) => parsed,
        None => (ZERO_DATE.to_string(), ZERO_TIME.to_string()),
    }
}

fn try_parse_timestamp(prefix: &str) -> Option<(String, String)> {
    let mut parts = prefix.split_whitespace();

    let month = parts.next()?.parse::<Month>().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if !(1..=31).contains(&day) {
        return None;
    }
    let time = NaiveTime::parse_from_str(parts.next()?, "%H:%M:%S").ok()?;

    Some((
        format!("{:02}-{:02}", month.number_from_month(), day),
        time.format("%H:%M:%S").to_string(),
    ))
}

/// Strip the `<`, `>`, `,` wrapping from a parameter value
///
/// The same trim set applies to every parameter; `from=<a@x.com>,` becomes
/// `a@x.com`.
fn trim_param_value(value: &str) -> &str {
    value.trim_matches(|c| matches!(c, '<' | '>' | ','))
}

/// Trim a joined free-text comment: one leading `(`, then the trailing two
/// characters
///
/// The trailing trim is fixed-width regardless of what the characters are,
/// and clamps to empty when fewer than two remain.
fn trim_comment(joined: &str) -> String {
    let inner = joined.strip_prefix('(').unwrap_or(joined);
    let keep = inner.chars().count().saturating_sub(2);
    inner.chars().take(keep).collect()
}
