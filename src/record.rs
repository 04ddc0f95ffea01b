//! Message record data structures
//!
//! Represents one queued message and the log events attributed to it.
//! Field names match the wire schema consumed by existing tooling, including
//! the historical `paramaters` misspelling.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One parsed log line attributed to a message
///
/// Immutable once built by the tokenizer; owned by exactly one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Calendar date of the line, `MM-DD` (source logs carry no year)
    #[serde(rename = "event_date")]
    pub date: String,

    /// Time of day of the line, `HH:MM:SS`
    #[serde(rename = "event_time")]
    pub time: String,

    /// `key=value` parameters plus the synthesized `warning`, `comment`
    /// and `relationship` pseudo-parameters
    #[serde(rename = "paramaters")]
    pub params: HashMap<String, String>,

    /// Line content minus the leading timestamp and host name, verbatim
    #[serde(rename = "raw_message")]
    pub raw: String,
}

/// The aggregate for one message identifier
///
/// Created on first sight of a queue id, grown by every subsequent line
/// carrying the same id, read-only once the input stream ends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageRecord {
    /// Ordering key: first event's date+time digits followed by the mail id.
    /// Used only to sort merged output, never for correlation, and never
    /// serialized.
    #[serde(skip)]
    pub sort_key: String,

    /// Queue identifier the log lines were correlated on
    pub mail_id: String,

    /// Host name captured once per parse call, shared by all records of
    /// that call
    pub hostname: String,

    /// First `from` parameter observed
    pub from: String,

    /// First recipient observed (`orig_to` preferred over `to`)
    pub to: String,

    /// First terminal `status` parameter observed
    pub status: String,

    /// Events in the order their lines appeared
    pub messages: Vec<MessageEvent>,
}

impl MessageRecord {
    /// Create an empty record for a newly seen mail id
    pub fn new(mail_id: impl Into<String>, hostname: impl Into<String>) -> Self {
        Self {
            sort_key: String::new(),
            mail_id: mail_id.into(),
            hostname: hostname.into(),
            from: String::new(),
            to: String::new(),
            status: String::new(),
            messages: Vec::new(),
        }
    }

    /// Append an event and fold it into the summary fields
    ///
    /// `sort_key`, `from`, `to` and `status` are first-write-wins: once a
    /// non-empty value lands it is never overwritten by later events.
    pub fn observe(&mut self, event: MessageEvent) {
        if self.sort_key.is_empty() {
            let mut key = event.date.replace('-', "");
            key.push_str(&event.time.replace(':', ""));
            key.push_str(&self.mail_id);
            self.sort_key = key;
        }

        if self.from.is_empty() {
            if let Some(from) = event.params.get("from") {
                self.from = from.clone();
            }
        }

        if self.to.is_empty() {
            if let Some(to) = event.params.get("orig_to").or_else(|| event.params.get("to")) {
                self.to = to.clone();
            }
        }

        if self.status.is_empty() {
            if let Some(status) = event.params.get("status") {
                self.status = status.clone();
            }
        }

        self.messages.push(event);
    }
}
