//! maillog - Postfix log correlation and export
//!
//! Reads mail-transfer-agent log text (one line per transfer event) and
//! reconstructs, per queued message, the ordered sequence of events that
//! describe its delivery lifecycle. Records are exported as JSON or CSV.
//!
//! # Architecture
//!
//! - **record**: Core data structures (MessageEvent, MessageRecord)
//! - **parser**: Line tokenizer and per-message correlation engine
//! - **reader**: File, gzip and directory input collaborators
//! - **export**: JSON and CSV exporters

pub mod error;
pub mod export;
pub mod logging;
pub mod parser;
pub mod reader;
pub mod record;

// Re-exports
pub use error::{MaillogError, Result};
