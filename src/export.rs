//! JSON and CSV exporters
//!
//! Both exporters take the finished record set and a writer; they never
//! reorder or mutate the records.

use crate::record::MessageRecord;
use crate::{MaillogError, Result};
use std::io::Write;

/// Write the records as a pretty-printed JSON array
///
/// Two-space indentation, trailing newline, and no HTML escaping: `<`, `>`
/// and `&` in addresses come through verbatim. `sort_key` is not part of the
/// serialized form.
pub fn export_json<W: Write>(records: &[MessageRecord], mut output: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut output, records)?;
    output.write_all(b"\n").map_err(MaillogError::ExportIo)?;

    Ok(())
}

/// Write the records as CSV, one row per event
///
/// The `Sequence` column counts events within each record, starting at 1.
pub fn export_csv<W: Write>(records: &[MessageRecord], output: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(output);

    writer.write_record([
        "Hostname",
        "MailID",
        "Sequence",
        "EventDate",
        "EventTime",
        "From",
        "To",
        "Status",
        "RawMessage",
    ])?;

    for record in records {
        for (i, event) in record.messages.iter().enumerate() {
            let sequence = (i + 1).to_string();

            writer.write_record([
                record.hostname.as_str(),
                record.mail_id.as_str(),
                sequence.as_str(),
                event.date.as_str(),
                event.time.as_str(),
                record.from.as_str(),
                record.to.as_str(),
                record.status.as_str(),
                event.raw.as_str(),
            ])?;
        }
    }

    writer.flush().map_err(MaillogError::ExportIo)?;

    Ok(())
}
