//! Input collaborators: files, gzip files, directories
//!
//! Everything here feeds the correlation engine a line stream. Files ending
//! in `.gz` are decompressed transparently. Directory scans are
//! non-recursive, skip files that fail to read, and sort the merged records
//! by their sort key for a deterministic order across files.

use crate::parser;
use crate::record::MessageRecord;
use crate::{MaillogError, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Whether the input path names a directory
///
/// Fails when the path cannot be inspected at all (missing, permission).
pub fn is_directory(path: &Path) -> Result<bool> {
    let meta = fs::metadata(path).map_err(|source| MaillogError::InvalidPath {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(meta.is_dir())
}

/// Parse one log file, decompressing it when the name ends in `.gz`
pub fn read_from_file(path: &Path) -> Result<Vec<MessageRecord>> {
    let read_err = |source| MaillogError::Read {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(read_err)?;

    let records = if path.extension().is_some_and(|ext| ext == "gz") {
        parser::parse(BufReader::new(GzDecoder::new(file)))
    } else {
        parser::parse(BufReader::new(file))
    }
    .map_err(read_err)?;

    tracing::debug!(path = %path.display(), records = records.len(), "parsed log file");

    Ok(records)
}

/// Parse every file directly inside a directory and merge the results
///
/// Subdirectories are ignored. A file that fails to open or parse is
/// reported and skipped; the scan continues. The merged records are sorted
/// ascending by `sort_key` so the overall order does not depend on
/// enumeration order.
pub fn read_from_directory(dir: &Path) -> Result<Vec<MessageRecord>> {
    let entries = fs::read_dir(dir).map_err(|source| MaillogError::Read {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut all = Vec::new();

    for entry in entries {
        let entry = entry.map_err(|source| MaillogError::Read {
            path: dir.to_path_buf(),
            source,
        })?;

        let path = entry.path();
        if path.is_dir() {
            continue;
        }

        match read_from_file(&path) {
            Ok(records) => all.extend(records),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "skipping unreadable log file");
            }
        }
    }

    all.sort_by(|a, b| a.sort_key.cmp(&b.sort_key));

    Ok(all)
}
