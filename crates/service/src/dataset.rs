//! CSV dataset source.
//!
//! Headers are validated up front; records are then streamed one at a time
//! so memory stays bounded by the consumer's channel, not the file size.

use std::fs::File;
use std::path::Path;

use healthstat_core::{KNOWN_COLUMNS, REQUIRED_COLUMNS, RawRow, canonical_column};
use tokio::sync::mpsc;

use crate::ServiceError;

/// One record pulled from the source.
#[derive(Debug)]
pub(crate) enum SourceItem {
    Row { line: u64, row: RawRow },
    /// The record itself could not be decoded (e.g. invalid UTF-8).
    Unreadable { line: u64, reason: String },
}

/// An opened CSV file whose header carries every required column.
pub(crate) struct CsvSource {
    reader: csv::Reader<File>,
    headers: Vec<String>,
}

impl CsvSource {
    /// Open `path` and validate its header row.
    pub(crate) fn open(path: &Path) -> Result<Self, ServiceError> {
        let dataset_err = |e: csv::Error| ServiceError::Dataset(format!("{}: {e}", path.display()));

        let mut reader =
            csv::ReaderBuilder::new().flexible(true).from_path(path).map_err(dataset_err)?;
        let headers: Vec<String> =
            reader.headers().map_err(dataset_err)?.iter().map(canonical_column).collect();

        let missing: Vec<&str> = REQUIRED_COLUMNS
            .iter()
            .copied()
            .filter(|required| !headers.iter().any(|h| h.as_str() == *required))
            .collect();
        if !missing.is_empty() {
            return Err(ServiceError::Dataset(format!(
                "{}: missing required column(s): {}",
                path.display(),
                missing.join(", ")
            )));
        }

        let ignored: Vec<&str> = headers
            .iter()
            .map(String::as_str)
            .filter(|h| !KNOWN_COLUMNS.contains(h))
            .collect();
        if !ignored.is_empty() {
            tracing::debug!(?ignored, "ignoring unknown columns");
        }

        Ok(Self { reader, headers })
    }

    /// Push every record into `tx` until the file ends or the receiver goes away.
    ///
    /// Blocking: run on a blocking thread. An I/O failure mid-file is fatal;
    /// a record that cannot be decoded is forwarded as [`SourceItem::Unreadable`].
    pub(crate) fn stream(self, tx: &mpsc::Sender<SourceItem>) -> Result<(), ServiceError> {
        let Self { mut reader, headers } = self;
        for result in reader.records() {
            let item = match result {
                Ok(record) => SourceItem::Row {
                    line: record.position().map_or(0, csv::Position::line),
                    row: RawRow::from_pairs(headers.iter().zip(record.iter())),
                },
                Err(e) if matches!(e.kind(), csv::ErrorKind::Io(_)) => {
                    return Err(ServiceError::Dataset(e.to_string()));
                },
                Err(e) => SourceItem::Unreadable {
                    line: e.position().map_or(0, csv::Position::line),
                    reason: e.to_string(),
                },
            };
            if tx.blocking_send(item).is_err() {
                tracing::debug!("loader stopped consuming; closing dataset");
                break;
            }
        }
        Ok(())
    }
}
