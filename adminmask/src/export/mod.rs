//! Tabular export to CSV and JSON.
//!
//! The encoders in [`csv`] and [`json`] are pure. [`export_to_csv`] and
//! [`export_to_json`] add the dashboard's behaviour around them: nothing is
//! saved for an empty input (a warning is logged instead), and the encoded
//! file is handed to a [`FileSink`] under `<base>.<ext>`.
//!
//! ```rust
//! use adminmask::{ExportOutcome, MemorySink, export_to_csv, records_from};
//! use serde_json::json;
//!
//! let sink = MemorySink::new();
//! let rows = records_from(&[json!({"a": 1, "b": "x,y"})]).unwrap();
//! let outcome = export_to_csv(&sink, &rows, "users-2026-10-18").unwrap();
//!
//! assert_eq!(outcome, ExportOutcome::Saved { filename: "users-2026-10-18.csv".into() });
//! assert_eq!(sink.files()[0].text(), "a,b\n1,\"x,y\"");
//! ```

pub mod csv;
mod filename;
pub mod json;
mod number;
mod sink;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

pub use filename::{date_stamp, date_stamp_for, stamped_filename};
pub use sink::{DirectorySink, FileSink, MemorySink, SavedFile};

use crate::error::ExportError;

/// One flat row: column name to value, in column order.
pub type Record = Map<String, Value>;

/// The two export formats the dashboard offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv;charset=utf-8;",
            ExportFormat::Json => "application/json",
        }
    }

    /// `<base>.<ext>`
    pub fn filename(self, base: &str) -> String {
        format!("{base}.{}", self.extension())
    }
}

/// What an export call did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExportOutcome {
    Saved { filename: String },
    /// The input was empty; nothing was saved.
    Skipped,
}

/// Converts serializable rows into records.
pub fn records_from<T: Serialize>(rows: &[T]) -> Result<Vec<Record>, ExportError> {
    rows.iter()
        .enumerate()
        .map(|(index, row)| -> Result<Record, ExportError> {
            match serde_json::to_value(row)? {
                Value::Object(record) => Ok(record),
                _ => Err(ExportError::NotARecord { index }),
            }
        })
        .collect()
}

/// Encodes `records` as CSV and saves `<base_name>.csv`.
pub fn export_to_csv<S: FileSink + ?Sized>(
    sink: &S,
    records: &[Record],
    base_name: &str,
) -> Result<ExportOutcome, ExportError> {
    let Some(content) = csv::encode(records) else {
        warn!(format = "csv", "No data to export");
        return Ok(ExportOutcome::Skipped);
    };
    save(sink, ExportFormat::Csv, &content, base_name)
}

/// Encodes `items` as indented JSON and saves `<base_name>.json`.
pub fn export_to_json<S: FileSink + ?Sized, T: Serialize>(
    sink: &S,
    items: &[T],
    base_name: &str,
) -> Result<ExportOutcome, ExportError> {
    let Some(content) = json::encode(items)? else {
        warn!(format = "json", "No data to export");
        return Ok(ExportOutcome::Skipped);
    };
    save(sink, ExportFormat::Json, &content, base_name)
}

fn save<S: FileSink + ?Sized>(
    sink: &S,
    format: ExportFormat,
    content: &str,
    base_name: &str,
) -> Result<ExportOutcome, ExportError> {
    let filename = format.filename(base_name);
    sink.save_file(content.as_bytes(), &filename, format.mime_type())?;
    info!(filename = %filename, bytes = content.len(), "export saved");
    Ok(ExportOutcome::Saved { filename })
}
