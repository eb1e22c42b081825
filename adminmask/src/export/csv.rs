//! CSV encoding of flat records.
//!
//! The header is the key list of the first record; later records are read
//! through that header, so missing keys give empty cells and extra keys are
//! dropped. Cells containing `,` or `"` are quoted with inner quotes doubled.
//! Floats print as the dashboard showed them (`3.0` as `3`, `1.5e-6` as
//! `0.0000015`). Lines are joined with `\n` and there is no trailing newline.

use std::borrow::Cow;

use serde_json::{Number, Value};

use super::{Record, number::float_text};

/// Encodes `records`, or returns `None` when there is nothing to encode.
#[must_use]
pub fn encode(records: &[Record]) -> Option<String> {
    let first = records.first()?;
    let headers: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(
        headers
            .iter()
            .map(|header| quote(Cow::Borrowed(*header)))
            .collect::<Vec<_>>()
            .join(","),
    );
    for record in records {
        let cells: Vec<Cow<'_, str>> = headers
            .iter()
            .map(|header| quote(cell_text(record.get(*header))))
            .collect();
        lines.push(cells.join(","));
    }
    Some(lines.join("\n"))
}

fn cell_text(value: Option<&Value>) -> Cow<'_, str> {
    match value {
        None | Some(Value::Null) => Cow::Borrowed(""),
        Some(Value::String(text)) => Cow::Borrowed(text),
        Some(Value::Bool(flag)) => Cow::Owned(flag.to_string()),
        Some(Value::Number(number)) => Cow::Owned(number_text(number)),
        Some(compound) => Cow::Owned(compound.to_string()),
    }
}

fn number_text(number: &Number) -> String {
    match number.as_f64() {
        Some(value) if number.is_f64() => float_text(value),
        _ => number.to_string(),
    }
}

fn quote(text: Cow<'_, str>) -> Cow<'_, str> {
    if text.contains([',', '"']) {
        Cow::Owned(format!("\"{}\"", text.replace('"', "\"\"")))
    } else {
        text
    }
}
