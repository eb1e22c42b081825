//! Pretty JSON encoding with two-space indentation.
//!
//! Floats are written as the dashboard wrote them (`100.0` as `100`,
//! `0.00001` as `0.00001`), so files match what `JSON.stringify` produced.

use serde::Serialize;
use serde_json::Serializer;

use super::number::DashboardFormatter;
use crate::error::ExportError;

/// Encodes `items` as an indented JSON array, or returns `None` when empty.
pub fn encode<T: Serialize>(items: &[T]) -> Result<Option<String>, ExportError> {
    if items.is_empty() {
        return Ok(None);
    }

    let mut buffer = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buffer, DashboardFormatter::new());
    items.serialize(&mut serializer)?;
    // serde_json only emits UTF-8.
    Ok(Some(String::from_utf8_lossy(&buffer).into_owned()))
}
