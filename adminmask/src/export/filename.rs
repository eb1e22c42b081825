//! Date-stamped export filenames.

use chrono::{Local, NaiveDate};

const DATE_STAMP_FORMAT: &str = "%Y-%m-%d";

/// Today's local date as `YYYY-MM-DD`.
pub fn date_stamp() -> String {
    date_stamp_for(Local::now().date_naive())
}

pub fn date_stamp_for(date: NaiveDate) -> String {
    date.format(DATE_STAMP_FORMAT).to_string()
}

/// `<prefix>-<YYYY-MM-DD>`, e.g. `users-2026-10-18`.
pub fn stamped_filename(prefix: &str) -> String {
    format!("{prefix}-{}", date_stamp())
}
