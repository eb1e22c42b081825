//! PII masking and tabular export for the admin dashboard.
//!
//! This crate separates:
//! - **Primitive maskers**: pure functions turning one email, name, identifier
//!   or IPv4 address into a recognisable but redacted display string.
//! - **Structural masking**: [`JsonMasker`] walks arbitrary JSON and masks
//!   leaves under sensitive keys; [`Maskable`] (derivable) does the same for
//!   typed rows.
//! - **Mask mode**: [`MaskMode`], the persisted on/off switch every PII-rendering
//!   view consults.
//! - **Export**: CSV and JSON encoders plus a [`FileSink`] capability that the
//!   host (browser bridge, CLI, server) supplies.
//!
//! What this crate does not do:
//! - fetch records from anywhere
//! - decide which records a caller may see
//!
//! # Example
//!
//! ```rust
//! use adminmask::{mask_email, mask_json};
//! use serde_json::json;
//!
//! assert_eq!(mask_email(Some("test@example.com")), "t***t@e***.com");
//!
//! let masked = mask_json(&json!({"user_id": "5f0c2a9e-77b1", "plan": "pro"}));
//! assert_eq!(masked, json!({"user_id": "5f0c...77b1", "plan": "pro"}));
//! ```

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use adminmask_derive::Maskable;

#[allow(unused_extern_crates)]
extern crate self as adminmask;

// Module declarations
mod atomic;
mod error;
pub mod export;
mod masking;
pub mod policy;
pub mod store;

pub use error::{ExportError, StoreError};
// Re-exports from export module
pub use export::{
    DirectorySink, ExportFormat, ExportOutcome, FileSink, MemorySink, Record, SavedFile,
    date_stamp, export_to_csv, export_to_json, records_from, stamped_filename,
};
// Re-exports from masking module
pub use masking::{
    ArrayHandling, JsonMasker, KeySelector, MaskField, MaskRules, Maskable, mask_json,
};
// Re-exports from policy module
pub use policy::{
    ANONYMOUS, Email, ID_ELLIPSIS, Identifier, IpAddress, MASK_TOKEN, MIN_MASKABLE_ID_LEN,
    MaskKind, MaskPolicy, MaskedDisplay, NOT_AVAILABLE, Name, mask_email, mask_id, mask_ip,
    mask_name,
};
// Re-exports from store module
pub use store::{FileStore, KeyValueStore, MASK_STORAGE_KEY, MaskMode, MemoryStore};
