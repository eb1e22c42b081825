//! Structural masking.
//!
//! - **`json`**: [`JsonMasker`] and [`MaskRules`] for untyped JSON
//! - **`traits`**: [`Maskable`] and [`MaskField`] for typed rows
//! - **`containers`**: implementations for `Option`, `Vec`, `Box`, `String`
//!   and `serde_json::Value`
//!
//! The primitive maskers themselves live in `crate::policy`.

mod containers;
mod json;
mod traits;

pub use json::{ArrayHandling, JsonMasker, KeySelector, MaskRules, mask_json};
pub use traits::{MaskField, Maskable};
