//! Core traits for masking typed rows.
//!
//! - [`MaskField`]: policy-aware masking of a single field value
//! - [`Maskable`]: user-facing `.masked()` on whole rows

use crate::policy::MaskPolicy;

/// A field value that can be masked with policy `P`.
///
/// `String`, `Option<String>` and `Vec<String>` have built-in implementations
/// for every policy. A missing `Option<String>` becomes `Some(sentinel)`, so a
/// masked row always has something to show.
pub trait MaskField<P: MaskPolicy>: Sized {
    #[must_use]
    fn mask_field(self) -> Self;
}

/// A row type whose sensitive fields can be masked.
///
/// Usually derived with `#[derive(Maskable)]`.
pub trait Maskable: Sized {
    /// Returns `self` with every sensitive field masked.
    #[must_use]
    fn masked(self) -> Self;

    /// Masks only when `enabled` is set, typically from `MaskMode::is_masked`.
    #[must_use]
    fn masked_if(self, enabled: bool) -> Self {
        if enabled { self.masked() } else { self }
    }
}
