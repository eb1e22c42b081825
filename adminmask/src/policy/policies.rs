//! Mask kinds and policy markers.
//!
//! This module provides:
//!
//! - **[`MaskKind`]**: the runtime enumeration of maskers, used where the choice
//!   is data (JSON key rules, configuration files).
//!
//! - **[`MaskPolicy`]**: associates a zero-sized marker type (`Email`, `Name`,
//!   `Identifier`, `IpAddress`) with a kind, used where the choice is static
//!   (derived row types, display helpers).
//!
//! # Custom Policies
//!
//! ```rust
//! use adminmask::{MaskKind, MaskPolicy};
//!
//! #[derive(Clone, Copy)]
//! struct DeviceId;
//!
//! impl MaskPolicy for DeviceId {
//!     const KIND: MaskKind = MaskKind::Identifier;
//! }
//!
//! assert_eq!(DeviceId::mask(Some("A1B2C3D4E5F6")), "A1B2...E5F6");
//! ```

use serde::{Deserialize, Serialize};

use super::text::{ANONYMOUS, NOT_AVAILABLE, mask_email, mask_id, mask_ip, mask_name};

// =============================================================================
// MaskKind
// =============================================================================

/// The primitive masker to apply to a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaskKind {
    Email,
    Name,
    Identifier,
    IpAddress,
}

impl MaskKind {
    /// Applies the corresponding primitive masker.
    #[must_use]
    pub fn apply(self, value: Option<&str>) -> String {
        match self {
            MaskKind::Email => mask_email(value),
            MaskKind::Name => mask_name(value),
            MaskKind::Identifier => mask_id(value),
            MaskKind::IpAddress => mask_ip(value),
        }
    }

    /// The string shown when the value is missing.
    #[must_use]
    pub fn sentinel(self) -> &'static str {
        match self {
            MaskKind::Name => ANONYMOUS,
            MaskKind::Email | MaskKind::Identifier | MaskKind::IpAddress => NOT_AVAILABLE,
        }
    }
}

// =============================================================================
// MaskPolicy trait
// =============================================================================

/// Associates a policy marker type with a [`MaskKind`].
pub trait MaskPolicy {
    /// The masker this policy applies.
    const KIND: MaskKind;

    /// Masks `value` with this policy.
    #[must_use]
    fn mask(value: Option<&str>) -> String {
        Self::KIND.apply(value)
    }
}

// =============================================================================
// Marker types
// =============================================================================

/// Policy marker for email addresses (`t***t@e***.com`).
#[derive(Clone, Copy, Debug)]
pub struct Email;

impl MaskPolicy for Email {
    const KIND: MaskKind = MaskKind::Email;
}

/// Policy marker for display names (`J*** D***`).
#[derive(Clone, Copy, Debug)]
pub struct Name;

impl MaskPolicy for Name {
    const KIND: MaskKind = MaskKind::Name;
}

/// Policy marker for user, record and other opaque identifiers (`5f0c...1c55`).
///
/// Also the catch-all for passwords, tokens and secrets found by key name.
#[derive(Clone, Copy, Debug)]
pub struct Identifier;

impl MaskPolicy for Identifier {
    const KIND: MaskKind = MaskKind::Identifier;
}

/// Policy marker for IPv4 addresses (`192.168.***.***`).
#[derive(Clone, Copy, Debug)]
pub struct IpAddress;

impl MaskPolicy for IpAddress {
    const KIND: MaskKind = MaskKind::IpAddress;
}
