//! Masking policies: primitive maskers, kinds and marker types.
//!
//! This module provides:
//!
//! - **Text maskers** (`text`): [`mask_email`], [`mask_name`], [`mask_id`] and
//!   [`mask_ip`], plus the sentinels and mask token they share.
//!
//! - **Policies** (`policies`): [`MaskKind`] for runtime selection and the
//!   [`MaskPolicy`] trait with its zero-sized markers for static selection.
//!
//! - **Display** (`display`): [`MaskedDisplay`] for masking at format time.
//!
//! # Example
//!
//! ```rust
//! use adminmask::{Email, MaskKind, MaskPolicy, mask_ip};
//!
//! assert_eq!(mask_ip(Some("192.168.1.42")), "192.168.***.***");
//! assert_eq!(Email::mask(None), "N/A");
//! assert_eq!(MaskKind::Name.apply(Some("Jane Doe")), "J*** D***");
//! ```

mod display;
pub mod policies;
pub mod text;

pub use display::MaskedDisplay;
pub use policies::{Email, Identifier, IpAddress, MaskKind, MaskPolicy, Name};
pub use text::{
    ANONYMOUS, ID_ELLIPSIS, MASK_TOKEN, MIN_MASKABLE_ID_LEN, NOT_AVAILABLE, mask_email, mask_id,
    mask_ip, mask_name,
};
