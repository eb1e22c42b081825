//! Mask-mode state and its persistence.
//!
//! - **`backend`**: the [`KeyValueStore`] capability with in-memory and
//!   file-backed implementations
//! - **`mask_mode`**: [`MaskMode`], the shared switch read by every PII view

mod backend;
mod mask_mode;

pub use backend::{FileStore, KeyValueStore, MemoryStore};
pub use mask_mode::{MASK_STORAGE_KEY, MaskMode};
