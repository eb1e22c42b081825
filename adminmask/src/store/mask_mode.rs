//! The persisted mask-mode switch.

use std::{
    borrow::Cow,
    sync::atomic::{AtomicBool, Ordering},
};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::backend::{KeyValueStore, MemoryStore};
use crate::{error::StoreError, policy::MaskPolicy};

/// Storage key the dashboard has always used for mask mode.
pub const MASK_STORAGE_KEY: &str = "admin-mask-storage";

const PERSISTED_VERSION: u32 = 0;

/// `{"state":{"isMasked":true},"version":0}`, the envelope written by the
/// browser dashboard, kept so existing state rehydrates.
#[derive(Debug, Serialize, Deserialize)]
struct PersistedMaskMode {
    state: PersistedState,
    #[serde(default)]
    version: u32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedState {
    is_masked: bool,
}

/// Whether PII is shown masked. Masked by default.
///
/// One instance is created at startup and shared (e.g. behind an `Arc`) with
/// every view that renders PII. Reads see the latest write immediately; each
/// write is persisted to the backend before returning.
#[derive(Debug)]
pub struct MaskMode<S> {
    masked: AtomicBool,
    backend: S,
    key: String,
}

impl MaskMode<MemoryStore> {
    /// A masked, non-persistent mode.
    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new())
    }
}

impl<S: KeyValueStore> MaskMode<S> {
    /// Rehydrates from [`MASK_STORAGE_KEY`].
    pub fn load(backend: S) -> Self {
        Self::load_with_key(backend, MASK_STORAGE_KEY)
    }

    /// Rehydrates from `key`.
    ///
    /// Missing state means masked. Unreadable state is logged and also means
    /// masked; it is overwritten on the next change.
    pub fn load_with_key(backend: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let masked = match backend.load(&key) {
            Ok(Some(raw)) => match serde_json::from_str::<PersistedMaskMode>(&raw) {
                Ok(persisted) => persisted.state.is_masked,
                Err(err) => {
                    warn!(key = %key, error = %err, "discarding unreadable mask mode state");
                    true
                }
            },
            Ok(None) => true,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to load mask mode state");
                true
            }
        };

        Self {
            masked: AtomicBool::new(masked),
            backend,
            key,
        }
    }

    pub fn is_masked(&self) -> bool {
        self.masked.load(Ordering::SeqCst)
    }

    pub fn set_masked(&self, masked: bool) -> Result<(), StoreError> {
        self.masked.store(masked, Ordering::SeqCst);
        info!(masked, "mask mode set");
        self.persist(masked)
    }

    /// Flips the mode and returns the new value.
    pub fn toggle(&self) -> Result<bool, StoreError> {
        let masked = !self.masked.fetch_xor(true, Ordering::SeqCst);
        info!(masked, "mask mode toggled");
        self.persist(masked)?;
        Ok(masked)
    }

    /// Renders `value` the way a PII column does: masked with `P` when the mode
    /// is on, raw otherwise. A missing value shows `P`'s sentinel either way.
    pub fn display<'a, P: MaskPolicy>(&self, value: Option<&'a str>) -> Cow<'a, str> {
        if self.is_masked() {
            return Cow::Owned(P::mask(value));
        }
        match value {
            Some(raw) if !raw.is_empty() => Cow::Borrowed(raw),
            _ => Cow::Borrowed(P::KIND.sentinel()),
        }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    fn persist(&self, masked: bool) -> Result<(), StoreError> {
        let persisted = PersistedMaskMode {
            state: PersistedState { is_masked: masked },
            version: PERSISTED_VERSION,
        };
        let raw = serde_json::to_string(&persisted)?;
        self.backend.save(&self.key, &raw).inspect_err(|err| {
            warn!(key = %self.key, error = %err, "failed to persist mask mode");
        })
    }
}
