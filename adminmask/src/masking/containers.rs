//! `MaskField` and `Maskable` implementations for std and JSON types.

use serde_json::Value;

use super::{
    json::mask_json,
    traits::{MaskField, Maskable},
};
use crate::policy::MaskPolicy;

impl<P: MaskPolicy> MaskField<P> for String {
    fn mask_field(self) -> Self {
        P::mask(Some(&self))
    }
}

impl<P: MaskPolicy> MaskField<P> for Option<String> {
    fn mask_field(self) -> Self {
        Some(P::mask(self.as_deref()))
    }
}

impl<P: MaskPolicy> MaskField<P> for Vec<String> {
    fn mask_field(self) -> Self {
        self.into_iter()
            .map(|value| P::mask(Some(&value)))
            .collect()
    }
}

impl<T: Maskable> Maskable for Option<T> {
    fn masked(self) -> Self {
        self.map(Maskable::masked)
    }
}

impl<T: Maskable> Maskable for Vec<T> {
    fn masked(self) -> Self {
        self.into_iter().map(Maskable::masked).collect()
    }
}

impl<T: Maskable> Maskable for Box<T> {
    fn masked(self) -> Self {
        Box::new((*self).masked())
    }
}

/// Free-form JSON (detail blobs, audit diffs) is masked by key with the default rules.
impl Maskable for Value {
    fn masked(self) -> Self {
        mask_json(&self)
    }
}
