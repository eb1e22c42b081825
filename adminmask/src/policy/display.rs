//! Formatting wrapper that masks a borrowed value on output.

use std::{fmt, marker::PhantomData};

use super::policies::MaskPolicy;

/// Renders a raw value through policy `P` when formatted.
///
/// Useful for log fields: `tracing::info!(email = %MaskedDisplay::<Email>::new(raw))`.
/// `Debug` quotes the masked text like a string.
pub struct MaskedDisplay<'a, P> {
    value: Option<&'a str>,
    _policy: PhantomData<P>,
}

impl<'a, P: MaskPolicy> MaskedDisplay<'a, P> {
    pub fn new(value: Option<&'a str>) -> Self {
        Self {
            value,
            _policy: PhantomData,
        }
    }
}

impl<P: MaskPolicy> fmt::Display for MaskedDisplay<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&P::mask(self.value))
    }
}

impl<P: MaskPolicy> fmt::Debug for MaskedDisplay<'_, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&P::mask(self.value), f)
    }
}

#[cfg(test)]
mod tests {
    use super::MaskedDisplay;
    use crate::policy::{Email, IpAddress};

    #[test]
    fn display_and_debug_show_masked_text() {
        let email = MaskedDisplay::<Email>::new(Some("jane@example.com"));
        assert_eq!(email.to_string(), "j***e@e***.com");
        assert_eq!(format!("{email:?}"), "\"j***e@e***.com\"");

        let missing = MaskedDisplay::<IpAddress>::new(None);
        assert_eq!(missing.to_string(), "N/A");
    }
}
