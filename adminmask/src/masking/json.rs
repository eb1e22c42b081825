//! Key-driven masking of arbitrary JSON.
//!
//! The masker never inspects values to decide sensitivity: a leaf is masked
//! only because the key it sits under is listed in [`MaskRules`]. The input is
//! never mutated; a fresh value with the same keys, in the same order, is
//! returned.

use std::{collections::BTreeSet, sync::LazyLock};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{export::Record, policy::MaskKind};

const DEFAULT_SENSITIVE_KEYS: &[&str] = &[
    "email",
    "ip",
    "ip_address",
    "phone",
    "password",
    "token",
    "secret",
    "user_id",
    "record_id",
];

static DEFAULT_MASKER: LazyLock<JsonMasker> = LazyLock::new(JsonMasker::default);

/// How sequences are treated during traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrayHandling {
    /// Walk each element and keep the sequence a sequence.
    #[default]
    ElementWise,
    /// Turn the sequence into a mapping keyed `"0"`, `"1"`, ... before walking,
    /// matching what the legacy dashboard produced.
    IndexedObject,
}

/// Chooses a masker when a sensitive key contains `contains` (case-insensitive).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeySelector {
    pub contains: String,
    pub kind: MaskKind,
}

impl KeySelector {
    pub fn new(contains: impl Into<String>, kind: MaskKind) -> Self {
        Self {
            contains: contains.into(),
            kind,
        }
    }
}

/// Which keys are sensitive and which masker each one gets.
///
/// Selectors are tried in order and the first match wins; sensitive keys no
/// selector matches use `fallback`. Missing fields take their defaults when
/// deserialized, so a rules file only needs to state what it changes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaskRules {
    pub sensitive_keys: BTreeSet<String>,
    pub selectors: Vec<KeySelector>,
    pub fallback: MaskKind,
    pub arrays: ArrayHandling,
}

impl Default for MaskRules {
    fn default() -> Self {
        Self {
            sensitive_keys: DEFAULT_SENSITIVE_KEYS
                .iter()
                .map(|key| (*key).to_string())
                .collect(),
            selectors: vec![
                KeySelector::new("email", MaskKind::Email),
                KeySelector::new("ip", MaskKind::IpAddress),
            ],
            fallback: MaskKind::Identifier,
            arrays: ArrayHandling::default(),
        }
    }
}

impl MaskRules {
    /// Adds a key to the sensitive set.
    #[must_use]
    pub fn with_sensitive_key(mut self, key: impl Into<String>) -> Self {
        self.sensitive_keys.insert(key.into().to_lowercase());
        self
    }

    /// Appends a selector after the existing ones.
    #[must_use]
    pub fn with_selector(mut self, contains: impl Into<String>, kind: MaskKind) -> Self {
        self.selectors.push(KeySelector::new(contains, kind));
        self
    }

    #[must_use]
    pub fn with_array_handling(mut self, arrays: ArrayHandling) -> Self {
        self.arrays = arrays;
        self
    }

    pub fn is_sensitive(&self, key: &str) -> bool {
        self.sensitive_keys.contains(&key.to_lowercase())
    }

    /// The masker for a sensitive key.
    pub fn kind_for(&self, key: &str) -> MaskKind {
        let key = key.to_lowercase();
        self.selectors
            .iter()
            .find(|selector| key.contains(&selector.contains))
            .map_or(self.fallback, |selector| selector.kind)
    }

    fn normalized(mut self) -> Self {
        self.sensitive_keys = self
            .sensitive_keys
            .into_iter()
            .map(|key| key.to_lowercase())
            .collect();
        for selector in &mut self.selectors {
            selector.contains = selector.contains.to_lowercase();
        }
        self
    }
}

/// Masks JSON values according to a fixed set of [`MaskRules`].
#[derive(Clone, Debug, Default)]
pub struct JsonMasker {
    rules: MaskRules,
}

impl JsonMasker {
    pub fn new(rules: MaskRules) -> Self {
        Self {
            rules: rules.normalized(),
        }
    }

    pub fn rules(&self) -> &MaskRules {
        &self.rules
    }

    /// Returns a masked copy of `value`.
    ///
    /// Scalars and `null` come back unchanged.
    #[must_use]
    pub fn mask(&self, value: &Value) -> Value {
        match value {
            Value::Object(map) => Value::Object(self.mask_object(map)),
            Value::Array(items) => self.mask_array(items),
            _ => value.clone(),
        }
    }

    /// Masks each record of an export or table page.
    #[must_use]
    pub fn mask_records(&self, records: &[Record]) -> Vec<Record> {
        debug!(records = records.len(), "masking records");
        records.iter().map(|record| self.mask_object(record)).collect()
    }

    fn mask_object(&self, map: &Map<String, Value>) -> Map<String, Value> {
        map.iter()
            .map(|(key, value)| (key.clone(), self.mask_entry(key, value)))
            .collect()
    }

    fn mask_entry(&self, key: &str, value: &Value) -> Value {
        if self.rules.is_sensitive(key) {
            // Only strings are masked; other values under a sensitive key are left alone.
            return match value {
                Value::String(text) => Value::String(self.rules.kind_for(key).apply(Some(text))),
                other => other.clone(),
            };
        }
        match value {
            Value::Object(_) | Value::Array(_) => self.mask(value),
            other => other.clone(),
        }
    }

    fn mask_array(&self, items: &[Value]) -> Value {
        match self.rules.arrays {
            ArrayHandling::ElementWise => {
                Value::Array(items.iter().map(|item| self.mask(item)).collect())
            }
            ArrayHandling::IndexedObject => {
                let indexed: Map<String, Value> = items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| (index.to_string(), item.clone()))
                    .collect();
                Value::Object(self.mask_object(&indexed))
            }
        }
    }
}

/// Masks `value` with the default rules.
///
/// ```
/// use adminmask::mask_json;
/// use serde_json::json;
///
/// let masked = mask_json(&json!({
///     "email": "a@b.com",
///     "nested": {"ip_address": "1.2.3.4"}
/// }));
/// assert_eq!(masked, json!({
///     "email": "a***@b.com",
///     "nested": {"ip_address": "1.2.***.***"}
/// }));
/// ```
#[must_use]
pub fn mask_json(value: &Value) -> Value {
    DEFAULT_MASKER.mask(value)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn default_rules_match_dashboard_key_set() {
        let rules = MaskRules::default();
        for key in DEFAULT_SENSITIVE_KEYS {
            assert!(rules.is_sensitive(key), "{key} should be sensitive");
        }
        assert!(rules.is_sensitive("User_ID"));
        assert!(!rules.is_sensitive("display_name"));
        assert!(!rules.is_sensitive("user_email"));
    }

    #[test]
    fn selectors_are_ordered_and_fall_back_to_identifier() {
        let rules = MaskRules::default();
        assert_eq!(rules.kind_for("email"), MaskKind::Email);
        assert_eq!(rules.kind_for("IP_Address"), MaskKind::IpAddress);
        assert_eq!(rules.kind_for("token"), MaskKind::Identifier);
        assert_eq!(rules.kind_for("record_id"), MaskKind::Identifier);
    }

    #[test]
    fn configured_rules_are_normalized_to_lowercase() {
        let rules = MaskRules {
            sensitive_keys: ["IBAN".to_string()].into_iter().collect(),
            selectors: vec![KeySelector::new("IBAN", MaskKind::Identifier)],
            ..MaskRules::default()
        };
        let masker = JsonMasker::new(rules);
        assert_eq!(
            masker.mask(&json!({"iban": "TR330006100519786457841326"})),
            json!({"iban": "TR33...1326"})
        );
    }

    #[test]
    fn rules_deserialize_with_defaults_for_missing_fields() {
        let rules: MaskRules = serde_json::from_str(r#"{"arrays": "indexed_object"}"#).unwrap();
        assert_eq!(rules.arrays, ArrayHandling::IndexedObject);
        assert_eq!(rules.fallback, MaskKind::Identifier);
        assert!(rules.is_sensitive("secret"));
    }

    #[test]
    fn input_is_not_mutated() {
        let original = json!({"email": "someone@example.com"});
        let snapshot = original.clone();
        let _ = mask_json(&original);
        assert_eq!(original, snapshot);
    }

    #[test]
    fn key_order_is_preserved() {
        let masked = mask_json(&json!({"zeta": 1, "email": "x@y.com", "alpha": 2}));
        let keys: Vec<&String> = masked.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["zeta", "email", "alpha"]);
    }
}
