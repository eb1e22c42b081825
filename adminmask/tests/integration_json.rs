//! End-to-end tests for key-driven JSON masking.
//!
//! These tests exercise:
//! - masking of sensitive leaves at any depth,
//! - the two array treatments, and
//! - custom rule sets loaded from JSON.

use adminmask::{ArrayHandling, JsonMasker, MaskKind, MaskRules, Maskable, mask_json};
use serde_json::{Value, json};

fn legacy_masker() -> JsonMasker {
    JsonMasker::new(MaskRules::default().with_array_handling(ArrayHandling::IndexedObject))
}

#[test]
fn masks_sensitive_leaves_at_any_depth() {
    let input = json!({
        "email": "someone@example.com",
        "profile": {
            "display_name": "Jane",
            "security": {"ip_address": "10.20.30.40", "token": "tok_1234567890"}
        },
        "password": "hunter2"
    });

    assert_eq!(
        mask_json(&input),
        json!({
            "email": "s***e@e***.com",
            "profile": {
                "display_name": "Jane",
                "security": {"ip_address": "10.20.***.***", "token": "tok_...7890"}
            },
            "password": "hunter2"
        })
    );
}

#[test]
fn scalars_and_null_pass_through() {
    for value in [Value::Null, json!(42), json!(true), json!("a@b.com")] {
        assert_eq!(mask_json(&value), value);
    }
    assert_eq!(
        mask_json(&json!({"email": null, "user_id": 1234567890})),
        json!({"email": null, "user_id": 1234567890})
    );
}

#[test]
fn sensitive_key_holding_a_container_is_left_alone() {
    let input = json!({"secret": {"email": "x@y.com"}});
    assert_eq!(mask_json(&input), input);
}

#[test]
fn arrays_are_walked_element_wise_by_default() {
    let input = json!({
        "transactions": [
            {"user_id": "aaaaaaaa-1111", "amount": 10},
            {"user_id": "bbbbbbbb-2222", "amount": 20}
        ]
    });

    assert_eq!(
        mask_json(&input),
        json!({
            "transactions": [
                {"user_id": "aaaa...1111", "amount": 10},
                {"user_id": "bbbb...2222", "amount": 20}
            ]
        })
    );
}

#[test]
fn legacy_arrays_become_index_keyed_objects() {
    let input = json!({
        "transactions": [
            {"user_id": "aaaaaaaa-1111", "amount": 10},
            "plain"
        ]
    });

    assert_eq!(
        legacy_masker().mask(&input),
        json!({
            "transactions": {
                "0": {"user_id": "aaaa...1111", "amount": 10},
                "1": "plain"
            }
        })
    );
}

#[test]
fn legacy_top_level_array_becomes_an_object() {
    let masked = legacy_masker().mask(&json!([{"email": "a@b.com"}]));
    assert_eq!(masked, json!({"0": {"email": "a***@b.com"}}));
}

#[test]
fn rules_from_json_add_keys_and_selectors() {
    let rules: MaskRules = serde_json::from_str(
        r#"{
            "sensitive_keys": ["full_name", "contact_email"],
            "selectors": [
                {"contains": "email", "kind": "email"},
                {"contains": "name", "kind": "name"}
            ],
            "fallback": "identifier"
        }"#,
    )
    .unwrap();
    let masker = JsonMasker::new(rules);

    assert_eq!(
        masker.mask(&json!({
            "full_name": "Jane Doe",
            "contact_email": "jane@example.com",
            "email": "left@alone.com"
        })),
        json!({
            "full_name": "J*** D***",
            "contact_email": "j***e@e***.com",
            "email": "left@alone.com"
        })
    );
}

#[test]
fn builder_rules_apply_to_records() {
    let masker = JsonMasker::new(
        MaskRules::default()
            .with_sensitive_key("Owner")
            .with_selector("owner", MaskKind::Name),
    );
    let records = vec![
        json!({"owner": "Ada Lovelace", "plan": "pro"})
            .as_object()
            .cloned()
            .unwrap(),
    ];

    let masked = masker.mask_records(&records);
    assert_eq!(Value::Object(masked[0].clone()), json!({"owner": "A*** L***", "plan": "pro"}));
    assert_eq!(records[0]["owner"], "Ada Lovelace");
}

#[test]
fn json_values_are_maskable() {
    let details = json!({"phone": "+905551234567"});
    assert_eq!(details.masked(), json!({"phone": "+905...4567"}));
}
