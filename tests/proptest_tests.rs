// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property-based tests using proptest.
//!
//! These tests check directive coercion and option identity against
//! arbitrary inputs.

mod common;

use common::{color, mock_state};
use hexopt::domain::{ConfigError, ConfigKey, ConfigValue, Directive, ValueType};
use proptest::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

// Enum options need a backing value that names a member.
fn override_as(value_type: ValueType, payload: &str) -> Result<Option<ConfigValue>, ConfigError> {
    let initial = match value_type {
        ValueType::Enum(_) => ConfigValue::from("RED"),
        _ => ConfigValue::Int(0),
    };
    let (_, mut state) = mock_state("prop", value_type, initial);
    state.set_override(Some(Directive::new(payload)));
    state.override_value()
}

// The key given at construction is the key reported afterwards
proptest! {
    #[test]
    fn test_key_preserved(key in "\\PC+", payload in "\\PC*") {
        let (_, mut state) = mock_state(&key, ValueType::String, ConfigValue::from("x"));
        state.set_bypass(Some(Directive::new(payload)));
        state.update().unwrap();
        prop_assert_eq!(state.key().as_str(), key.as_str());
    }
}

// String options pass any payload through unchanged
proptest! {
    #[test]
    fn test_string_payload_passthrough(payload in "\\PC*") {
        let result = override_as(ValueType::String, &payload).unwrap();
        prop_assert_eq!(result, Some(ConfigValue::String(payload)));
    }
}

proptest! {
    #[test]
    fn test_int_payloads(n in prop::num::i32::ANY) {
        let result = override_as(ValueType::Int, &n.to_string()).unwrap();
        prop_assert_eq!(result, Some(ConfigValue::Int(n)));
    }
}

proptest! {
    #[test]
    fn test_long_payloads(n in prop::num::i64::ANY) {
        let result = override_as(ValueType::Long, &n.to_string()).unwrap();
        prop_assert_eq!(result, Some(ConfigValue::Long(n)));
    }
}

// Values beyond the i32 range are malformed for int options
proptest! {
    #[test]
    fn test_int_overflow_is_malformed(n in (i32::MAX as i64 + 1)..i64::MAX) {
        let result = override_as(ValueType::Int, &n.to_string());
        let is_malformed = matches!(result, Err(ConfigError::MalformedValue { .. }));
        prop_assert!(is_malformed);
    }
}

proptest! {
    #[test]
    fn test_double_payloads(n in prop::num::f64::NORMAL) {
        let result = override_as(ValueType::Double, &n.to_string()).unwrap();
        prop_assert_eq!(result, Some(ConfigValue::Double(n)));
    }
}

// Boolean coercion is true exactly for a case-insensitive "true"
proptest! {
    #[test]
    fn test_bool_payloads(payload in "\\PC{0,8}") {
        let expected = payload.eq_ignore_ascii_case("true");
        let result = override_as(ValueType::Bool, &payload).unwrap();
        prop_assert_eq!(result, Some(ConfigValue::Bool(expected)));
    }
}

proptest! {
    #[test]
    fn test_bool_case_variants(mask in prop::collection::vec(prop::bool::ANY, 4)) {
        let payload: String = "true"
            .chars()
            .zip(mask)
            .map(|(c, upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect();
        let result = override_as(ValueType::Bool, &payload).unwrap();
        prop_assert_eq!(result, Some(ConfigValue::Bool(true)));
    }
}

// Lowercase words never parse as numbers, "inf" and "nan" included
proptest! {
    #[test]
    fn test_numeric_rejects_words(word in "[a-z]{1,12}") {
        for value_type in [ValueType::Int, ValueType::Long, ValueType::Float, ValueType::Double] {
            let result = override_as(value_type, &word);
            let is_malformed = matches!(result, Err(ConfigError::MalformedValue { .. }));
            prop_assert!(is_malformed);
        }
    }
}

// Enum coercion accepts exactly the declared member names
proptest! {
    #[test]
    fn test_enum_members(name in "[A-Z]{1,6}") {
        let result = override_as(color(), &name);
        if ["RED", "GREEN", "BLUE"].contains(&name.as_str()) {
            prop_assert_eq!(result.unwrap(), Some(ConfigValue::Enum(name)));
        } else {
            let is_unknown = matches!(result, Err(ConfigError::UnknownEnumMember { .. }));
            prop_assert!(is_unknown);
        }
    }
}

// Options hash by key alone
proptest! {
    #[test]
    fn test_same_key_same_hash(key in "\\PC+", a in prop::num::i32::ANY, b in "\\PC*") {
        let (_, first) = mock_state(&key, ValueType::Int, ConfigValue::Int(a));
        let (_, mut second) = mock_state(&key, ValueType::String, ConfigValue::from(b.clone()));
        second.set_override(Some(Directive::new(b)));

        prop_assert_eq!(hash_of(&first), hash_of(&second));
        prop_assert_eq!(hash_of(first.key()), hash_of(&ConfigKey::from(key)));
    }
}

// Every update returns the snapshot taken by the one before it
proptest! {
    #[test]
    fn test_update_sequence(values in prop::collection::vec(prop::num::i64::ANY, 1..20)) {
        let (provider, mut state) = mock_state("seq", ValueType::Long, ConfigValue::Long(0));
        let mut expected = ConfigValue::Long(0);

        for n in values {
            provider.set(ConfigValue::Long(n));
            let previous = state.update().unwrap();
            prop_assert_eq!(previous, expected);
            expected = ConfigValue::Long(n);
            prop_assert_eq!(state.old_value(), &expected);
        }
    }
}
