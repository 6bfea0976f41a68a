// SPDX-License-Identifier: MIT OR Apache-2.0

//! Option service trait definition.
//!
//! This module defines the `OptionService` trait, the administrative surface of
//! a configuration session: per-key reads, directive management, and refresh
//! cycles across every option the session owns.

use crate::domain::{ConfigKey, ConfigValue, Directive, DirectiveSet, Result};
use crate::ports::ChangeListener;

/// The administrative interface to a set of options.
///
/// Every per-key method fails with
/// [`ConfigError::ConfigKeyNotFound`](crate::domain::ConfigError::ConfigKeyNotFound)
/// when the key is not registered.
pub trait OptionService {
    /// Returns the live backing value of `key`, enum members resolved.
    fn value(&self, key: &ConfigKey) -> Result<ConfigValue>;

    /// Returns the snapshot taken at the last refresh of `key`.
    fn old_value(&self, key: &ConfigKey) -> Result<ConfigValue>;

    /// Returns the value in force for `key` after bypass and override.
    fn effective_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Returns the coerced override payload of `key`.
    fn override_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Returns the coerced bypass payload of `key`.
    fn bypass_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>>;

    /// Replaces the override of `key`, returning the previous directive.
    fn set_override(&self, key: &ConfigKey, directive: Option<Directive>)
        -> Result<Option<Directive>>;

    /// Replaces the bypass of `key`, returning the previous directive.
    fn set_bypass(&self, key: &ConfigKey, directive: Option<Directive>)
        -> Result<Option<Directive>>;

    /// Applies a batch of directives. Nothing is applied if any key is unknown.
    fn apply(&self, directives: &DirectiveSet) -> Result<()>;

    /// Runs one refresh cycle over every option and returns how many changed.
    fn refresh(&self) -> Result<usize>;

    /// Registers a listener for snapshot changes.
    fn subscribe(&self, listener: ChangeListener) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigError;
    use crate::ports::ChangeEvent;
    use std::sync::Arc;

    // Single fixed option, for exercising the trait shape
    struct TestOptionService;

    impl TestOptionService {
        fn check(&self, key: &ConfigKey) -> Result<()> {
            if key.as_str() == "test.key" {
                Ok(())
            } else {
                Err(ConfigError::ConfigKeyNotFound {
                    key: key.to_string(),
                })
            }
        }
    }

    impl OptionService for TestOptionService {
        fn value(&self, key: &ConfigKey) -> Result<ConfigValue> {
            self.check(key)?;
            Ok(ConfigValue::Int(1))
        }

        fn old_value(&self, key: &ConfigKey) -> Result<ConfigValue> {
            self.value(key)
        }

        fn effective_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
            self.value(key).map(Some)
        }

        fn override_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
            self.check(key)?;
            Ok(None)
        }

        fn bypass_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
            self.check(key)?;
            Ok(None)
        }

        fn set_override(
            &self,
            key: &ConfigKey,
            _directive: Option<Directive>,
        ) -> Result<Option<Directive>> {
            self.check(key)?;
            Ok(None)
        }

        fn set_bypass(
            &self,
            key: &ConfigKey,
            _directive: Option<Directive>,
        ) -> Result<Option<Directive>> {
            self.check(key)?;
            Ok(None)
        }

        fn apply(&self, directives: &DirectiveSet) -> Result<()> {
            directives.keys().try_for_each(|key| self.check(key))
        }

        fn refresh(&self) -> Result<usize> {
            Ok(0)
        }

        fn subscribe(&self, _listener: ChangeListener) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_service_effective_value() {
        let service = TestOptionService;
        let key = ConfigKey::from("test.key");
        assert_eq!(
            service.effective_value(&key).unwrap(),
            Some(ConfigValue::Int(1))
        );
    }

    #[test]
    fn test_service_unknown_key() {
        let service = TestOptionService;
        let key = ConfigKey::from("missing.key");
        assert!(matches!(
            service.value(&key),
            Err(ConfigError::ConfigKeyNotFound { .. })
        ));
    }

    #[test]
    fn test_service_apply_checks_keys() {
        let service = TestOptionService;
        let good = DirectiveSet::new().with_override("test.key", Directive::new("2"));
        let bad = DirectiveSet::new().with_bypass("other.key", Directive::empty());

        assert!(service.apply(&good).is_ok());
        assert!(service.apply(&bad).is_err());
    }

    #[test]
    fn test_service_is_object_safe() {
        let service: Box<dyn OptionService> = Box::new(TestOptionService);
        assert!(service.subscribe(Arc::new(|_: &ChangeEvent| {})).is_ok());
        assert_eq!(service.refresh().unwrap(), 0);
    }
}
