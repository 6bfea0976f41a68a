// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory live property adapter.
//!
//! `DynamicProperty` is a shared, updatable value cell that implements
//! [`PropertyProvider`]. Whatever loads configuration writes into it with
//! [`set`](DynamicProperty::set); the options reading it see the change on
//! their next read.

use crate::domain::ConfigValue;
use crate::ports::PropertyProvider;
use std::sync::{PoisonError, RwLock};

/// A live, thread-safe property value.
///
/// # Examples
///
/// ```rust
/// use hexopt::adapters::DynamicProperty;
/// use hexopt::domain::ConfigValue;
/// use hexopt::ports::PropertyProvider;
///
/// let timeout = DynamicProperty::long("http.timeout.ms", 500);
/// assert_eq!(timeout.current_value(), ConfigValue::Long(500));
///
/// let previous = timeout.set(ConfigValue::Long(750));
/// assert_eq!(previous, ConfigValue::Long(500));
/// assert_eq!(timeout.current_value(), ConfigValue::Long(750));
/// ```
#[derive(Debug)]
pub struct DynamicProperty {
    /// Property name, used for diagnostics
    name: String,
    /// The current value
    value: RwLock<ConfigValue>,
}

impl DynamicProperty {
    /// Creates a property holding `initial`.
    pub fn new(name: impl Into<String>, initial: ConfigValue) -> Self {
        Self {
            name: name.into(),
            value: RwLock::new(initial),
        }
    }

    /// Creates a boolean property.
    pub fn bool(name: impl Into<String>, initial: bool) -> Self {
        Self::new(name, ConfigValue::Bool(initial))
    }

    /// Creates a 32-bit integer property.
    pub fn int(name: impl Into<String>, initial: i32) -> Self {
        Self::new(name, ConfigValue::Int(initial))
    }

    /// Creates a 64-bit integer property.
    pub fn long(name: impl Into<String>, initial: i64) -> Self {
        Self::new(name, ConfigValue::Long(initial))
    }

    /// Creates a 32-bit float property.
    pub fn float(name: impl Into<String>, initial: f32) -> Self {
        Self::new(name, ConfigValue::Float(initial))
    }

    /// Creates a 64-bit float property.
    pub fn double(name: impl Into<String>, initial: f64) -> Self {
        Self::new(name, ConfigValue::Double(initial))
    }

    /// Creates a text property. Enum options are backed by text properties
    /// holding the member name.
    pub fn string(name: impl Into<String>, initial: impl Into<String>) -> Self {
        Self::new(name, ConfigValue::String(initial.into()))
    }

    /// Returns a copy of the current value.
    pub fn get(&self) -> ConfigValue {
        // A panicking writer cannot leave a half-written value behind, so a
        // poisoned lock still holds a usable value.
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current value, returning the previous one.
    pub fn set(&self, value: ConfigValue) -> ConfigValue {
        let mut guard = self.value.write().unwrap_or_else(PoisonError::into_inner);
        tracing::trace!("Property '{}' changed from {} to {}", self.name, *guard, value);
        std::mem::replace(&mut *guard, value)
    }
}

impl PropertyProvider for DynamicProperty {
    fn current_value(&self) -> ConfigValue {
        self.get()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_typed_constructors() {
        assert_eq!(DynamicProperty::bool("a", true).get(), ConfigValue::Bool(true));
        assert_eq!(DynamicProperty::int("a", 3).get(), ConfigValue::Int(3));
        assert_eq!(DynamicProperty::long("a", 3).get(), ConfigValue::Long(3));
        assert_eq!(DynamicProperty::float("a", 0.5).get(), ConfigValue::Float(0.5));
        assert_eq!(DynamicProperty::double("a", 0.5).get(), ConfigValue::Double(0.5));
        assert_eq!(
            DynamicProperty::string("a", "RED").get(),
            ConfigValue::String("RED".to_string())
        );
    }

    #[test]
    fn test_set_returns_previous() {
        let property = DynamicProperty::int("server.port", 80);
        assert_eq!(property.set(ConfigValue::Int(8080)), ConfigValue::Int(80));
        assert_eq!(property.current_value(), ConfigValue::Int(8080));
    }

    #[test]
    fn test_name() {
        let property = DynamicProperty::int("server.port", 80);
        assert_eq!(property.name(), "server.port");
    }

    #[test]
    fn test_concurrent_writers_and_readers() {
        let property = Arc::new(DynamicProperty::long("counter", 0));

        let handles: Vec<_> = (1..=4)
            .map(|i| {
                let property = Arc::clone(&property);
                thread::spawn(move || {
                    property.set(ConfigValue::Long(i));
                    property.current_value()
                })
            })
            .collect();

        for handle in handles {
            let seen = handle.join().unwrap();
            assert!(matches!(seen, ConfigValue::Long(1..=4)));
        }
        assert!(matches!(property.get(), ConfigValue::Long(1..=4)));
    }
}
