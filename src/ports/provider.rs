// SPDX-License-Identifier: MIT OR Apache-2.0

//! Property provider trait definition.
//!
//! This module defines the `PropertyProvider` trait, the port through which an
//! option reads its live backing value. Providers are owned by the surrounding
//! configuration system, which may update them at any time from any thread.

use crate::domain::ConfigValue;

/// A source of one option's live backing value.
///
/// Providers are pull-based: every call to [`current_value`](Self::current_value)
/// must return the value in force at that moment. For non-enum options the value
/// is expected to already be of the declared type; enum options expect the
/// member name as [`ConfigValue::String`].
///
/// Any `Fn() -> ConfigValue + Send + Sync` closure is a provider.
///
/// Registries call providers while holding their own lock, so a provider
/// must not read from the [`OptionRegistry`](crate::service::OptionRegistry)
/// it is registered with.
///
/// # Examples
///
/// ```
/// use hexopt::domain::ConfigValue;
/// use hexopt::ports::PropertyProvider;
///
/// struct Fixed(i32);
///
/// impl PropertyProvider for Fixed {
///     fn current_value(&self) -> ConfigValue {
///         ConfigValue::Int(self.0)
///     }
/// }
///
/// assert_eq!(Fixed(3).current_value(), ConfigValue::Int(3));
/// ```
pub trait PropertyProvider: Send + Sync {
    /// Returns the value in force right now.
    fn current_value(&self) -> ConfigValue;

    /// Returns a name for diagnostics.
    fn name(&self) -> &str {
        "property"
    }
}

impl<F> PropertyProvider for F
where
    F: Fn() -> ConfigValue + Send + Sync,
{
    fn current_value(&self) -> ConfigValue {
        self()
    }

    fn name(&self) -> &str {
        "closure"
    }
}
