// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-option state and effective value resolution.
//!
//! An `OptionState` tracks one option: its live backing value (read through a
//! [`PropertyProvider`]), the snapshot captured at the last refresh, and the
//! bypass and override directives. The effective value is chosen by priority:
//! bypass, then override, then the backing value.
//!
//! # Concurrency
//!
//! Readers take `&self` and may run concurrently as long as the provider
//! tolerates concurrent reads. [`OptionState::update`] and the directive setters
//! take `&mut self`; hosts that share a state across threads serialize them with
//! a lock, one refresh at a time per option.

use crate::domain::config_key::ConfigKey;
use crate::domain::config_value::ConfigValue;
use crate::domain::directive::Directive;
use crate::domain::errors::{ConfigError, Result};
use crate::domain::value_type::ValueType;
use crate::ports::PropertyProvider;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// The resolution state of a single option.
///
/// Equality and hashing use the key alone. Two states for the same key compare
/// equal even when their providers, snapshots or directives differ; registries
/// should be keyed by [`ConfigKey`] rather than by the state itself.
///
/// # Examples
///
/// ```
/// use hexopt::adapters::DynamicProperty;
/// use hexopt::domain::{ConfigValue, Directive, OptionState, ValueType};
/// use std::sync::Arc;
///
/// # fn main() -> hexopt::domain::Result<()> {
/// let port = Arc::new(DynamicProperty::int("server.port", 80));
/// let mut state = OptionState::new("server.port", port.clone(), ValueType::Int)?;
///
/// assert_eq!(state.effective_value()?, Some(ConfigValue::Int(80)));
///
/// state.set_override(Some(Directive::new("8080")));
/// assert_eq!(state.effective_value()?, Some(ConfigValue::Int(8080)));
///
/// state.set_bypass(Some(Directive::new("9090")));
/// assert_eq!(state.effective_value()?, Some(ConfigValue::Int(9090)));
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct OptionState {
    key: ConfigKey,
    value_type: ValueType,
    provider: Arc<dyn PropertyProvider>,
    old_value: ConfigValue,
    bypass: Option<Directive>,
    override_directive: Option<Directive>,
}

impl OptionState {
    /// Creates the state for `key`, capturing the provider's current value as the
    /// initial snapshot.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidArgument`] if `key` is empty.
    /// - [`ConfigError::UnknownEnumMember`] if `value_type` is an enum and the
    ///   provider's value names no member.
    pub fn new(
        key: impl Into<ConfigKey>,
        provider: Arc<dyn PropertyProvider>,
        value_type: ValueType,
    ) -> Result<Self> {
        let key = key.into();
        if key.is_empty() {
            return Err(ConfigError::invalid_argument("key cannot be empty"));
        }

        let old_value = resolve_backing(&value_type, provider.as_ref())?;

        Ok(Self {
            key,
            value_type,
            provider,
            old_value,
            bypass: None,
            override_directive: None,
        })
    }

    /// Creates a builder for an option state.
    pub fn builder() -> OptionStateBuilder {
        OptionStateBuilder::new()
    }

    /// Returns the option's key.
    pub fn key(&self) -> &ConfigKey {
        &self.key
    }

    /// Returns the declared type.
    pub fn value_type(&self) -> &ValueType {
        &self.value_type
    }

    /// Returns the backing provider.
    pub fn provider(&self) -> &Arc<dyn PropertyProvider> {
        &self.provider
    }

    fn extract_value(&self) -> Result<ConfigValue> {
        resolve_backing(&self.value_type, self.provider.as_ref())
    }

    /// Advances the snapshot, returning the one it replaces.
    ///
    /// Call once per refresh cycle. If the fresh value cannot be resolved the
    /// error is returned and the snapshot is left as it was.
    pub fn update(&mut self) -> Result<ConfigValue> {
        let fresh = self.extract_value()?;
        Ok(std::mem::replace(&mut self.old_value, fresh))
    }

    /// Returns the live backing value, with enum members resolved.
    pub fn value(&self) -> Result<ConfigValue> {
        self.extract_value()
    }

    /// Returns the snapshot captured at construction or at the last [`update`](Self::update).
    pub fn old_value(&self) -> &ConfigValue {
        &self.old_value
    }

    /// Returns the coerced override payload.
    ///
    /// `Ok(None)` when no override is set or the override carries no payload.
    pub fn override_value(&self) -> Result<Option<ConfigValue>> {
        match self.override_directive.as_ref().and_then(Directive::payload) {
            Some(payload) => self.convert_value(Some(payload)),
            None => Ok(None),
        }
    }

    /// Returns the coerced bypass payload.
    ///
    /// `Ok(None)` when no bypass is set or the bypass carries no payload.
    pub fn bypass_value(&self) -> Result<Option<ConfigValue>> {
        match self.bypass.as_ref().and_then(Directive::payload) {
            Some(payload) => self.convert_value(Some(payload)),
            None => Ok(None),
        }
    }

    /// Returns the override directive, if one is set.
    pub fn override_directive(&self) -> Option<&Directive> {
        self.override_directive.as_ref()
    }

    /// Returns the bypass directive, if one is set.
    pub fn bypass_directive(&self) -> Option<&Directive> {
        self.bypass.as_ref()
    }

    /// Replaces the bypass directive, returning the previous one.
    pub fn set_bypass(&mut self, directive: Option<Directive>) -> Option<Directive> {
        std::mem::replace(&mut self.bypass, directive)
    }

    /// Replaces the override directive, returning the previous one.
    pub fn set_override(&mut self, directive: Option<Directive>) -> Option<Directive> {
        std::mem::replace(&mut self.override_directive, directive)
    }

    /// Returns true if a bypass directive is present, with or without payload.
    pub fn is_bypassed(&self) -> bool {
        self.bypass.is_some()
    }

    /// Returns true if an override directive is present, with or without payload.
    pub fn is_overridden(&self) -> bool {
        self.override_directive.is_some()
    }

    /// Returns the value in force.
    ///
    /// - No directives: the provider's raw current value. Enum members are
    ///   *not* resolved on this path, so an enum option yields
    ///   [`ConfigValue::String`] here and [`ConfigValue::Enum`] from a directive.
    /// - Override only: [`override_value`](Self::override_value).
    /// - Bypass present: [`bypass_value`](Self::bypass_value), even when the
    ///   bypass is empty and an override exists. The result is then `Ok(None)`.
    pub fn effective_value(&self) -> Result<Option<ConfigValue>> {
        match (&self.bypass, &self.override_directive) {
            (None, None) => Ok(Some(self.provider.current_value())),
            (None, Some(_)) => self.override_value(),
            (Some(_), _) => self.bypass_value(),
        }
    }

    /// Coerces a textual payload into the declared type.
    ///
    /// String and enum options pass an absent payload through as `Ok(None)`;
    /// every other type requires one. Booleans parse leniently: only `"true"`,
    /// ignoring ASCII case, is `true`, and anything else is `false`. Float and
    /// double payloads ignore surrounding whitespace and a trailing `f`/`d`
    /// suffix; non-finite values must be spelled `Infinity` or `NaN`, so `inf`
    /// and `nan` are malformed.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidArgument`] for an absent payload on a non-string type.
    /// - [`ConfigError::UnknownEnumMember`] when an enum payload names no member.
    /// - [`ConfigError::MalformedValue`] when a numeric payload does not parse.
    /// - [`ConfigError::UnsupportedType`] for [`ValueType::Other`].
    pub fn convert_value(&self, payload: Option<&str>) -> Result<Option<ConfigValue>> {
        let value = match (&self.value_type, payload) {
            (ValueType::String, payload) => return Ok(payload.map(ConfigValue::from)),
            (ValueType::Enum(enum_type), payload) => {
                return payload
                    .map(|p| enum_type.resolve(p).map(|m| ConfigValue::Enum(m.to_string())))
                    .transpose();
            }
            (declared, None) => {
                return Err(ConfigError::invalid_argument(format!(
                    "a {} value for key '{}' cannot be parsed from an absent payload",
                    declared, self.key
                )));
            }
            (ValueType::Int, Some(text)) => ConfigValue::Int(self.parse_number(text)?),
            (ValueType::Bool, Some(text)) => ConfigValue::Bool(text.eq_ignore_ascii_case("true")),
            (ValueType::Long, Some(text)) => ConfigValue::Long(self.parse_number(text)?),
            (ValueType::Float, Some(text)) => ConfigValue::Float(self.parse_float(text)?),
            (ValueType::Double, Some(text)) => ConfigValue::Double(self.parse_float(text)?),
            (ValueType::Other(type_name), Some(_)) => {
                return Err(ConfigError::UnsupportedType {
                    key: self.key.to_string(),
                    type_name: type_name.clone(),
                });
            }
        };
        Ok(Some(value))
    }

    fn parse_number<T>(&self, text: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        text.parse::<T>().map_err(|e| {
            ConfigError::malformed(self.key.as_str(), self.value_type.name(), text, e)
        })
    }

    // Non-finite values are spelled exactly `Infinity` or `NaN`, optionally
    // signed. `str::parse` would also take `inf` and any casing.
    fn parse_float<T>(&self, text: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let literal = float_literal(text);
        let unsigned = literal
            .strip_prefix(|c: char| c == '+' || c == '-')
            .unwrap_or(literal);
        if unsigned.starts_with(|c: char| c.is_ascii_alphabetic())
            && unsigned != "Infinity"
            && unsigned != "NaN"
        {
            return Err(ConfigError::MalformedValue {
                key: self.key.to_string(),
                target_type: self.value_type.name().to_string(),
                value: text.to_string(),
                source: format!("'{}' is not a number", unsigned).into(),
            });
        }
        self.parse_number(literal)
    }
}

/// Reads the provider and resolves enum members for enum declarations.
fn resolve_backing(value_type: &ValueType, provider: &dyn PropertyProvider) -> Result<ConfigValue> {
    let raw = provider.current_value();
    let Some(enum_type) = value_type.as_enum() else {
        return Ok(raw);
    };
    let member = match raw.as_str() {
        Some(text) => enum_type.resolve(text)?,
        None => enum_type.resolve(&raw.to_string())?,
    };
    Ok(ConfigValue::Enum(member.to_string()))
}

/// Trims surrounding whitespace and a trailing `f`/`d` type suffix from a
/// float literal such as `"2.5f"`.
fn float_literal(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.strip_suffix(|c: char| matches!(c, 'f' | 'F' | 'd' | 'D')) {
        Some(body) if body.ends_with(|c: char| c.is_ascii_digit() || c == '.') => body,
        _ => trimmed,
    }
}

impl PartialEq for OptionState {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for OptionState {}

impl Hash for OptionState {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Debug for OptionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionState")
            .field("key", &self.key)
            .field("value_type", &self.value_type)
            .field("provider", &self.provider.name())
            .field("old_value", &self.old_value)
            .field("bypass", &self.bypass)
            .field("override", &self.override_directive)
            .finish()
    }
}

/// Builder for an [`OptionState`].
///
/// Every input is required; [`build`](Self::build) reports the first one
/// missing.
///
/// # Examples
///
/// ```
/// use hexopt::adapters::DynamicProperty;
/// use hexopt::domain::{OptionState, ValueType};
/// use std::sync::Arc;
///
/// # fn main() -> hexopt::domain::Result<()> {
/// let state = OptionState::builder()
///     .key("feature.enabled")
///     .provider(Arc::new(DynamicProperty::bool("feature.enabled", false)))
///     .value_type(ValueType::Bool)
///     .build()?;
/// assert_eq!(state.key().as_str(), "feature.enabled");
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct OptionStateBuilder {
    key: Option<ConfigKey>,
    provider: Option<Arc<dyn PropertyProvider>>,
    value_type: Option<ValueType>,
}

impl OptionStateBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key.
    pub fn key(mut self, key: impl Into<ConfigKey>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the backing provider.
    pub fn provider(mut self, provider: Arc<dyn PropertyProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Sets the declared type.
    pub fn value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = Some(value_type);
        self
    }

    /// Builds the state.
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidArgument`] if an input is missing, plus anything
    /// [`OptionState::new`] reports.
    pub fn build(self) -> Result<OptionState> {
        let key = self
            .key
            .ok_or_else(|| ConfigError::invalid_argument("key cannot be null"))?;
        let provider = self
            .provider
            .ok_or_else(|| ConfigError::invalid_argument("provider cannot be null"))?;
        let value_type = self
            .value_type
            .ok_or_else(|| ConfigError::invalid_argument("value type cannot be null"))?;
        OptionState::new(key, provider, value_type)
    }
}
