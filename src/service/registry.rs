// SPDX-License-Identifier: MIT OR Apache-2.0

//! Option registry implementation.
//!
//! This module provides `OptionRegistry`, the default [`OptionService`]. It owns
//! the option states of one configuration session, keyed by [`ConfigKey`], and
//! drives their refresh cycles.

use crate::domain::{
    ConfigError, ConfigKey, ConfigValue, Directive, DirectiveSet, OptionService, OptionState,
    Result, ValueType,
};
use crate::ports::{ChangeEvent, ChangeListener, PropertyProvider};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe set of options.
///
/// Reads take a shared lock; directive changes and refresh cycles take an
/// exclusive one, so refreshes of the same option never overlap. Change
/// listeners are called after the lock is released and may read from the
/// registry.
///
/// Providers, on the other hand, are called while the lock is held: value
/// reads hold it shared and [`refresh`](OptionService::refresh) holds it
/// exclusively. A provider must not call back into the registry that owns it,
/// or the calling thread deadlocks.
///
/// # Examples
///
/// ```rust
/// use hexopt::prelude::*;
/// use std::sync::Arc;
///
/// # fn main() -> Result<()> {
/// let port = Arc::new(DynamicProperty::int("server.port", 80));
/// let registry = OptionRegistry::builder()
///     .with_property("server.port", port.clone(), ValueType::Int)
///     .build()?;
///
/// let key = ConfigKey::from("server.port");
/// registry.set_override(&key, Some(Directive::new("8080")))?;
/// assert_eq!(registry.effective_value(&key)?, Some(ConfigValue::Int(8080)));
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct OptionRegistry {
    /// Option states by key
    options: RwLock<HashMap<ConfigKey, OptionState>>,
    /// Registered change listeners
    listeners: RwLock<Vec<ChangeListener>>,
}

impl OptionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry builder.
    pub fn builder() -> OptionRegistryBuilder {
        OptionRegistryBuilder::new()
    }

    // Option states stay consistent even if a listener or provider panicked
    // while a guard was held: every mutation is a single field replacement.
    fn read_options(&self) -> RwLockReadGuard<'_, HashMap<ConfigKey, OptionState>> {
        self.options.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_options(&self) -> RwLockWriteGuard<'_, HashMap<ConfigKey, OptionState>> {
        self.options.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn with_state<R>(&self, key: &ConfigKey, f: impl FnOnce(&OptionState) -> R) -> Result<R> {
        self.read_options()
            .get(key)
            .map(f)
            .ok_or_else(|| not_found(key))
    }

    fn with_state_mut<R>(
        &self,
        key: &ConfigKey,
        f: impl FnOnce(&mut OptionState) -> R,
    ) -> Result<R> {
        self.write_options()
            .get_mut(key)
            .map(f)
            .ok_or_else(|| not_found(key))
    }

    /// Adds an option.
    ///
    /// # Errors
    ///
    /// [`ConfigError::DuplicateKey`] if an option with the same key exists.
    pub fn register(&self, state: OptionState) -> Result<()> {
        let mut options = self.write_options();
        if options.contains_key(state.key()) {
            return Err(ConfigError::DuplicateKey {
                key: state.key().to_string(),
            });
        }

        tracing::debug!(
            "Registered option '{}' of type {} backed by '{}'",
            state.key(),
            state.value_type(),
            state.provider().name()
        );
        options.insert(state.key().clone(), state);
        Ok(())
    }

    /// Constructs and adds an option.
    ///
    /// # Errors
    ///
    /// Anything [`OptionState::new`] or [`register`](Self::register) reports.
    pub fn declare(
        &self,
        key: impl Into<ConfigKey>,
        provider: Arc<dyn PropertyProvider>,
        value_type: ValueType,
    ) -> Result<()> {
        self.register(OptionState::new(key, provider, value_type)?)
    }

    /// Returns true if `key` is registered.
    pub fn contains(&self, key: &ConfigKey) -> bool {
        self.read_options().contains_key(key)
    }

    /// Returns the registered keys in sorted order.
    pub fn keys(&self) -> Vec<ConfigKey> {
        let mut keys: Vec<ConfigKey> = self.read_options().keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Returns the number of registered options.
    pub fn len(&self) -> usize {
        self.read_options().len()
    }

    /// Returns true if no options are registered.
    pub fn is_empty(&self) -> bool {
        self.read_options().is_empty()
    }

    /// Returns a copy of the state of `key`.
    pub fn state(&self, key: &ConfigKey) -> Result<OptionState> {
        self.with_state(key, OptionState::clone)
    }

    /// Returns true if `key` has a bypass directive.
    pub fn is_bypassed(&self, key: &ConfigKey) -> Result<bool> {
        self.with_state(key, OptionState::is_bypassed)
    }

    /// Returns true if `key` has an override directive.
    pub fn is_overridden(&self, key: &ConfigKey) -> Result<bool> {
        self.with_state(key, OptionState::is_overridden)
    }

    /// Removes the override of `key`, returning it.
    pub fn clear_override(&self, key: &ConfigKey) -> Result<Option<Directive>> {
        self.set_override(key, None)
    }

    /// Removes the bypass of `key`, returning it.
    pub fn clear_bypass(&self, key: &ConfigKey) -> Result<Option<Directive>> {
        self.set_bypass(key, None)
    }

    /// Runs a refresh for one option, returning whether its snapshot changed.
    ///
    /// Unlike [`refresh`](OptionService::refresh), failures are returned.
    pub fn refresh_key(&self, key: &ConfigKey) -> Result<bool> {
        let event = self.with_state_mut(key, |state| -> Result<Option<ChangeEvent>> {
            let previous = state.update()?;
            Ok(change_event(state, previous))
        })??;

        match event {
            Some(event) => {
                self.notify(std::slice::from_ref(&event));
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn notify(&self, events: &[ChangeEvent]) {
        if events.is_empty() {
            return;
        }

        let listeners: Vec<ChangeListener> = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        for event in events {
            for listener in &listeners {
                listener(event);
            }
        }
    }
}

fn not_found(key: &ConfigKey) -> ConfigError {
    ConfigError::ConfigKeyNotFound {
        key: key.to_string(),
    }
}

fn change_event(state: &OptionState, previous: ConfigValue) -> Option<ChangeEvent> {
    if &previous == state.old_value() {
        return None;
    }
    Some(ChangeEvent {
        key: state.key().clone(),
        old: previous,
        new: state.old_value().clone(),
    })
}

fn describe(directive: Option<&Directive>) -> &'static str {
    match directive {
        None => "cleared",
        Some(d) if d.is_empty() => "set without payload",
        Some(_) => "set",
    }
}

impl OptionService for OptionRegistry {
    fn value(&self, key: &ConfigKey) -> Result<ConfigValue> {
        self.with_state(key, OptionState::value)?
    }

    fn old_value(&self, key: &ConfigKey) -> Result<ConfigValue> {
        self.with_state(key, |state| state.old_value().clone())
    }

    fn effective_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        self.with_state(key, OptionState::effective_value)?
    }

    fn override_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        self.with_state(key, OptionState::override_value)?
    }

    fn bypass_value(&self, key: &ConfigKey) -> Result<Option<ConfigValue>> {
        self.with_state(key, OptionState::bypass_value)?
    }

    fn set_override(
        &self,
        key: &ConfigKey,
        directive: Option<Directive>,
    ) -> Result<Option<Directive>> {
        let description = describe(directive.as_ref());
        let previous = self.with_state_mut(key, |state| state.set_override(directive))?;
        tracing::debug!("Override for '{}' {}", key, description);
        Ok(previous)
    }

    fn set_bypass(
        &self,
        key: &ConfigKey,
        directive: Option<Directive>,
    ) -> Result<Option<Directive>> {
        let description = describe(directive.as_ref());
        let previous = self.with_state_mut(key, |state| state.set_bypass(directive))?;
        tracing::debug!("Bypass for '{}' {}", key, description);
        Ok(previous)
    }

    fn apply(&self, directives: &DirectiveSet) -> Result<()> {
        let mut options = self.write_options();

        if let Some(missing) = directives.keys().find(|key| !options.contains_key(*key)) {
            return Err(not_found(missing));
        }

        for key in &directives.clear_overrides {
            if let Some(state) = options.get_mut(key) {
                state.set_override(None);
            }
        }
        for key in &directives.clear_bypasses {
            if let Some(state) = options.get_mut(key) {
                state.set_bypass(None);
            }
        }
        for (key, directive) in &directives.overrides {
            if let Some(state) = options.get_mut(key) {
                state.set_override(Some(directive.clone()));
            }
        }
        for (key, directive) in &directives.bypasses {
            if let Some(state) = options.get_mut(key) {
                state.set_bypass(Some(directive.clone()));
            }
        }

        tracing::debug!(
            "Applied directives: {} overrides, {} bypasses, {} overrides cleared, {} bypasses cleared",
            directives.overrides.len(),
            directives.bypasses.len(),
            directives.clear_overrides.len(),
            directives.clear_bypasses.len()
        );
        Ok(())
    }

    fn refresh(&self) -> Result<usize> {
        let (mut events, total) = {
            let mut options = self.write_options();
            let mut events = Vec::new();

            for (key, state) in options.iter_mut() {
                match state.update() {
                    Ok(previous) => events.extend(change_event(state, previous)),
                    Err(e) => {
                        tracing::warn!("Failed to refresh option '{}': {}", key, e);
                    }
                }
            }
            (events, options.len())
        };

        events.sort_by(|a, b| a.key.cmp(&b.key));
        tracing::trace!(
            "Refresh cycle complete: {} of {} options changed",
            events.len(),
            total
        );

        self.notify(&events);
        Ok(events.len())
    }

    fn subscribe(&self, listener: ChangeListener) -> Result<()> {
        self.listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
        Ok(())
    }
}

impl fmt::Debug for OptionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let listeners = self
            .listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        f.debug_struct("OptionRegistry")
            .field("keys", &self.keys())
            .field("listeners", &listeners)
            .finish()
    }
}

/// Builder for constructing an `OptionRegistry`.
///
/// Options are registered first, then any directives are applied, so a
/// directive file may only name options declared on the same builder.
///
/// # Examples
///
/// ```rust
/// use hexopt::prelude::*;
/// use std::sync::Arc;
///
/// # fn main() -> Result<()> {
/// let registry = OptionRegistry::builder()
///     .with_property(
///         "feature.enabled",
///         Arc::new(DynamicProperty::bool("feature.enabled", false)),
///         ValueType::Bool,
///     )
///     .with_directives(
///         DirectiveSet::new().with_bypass("feature.enabled", Directive::new("true")),
///     )
///     .build()?;
///
/// assert_eq!(
///     registry.effective_value(&ConfigKey::from("feature.enabled"))?,
///     Some(ConfigValue::Bool(true))
/// );
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct OptionRegistryBuilder {
    options: Vec<Result<OptionState>>,
    directives: Vec<DirectiveSet>,
    listeners: Vec<ChangeListener>,
}

impl OptionRegistryBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an already constructed option.
    pub fn with_option(mut self, state: OptionState) -> Self {
        self.options.push(Ok(state));
        self
    }

    /// Adds an option built from its parts. Construction errors surface from
    /// [`build`](Self::build).
    pub fn with_property(
        mut self,
        key: impl Into<ConfigKey>,
        provider: Arc<dyn PropertyProvider>,
        value_type: ValueType,
    ) -> Self {
        self.options.push(OptionState::new(key, provider, value_type));
        self
    }

    /// Adds a directive batch to apply once all options are registered.
    pub fn with_directives(mut self, directives: DirectiveSet) -> Self {
        self.directives.push(directives);
        self
    }

    /// Reads a YAML directive document to apply once all options are registered.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use hexopt::service::OptionRegistryBuilder;
    ///
    /// # fn main() -> hexopt::domain::Result<()> {
    /// let registry = OptionRegistryBuilder::new()
    ///     .with_directives_file("/etc/myapp/directives.yaml")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    #[cfg(feature = "yaml")]
    pub fn with_directives_file(self, path: impl AsRef<std::path::Path>) -> Result<Self> {
        use crate::adapters::YamlDirectiveFile;
        let file = YamlDirectiveFile::from_file(path)?;
        Ok(self.with_directives(file.into_directives()))
    }

    /// Adds a change listener.
    pub fn with_listener(mut self, listener: ChangeListener) -> Self {
        self.listeners.push(listener);
        self
    }

    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// The first option construction error, [`ConfigError::DuplicateKey`], or
    /// [`ConfigError::ConfigKeyNotFound`] for a directive naming an unknown option.
    pub fn build(self) -> Result<OptionRegistry> {
        let registry = OptionRegistry::new();

        for state in self.options {
            registry.register(state?)?;
        }
        for directives in &self.directives {
            registry.apply(directives)?;
        }
        for listener in self.listeners {
            registry.subscribe(listener)?;
        }

        Ok(registry)
    }
}
