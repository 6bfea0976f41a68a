// SPDX-License-Identifier: MIT OR Apache-2.0

//! Batches of directives.
//!
//! A `DirectiveSet` describes one administrative action: directives to attach
//! and directives to detach, across any number of options. It is the serde model
//! behind directive documents.

use crate::domain::config_key::ConfigKey;
use crate::domain::directive::Directive;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Directives to attach to and detach from options.
///
/// Options not mentioned are left untouched. A key listed in both a `clear_*`
/// set and the matching attach map ends up attached.
///
/// # Examples
///
/// ```
/// use hexopt::domain::{Directive, DirectiveSet};
///
/// let set = DirectiveSet::new()
///     .with_override("server.port", Directive::new("8080"))
///     .with_bypass("server.debug", Directive::empty())
///     .clear_override("legacy.flag");
///
/// assert_eq!(set.keys().count(), 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectiveSet {
    /// Override directives to attach
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<ConfigKey, Directive>,
    /// Bypass directives to attach
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub bypasses: BTreeMap<ConfigKey, Directive>,
    /// Options whose override is removed
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub clear_overrides: BTreeSet<ConfigKey>,
    /// Options whose bypass is removed
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub clear_bypasses: BTreeSet<ConfigKey>,
}

impl DirectiveSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an override directive.
    pub fn with_override(mut self, key: impl Into<ConfigKey>, directive: Directive) -> Self {
        self.overrides.insert(key.into(), directive);
        self
    }

    /// Adds a bypass directive.
    pub fn with_bypass(mut self, key: impl Into<ConfigKey>, directive: Directive) -> Self {
        self.bypasses.insert(key.into(), directive);
        self
    }

    /// Marks an override for removal.
    pub fn clear_override(mut self, key: impl Into<ConfigKey>) -> Self {
        self.clear_overrides.insert(key.into());
        self
    }

    /// Marks a bypass for removal.
    pub fn clear_bypass(mut self, key: impl Into<ConfigKey>) -> Self {
        self.clear_bypasses.insert(key.into());
        self
    }

    /// Returns true if the set changes nothing.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
            && self.bypasses.is_empty()
            && self.clear_overrides.is_empty()
            && self.clear_bypasses.is_empty()
    }

    /// Returns every key the set mentions, without duplicates, in order.
    pub fn keys(&self) -> impl Iterator<Item = &ConfigKey> {
        let all: BTreeSet<&ConfigKey> = self
            .overrides
            .keys()
            .chain(self.bypasses.keys())
            .chain(self.clear_overrides.iter())
            .chain(self.clear_bypasses.iter())
            .collect();
        all.into_iter()
    }
}
