// SPDX-License-Identifier: MIT OR Apache-2.0

//! Option key newtype.
//!
//! `ConfigKey` names a single option. Registries are keyed by it directly rather
//! than by the option state, so two states never alias through their hash.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A type-safe wrapper for option keys.
///
/// # Examples
///
/// ```
/// use hexopt::domain::config_key::ConfigKey;
///
/// let key = ConfigKey::from("server.port");
/// assert_eq!(key.as_str(), "server.port");
/// assert!(!key.is_empty());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigKey(String);

impl ConfigKey {
    /// Creates a new `ConfigKey` from a `String`.
    pub fn new(key: String) -> Self {
        ConfigKey(key)
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the key is the empty string.
    ///
    /// Empty keys are representable here but rejected by
    /// [`OptionState`](crate::domain::OptionState) construction.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Converts the `ConfigKey` into its inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for ConfigKey {
    fn from(s: String) -> Self {
        ConfigKey(s)
    }
}

impl From<&str> for ConfigKey {
    fn from(s: &str) -> Self {
        ConfigKey(s.to_string())
    }
}

impl From<ConfigKey> for String {
    fn from(key: ConfigKey) -> Self {
        key.0
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ConfigKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// Must hash exactly like `str` so that `Borrow<str>` lookups work.
impl Hash for ConfigKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}
