// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed option values.
//!
//! This module provides the `ConfigValue` type, the value produced by property
//! providers and by coercion of textual directives.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A typed option value.
///
/// `Enum` holds a resolved member name. An enum-declared option's provider
/// reports its raw value as `String`; resolution turns that into `Enum`.
///
/// # Examples
///
/// ```
/// use hexopt::domain::config_value::ConfigValue;
///
/// let value = ConfigValue::from(42);
/// assert_eq!(value.as_i32(), Some(42));
/// assert_eq!(value.to_string(), "42");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum ConfigValue {
    /// A boolean
    Bool(bool),
    /// A 32-bit signed integer
    Int(i32),
    /// A 64-bit signed integer
    Long(i64),
    /// A 32-bit float
    Float(f32),
    /// A 64-bit float
    Double(f64),
    /// Plain text
    String(String),
    /// A resolved enum member name
    Enum(String),
}

impl ConfigValue {
    /// Returns the boolean, if this is a `Bool`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            ConfigValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the integer, if this is an `Int` or a `Long`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ConfigValue::Int(i) => Some(i64::from(*i)),
            ConfigValue::Long(l) => Some(*l),
            _ => None,
        }
    }

    /// Returns the float, if this is a `Float`.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            ConfigValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the float, if this is a `Float` or a `Double`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ConfigValue::Float(f) => Some(f64::from(*f)),
            ConfigValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the text of a `String` or the member name of an `Enum`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(s) | ConfigValue::Enum(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the member name, if this is an `Enum`.
    pub fn as_enum(&self) -> Option<&str> {
        match self {
            ConfigValue::Enum(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Bool(b) => write!(f, "{}", b),
            ConfigValue::Int(i) => write!(f, "{}", i),
            ConfigValue::Long(l) => write!(f, "{}", l),
            ConfigValue::Float(v) => write!(f, "{}", v),
            ConfigValue::Double(v) => write!(f, "{}", v),
            ConfigValue::String(s) | ConfigValue::Enum(s) => f.write_str(s),
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(b: bool) -> Self {
        ConfigValue::Bool(b)
    }
}

impl From<i32> for ConfigValue {
    fn from(i: i32) -> Self {
        ConfigValue::Int(i)
    }
}

impl From<i64> for ConfigValue {
    fn from(l: i64) -> Self {
        ConfigValue::Long(l)
    }
}

impl From<f32> for ConfigValue {
    fn from(f: f32) -> Self {
        ConfigValue::Float(f)
    }
}

impl From<f64> for ConfigValue {
    fn from(d: f64) -> Self {
        ConfigValue::Double(d)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::String(s)
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::String(s.to_string())
    }
}
