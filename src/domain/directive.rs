// SPDX-License-Identifier: MIT OR Apache-2.0

//! Bypass and override directives.
//!
//! A directive forces an option's value by carrying a textual payload that is
//! coerced to the option's declared type when read. A directive may also be
//! present without a payload: it then occupies its slot (and masks lower
//! priorities) while contributing no value.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An immutable bypass or override directive.
///
/// Option slots hold `Option<Directive>`, which gives three states: unset
/// (`None`), present but inert (`Some(Directive::empty())`), and present with a
/// payload.
///
/// # Examples
///
/// ```
/// use hexopt::domain::Directive;
///
/// let forced = Directive::new("42");
/// assert_eq!(forced.payload(), Some("42"));
///
/// let inert = Directive::empty();
/// assert!(inert.payload().is_none());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Directive {
    payload: Option<String>,
}

impl Directive {
    /// Creates a directive carrying `payload`.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: Some(payload.into()),
        }
    }

    /// Creates a directive without a payload.
    pub fn empty() -> Self {
        Self { payload: None }
    }

    /// Returns the textual payload, if any.
    pub fn payload(&self) -> Option<&str> {
        self.payload.as_deref()
    }

    /// Returns true if the directive carries no payload.
    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

impl From<Option<String>> for Directive {
    fn from(payload: Option<String>) -> Self {
        Self { payload }
    }
}

impl From<&str> for Directive {
    fn from(payload: &str) -> Self {
        Self::new(payload)
    }
}

impl From<String> for Directive {
    fn from(payload: String) -> Self {
        Self::new(payload)
    }
}

impl Serialize for Directive {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.payload.serialize(serializer)
    }
}

// Scalars keep the text written in the document (`1.10`, not `1.1`); null is
// an empty directive.
impl<'de> Deserialize<'de> for Directive {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<String>::deserialize(deserializer).map(Directive::from)
    }
}
