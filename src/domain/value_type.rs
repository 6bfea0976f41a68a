// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declared value types.
//!
//! Every option declares the type its accessor returns. The declaration is made
//! once, when the option is constructed, and coercion of textual directives
//! dispatches on it.

use crate::domain::errors::{ConfigError, Result};
use std::fmt;

/// An enum type known by name and its ordered member names.
///
/// Member lookup is an exact, case-sensitive match.
///
/// # Examples
///
/// ```
/// use hexopt::domain::EnumType;
///
/// let color = EnumType::new("Color", ["RED", "GREEN", "BLUE"]);
/// assert_eq!(color.resolve("GREEN").unwrap(), "GREEN");
/// assert!(color.resolve("green").is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnumType {
    name: String,
    members: Vec<String>,
}

impl EnumType {
    /// Creates an enum type from its name and members.
    pub fn new<I, S>(name: impl Into<String>, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            members: members.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the enum's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the member names in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Resolves `text` to the matching member name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownEnumMember`] if no member matches.
    pub fn resolve(&self, text: &str) -> Result<&str> {
        self.members
            .iter()
            .find(|m| m.as_str() == text)
            .map(String::as_str)
            .ok_or_else(|| ConfigError::UnknownEnumMember {
                enum_name: self.name.clone(),
                value: text.to_string(),
            })
    }
}

/// The declared type of an option.
///
/// `Other` carries a type the owning system knows about but that has no textual
/// coercion (a list-valued property, for instance). Options of that type still
/// resolve their backing value; only directive payloads fail to convert.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueType {
    /// `bool`
    Bool,
    /// 32-bit signed integer
    Int,
    /// 64-bit signed integer
    Long,
    /// 32-bit float
    Float,
    /// 64-bit float
    Double,
    /// Plain text
    String,
    /// An enum; the provider supplies member names as text
    Enum(EnumType),
    /// A type without textual coercion, by name
    Other(String),
}

impl ValueType {
    /// Returns the type's name as used in error messages.
    pub fn name(&self) -> &str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Int => "int",
            ValueType::Long => "long",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::String => "string",
            ValueType::Enum(e) => e.name(),
            ValueType::Other(name) => name,
        }
    }

    /// Returns the enum type if this is an enum declaration.
    pub fn as_enum(&self) -> Option<&EnumType> {
        match self {
            ValueType::Enum(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<EnumType> for ValueType {
    fn from(e: EnumType) -> Self {
        ValueType::Enum(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn color() -> EnumType {
        EnumType::new("Color", ["RED", "GREEN", "BLUE"])
    }

    #[test]
    fn test_enum_resolve_exact_match() {
        assert_eq!(color().resolve("BLUE").unwrap(), "BLUE");
    }

    #[test]
    fn test_enum_resolve_is_case_sensitive() {
        let err = color().resolve("blue").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::UnknownEnumMember { ref enum_name, ref value }
                if enum_name == "Color" && value == "blue"
        ));
    }

    #[test]
    fn test_enum_resolve_unknown() {
        assert!(color().resolve("PURPLE").is_err());
        assert!(color().resolve("").is_err());
    }

    #[test]
    fn test_enum_members_keep_order() {
        assert_eq!(color().members(), &["RED", "GREEN", "BLUE"]);
    }

    #[test]
    fn test_value_type_names() {
        assert_eq!(ValueType::Bool.name(), "bool");
        assert_eq!(ValueType::Int.name(), "int");
        assert_eq!(ValueType::Long.name(), "long");
        assert_eq!(ValueType::Float.name(), "float");
        assert_eq!(ValueType::Double.name(), "double");
        assert_eq!(ValueType::String.name(), "string");
        assert_eq!(ValueType::from(color()).name(), "Color");
        assert_eq!(ValueType::Other("list".into()).to_string(), "list");
    }

    #[test]
    fn test_value_type_as_enum() {
        let declared = ValueType::Enum(color());
        assert_eq!(declared.as_enum(), Some(&color()));
        assert!(ValueType::String.as_enum().is_none());
    }
}
