// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directive parser trait definition.
//!
//! This module defines the `DirectiveParser` trait, which turns a directive
//! document in some format into a [`DirectiveSet`].

use crate::domain::{DirectiveSet, Result};

/// Parses directive documents.
pub trait DirectiveParser {
    /// Parses `content` into a directive set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ParseError`](crate::domain::ConfigError::ParseError)
    /// if the document is malformed.
    fn parse(&self, content: &str) -> Result<DirectiveSet>;

    /// Returns the file extensions this parser handles, without the dot.
    fn supported_extensions(&self) -> &[&str];
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Directive;

    struct TestParser;

    impl DirectiveParser for TestParser {
        fn parse(&self, content: &str) -> Result<DirectiveSet> {
            Ok(DirectiveSet::new().with_override("test.key", Directive::new(content)))
        }

        fn supported_extensions(&self) -> &[&str] {
            &["test"]
        }
    }

    #[test]
    fn test_parser_parse() {
        let set = TestParser.parse("42").unwrap();
        assert_eq!(set.overrides.get("test.key"), Some(&Directive::new("42")));
    }

    #[test]
    fn test_parser_extensions() {
        assert_eq!(TestParser.supported_extensions(), &["test"]);
    }
}
