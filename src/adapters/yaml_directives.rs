// SPDX-License-Identifier: MIT OR Apache-2.0

//! YAML directive document adapter.
//!
//! This module reads administrative directive documents written in YAML:
//!
//! ```yaml
//! overrides:
//!   server.port: 8080
//! bypasses:
//!   server.debug: ~        # present, but carries no value
//! clear_overrides:
//!   - legacy.flag
//! ```
//!
//! Payloads are not checked against any option's type here; that happens when
//! the option is read.

use crate::domain::{ConfigError, DirectiveSet, Result};
use crate::ports::DirectiveParser;
use std::fs;
use std::path::{Path, PathBuf};

/// Maximum allowed size for directive documents (10MB)
const MAX_YAML_FILE_SIZE: u64 = 10 * 1024 * 1024;

const SOURCE_NAME: &str = "yaml-directives";

/// YAML parser for directive documents.
///
/// An empty document parses to an empty [`DirectiveSet`].
///
/// # Examples
///
/// ```rust
/// use hexopt::adapters::YamlDirectiveParser;
/// use hexopt::domain::Directive;
/// use hexopt::ports::DirectiveParser;
///
/// let parser = YamlDirectiveParser::new();
/// let set = parser.parse("overrides:\n  server.port: 8080\n").unwrap();
/// assert_eq!(set.overrides.get("server.port"), Some(&Directive::new("8080")));
/// ```
#[derive(Debug, Clone, Default)]
pub struct YamlDirectiveParser;

impl YamlDirectiveParser {
    /// Creates a new YAML parser.
    pub fn new() -> Self {
        YamlDirectiveParser
    }
}

impl DirectiveParser for YamlDirectiveParser {
    fn parse(&self, content: &str) -> Result<DirectiveSet> {
        if content.trim().is_empty() {
            return Ok(DirectiveSet::default());
        }

        serde_yaml::from_str(content).map_err(|e| ConfigError::ParseError {
            message: format!("Failed to parse YAML: {}", e),
            source: Some(Box::new(e)),
        })
    }

    fn supported_extensions(&self) -> &[&str] {
        &["yaml", "yml"]
    }
}

/// A directive document backed by a YAML file.
///
/// The file is read when the adapter is created and again on
/// [`reload`](Self::reload). Applying the directives is up to the caller,
/// typically through [`OptionRegistry::apply`](crate::service::OptionRegistry::apply).
///
/// # Examples
///
/// ```rust,no_run
/// use hexopt::adapters::YamlDirectiveFile;
///
/// let file = YamlDirectiveFile::from_file("/etc/myapp/directives.yaml").unwrap();
/// println!("{} options affected", file.directives().keys().count());
/// ```
#[derive(Debug, Clone)]
pub struct YamlDirectiveFile {
    /// Path to the YAML file
    file_path: PathBuf,
    /// Parsed directives
    directives: DirectiveSet,
    /// YAML parser
    parser: YamlDirectiveParser,
}

impl YamlDirectiveFile {
    /// Reads and parses the directive document at `path`.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::SourceError`] if the file is missing, unreadable, or
    ///   larger than 10MB.
    /// - [`ConfigError::ParseError`] if the document is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file_path = path.as_ref().to_path_buf();

        let canonical_path = file_path.canonicalize().map_err(|e| ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!("Invalid or inaccessible path: {}", display_name(&file_path)),
            source: Some(Box::new(e)),
        })?;

        let parser = YamlDirectiveParser::new();
        let directives = read_directives(&canonical_path, &parser)?;

        tracing::debug!(
            "Loaded directives for {} options from '{}'",
            directives.keys().count(),
            display_name(&canonical_path)
        );

        Ok(Self {
            file_path: canonical_path,
            directives,
            parser,
        })
    }

    /// Returns the path to the directive file.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Returns the directives read from the file.
    pub fn directives(&self) -> &DirectiveSet {
        &self.directives
    }

    /// Consumes the adapter, returning its directives.
    pub fn into_directives(self) -> DirectiveSet {
        self.directives
    }

    /// Re-reads the file. On failure the previously read directives are kept.
    pub fn reload(&mut self) -> Result<()> {
        self.directives = read_directives(&self.file_path, &self.parser)?;
        tracing::debug!(
            "Reloaded directives for {} options from '{}'",
            self.directives.keys().count(),
            display_name(&self.file_path)
        );
        Ok(())
    }
}

fn read_directives(path: &Path, parser: &YamlDirectiveParser) -> Result<DirectiveSet> {
    let metadata = fs::metadata(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read file metadata: {}", display_name(path)),
        source: Some(Box::new(e)),
    })?;

    if metadata.len() > MAX_YAML_FILE_SIZE {
        return Err(ConfigError::SourceError {
            source_name: SOURCE_NAME.to_string(),
            message: format!(
                "Directive file too large: {} bytes (max {} bytes)",
                metadata.len(),
                MAX_YAML_FILE_SIZE
            ),
            source: None,
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ConfigError::SourceError {
        source_name: SOURCE_NAME.to_string(),
        message: format!("Failed to read directive file: {}", display_name(path)),
        source: Some(Box::new(e)),
    })?;

    parser.parse(&content)
}

fn display_name(path: &Path) -> &str {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("<unknown>")
}
