// SPDX-License-Identifier: MIT OR Apache-2.0

//! Runtime option state with bypass and override directives.
//!
//! This crate resolves the value in force for a configuration option. Each option
//! has a live backing value supplied by a property provider, and may carry two
//! textual directives that force a different value:
//!
//! - a **bypass**, set administratively, which masks everything else;
//! - an **override**, which masks the backing value.
//!
//! Directive payloads are coerced to the option's declared type (boolean,
//! integer, long, float, double, string or enum) when they are read.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain Layer**: `OptionState`, `ConfigValue`, `ValueType`, `Directive`, errors
//! - **Ports**: `PropertyProvider` for live values, `DirectiveParser`, change listeners
//! - **Adapters**: `DynamicProperty` and the YAML directive reader
//! - **Service**: `OptionRegistry`, which owns a session's options and refreshes them
//!
//! # Feature Flags
//!
//! - `yaml`: Enable YAML directive documents (default)
//! - `full`: Enable all features
//!
//! # Quick Start
//!
//! ```rust
//! use hexopt::prelude::*;
//! use std::sync::Arc;
//!
//! # fn main() -> Result<()> {
//! let mode = Arc::new(DynamicProperty::string("render.mode", "FAST"));
//! let registry = OptionRegistry::builder()
//!     .with_property(
//!         "render.mode",
//!         mode.clone(),
//!         ValueType::Enum(EnumType::new("Mode", ["FAST", "PRETTY"])),
//!     )
//!     .build()?;
//!
//! let key = ConfigKey::from("render.mode");
//! assert_eq!(registry.value(&key)?, ConfigValue::Enum("FAST".into()));
//!
//! registry.set_override(&key, Some(Directive::new("PRETTY")))?;
//! assert_eq!(
//!     registry.effective_value(&key)?,
//!     Some(ConfigValue::Enum("PRETTY".into()))
//! );
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::domain::{
        ConfigError, ConfigKey, ConfigValue, Directive, DirectiveSet, EnumType, OptionService,
        OptionState, Result, ValueType,
    };
    pub use crate::ports::{ChangeEvent, ChangeListener, DirectiveParser, PropertyProvider};
    pub use crate::service::{OptionRegistry, OptionRegistryBuilder};

    pub use crate::adapters::DynamicProperty;
    #[cfg(feature = "yaml")]
    pub use crate::adapters::{YamlDirectiveFile, YamlDirectiveParser};
}
