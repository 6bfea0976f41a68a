// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core business logic and types.
//!
//! This module holds the option core: keys, typed values, declared types,
//! directives, and the per-option state that resolves effective values. It is
//! independent of where values come from or how directives are stored.

pub mod config_key;
pub mod config_value;
pub mod directive;
pub mod directive_set;
pub mod errors;
pub mod option_state;
pub mod service;
pub mod value_type;

// Re-export commonly used types
pub use config_key::ConfigKey;
pub use config_value::ConfigValue;
pub use directive::Directive;
pub use directive_set::DirectiveSet;
pub use errors::{ConfigError, Result};
pub use option_state::{OptionState, OptionStateBuilder};
pub use service::OptionService;
pub use value_type::{EnumType, ValueType};
