// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! This module contains the interfaces between the option core and the
//! surrounding configuration system. Adapters implement them.

pub mod listener;
pub mod parser;
pub mod provider;

// Re-export commonly used types
pub use listener::{ChangeEvent, ChangeListener};
pub use parser::DirectiveParser;
pub use provider::PropertyProvider;
