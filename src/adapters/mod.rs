// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing port implementations.
//!
//! This module contains concrete implementations of the traits defined in the
//! ports layer: a live in-memory property provider and, with the `yaml` feature,
//! a reader for YAML directive documents.

pub mod dynamic_property;
#[cfg(feature = "yaml")]
pub mod yaml_directives;

pub use dynamic_property::DynamicProperty;
#[cfg(feature = "yaml")]
pub use yaml_directives::{YamlDirectiveFile, YamlDirectiveParser};
