// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer containing the option service implementation.
//!
//! This module contains the concrete implementation of the `OptionService`
//! trait, which owns a session's option states.

pub mod registry;

// Re-export commonly used types
pub use registry::{OptionRegistry, OptionRegistryBuilder};
