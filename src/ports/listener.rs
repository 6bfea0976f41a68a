// SPDX-License-Identifier: MIT OR Apache-2.0

//! Change listener definitions.
//!
//! A refresh cycle advances every option's snapshot. Listeners are told about
//! each option whose snapshot moved, with both the previous and the new value.

use crate::domain::{ConfigKey, ConfigValue};
use std::sync::Arc;

/// A snapshot change observed during a refresh cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct ChangeEvent {
    /// The option that changed
    pub key: ConfigKey,
    /// The snapshot before the refresh
    pub old: ConfigValue,
    /// The snapshot after the refresh
    pub new: ConfigValue,
}

/// Callback invoked for every [`ChangeEvent`].
///
/// Listeners run on the thread driving the refresh, after the registry has
/// released its lock.
pub type ChangeListener = Arc<dyn Fn(&ChangeEvent) + Send + Sync>;
