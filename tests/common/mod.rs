// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared fixtures for integration tests.

use hexopt::domain::{ConfigValue, EnumType, OptionState, ValueType};
use hexopt::ports::PropertyProvider;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// A provider that counts how often it is read.
#[derive(Debug)]
pub struct MockProvider {
    name: String,
    value: Mutex<ConfigValue>,
    reads: AtomicUsize,
}

#[allow(dead_code)]
impl MockProvider {
    /// Creates a provider holding `value`.
    pub fn new(name: impl Into<String>, value: ConfigValue) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            value: Mutex::new(value),
            reads: AtomicUsize::new(0),
        })
    }

    /// Replaces the held value.
    pub fn set(&self, value: ConfigValue) {
        *self.value.lock().unwrap() = value;
    }

    /// Returns how many times the value has been read.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl PropertyProvider for MockProvider {
    fn current_value(&self) -> ConfigValue {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.value.lock().unwrap().clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// The `{RED, GREEN, BLUE}` enum used across tests.
#[allow(dead_code)]
pub fn color() -> ValueType {
    ValueType::Enum(EnumType::new("Color", ["RED", "GREEN", "BLUE"]))
}

/// Builds a state for `key` over a fresh mock provider.
#[allow(dead_code)]
pub fn mock_state(
    key: &str,
    value_type: ValueType,
    initial: ConfigValue,
) -> (Arc<MockProvider>, OptionState) {
    let provider = MockProvider::new(key, initial);
    let state = OptionState::new(key, provider.clone(), value_type).unwrap();
    (provider, state)
}

/// Routes `tracing` output to the test harness. Safe to call repeatedly.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}
