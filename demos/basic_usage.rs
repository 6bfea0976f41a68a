// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for hexopt.
//!
//! This example demonstrates:
//! - Declaring options backed by live properties
//! - Attaching override and bypass directives
//! - Running a refresh cycle with a change listener
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//! ```

use hexopt::prelude::*;
use std::sync::Arc;

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== hexopt: Basic Usage ===\n");

    let port = Arc::new(DynamicProperty::int("server.port", 8080));
    let debug = Arc::new(DynamicProperty::bool("server.debug", false));
    let mode = Arc::new(DynamicProperty::string("render.mode", "FAST"));

    let registry = OptionRegistry::builder()
        .with_property("server.port", port.clone(), ValueType::Int)
        .with_property("server.debug", debug.clone(), ValueType::Bool)
        .with_property(
            "render.mode",
            mode.clone(),
            ValueType::Enum(EnumType::new("Mode", ["FAST", "PRETTY", "DEBUG"])),
        )
        .with_listener(Arc::new(|event: &ChangeEvent| {
            println!("  changed: {} {} -> {}", event.key, event.old, event.new);
        }))
        .build()?;

    let port_key = ConfigKey::from("server.port");
    let debug_key = ConfigKey::from("server.debug");
    let mode_key = ConfigKey::from("render.mode");

    // Example 1: Backing values
    println!("--- Example 1: Backing Values ---");
    for key in registry.keys() {
        println!("  {} = {}", key, registry.value(&key)?);
    }

    // Example 2: An override masks the backing value
    println!("\n--- Example 2: Overrides ---");
    registry.set_override(&port_key, Some(Directive::new("9090")))?;
    println!("  server.port effective: {:?}", registry.effective_value(&port_key)?);

    // Example 3: A bypass masks the override too
    println!("\n--- Example 3: Bypasses ---");
    registry.set_bypass(&port_key, Some(Directive::new("443")))?;
    println!("  server.port effective: {:?}", registry.effective_value(&port_key)?);
    registry.set_bypass(&port_key, Some(Directive::empty()))?;
    println!(
        "  server.port with empty bypass: {:?}",
        registry.effective_value(&port_key)?
    );
    registry.clear_bypass(&port_key)?;

    // Example 4: Coercion failures surface on read
    println!("\n--- Example 4: Coercion Errors ---");
    registry.set_override(&mode_key, Some(Directive::new("UGLY")))?;
    match registry.effective_value(&mode_key) {
        Ok(value) => println!("  render.mode effective: {:?}", value),
        Err(e) => println!("  render.mode rejected: {}", e),
    }
    registry.clear_override(&mode_key)?;

    // Example 5: Refresh cycles advance snapshots
    println!("\n--- Example 5: Refresh ---");
    debug.set(ConfigValue::Bool(true));
    mode.set(ConfigValue::from("PRETTY"));
    let changed = registry.refresh()?;
    println!("  {} option(s) changed", changed);
    println!(
        "  server.debug snapshot: {}",
        registry.old_value(&debug_key)?
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
