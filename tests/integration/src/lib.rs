//! End-to-end synthesis tests for playstack.
//!
//! These tests run the full pipeline (registry, composer, renderer, emitter)
//! in-process with an injected variable lookup, so they never touch the real
//! process environment or require deployment credentials.

use playstack_core::{EnvironmentRegistry, StackLayout};

/// Registry for a developer named `alice` with a fixed account.
#[must_use]
pub fn alice_registry() -> EnvironmentRegistry {
    EnvironmentRegistry::from_lookup(|key| match key {
        "USER" => Some("alice".to_owned()),
        "PLAYGROUND_AWS_ACCOUNT_ID" => Some("123456789012".to_owned()),
        _ => None,
    })
    .unwrap_or_else(|e| panic!("registry construction failed: {e}"))
}

/// The default playground layout.
#[must_use]
pub fn playground_layout() -> StackLayout {
    StackLayout::default()
}

mod test_emission;
mod test_policies;
mod test_synthesis;
