//! Core types, configuration, and the environment registry for playstack.
//!
//! This crate provides the foundational building blocks shared across the
//! playstack synthesizer: the deployment-target registry (dev/beta/prod),
//! the tier policy bundle, synth configuration, and common AWS identifiers.

mod config;
mod environment;
mod error;
mod types;

pub use config::{StackLayout, SynthConfig, TableDef};
pub use environment::{DeploymentTier, Environment, EnvironmentRegistry};
pub use error::{PlaystackError, PlaystackResult};
pub use types::{AccountId, AwsRegion};
