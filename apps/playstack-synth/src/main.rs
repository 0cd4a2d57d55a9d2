//! Playstack synthesizer - renders the playground API stacks to disk.
//!
//! Reads the deployment-target registry from the process environment,
//! composes one API stack per target, and writes the rendered templates
//! plus an asset manifest into the output directory. No provider calls
//! are made; deployment is a separate step.
//!
//! # Usage
//!
//! ```text
//! PLAYGROUND_AWS_ACCOUNT_ID=123456789012 playstack-synth
//! ```
//!
//! # Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `USER` | `undefined` | Name of the developer environment |
//! | `PLAYGROUND_AWS_ACCOUNT_ID` | `undefined` | Target AWS account for all stacks |
//! | `PLAYSTACK_OUT_DIR` | `playstack.out` | Output directory |
//! | `LOG_LEVEL` | `info` | Log level filter |
//! | `RUST_LOG` | *(unset)* | Fine-grained tracing filter (overrides `LOG_LEVEL`) |

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use playstack_constructs::{emit, synthesize_all};
use playstack_core::{EnvironmentRegistry, SynthConfig};

/// Initialize the tracing subscriber.
///
/// Uses `RUST_LOG` if set, otherwise falls back to the `LOG_LEVEL` config value.
fn init_tracing(log_level: &str) -> Result<()> {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::try_new(log_level)
            .with_context(|| format!("invalid log level filter: {log_level}"))?
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    Ok(())
}

fn main() -> Result<()> {
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_owned());
    init_tracing(&log_level)?;

    let config = SynthConfig::from_env();
    let registry = EnvironmentRegistry::from_env().context("failed to build target registry")?;
    info!(
        environments = registry.len(),
        out_dir = %config.out_dir.display(),
        "starting synthesis"
    );

    let stacks = synthesize_all(&registry, &config.layout).context("stack composition failed")?;
    for stack in &stacks {
        info!(
            stack_id = %stack.id,
            environment = %stack.environment.name,
            resources = stack.template.resources.len(),
            "composed stack"
        );
    }

    emit(&config.out_dir, &stacks).context("failed to write synth output")?;
    info!(stacks = stacks.len(), "synthesis complete");

    Ok(())
}
