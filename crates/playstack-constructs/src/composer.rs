//! The per-environment stack composer.
//!
//! Assembles one API stack for one deployment target: the compute function
//! with its rollout machinery and public endpoint, plus every table in the
//! layout with a read/write grant to the function. All policy differences
//! between environments come from the tier bundle; the wiring is identical.

use tracing::debug;

use playstack_core::{Environment, PlaystackResult, StackLayout};

use crate::function::{FunctionConfig, attach_function_url, build_function};
use crate::stack::Stack;
use crate::table::{TableConfig, build_table, grant_read_write};
use crate::tier::TierPolicy;

/// Compose the API stack for one environment.
pub fn compose_stack(environment: &Environment, layout: &StackLayout) -> PlaystackResult<Stack> {
    let policy = TierPolicy::for_tier(environment.tier());
    let mut stack = Stack::new(layout.stack_id(&environment.name), environment.clone());

    let function_config = FunctionConfig::builder()
        .function_name(layout.function_name(&environment.name))
        .artifact_path(layout.artifact_path.clone())
        .rollout(policy.rollout)
        .build();
    let function = build_function(&mut stack, &function_config)?;
    attach_function_url(&mut stack, &function, policy.url_auth)?;

    for table_def in &layout.tables {
        let table = build_table(
            &mut stack,
            &TableConfig {
                table_name: table_def.table_name.clone(),
                partition_key: table_def.partition_key.clone(),
                partition_key_type: table_def.partition_key_type,
                billing_mode: None,
                reuse: policy.reuse_tables,
            },
        )?;
        grant_read_write(&mut stack, &table, &function)?;
    }

    debug!(
        stack_id = stack.id(),
        environment = %environment.name,
        resources = stack.resource_count(),
        "composed stack"
    );

    Ok(stack)
}
