//! The key-value table construct.
//!
//! Either declares a brand-new table or binds to an existing table of the
//! same name (the reuse path, used by developer environments to avoid
//! destroy/recreate churn). The returned handle supports permission grants
//! regardless of which path was taken; create-vs-reference correctness is
//! entirely the caller's responsibility via the flag it passes.

use playstack_cfn::dynamodb::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType,
    TableProperties, existing_table_arn,
};
use playstack_cfn::expr::Expr;
use playstack_cfn::iam::{PolicyDocument, PolicyProperties};
use playstack_cfn::template::Resource;
use playstack_core::PlaystackResult;

use crate::function::FunctionHandle;
use crate::stack::Stack;

/// The action set granted by a read/write grant.
///
/// Matches the provider's standard table read/write grant, covering item
/// CRUD, queries, scans, batch operations, and stream reads.
const READ_WRITE_ACTIONS: &[&str] = &[
    "dynamodb:BatchGetItem",
    "dynamodb:GetRecords",
    "dynamodb:GetShardIterator",
    "dynamodb:Query",
    "dynamodb:GetItem",
    "dynamodb:Scan",
    "dynamodb:ConditionCheckItem",
    "dynamodb:BatchWriteItem",
    "dynamodb:PutItem",
    "dynamodb:UpdateItem",
    "dynamodb:DeleteItem",
    "dynamodb:DescribeTable",
];

/// Configuration for one key-value table.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Table name.
    pub table_name: String,
    /// Partition key attribute name.
    pub partition_key: String,
    /// Partition key attribute type.
    pub partition_key_type: ScalarAttributeType,
    /// Billing mode; defaults to pay-per-request when declaring a new table.
    pub billing_mode: Option<BillingMode>,
    /// Bind to an existing table instead of declaring a new one.
    pub reuse: bool,
}

/// Handle to a built (or referenced) table, usable for grants either way.
#[derive(Debug, Clone)]
pub struct TableHandle {
    /// The table name.
    pub table_name: String,
    /// Logical id of the declared resource; `None` on the reuse path.
    pub logical_id: Option<String>,
    /// The table ARN: an intrinsic for declared tables, a literal for
    /// referenced ones.
    pub arn: Expr,
}

/// Build the table into the stack, or resolve a reference to an existing one.
pub fn build_table(stack: &mut Stack, config: &TableConfig) -> PlaystackResult<TableHandle> {
    let construct_id = format!("{}Table", config.table_name);

    if config.reuse {
        let env = stack.environment();
        return Ok(TableHandle {
            table_name: config.table_name.clone(),
            logical_id: None,
            arn: existing_table_arn(env.region.as_str(), env.account.as_str(), &config.table_name),
        });
    }

    let logical_id = stack.add_resource(
        &construct_id,
        Resource::new(
            TableProperties::TYPE,
            &TableProperties {
                table_name: config.table_name.clone(),
                key_schema: vec![KeySchemaElement {
                    attribute_name: config.partition_key.clone(),
                    key_type: KeyType::Hash,
                }],
                attribute_definitions: vec![AttributeDefinition {
                    attribute_name: config.partition_key.clone(),
                    attribute_type: config.partition_key_type,
                }],
                billing_mode: Some(config.billing_mode.unwrap_or_default()),
            },
        )?,
    )?;

    Ok(TableHandle {
        table_name: config.table_name.clone(),
        arn: Expr::get_att(&logical_id, "Arn"),
        logical_id: Some(logical_id),
    })
}

/// Grant a function read/write access to the table.
///
/// Appends one inline policy to the function's execution role covering the
/// table and its indexes. Grants never cross stacks: both handles must come
/// from the same stack, which the composer guarantees.
pub fn grant_read_write(
    stack: &mut Stack,
    table: &TableHandle,
    function: &FunctionHandle,
) -> PlaystackResult<()> {
    let actions = READ_WRITE_ACTIONS.iter().map(|&a| a.to_owned()).collect();
    let resources = vec![table.arn.clone(), table.arn.clone().concat("/index/*")];

    stack.add_resource(
        &format!("{}TableReadWriteGrant", table.table_name),
        Resource::new(
            PolicyProperties::TYPE,
            &PolicyProperties {
                policy_name: format!("{}ReadWrite", table.table_name),
                policy_document: PolicyDocument::allow(actions, resources),
                roles: vec![Expr::reference(&function.role_logical_id)],
            },
        )?,
    )?;

    Ok(())
}
