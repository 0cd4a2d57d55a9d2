//! The compute-function construct.
//!
//! Emits a deployable function plus its staged-rollout mechanism: execution
//! role, function, current version, the `live` alias, and a CodeDeploy
//! deployment group that shifts traffic through the alias with automatic
//! rollback on stopped or failed deployments. A public HTTPS endpoint can
//! be attached afterwards.
//!
//! Modeled as a configuration struct plus build functions returning a
//! [`FunctionHandle`]; downstream grants attach to the handle's role.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use typed_builder::TypedBuilder;

use playstack_cfn::codedeploy::{
    AlarmConfiguration, ApplicationProperties, AutoRollbackConfiguration, ComputePlatform,
    DeploymentConfigName, DeploymentGroupProperties, DeploymentStyle,
};
use playstack_cfn::expr::Expr;
use playstack_cfn::iam::{PolicyDocument, RoleProperties};
use playstack_cfn::lambda::{
    AliasProperties, Code, FunctionEnvironment, FunctionProperties, PermissionProperties, Runtime,
    UrlAuthType, UrlProperties, VersionProperties,
};
use playstack_cfn::template::{Export, Output, Resource};
use playstack_core::PlaystackResult;

use crate::stack::Stack;

/// The stable alias name every deployment retargets.
pub const ALIAS_NAME: &str = "live";

/// Managed policy granting basic execution (log delivery) to the function.
const LAMBDA_BASIC_EXECUTION: &str =
    "arn:aws:iam::aws:policy/service-role/AWSLambdaBasicExecutionRole";

/// Managed policy granting CodeDeploy permission to shift Lambda traffic.
const CODEDEPLOY_FOR_LAMBDA: &str =
    "arn:aws:iam::aws:policy/service-role/AWSCodeDeployRoleForLambda";

/// Configuration for one compute function.
#[derive(Debug, Clone, TypedBuilder)]
pub struct FunctionConfig {
    /// Function name; dependent resource names derive from it.
    #[builder(setter(into))]
    pub function_name: String,
    /// Path where the build step left the deployable bundle.
    #[builder(default = String::from("target/lambda/release/bootstrap.zip"), setter(into))]
    pub artifact_path: String,
    /// Rollout strategy for new versions.
    #[builder(default = DeploymentConfigName::LambdaAllAtOnce)]
    pub rollout: DeploymentConfigName,
    /// Invocation timeout in seconds.
    #[builder(default)]
    pub timeout: Option<u32>,
    /// Memory size in MiB.
    #[builder(default)]
    pub memory_size: Option<u32>,
    /// Runtime environment variables.
    #[builder(default)]
    pub environment: BTreeMap<String, String>,
}

/// Handle to a built function, used to wire grants and the endpoint.
#[derive(Debug, Clone)]
pub struct FunctionHandle {
    /// The function name.
    pub function_name: String,
    /// Logical id of the function resource.
    pub logical_id: String,
    /// Logical id of the execution role; permission grants attach here.
    pub role_logical_id: String,
    /// Logical id of the `live` alias.
    pub alias_logical_id: String,
}

/// Build the function and its rollout machinery into the stack.
///
/// All failure modes the provider could hit (bad artifact, quota, provider-
/// side naming collisions) are its to report; the only local errors are
/// logical-id collisions.
pub fn build_function(stack: &mut Stack, config: &FunctionConfig) -> PlaystackResult<FunctionHandle> {
    let name = &config.function_name;

    let role_logical_id = stack.add_resource(
        &format!("{name}Role"),
        Resource::new(
            RoleProperties::TYPE,
            &RoleProperties {
                assume_role_policy_document: PolicyDocument::service_assume_role(
                    "lambda.amazonaws.com",
                ),
                managed_policy_arns: vec![LAMBDA_BASIC_EXECUTION.to_owned()],
            },
        )?,
    )?;

    let environment = if config.environment.is_empty() {
        None
    } else {
        Some(FunctionEnvironment {
            variables: config.environment.clone(),
        })
    };

    let logical_id = stack.add_resource(
        name,
        Resource::new(
            FunctionProperties::TYPE,
            &FunctionProperties {
                function_name: name.clone(),
                runtime: Runtime::ProvidedAl2,
                handler: "bootstrap".to_owned(),
                code: code_location(stack, name),
                role: Expr::get_att(&role_logical_id, "Arn"),
                description: Some(generated_description()),
                timeout: config.timeout,
                memory_size: config.memory_size,
                environment,
            },
        )?
        // Binds the declared code location back to the local build artifact
        // for the external uploader.
        .with_metadata(serde_json::json!({
            "playstack:asset:path": config.artifact_path,
            "playstack:asset:property": "Code",
        })),
    )?;

    let version_logical_id = stack.add_resource(
        &format!("{name}CurrentVersion"),
        Resource::new(
            VersionProperties::TYPE,
            &VersionProperties {
                function_name: Expr::reference(&logical_id),
            },
        )?,
    )?;

    let alias_logical_id = stack.add_resource(
        &format!("{name}LambdaAlias"),
        Resource::new(
            AliasProperties::TYPE,
            &AliasProperties {
                function_name: Expr::reference(&logical_id),
                function_version: Expr::get_att(&version_logical_id, "Version"),
                name: ALIAS_NAME.to_owned(),
            },
        )?,
    )?;

    build_deployment_group(stack, name, config.rollout, &alias_logical_id)?;

    Ok(FunctionHandle {
        function_name: name.clone(),
        logical_id,
        role_logical_id,
        alias_logical_id,
    })
}

/// Attach a public HTTPS endpoint to the function's `live` alias.
///
/// With open auth an explicit public-invoke permission is added; either way
/// the endpoint URL is exported under `<function-name>-url` for operator
/// discoverability.
pub fn attach_function_url(
    stack: &mut Stack,
    function: &FunctionHandle,
    auth_type: UrlAuthType,
) -> PlaystackResult<()> {
    let name = &function.function_name;

    let url_logical_id = stack.add_resource(
        &format!("{name}Url"),
        Resource::new(
            UrlProperties::TYPE,
            &UrlProperties {
                auth_type,
                target_function_arn: Expr::reference(&function.alias_logical_id),
            },
        )?,
    )?;

    if auth_type == UrlAuthType::None {
        stack.add_resource(
            &format!("{name}UrlPublicPermission"),
            Resource::new(
                PermissionProperties::TYPE,
                &PermissionProperties::public_url_invoke(Expr::reference(
                    &function.alias_logical_id,
                )),
            )?,
        )?;
    }

    let export_name = format!("{name}-url");
    stack.add_output(
        &export_name,
        Output {
            description: None,
            value: Expr::get_att(&url_logical_id, "FunctionUrl"),
            export: Some(Export { name: export_name.clone() }),
        },
    )?;

    Ok(())
}

/// Build the CodeDeploy application, service role, and deployment group.
fn build_deployment_group(
    stack: &mut Stack,
    function_name: &str,
    rollout: DeploymentConfigName,
    alias_logical_id: &str,
) -> PlaystackResult<()> {
    let application_logical_id = stack.add_resource(
        &format!("{function_name}DeploymentApplication"),
        Resource::new(
            ApplicationProperties::TYPE,
            &ApplicationProperties {
                application_name: format!("{function_name}-deploy"),
                compute_platform: ComputePlatform::Lambda,
            },
        )?,
    )?;

    let service_role_logical_id = stack.add_resource(
        &format!("{function_name}CodeDeployRole"),
        Resource::new(
            RoleProperties::TYPE,
            &RoleProperties {
                assume_role_policy_document: PolicyDocument::service_assume_role(
                    "codedeploy.amazonaws.com",
                ),
                managed_policy_arns: vec![CODEDEPLOY_FOR_LAMBDA.to_owned()],
            },
        )?,
    )?;

    let group_name = format!("{function_name}DeploymentGroup");
    stack.add_resource(
        &group_name,
        Resource::new(
            DeploymentGroupProperties::TYPE,
            &DeploymentGroupProperties {
                application_name: Expr::reference(&application_logical_id),
                deployment_group_name: group_name.clone(),
                service_role_arn: Expr::get_att(&service_role_logical_id, "Arn"),
                deployment_config_name: rollout,
                deployment_style: DeploymentStyle::blue_green_with_traffic_control(),
                auto_rollback_configuration: AutoRollbackConfiguration::on_stop_or_failure(),
                alarm_configuration: Some(AlarmConfiguration::ignore_poll_failures()),
            },
        )?
        // Traffic shifting retargets the alias, so it must exist first.
        .depends_on(alias_logical_id),
    )?;

    Ok(())
}

/// Deterministic staging location for the function's code bundle.
///
/// The synthesizer never hashes or uploads the artifact; the manifest maps
/// this location back to the local artifact path for the external uploader.
fn code_location(stack: &Stack, function_name: &str) -> Code {
    let env = stack.environment();
    Code {
        s3_bucket: format!("playstack-assets-{}-{}", env.account, env.region),
        s3_key: format!("{function_name}/bootstrap.zip"),
    }
}

/// Description recording when the declaration was generated.
///
/// Time-dependent on purpose, and deliberately excluded from anything that
/// contributes to resource identity or naming.
fn generated_description() -> String {
    format!(
        "Generated on: {}",
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}
