//! CodeDeploy application and deployment-group declaration types.
//!
//! A deployment group binds a function's `live` alias to a rollout policy
//! plus automatic-rollback triggers. Each new function version then rolls
//! out through the existing group.

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// Compute platform for a CodeDeploy application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComputePlatform {
    /// Lambda traffic-shifting deployments.
    Lambda,
}

/// Built-in deployment configuration selecting the rollout strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeploymentConfigName {
    /// Shift all traffic to the new version immediately.
    #[serde(rename = "CodeDeployDefault.LambdaAllAtOnce")]
    LambdaAllAtOnce,
    /// Shift 10% of traffic, hold for a 10-minute observation window, then
    /// complete the shift.
    #[serde(rename = "CodeDeployDefault.LambdaCanary10Percent10Minutes")]
    LambdaCanary10Percent10Minutes,
}

impl DeploymentConfigName {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LambdaAllAtOnce => "CodeDeployDefault.LambdaAllAtOnce",
            Self::LambdaCanary10Percent10Minutes => {
                "CodeDeployDefault.LambdaCanary10Percent10Minutes"
            }
        }
    }
}

impl std::fmt::Display for DeploymentConfigName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conditions that trigger an automatic rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutoRollbackEvent {
    /// The deployment was marked failed.
    #[serde(rename = "DEPLOYMENT_FAILURE")]
    DeploymentFailure,
    /// The deployment process stopped before completing.
    #[serde(rename = "DEPLOYMENT_STOP_ON_DEPLOYMENT")]
    DeploymentStopOnDeployment,
    /// A configured alarm fired during the deployment.
    #[serde(rename = "DEPLOYMENT_STOP_ON_ALARM")]
    DeploymentStopOnAlarm,
}

/// Automatic rollback configuration for a deployment group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoRollbackConfiguration {
    /// Whether automatic rollback is enabled.
    pub enabled: bool,
    /// The conditions that trigger a rollback.
    pub events: Vec<AutoRollbackEvent>,
}

impl AutoRollbackConfiguration {
    /// Roll back when the deployment stops or fails.
    ///
    /// Stopped and failed deployments are treated identically: both revert
    /// traffic to the previous stable version. Alarm events are deliberately
    /// excluded, see [`AlarmConfiguration::ignore_poll_failures`].
    #[must_use]
    pub fn on_stop_or_failure() -> Self {
        Self {
            enabled: true,
            events: vec![
                AutoRollbackEvent::DeploymentFailure,
                AutoRollbackEvent::DeploymentStopOnDeployment,
            ],
        }
    }
}

/// Alarm wiring for a deployment group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AlarmConfiguration {
    /// Whether alarms gate the deployment.
    pub enabled: bool,
    /// Whether failures to poll alarm state are ignored.
    pub ignore_poll_alarm_failure: bool,
}

impl AlarmConfiguration {
    /// No alarms, and alarm-polling failures never trigger a rollback.
    ///
    /// Monitoring-system unavailability must not block or falsely roll back
    /// a deployment.
    #[must_use]
    pub fn ignore_poll_failures() -> Self {
        Self {
            enabled: false,
            ignore_poll_alarm_failure: true,
        }
    }
}

/// Deployment style for Lambda traffic shifting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentStyle {
    /// The deployment type.
    pub deployment_type: String,
    /// The deployment option.
    pub deployment_option: String,
}

impl DeploymentStyle {
    /// Blue/green with traffic control, the only style valid for Lambda.
    #[must_use]
    pub fn blue_green_with_traffic_control() -> Self {
        Self {
            deployment_type: "BLUE_GREEN".to_owned(),
            deployment_option: "WITH_TRAFFIC_CONTROL".to_owned(),
        }
    }
}

/// Properties for an `AWS::CodeDeploy::Application` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApplicationProperties {
    /// The application name.
    pub application_name: String,
    /// The compute platform.
    pub compute_platform: ComputePlatform,
}

impl ApplicationProperties {
    /// Resource type for application declarations.
    pub const TYPE: &str = "AWS::CodeDeploy::Application";
}

/// Properties for an `AWS::CodeDeploy::DeploymentGroup` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeploymentGroupProperties {
    /// The owning application.
    pub application_name: Expr,
    /// The deployment group name.
    pub deployment_group_name: String,
    /// ARN of the service role CodeDeploy assumes.
    pub service_role_arn: Expr,
    /// The rollout strategy.
    pub deployment_config_name: DeploymentConfigName,
    /// The deployment style.
    pub deployment_style: DeploymentStyle,
    /// The automatic rollback triggers.
    pub auto_rollback_configuration: AutoRollbackConfiguration,
    /// The alarm wiring.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alarm_configuration: Option<AlarmConfiguration>,
}

impl DeploymentGroupProperties {
    /// Resource type for deployment-group declarations.
    pub const TYPE: &str = "AWS::CodeDeploy::DeploymentGroup";
}
