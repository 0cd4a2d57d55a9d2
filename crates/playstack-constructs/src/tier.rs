//! Tier policy bundles.

use playstack_cfn::codedeploy::DeploymentConfigName;
use playstack_cfn::lambda::UrlAuthType;
use playstack_core::DeploymentTier;

/// The full policy bundle selected by a deployment tier.
///
/// Rollout strategy, endpoint auth, and table reuse are always co-selected:
/// development trades rollout safety for iteration speed, production the
/// reverse. Constructing a mixed bundle requires going out of your way, and
/// the composer never does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierPolicy {
    /// Rollout strategy for new function versions.
    pub rollout: DeploymentConfigName,
    /// Authentication mode for the public endpoint.
    pub url_auth: UrlAuthType,
    /// Whether tables bind to existing resources instead of declaring new ones.
    pub reuse_tables: bool,
}

impl TierPolicy {
    /// The policy bundle for a tier.
    #[must_use]
    pub fn for_tier(tier: DeploymentTier) -> Self {
        match tier {
            DeploymentTier::Development => Self {
                rollout: DeploymentConfigName::LambdaAllAtOnce,
                url_auth: UrlAuthType::None,
                reuse_tables: true,
            },
            DeploymentTier::Production => Self {
                rollout: DeploymentConfigName::LambdaCanary10Percent10Minutes,
                url_auth: UrlAuthType::AwsIam,
                reuse_tables: false,
            },
        }
    }
}
