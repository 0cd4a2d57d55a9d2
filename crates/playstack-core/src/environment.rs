//! The deployment-target registry.
//!
//! Three targets exist: a per-developer environment named after the current
//! user, plus the fixed `beta` and `prod` environments. The registry is
//! built once at startup and is immutable afterwards; its order determines
//! processing sequence only, the targets are otherwise independent.

use tracing::warn;

use crate::error::{PlaystackError, PlaystackResult};
use crate::types::{AccountId, AwsRegion, UNDEFINED};

/// Environment variable holding the developer environment's name.
pub const USER_VAR: &str = "USER";

/// Environment variable holding the AWS account id for all targets.
pub const ACCOUNT_VAR: &str = "PLAYGROUND_AWS_ACCOUNT_ID";

/// Deployment tier selecting the policy bundle for an environment.
///
/// Every policy difference between environments (rollout strategy, endpoint
/// auth mode, table reuse) hangs off this single two-variant enum, so the
/// bundle is always co-selected and mixed combinations are unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeploymentTier {
    /// Developer iteration: immediate cutover, open endpoint, reuse tables.
    Development,
    /// Shared environments (beta, prod): canary rollout, IAM-gated endpoint,
    /// tables owned by the stack.
    Production,
}

impl DeploymentTier {
    /// Returns `true` if tables should bind to an existing resource by name
    /// instead of declaring a new one.
    ///
    /// Reuse avoids destroy/recreate churn while iterating in a developer
    /// environment.
    #[must_use]
    pub fn reuse_tables(self) -> bool {
        matches!(self, Self::Development)
    }
}

/// One deployment target: a named (account, region) binding plus its tier.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Environment {
    /// Environment name, also used as the resource-name prefix.
    pub name: String,
    /// Target AWS account.
    pub account: AccountId,
    /// Target AWS region.
    pub region: AwsRegion,
    /// Whether this is the developer environment.
    pub is_dev: bool,
}

impl Environment {
    /// Create a new environment record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        account: AccountId,
        region: impl Into<String>,
        is_dev: bool,
    ) -> Self {
        Self {
            name: name.into(),
            account,
            region: AwsRegion::new(region),
            is_dev,
        }
    }

    /// The deployment tier derived from the dev flag.
    #[must_use]
    pub fn tier(&self) -> DeploymentTier {
        if self.is_dev {
            DeploymentTier::Development
        } else {
            DeploymentTier::Production
        }
    }
}

/// Ordered set of deployment targets with unique names.
#[derive(Debug, Clone)]
pub struct EnvironmentRegistry {
    environments: Vec<Environment>,
}

impl EnvironmentRegistry {
    /// Build the registry from process environment variables.
    ///
    /// Missing variables fall back to the literal `undefined` sentinel
    /// rather than failing; a warning is logged so misconfiguration stays
    /// visible.
    pub fn from_env() -> PlaystackResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the registry from an arbitrary variable lookup.
    ///
    /// This is the seam tests use to exercise fallback behavior without
    /// mutating the process environment.
    pub fn from_lookup<F>(lookup: F) -> PlaystackResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dev_name = resolve(&lookup, USER_VAR);
        let account = AccountId::new(resolve(&lookup, ACCOUNT_VAR));

        let environments = vec![
            Environment::new(dev_name, account.clone(), "us-west-2", true),
            Environment::new("beta", account.clone(), "us-west-2", false),
            Environment::new("prod", account, "us-east-1", false),
        ];

        Self::from_environments(environments)
    }

    /// Build a registry from an explicit list of environments.
    ///
    /// Rejects duplicate environment names: the name is the sole
    /// namespacing mechanism for derived resource names, so two targets
    /// sharing one would collide in the provider.
    pub fn from_environments(environments: Vec<Environment>) -> PlaystackResult<Self> {
        for (i, env) in environments.iter().enumerate() {
            if environments[..i].iter().any(|e| e.name == env.name) {
                return Err(PlaystackError::DuplicateEnvironment(env.name.clone()));
            }
        }
        Ok(Self { environments })
    }

    /// Iterate the targets in registry order.
    pub fn iter(&self) -> impl Iterator<Item = &Environment> {
        self.environments.iter()
    }

    /// Number of deployment targets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.environments.len()
    }

    /// Returns `true` if the registry holds no targets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }
}

impl<'a> IntoIterator for &'a EnvironmentRegistry {
    type Item = &'a Environment;
    type IntoIter = std::slice::Iter<'a, Environment>;

    fn into_iter(self) -> Self::IntoIter {
        self.environments.iter()
    }
}

/// Resolve a variable through the lookup, degrading to the sentinel.
fn resolve<F>(lookup: &F, key: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).unwrap_or_else(|| {
        warn!(variable = key, "environment variable unset, defaulting to {UNDEFINED:?}");
        UNDEFINED.to_owned()
    })
}
