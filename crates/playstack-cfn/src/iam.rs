//! IAM role and policy declaration types.

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// Policy document version understood by the provider.
pub const POLICY_VERSION: &str = "2012-10-17";

/// Statement effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Allow the listed actions.
    Allow,
    /// Deny the listed actions.
    Deny,
}

/// Service principal for a trust policy statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Principal {
    /// The trusted service identifiers.
    pub service: Vec<String>,
}

/// One policy statement.
///
/// Trust-policy statements carry a principal and no resources; permission
/// statements carry resources and no principal. Both shapes share this
/// struct with optional fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    /// The statement effect.
    pub effect: Effect,
    /// The actions covered by the statement.
    pub action: Vec<String>,
    /// The resources the statement applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resource: Vec<Expr>,
    /// The principal, for trust-policy statements.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub principal: Option<Principal>,
}

/// An IAM policy document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyDocument {
    /// The document version.
    pub version: String,
    /// The statements.
    pub statement: Vec<Statement>,
}

impl PolicyDocument {
    /// A trust policy allowing one service to assume the role.
    #[must_use]
    pub fn service_assume_role(service: impl Into<String>) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: vec![Statement {
                effect: Effect::Allow,
                action: vec!["sts:AssumeRole".to_owned()],
                resource: Vec::new(),
                principal: Some(Principal {
                    service: vec![service.into()],
                }),
            }],
        }
    }

    /// A permission policy allowing a set of actions on a set of resources.
    #[must_use]
    pub fn allow(actions: Vec<String>, resources: Vec<Expr>) -> Self {
        Self {
            version: POLICY_VERSION.to_owned(),
            statement: vec![Statement {
                effect: Effect::Allow,
                action: actions,
                resource: resources,
                principal: None,
            }],
        }
    }
}

/// Properties for an `AWS::IAM::Role` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RoleProperties {
    /// The trust policy.
    pub assume_role_policy_document: PolicyDocument,
    /// Managed policy ARNs attached to the role.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub managed_policy_arns: Vec<String>,
}

impl RoleProperties {
    /// Resource type for role declarations.
    pub const TYPE: &str = "AWS::IAM::Role";
}

/// Properties for an `AWS::IAM::Policy` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PolicyProperties {
    /// The inline policy name.
    pub policy_name: String,
    /// The permission document.
    pub policy_document: PolicyDocument,
    /// The roles the policy attaches to.
    pub roles: Vec<Expr>,
}

impl PolicyProperties {
    /// Resource type for inline-policy declarations.
    pub const TYPE: &str = "AWS::IAM::Policy";
}
