//! Lambda function, version, alias, and function-URL declaration types.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// Function runtime identifier.
///
/// The Playground API ships a self-contained bootstrap binary, so only the
/// custom runtimes are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Runtime {
    /// Custom runtime on Amazon Linux 2.
    #[serde(rename = "provided.al2")]
    ProvidedAl2,
    /// Custom runtime on Amazon Linux 2023.
    #[serde(rename = "provided.al2023")]
    ProvidedAl2023,
}

impl Runtime {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProvidedAl2 => "provided.al2",
            Self::ProvidedAl2023 => "provided.al2023",
        }
    }
}

impl std::fmt::Display for Runtime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authentication mode for a function URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UrlAuthType {
    /// Unauthenticated invocations are accepted.
    #[serde(rename = "NONE")]
    None,
    /// Callers must sign requests with AWS IAM credentials.
    #[serde(rename = "AWS_IAM")]
    AwsIam,
}

impl UrlAuthType {
    /// Returns the wire-format string representation.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "NONE",
            Self::AwsIam => "AWS_IAM",
        }
    }
}

impl std::fmt::Display for UrlAuthType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code location for a function.
///
/// The synthesizer derives a deterministic staging location from the stack's
/// coordinates; the external uploader places the built artifact there before
/// provisioning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Code {
    /// Staging bucket name.
    pub s3_bucket: String,
    /// Object key of the zipped bootstrap bundle.
    pub s3_key: String,
}

/// Environment-variable map for a function.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionEnvironment {
    /// The variables, sorted by name for deterministic emission.
    pub variables: BTreeMap<String, String>,
}

/// Properties for an `AWS::Lambda::Function` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FunctionProperties {
    /// The function name, also used to derive dependent resource names.
    pub function_name: String,
    /// The function runtime.
    pub runtime: Runtime,
    /// Handler value; ignored by custom runtimes but required by the schema.
    pub handler: String,
    /// Where the deployable bundle is staged.
    pub code: Code,
    /// The execution role ARN.
    pub role: Expr,
    /// Generated description; never part of resource identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Invocation timeout in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,
    /// Memory size in MiB.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u32>,
    /// Runtime environment variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<FunctionEnvironment>,
}

impl FunctionProperties {
    /// Resource type for function declarations.
    pub const TYPE: &str = "AWS::Lambda::Function";
}

/// Properties for an `AWS::Lambda::Version` declaration.
///
/// Each synth pins the alias to the version published from the current code;
/// the provisioning engine's rollout machinery shifts traffic to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VersionProperties {
    /// The function this version belongs to.
    pub function_name: Expr,
}

impl VersionProperties {
    /// Resource type for version declarations.
    pub const TYPE: &str = "AWS::Lambda::Version";
}

/// Properties for an `AWS::Lambda::Alias` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AliasProperties {
    /// The function the alias points into.
    pub function_name: Expr,
    /// The version the alias currently targets.
    pub function_version: Expr,
    /// The stable alias name.
    pub name: String,
}

impl AliasProperties {
    /// Resource type for alias declarations.
    pub const TYPE: &str = "AWS::Lambda::Alias";
}

/// Properties for an `AWS::Lambda::Url` declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UrlProperties {
    /// The authentication mode for the endpoint.
    pub auth_type: UrlAuthType,
    /// ARN of the function (or alias) the URL invokes.
    pub target_function_arn: Expr,
}

impl UrlProperties {
    /// Resource type for function-URL declarations.
    pub const TYPE: &str = "AWS::Lambda::Url";
}

/// Properties for an `AWS::Lambda::Permission` declaration.
///
/// Only emitted for open endpoints, where anonymous callers need an explicit
/// `InvokeFunctionUrl` grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PermissionProperties {
    /// The permitted action.
    pub action: String,
    /// The function (or alias) the permission applies to.
    pub function_name: Expr,
    /// The principal being granted access.
    pub principal: String,
    /// URL auth type the permission is scoped to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_url_auth_type: Option<UrlAuthType>,
}

impl PermissionProperties {
    /// Resource type for permission declarations.
    pub const TYPE: &str = "AWS::Lambda::Permission";

    /// Public-invoke permission for an open function URL.
    #[must_use]
    pub fn public_url_invoke(target: Expr) -> Self {
        Self {
            action: "lambda:InvokeFunctionUrl".to_owned(),
            function_name: target,
            principal: "*".to_owned(),
            function_url_auth_type: Some(UrlAuthType::None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_serialize_runtime_with_dotted_name() {
        let json = serde_json::to_string(&Runtime::ProvidedAl2).unwrap();
        assert_eq!(json, r#""provided.al2""#);
    }

    #[test]
    fn test_should_serialize_url_auth_types() {
        assert_eq!(UrlAuthType::None.to_string(), "NONE");
        assert_eq!(UrlAuthType::AwsIam.to_string(), "AWS_IAM");
    }

    #[test]
    fn test_should_serialize_function_properties() {
        let props = FunctionProperties {
            function_name: "beta-playground-lambda-api".to_owned(),
            runtime: Runtime::ProvidedAl2,
            handler: "bootstrap".to_owned(),
            code: Code {
                s3_bucket: "playstack-assets-123456789012-us-west-2".to_owned(),
                s3_key: "beta-playground-lambda-api/bootstrap.zip".to_owned(),
            },
            role: Expr::get_att("ApiRole", "Arn"),
            description: Some("Generated on: 2026-08-30T00:00:00Z".to_owned()),
            timeout: None,
            memory_size: None,
            environment: None,
        };
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains(r#""FunctionName":"beta-playground-lambda-api""#));
        assert!(json.contains(r#""Runtime":"provided.al2""#));
        assert!(json.contains(r#""Fn::GetAtt":["ApiRole","Arn"]"#));
        // Optional fields that are unset must be absent.
        assert!(!json.contains("Timeout"));
        assert!(!json.contains("MemorySize"));
        assert!(!json.contains("Environment"));
    }

    #[test]
    fn test_should_serialize_alias_pointing_at_version() {
        let props = AliasProperties {
            function_name: Expr::reference("ApiFunction"),
            function_version: Expr::get_att("ApiVersion", "Version"),
            name: "live".to_owned(),
        };
        let json = serde_json::to_string(&props).unwrap();
        assert!(json.contains(r#""Name":"live""#));
        assert!(json.contains(r#""Fn::GetAtt":["ApiVersion","Version"]"#));
    }

    #[test]
    fn test_should_build_public_url_invoke_permission() {
        let props = PermissionProperties::public_url_invoke(Expr::reference("ApiAlias"));
        assert_eq!(props.action, "lambda:InvokeFunctionUrl");
        assert_eq!(props.principal, "*");
        assert_eq!(props.function_url_auth_type, Some(UrlAuthType::None));
    }

    #[test]
    fn test_should_keep_environment_variables_sorted() {
        let mut env = FunctionEnvironment::default();
        env.variables.insert("Z_VAR".to_owned(), "z".to_owned());
        env.variables.insert("A_VAR".to_owned(), "a".to_owned());
        let json = serde_json::to_string(&env).unwrap();
        let a = json.find("A_VAR").unwrap();
        let z = json.find("Z_VAR").unwrap();
        assert!(a < z);
    }
}
