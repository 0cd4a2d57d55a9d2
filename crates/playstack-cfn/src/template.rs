//! Template container, resources, and exported outputs.
//!
//! Collections are `BTreeMap`s so a template always serializes in the same
//! order: re-running the synthesizer over an unchanged registry must produce
//! byte-identical resource sections.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::expr::Expr;

/// Template format version understood by the provisioning engine.
pub const FORMAT_VERSION: &str = "2010-09-09";

/// One emitted deployment template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Template {
    /// The template format version.
    #[serde(rename = "AWSTemplateFormatVersion")]
    pub format_version: String,
    /// Human-readable description; never part of resource identity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Declared resources keyed by logical id.
    pub resources: BTreeMap<String, Resource>,
    /// Exported outputs keyed by output id.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub outputs: BTreeMap<String, Output>,
}

impl Template {
    /// Create an empty template.
    #[must_use]
    pub fn new(description: Option<String>) -> Self {
        Self {
            format_version: FORMAT_VERSION.to_owned(),
            description,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// Logical ids of all resources of the given type, in template order.
    #[must_use]
    pub fn resources_of_type(&self, resource_type: &str) -> Vec<&str> {
        self.resources
            .iter()
            .filter(|(_, r)| r.resource_type == resource_type)
            .map(|(id, _)| id.as_str())
            .collect()
    }
}

/// One declared resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Resource {
    /// Provider resource type, e.g. `AWS::Lambda::Function`.
    #[serde(rename = "Type")]
    pub resource_type: String,
    /// Resource properties in the provider's wire format.
    pub properties: serde_json::Value,
    /// Logical ids this resource explicitly depends on.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Tool metadata (e.g. asset bindings); ignored by the provider.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

impl Resource {
    /// Create a resource from typed properties.
    ///
    /// # Errors
    /// Returns a serialization error if the properties cannot be rendered to
    /// JSON; with the property types in this crate that indicates a bug.
    pub fn new<P: Serialize>(
        resource_type: impl Into<String>,
        properties: &P,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            resource_type: resource_type.into(),
            properties: serde_json::to_value(properties)?,
            depends_on: Vec::new(),
            metadata: None,
        })
    }

    /// Add an explicit dependency on another logical id.
    #[must_use]
    pub fn depends_on(mut self, logical_id: impl Into<String>) -> Self {
        self.depends_on.push(logical_id.into());
        self
    }

    /// Attach tool metadata to the resource.
    #[must_use]
    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// An exported output value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Output {
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The output value, usually an intrinsic on a declared resource.
    pub value: Expr,
    /// Cross-stack export binding.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub export: Option<Export>,
}

/// Cross-stack export name for an output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Export {
    /// The export name; hyphens are allowed here, unlike in logical ids.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_serialize_minimal_template() {
        let template = Template::new(None);
        let json = serde_json::to_string(&template).unwrap();
        assert_eq!(
            json,
            r#"{"AWSTemplateFormatVersion":"2010-09-09","Resources":{}}"#
        );
    }

    #[test]
    fn test_should_skip_empty_outputs_section() {
        let template = Template::new(Some("test".to_owned()));
        let json = serde_json::to_string(&template).unwrap();
        assert!(json.contains(r#""Description":"test""#));
        assert!(!json.contains("Outputs"));
    }

    #[test]
    fn test_should_serialize_resource_with_dependency() {
        let props = serde_json::json!({ "FunctionName": "beta-playground-lambda-api" });
        let resource = Resource::new("AWS::Lambda::Function", &props)
            .unwrap()
            .depends_on("ApiFunctionRole");
        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains(r#""Type":"AWS::Lambda::Function""#));
        assert!(json.contains(r#""DependsOn":["ApiFunctionRole"]"#));
    }

    #[test]
    fn test_should_serialize_output_with_export() {
        let output = Output {
            description: None,
            value: Expr::get_att("ApiFunctionUrl", "FunctionUrl"),
            export: Some(Export {
                name: "beta-playground-lambda-api-url".to_owned(),
            }),
        };
        let json = serde_json::to_string(&output).unwrap();
        assert!(json.contains(r#""Fn::GetAtt":["ApiFunctionUrl","FunctionUrl"]"#));
        assert!(json.contains(r#""Export":{"Name":"beta-playground-lambda-api-url"}"#));
    }

    #[test]
    fn test_should_list_resources_by_type() {
        let mut template = Template::new(None);
        let props = serde_json::json!({});
        template.resources.insert(
            "A".to_owned(),
            Resource::new("AWS::DynamoDB::Table", &props).unwrap(),
        );
        template.resources.insert(
            "B".to_owned(),
            Resource::new("AWS::Lambda::Function", &props).unwrap(),
        );
        assert_eq!(template.resources_of_type("AWS::DynamoDB::Table"), vec!["A"]);
    }

    #[test]
    fn test_should_keep_resources_sorted_by_logical_id() {
        let mut template = Template::new(None);
        let props = serde_json::json!({});
        for id in ["Zeta", "Alpha", "Mid"] {
            template
                .resources
                .insert(id.to_owned(), Resource::new("AWS::Lambda::Version", &props).unwrap());
        }
        let ids: Vec<_> = template.resources.keys().collect();
        assert_eq!(ids, vec!["Alpha", "Mid", "Zeta"]);
    }
}
