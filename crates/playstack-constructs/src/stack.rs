//! The deployment unit: an append-only collection of resource declarations.

use std::collections::BTreeMap;

use playstack_cfn::template::{Output, Resource, Template};
use playstack_core::{Environment, PlaystackError, PlaystackResult};

/// Derive a CloudFormation-safe logical id from a construct id.
///
/// Construct ids follow the service's naming conventions and may contain
/// hyphens (`beta-playground-lambda-api`); logical ids must be alphanumeric.
/// Non-alphanumeric characters are stripped; resource *names* and export
/// names keep the original spelling.
pub fn logical_id(construct_id: &str) -> PlaystackResult<String> {
    let id: String = construct_id.chars().filter(char::is_ascii_alphanumeric).collect();
    if id.is_empty() {
        return Err(PlaystackError::EmptyLogicalId(construct_id.to_owned()));
    }
    Ok(id)
}

/// One deployable unit: the resources and outputs for a single environment.
///
/// The stack is only ever appended to during composition; rendering consumes
/// it. Collections are ordered by logical id so rendering is deterministic.
#[derive(Debug, Clone)]
pub struct Stack {
    id: String,
    environment: Environment,
    resources: BTreeMap<String, Resource>,
    outputs: BTreeMap<String, Output>,
}

impl Stack {
    /// Create an empty stack bound to one environment.
    #[must_use]
    pub fn new(id: impl Into<String>, environment: Environment) -> Self {
        Self {
            id: id.into(),
            environment,
            resources: BTreeMap::new(),
            outputs: BTreeMap::new(),
        }
    }

    /// The stack id, e.g. `beta-playground-api-stack`.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The environment this stack deploys into.
    #[must_use]
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Append a resource declaration under the given construct id.
    ///
    /// Returns the sanitized logical id the resource was stored under.
    /// Collisions are rejected: two construct ids mapping to the same
    /// logical id is a composition bug, surfaced fail-fast rather than
    /// silently overwriting a declaration.
    pub fn add_resource(
        &mut self,
        construct_id: &str,
        resource: Resource,
    ) -> PlaystackResult<String> {
        let id = logical_id(construct_id)?;
        if self.resources.contains_key(&id) {
            return Err(PlaystackError::DuplicateLogicalId {
                stack_id: self.id.clone(),
                logical_id: id,
                construct_id: construct_id.to_owned(),
            });
        }
        self.resources.insert(id.clone(), resource);
        Ok(id)
    }

    /// Append an exported output under the given construct id.
    pub fn add_output(&mut self, construct_id: &str, output: Output) -> PlaystackResult<String> {
        let id = logical_id(construct_id)?;
        if self.outputs.contains_key(&id) {
            return Err(PlaystackError::DuplicateLogicalId {
                stack_id: self.id.clone(),
                logical_id: id,
                construct_id: construct_id.to_owned(),
            });
        }
        self.outputs.insert(id.clone(), output);
        Ok(id)
    }

    /// Number of declared resources.
    #[must_use]
    pub fn resource_count(&self) -> usize {
        self.resources.len()
    }

    /// Render the stack into its template.
    #[must_use]
    pub fn into_template(self) -> Template {
        let mut template = Template::new(Some(format!(
            "Playground API stack for the {} environment",
            self.environment.name
        )));
        template.resources = self.resources;
        template.outputs = self.outputs;
        template
    }
}
