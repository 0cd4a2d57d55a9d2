//! Synthesis output: rendered templates plus the asset manifest.
//!
//! Synthesis is all-or-nothing: every environment's stack composes before a
//! single byte hits disk, so one bad registry entry never leaves a partial
//! output directory behind.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use playstack_cfn::lambda::FunctionProperties;
use playstack_cfn::template::Template;
use playstack_core::{Environment, EnvironmentRegistry, PlaystackResult, StackLayout};

use crate::composer::compose_stack;

/// Metadata key binding a declared resource to its local build artifact.
pub const ASSET_PATH_KEY: &str = "playstack:asset:path";

/// Manifest file name.
const MANIFEST_FILE: &str = "manifest.json";

/// One rendered stack, ready for emission.
#[derive(Debug, Clone)]
pub struct SynthStack {
    /// The stack id, also the template file stem.
    pub id: String,
    /// The environment the stack deploys into.
    pub environment: Environment,
    /// The rendered template.
    pub template: Template,
}

/// One local code bundle and the staging location its declaration points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeAsset {
    /// Local path of the build artifact.
    pub local_path: String,
    /// Staging bucket the declaration expects the bundle in.
    pub s3_bucket: String,
    /// Staging key the declaration expects the bundle under.
    pub s3_key: String,
}

/// Manifest entry for one emitted stack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackArtifact {
    /// The stack id.
    pub stack_id: String,
    /// Name of the environment the stack targets.
    pub environment: String,
    /// Target account.
    pub account: String,
    /// Target region.
    pub region: String,
    /// Template file name, relative to the output directory.
    pub template_file: String,
    /// Code bundles the deployer must stage before creating the stack.
    pub code_assets: Vec<CodeAsset>,
}

/// The synthesis manifest: every emitted stack and its staging obligations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    /// Emitted stacks in registry order.
    pub stacks: Vec<StackArtifact>,
}

/// Compose and render one stack per registry environment.
///
/// Fails on the first composition error without rendering anything.
pub fn synthesize_all(
    registry: &EnvironmentRegistry,
    layout: &StackLayout,
) -> PlaystackResult<Vec<SynthStack>> {
    let mut stacks = Vec::with_capacity(registry.len());
    for environment in registry {
        let stack = compose_stack(environment, layout)?;
        stacks.push(SynthStack {
            id: stack.id().to_owned(),
            environment: environment.clone(),
            template: stack.into_template(),
        });
    }
    Ok(stacks)
}

/// Write every template and the manifest into the output directory.
pub fn emit(out_dir: &Path, stacks: &[SynthStack]) -> PlaystackResult<()> {
    fs::create_dir_all(out_dir)?;

    let mut artifacts = Vec::with_capacity(stacks.len());
    for stack in stacks {
        let template_file = format!("{}.template.json", stack.id);
        let rendered = serde_json::to_string_pretty(&stack.template)?;
        fs::write(out_dir.join(&template_file), rendered)?;
        info!(stack_id = %stack.id, file = %template_file, "wrote template");

        artifacts.push(StackArtifact {
            stack_id: stack.id.clone(),
            environment: stack.environment.name.clone(),
            account: stack.environment.account.as_str().to_owned(),
            region: stack.environment.region.as_str().to_owned(),
            template_file,
            code_assets: code_assets(&stack.template),
        });
    }

    let manifest = Manifest { stacks: artifacts };
    fs::write(
        out_dir.join(MANIFEST_FILE),
        serde_json::to_string_pretty(&manifest)?,
    )?;
    info!(stacks = stacks.len(), "wrote manifest");

    Ok(())
}

/// Collect the code-asset bindings declared in a template.
///
/// Each function resource carries its local artifact path in tool metadata
/// and its staging location in the code properties; the manifest pairs the
/// two so the deployer knows what to upload where.
fn code_assets(template: &Template) -> Vec<CodeAsset> {
    template
        .resources_of_type(FunctionProperties::TYPE)
        .into_iter()
        .filter_map(|id| {
            let resource = &template.resources[id];
            let local_path = resource.metadata.as_ref()?.get(ASSET_PATH_KEY)?.as_str()?;
            let code = resource.properties.get("Code")?;
            Some(CodeAsset {
                local_path: local_path.to_owned(),
                s3_bucket: code.get("S3Bucket")?.as_str()?.to_owned(),
                s3_key: code.get("S3Key")?.as_str()?.to_owned(),
            })
        })
        .collect()
}
