//! Synth configuration.
//!
//! Everything the composer needs (base name, artifact path, table set) is
//! explicit configuration rather than module-level globals, so tests can
//! substitute alternate layouts without touching composer internals.

use std::path::PathBuf;

use typed_builder::TypedBuilder;

use playstack_cfn::dynamodb::ScalarAttributeType;

/// Default synth output directory.
const DEFAULT_OUT_DIR: &str = "playstack.out";

/// Definition of one key-value table owned by a stack.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableDef {
    /// Table name (also used to derive the table's resource id).
    pub table_name: String,
    /// Partition key attribute name.
    pub partition_key: String,
    /// Partition key attribute type.
    pub partition_key_type: ScalarAttributeType,
}

impl TableDef {
    /// Create a table definition.
    #[must_use]
    pub fn new(
        table_name: impl Into<String>,
        partition_key: impl Into<String>,
        partition_key_type: ScalarAttributeType,
    ) -> Self {
        Self {
            table_name: table_name.into(),
            partition_key: partition_key.into(),
            partition_key_type,
        }
    }
}

/// The fixed shape of one API stack: naming base, code artifact, table set.
#[derive(Debug, Clone, TypedBuilder, serde::Serialize, serde::Deserialize)]
pub struct StackLayout {
    /// Base name spliced into derived resource names.
    #[builder(default = String::from("playground"))]
    pub base_name: String,
    /// Path where the build step left the deployable bundle.
    #[builder(default = String::from("target/lambda/playground-api"))]
    pub artifact_path: String,
    /// Tables owned by the stack, each granted to the stack's function.
    #[builder(default = vec![TableDef::new("Account", "id", ScalarAttributeType::S)])]
    pub tables: Vec<TableDef>,
}

impl Default for StackLayout {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl StackLayout {
    /// Derived function name for an environment: `<env>-<base>-lambda-api`.
    ///
    /// The environment-name prefix is the sole namespacing mechanism
    /// preventing cross-environment collisions.
    #[must_use]
    pub fn function_name(&self, env_name: &str) -> String {
        format!("{env_name}-{}-lambda-api", self.base_name)
    }

    /// Derived stack id for an environment: `<env>-<base>-api-stack`.
    #[must_use]
    pub fn stack_id(&self, env_name: &str) -> String {
        format!("{env_name}-{}-api-stack", self.base_name)
    }
}

/// Top-level synthesizer configuration.
#[derive(Debug, Clone, TypedBuilder)]
pub struct SynthConfig {
    /// Directory templates and the manifest are written to.
    #[builder(default = PathBuf::from(DEFAULT_OUT_DIR))]
    pub out_dir: PathBuf,
    /// Stack layout shared by every environment.
    #[builder(default)]
    pub layout: StackLayout,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl SynthConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(v) = std::env::var("PLAYSTACK_OUT_DIR") {
            config.out_dir = PathBuf::from(v);
        }
        config
    }
}
