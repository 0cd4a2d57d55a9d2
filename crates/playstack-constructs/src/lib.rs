//! Resource constructs and the stack composer for playstack.
//!
//! A construct is a reusable declaration template for one class of resource
//! plus its default policies: the compute-function construct emits a
//! function with a staged-rollout deployment group and an optional public
//! endpoint; the key-value table construct either declares a table or binds
//! to an existing one. The composer assembles one fully-wired stack per
//! environment and the synth module renders and emits the templates.

mod composer;
mod function;
mod stack;
mod synth;
mod table;
mod tier;

pub use composer::compose_stack;
pub use function::{FunctionConfig, FunctionHandle, attach_function_url, build_function};
pub use stack::{Stack, logical_id};
pub use synth::{CodeAsset, Manifest, StackArtifact, SynthStack, emit, synthesize_all};
pub use table::{TableConfig, TableHandle, build_table, grant_read_write};
pub use tier::TierPolicy;
