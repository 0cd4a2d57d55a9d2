//! CloudFormation template model types for playstack.
//!
//! This crate provides the declaration-side wire format the synthesizer
//! emits: a template container, intrinsic expressions (`Ref`, `Fn::GetAtt`),
//! and typed property structs for every resource kind the constructs
//! declare. All structs follow the CloudFormation JSON format with
//! `PascalCase` field names via `#[serde(rename_all = "PascalCase")]`;
//! enum variants carry `#[serde(rename)]` attributes mapping idiomatic Rust
//! names to the provider's wire values.

pub mod codedeploy;
pub mod dynamodb;
pub mod expr;
pub mod iam;
pub mod lambda;
pub mod template;

pub use expr::Expr;
pub use template::{Export, Output, Resource, Template};
