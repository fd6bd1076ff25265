//! This crate provides the core business logic for IAM CloudFormation export:
//! - Reading groups, customer-managed policies and roles through the IAM API
//! - Decoding and re-indenting policy documents
//! - Rendering the records as a CloudFormation YAML template
//!

mod aws;
pub mod commands;
mod error;
pub mod fetch;
mod policy_document;
mod records;
pub mod render;

#[cfg(test)]
mod test_utils;

// Re-exports for a small, focused public API
pub use aws::{
    load_client, AwsError, AwsIamClient, AwsOptions, AwsResult, GroupSummary, IamSource,
    PolicySummary, PrincipalKind, RoleSummary,
};
pub use commands::ExportService;
pub use error::{ExportError, ExportResult};
pub use policy_document::{decode_policy_document, reindent, DocumentError};
pub use records::{
    GroupRecord, InlinePolicy, Inventory, PolicyRecord, ResourceKind, RoleRecord, Tag,
};
pub use render::{render, sanitize_logical_id, NamingMode};
