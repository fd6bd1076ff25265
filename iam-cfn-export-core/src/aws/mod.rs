//! AWS SDK integration: the IAM source seam, its SDK-backed client, and client loading.

pub(crate) mod iam_client;

use async_trait::async_trait;
use thiserror::Error;

use crate::records::Tag;

pub use iam_client::{load_client, AwsIamClient, AwsOptions};

#[derive(Error, Debug)]
pub enum AwsError {
    #[error("AWS configuration error: {0}")]
    Config(String),
    #[error("IAM {operation} failed: {message}")]
    Iam {
        operation: &'static str,
        message: String,
    },
    #[error("IAM {operation} response is missing required field '{field}'")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

impl AwsError {
    pub(crate) fn iam(operation: &'static str, message: impl Into<String>) -> Self {
        Self::Iam {
            operation,
            message: message.into(),
        }
    }

    pub(crate) fn missing(operation: &'static str, field: &'static str) -> Self {
        Self::MissingField { operation, field }
    }
}

pub type AwsResult<T> = Result<T, AwsError>;

/// Principal family addressed by attached and inline policy calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrincipalKind {
    Group,
    Role,
}

impl PrincipalKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Role => "role",
        }
    }
}

/// A group as returned by `ListGroups`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSummary {
    pub name: String,
    pub path: String,
}

/// A customer-managed policy as returned by `ListPolicies`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicySummary {
    pub name: String,
    pub arn: String,
    pub default_version_id: String,
    pub path: String,
}

/// A role as returned by `ListRoles`. The trust policy is still percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleSummary {
    pub name: String,
    pub path: String,
    pub description: Option<String>,
    pub max_session_duration: Option<i32>,
    pub assume_role_policy_document: String,
}

/// Read-only view of the IAM API used by the fetchers.
///
/// Every list operation returns the complete result set; implementations are
/// responsible for following pagination. `ListPolicies` and `ListRoles` leave out
/// tags and policy descriptions, so those have their own calls. Policy documents are returned exactly as
/// the API hands them out, i.e. percent-encoded.
#[async_trait]
pub trait IamSource: Send + Sync {
    async fn list_groups(&self) -> AwsResult<Vec<GroupSummary>>;

    async fn list_roles(&self) -> AwsResult<Vec<RoleSummary>>;

    /// Customer-managed (`Local` scope) policies only.
    async fn list_local_policies(&self) -> AwsResult<Vec<PolicySummary>>;

    async fn list_attached_policy_arns(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
    ) -> AwsResult<Vec<String>>;

    async fn list_inline_policy_names(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
    ) -> AwsResult<Vec<String>>;

    async fn get_inline_policy_document(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
        policy_name: &str,
    ) -> AwsResult<String>;

    async fn get_policy_version_document(
        &self,
        policy_arn: &str,
        version_id: &str,
    ) -> AwsResult<String>;

    /// `GetPolicy`; `None` when the policy has no description.
    async fn get_policy_description(&self, policy_arn: &str) -> AwsResult<Option<String>>;

    async fn list_policy_tags(&self, policy_arn: &str) -> AwsResult<Vec<Tag>>;

    async fn list_role_tags(&self, role_name: &str) -> AwsResult<Vec<Tag>>;
}
