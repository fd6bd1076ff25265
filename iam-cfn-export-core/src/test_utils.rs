//! In-memory [`IamSource`] used by unit tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::aws::{
    AwsError, AwsResult, GroupSummary, IamSource, PolicySummary, PrincipalKind, RoleSummary,
};
use crate::records::Tag;

/// `{"Version":"2012-10-17"}`
pub(crate) const SIMPLE_POLICY_ENCODED: &str = "%7B%22Version%22%3A%222012-10-17%22%7D";

/// `{"Version":"2012-10-17","Statement":[{"Effect":"Allow","Action":"*","Resource":"*"}]}`
pub(crate) const ADMIN_POLICY_ENCODED: &str = "%7B%22Version%22%3A%222012-10-17%22%2C%22Statement%22%3A%5B%7B%22Effect%22%3A%22Allow%22%2C%22Action%22%3A%22%2A%22%2C%22Resource%22%3A%22%2A%22%7D%5D%7D";

#[derive(Default)]
pub(crate) struct MockIamSource {
    groups: Vec<GroupSummary>,
    roles: Vec<RoleSummary>,
    policies: Vec<PolicySummary>,
    attached: HashMap<(PrincipalKind, String), Vec<String>>,
    inline: HashMap<(PrincipalKind, String), Vec<(String, String)>>,
    versions: HashMap<(String, String), String>,
    descriptions: HashMap<String, String>,
    /// Keyed by role name or policy ARN.
    tags: HashMap<String, Vec<Tag>>,
    failing_operation: Option<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl MockIamSource {
    pub(crate) fn with_group(mut self, name: &str, path: &str) -> Self {
        self.groups.push(GroupSummary {
            name: name.to_string(),
            path: path.to_string(),
        });
        self
    }

    pub(crate) fn with_role(mut self, role: RoleSummary) -> Self {
        self.roles.push(role);
        self
    }

    pub(crate) fn with_policy(mut self, policy: PolicySummary, encoded_document: &str) -> Self {
        self.versions.insert(
            (policy.arn.clone(), policy.default_version_id.clone()),
            encoded_document.to_string(),
        );
        self.policies.push(policy);
        self
    }

    pub(crate) fn with_attached(mut self, kind: PrincipalKind, owner: &str, arn: &str) -> Self {
        self.attached
            .entry((kind, owner.to_string()))
            .or_default()
            .push(arn.to_string());
        self
    }

    pub(crate) fn with_inline(
        mut self,
        kind: PrincipalKind,
        owner: &str,
        name: &str,
        encoded_document: &str,
    ) -> Self {
        self.inline
            .entry((kind, owner.to_string()))
            .or_default()
            .push((name.to_string(), encoded_document.to_string()));
        self
    }

    pub(crate) fn with_policy_description(mut self, arn: &str, description: &str) -> Self {
        self.descriptions
            .insert(arn.to_string(), description.to_string());
        self
    }

    pub(crate) fn with_tag(mut self, owner: &str, key: &str, value: &str) -> Self {
        self.tags
            .entry(owner.to_string())
            .or_default()
            .push(Tag::new(key, value));
        self
    }

    /// Make every call to `operation` fail with an access-denied style error.
    pub(crate) fn failing(mut self, operation: &'static str) -> Self {
        self.failing_operation = Some(operation);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, operation: &'static str, detail: &str) -> AwsResult<()> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{operation}({detail})"));
        if self.failing_operation == Some(operation) {
            return Err(AwsError::iam(
                operation,
                "AccessDenied: not authorized to perform this operation",
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl IamSource for MockIamSource {
    async fn list_groups(&self) -> AwsResult<Vec<GroupSummary>> {
        self.record("ListGroups", "")?;
        Ok(self.groups.clone())
    }

    async fn list_roles(&self) -> AwsResult<Vec<RoleSummary>> {
        self.record("ListRoles", "")?;
        Ok(self.roles.clone())
    }

    async fn list_local_policies(&self) -> AwsResult<Vec<PolicySummary>> {
        self.record("ListPolicies", "Local")?;
        Ok(self.policies.clone())
    }

    async fn list_attached_policy_arns(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
    ) -> AwsResult<Vec<String>> {
        self.record("ListAttachedPolicies", principal_name)?;
        Ok(self
            .attached
            .get(&(kind, principal_name.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_inline_policy_names(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
    ) -> AwsResult<Vec<String>> {
        self.record("ListInlinePolicies", principal_name)?;
        Ok(self
            .inline
            .get(&(kind, principal_name.to_string()))
            .map(|policies| policies.iter().map(|(name, _)| name.clone()).collect())
            .unwrap_or_default())
    }

    async fn get_inline_policy_document(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
        policy_name: &str,
    ) -> AwsResult<String> {
        self.record("GetInlinePolicy", policy_name)?;
        self.inline
            .get(&(kind, principal_name.to_string()))
            .and_then(|policies| policies.iter().find(|(name, _)| name == policy_name))
            .map(|(_, document)| document.clone())
            .ok_or_else(|| AwsError::iam("GetInlinePolicy", "NoSuchEntity"))
    }

    async fn get_policy_version_document(
        &self,
        policy_arn: &str,
        version_id: &str,
    ) -> AwsResult<String> {
        self.record("GetPolicyVersion", policy_arn)?;
        self.versions
            .get(&(policy_arn.to_string(), version_id.to_string()))
            .cloned()
            .ok_or_else(|| AwsError::iam("GetPolicyVersion", "NoSuchEntity"))
    }

    async fn get_policy_description(&self, policy_arn: &str) -> AwsResult<Option<String>> {
        self.record("GetPolicy", policy_arn)?;
        Ok(self.descriptions.get(policy_arn).cloned())
    }

    async fn list_policy_tags(&self, policy_arn: &str) -> AwsResult<Vec<Tag>> {
        self.record("ListPolicyTags", policy_arn)?;
        Ok(self.tags.get(policy_arn).cloned().unwrap_or_default())
    }

    async fn list_role_tags(&self, role_name: &str) -> AwsResult<Vec<Tag>> {
        self.record("ListRoleTags", role_name)?;
        Ok(self.tags.get(role_name).cloned().unwrap_or_default())
    }
}
