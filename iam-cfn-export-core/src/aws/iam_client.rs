//! AWS IAM client wrapper for inventory reads
//!
//! All list operations go through the SDK paginators so that accounts with more
//! principals than a single page still export completely.

use async_trait::async_trait;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::types::PolicyScopeType;
use aws_sdk_iam::Client as IamClient;

use crate::aws::{
    AwsError, AwsResult, GroupSummary, IamSource, PolicySummary, PrincipalKind, RoleSummary,
};
use crate::records::Tag;

/// Overrides applied on top of the default AWS configuration chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AwsOptions {
    pub region: Option<String>,
    pub profile: Option<String>,
}

/// Load AWS configuration using the standard credential provider chain and build
/// an IAM client from it.
pub async fn load_client(options: &AwsOptions) -> AwsResult<AwsIamClient> {
    let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

    if let Some(region) = &options.region {
        if region.trim().is_empty() {
            return Err(AwsError::Config("region must not be empty".to_string()));
        }
        loader = loader.region(aws_config::Region::new(region.clone()));
    }
    if let Some(profile) = &options.profile {
        if profile.trim().is_empty() {
            return Err(AwsError::Config("profile must not be empty".to_string()));
        }
        loader = loader.profile_name(profile);
    }

    let config = loader.load().await;
    log::debug!(
        "Loaded AWS configuration (region: {:?})",
        config.region().map(ToString::to_string)
    );
    Ok(AwsIamClient::new(IamClient::new(&config)))
}

pub struct AwsIamClient {
    client: IamClient,
}

impl AwsIamClient {
    pub fn new(client: IamClient) -> Self {
        Self { client }
    }
}

fn convert_tags(tags: &[aws_sdk_iam::types::Tag]) -> Vec<Tag> {
    tags.iter().map(|t| Tag::new(t.key(), t.value())).collect()
}

#[async_trait]
impl IamSource for AwsIamClient {
    async fn list_groups(&self) -> AwsResult<Vec<GroupSummary>> {
        let groups = self
            .client
            .list_groups()
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(|e| AwsError::iam("ListGroups", DisplayErrorContext(&e).to_string()))?;

        Ok(groups
            .into_iter()
            .map(|g| GroupSummary {
                name: g.group_name,
                path: g.path,
            })
            .collect())
    }

    async fn list_roles(&self) -> AwsResult<Vec<RoleSummary>> {
        let roles = self
            .client
            .list_roles()
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(|e| AwsError::iam("ListRoles", DisplayErrorContext(&e).to_string()))?;

        roles
            .into_iter()
            .map(|r| {
                Ok(RoleSummary {
                    assume_role_policy_document: r
                        .assume_role_policy_document
                        .ok_or_else(|| AwsError::missing("ListRoles", "AssumeRolePolicyDocument"))?,
                    name: r.role_name,
                    path: r.path,
                    description: r.description,
                    max_session_duration: r.max_session_duration,
                })
            })
            .collect()
    }

    async fn list_local_policies(&self) -> AwsResult<Vec<PolicySummary>> {
        let policies = self
            .client
            .list_policies()
            .scope(PolicyScopeType::Local)
            .into_paginator()
            .items()
            .send()
            .collect::<Result<Vec<_>, _>>()
            .await
            .map_err(|e| AwsError::iam("ListPolicies", DisplayErrorContext(&e).to_string()))?;

        policies
            .into_iter()
            .map(|p| {
                Ok(PolicySummary {
                    name: p
                        .policy_name
                        .ok_or_else(|| AwsError::missing("ListPolicies", "PolicyName"))?,
                    arn: p.arn.ok_or_else(|| AwsError::missing("ListPolicies", "Arn"))?,
                    default_version_id: p
                        .default_version_id
                        .ok_or_else(|| AwsError::missing("ListPolicies", "DefaultVersionId"))?,
                    path: p.path.ok_or_else(|| AwsError::missing("ListPolicies", "Path"))?,
                })
            })
            .collect()
    }

    async fn list_attached_policy_arns(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
    ) -> AwsResult<Vec<String>> {
        let (operation, attached) = match kind {
            PrincipalKind::Group => (
                "ListAttachedGroupPolicies",
                self.client
                    .list_attached_group_policies()
                    .group_name(principal_name)
                    .into_paginator()
                    .items()
                    .send()
                    .collect::<Result<Vec<_>, _>>()
                    .await
                    .map_err(|e| {
                        AwsError::iam(
                            "ListAttachedGroupPolicies",
                            format!(
                                "group '{principal_name}': {}",
                                DisplayErrorContext(&e)
                            ),
                        )
                    })?,
            ),
            PrincipalKind::Role => (
                "ListAttachedRolePolicies",
                self.client
                    .list_attached_role_policies()
                    .role_name(principal_name)
                    .into_paginator()
                    .items()
                    .send()
                    .collect::<Result<Vec<_>, _>>()
                    .await
                    .map_err(|e| {
                        AwsError::iam(
                            "ListAttachedRolePolicies",
                            format!("role '{principal_name}': {}", DisplayErrorContext(&e)),
                        )
                    })?,
            ),
        };

        attached
            .into_iter()
            .map(|p| {
                p.policy_arn
                    .ok_or_else(|| AwsError::missing(operation, "PolicyArn"))
            })
            .collect()
    }

    async fn list_inline_policy_names(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
    ) -> AwsResult<Vec<String>> {
        match kind {
            PrincipalKind::Group => self
                .client
                .list_group_policies()
                .group_name(principal_name)
                .into_paginator()
                .items()
                .send()
                .collect::<Result<Vec<_>, _>>()
                .await
                .map_err(|e| {
                    AwsError::iam(
                        "ListGroupPolicies",
                        format!("group '{principal_name}': {}", DisplayErrorContext(&e)),
                    )
                }),
            PrincipalKind::Role => self
                .client
                .list_role_policies()
                .role_name(principal_name)
                .into_paginator()
                .items()
                .send()
                .collect::<Result<Vec<_>, _>>()
                .await
                .map_err(|e| {
                    AwsError::iam(
                        "ListRolePolicies",
                        format!("role '{principal_name}': {}", DisplayErrorContext(&e)),
                    )
                }),
        }
    }

    async fn get_inline_policy_document(
        &self,
        kind: PrincipalKind,
        principal_name: &str,
        policy_name: &str,
    ) -> AwsResult<String> {
        match kind {
            PrincipalKind::Group => {
                let response = self
                    .client
                    .get_group_policy()
                    .group_name(principal_name)
                    .policy_name(policy_name)
                    .send()
                    .await
                    .map_err(|e| {
                        AwsError::iam(
                            "GetGroupPolicy",
                            format!(
                                "policy '{policy_name}' on group '{principal_name}': {}",
                                DisplayErrorContext(&e)
                            ),
                        )
                    })?;
                Ok(response.policy_document)
            }
            PrincipalKind::Role => {
                let response = self
                    .client
                    .get_role_policy()
                    .role_name(principal_name)
                    .policy_name(policy_name)
                    .send()
                    .await
                    .map_err(|e| {
                        AwsError::iam(
                            "GetRolePolicy",
                            format!(
                                "policy '{policy_name}' on role '{principal_name}': {}",
                                DisplayErrorContext(&e)
                            ),
                        )
                    })?;
                Ok(response.policy_document)
            }
        }
    }

    async fn get_policy_version_document(
        &self,
        policy_arn: &str,
        version_id: &str,
    ) -> AwsResult<String> {
        let response = self
            .client
            .get_policy_version()
            .policy_arn(policy_arn)
            .version_id(version_id)
            .send()
            .await
            .map_err(|e| {
                AwsError::iam(
                    "GetPolicyVersion",
                    format!(
                        "version {version_id} of '{policy_arn}': {}",
                        DisplayErrorContext(&e)
                    ),
                )
            })?;

        response
            .policy_version
            .and_then(|v| v.document)
            .ok_or_else(|| AwsError::missing("GetPolicyVersion", "PolicyVersion.Document"))
    }

    async fn get_policy_description(&self, policy_arn: &str) -> AwsResult<Option<String>> {
        let response = self
            .client
            .get_policy()
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| {
                AwsError::iam(
                    "GetPolicy",
                    format!("policy '{policy_arn}': {}", DisplayErrorContext(&e)),
                )
            })?;

        Ok(response
            .policy()
            .and_then(|p| p.description())
            .map(str::to_string))
    }

    async fn list_policy_tags(&self, policy_arn: &str) -> AwsResult<Vec<Tag>> {
        let mut tags = Vec::new();
        let mut marker = None;
        loop {
            let page = self
                .client
                .list_policy_tags()
                .policy_arn(policy_arn)
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| {
                    AwsError::iam(
                        "ListPolicyTags",
                        format!("policy '{policy_arn}': {}", DisplayErrorContext(&e)),
                    )
                })?;
            tags.extend(convert_tags(page.tags()));
            marker = next_marker(page.is_truncated(), page.marker());
            if marker.is_none() {
                return Ok(tags);
            }
        }
    }

    async fn list_role_tags(&self, role_name: &str) -> AwsResult<Vec<Tag>> {
        let mut tags = Vec::new();
        let mut marker = None;
        loop {
            let page = self
                .client
                .list_role_tags()
                .role_name(role_name)
                .set_marker(marker)
                .send()
                .await
                .map_err(|e| {
                    AwsError::iam(
                        "ListRoleTags",
                        format!("role '{role_name}': {}", DisplayErrorContext(&e)),
                    )
                })?;
            tags.extend(convert_tags(page.tags()));
            marker = next_marker(page.is_truncated(), page.marker());
            if marker.is_none() {
                return Ok(tags);
            }
        }
    }
}

/// Marker for the next `List*Tags` page, if IAM reported more.
fn next_marker(is_truncated: bool, marker: Option<&str>) -> Option<String> {
    marker.filter(|_| is_truncated).map(str::to_string)
}
