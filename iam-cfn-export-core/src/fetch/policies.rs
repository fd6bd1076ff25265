use crate::aws::IamSource;
use crate::error::{ExportError, ExportResult};
use crate::fetch::ensure_name;
use crate::policy_document::decode_policy_document;
use crate::records::PolicyRecord;

/// Fetch every customer-managed policy together with its default version document,
/// description and tags.
pub async fn fetch_policies(source: &dyn IamSource) -> ExportResult<Vec<PolicyRecord>> {
    let policies = source.list_local_policies().await?;
    log::debug!("ListPolicies returned {} policies", policies.len());

    let mut records = Vec::with_capacity(policies.len());
    for policy in policies {
        ensure_name("policy", &policy.name)?;

        let encoded = source
            .get_policy_version_document(&policy.arn, &policy.default_version_id)
            .await?;
        let document = decode_policy_document(&encoded).map_err(|e| {
            ExportError::document(
                format!("policy version {}", policy.default_version_id),
                policy.name.as_str(),
                e,
            )
        })?;
        let description = source.get_policy_description(&policy.arn).await?;
        let tags = source.list_policy_tags(&policy.arn).await?;

        records.push(PolicyRecord {
            name: policy.name,
            description,
            path: policy.path,
            document,
            tags,
        });
    }
    Ok(records)
}
