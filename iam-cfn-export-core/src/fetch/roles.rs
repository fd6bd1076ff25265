use crate::aws::{IamSource, PrincipalKind};
use crate::error::{ExportError, ExportResult};
use crate::fetch::{ensure_name, fetch_inline_policies};
use crate::policy_document::decode_policy_document;
use crate::records::RoleRecord;

/// Fetch every role with its trust policy, attached managed policies, inline
/// policies and tags.
pub async fn fetch_roles(source: &dyn IamSource) -> ExportResult<Vec<RoleRecord>> {
    let roles = source.list_roles().await?;
    log::debug!("ListRoles returned {} roles", roles.len());

    let mut records = Vec::with_capacity(roles.len());
    for role in roles {
        ensure_name("role", &role.name)?;

        let assume_role_policy_document = decode_policy_document(&role.assume_role_policy_document)
            .map_err(|e| {
                ExportError::document(format!("role '{}'", role.name), "AssumeRolePolicyDocument", e)
            })?;
        let managed_policy_arns = source
            .list_attached_policy_arns(PrincipalKind::Role, &role.name)
            .await?;
        let policies = fetch_inline_policies(source, PrincipalKind::Role, &role.name).await?;
        let tags = source.list_role_tags(&role.name).await?;

        records.push(RoleRecord {
            name: role.name,
            description: role.description,
            path: role.path,
            max_session_duration: role.max_session_duration,
            assume_role_policy_document,
            managed_policy_arns,
            policies,
            tags,
        });
    }
    Ok(records)
}
