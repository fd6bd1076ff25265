use crate::aws::{IamSource, PrincipalKind};
use crate::error::ExportResult;
use crate::fetch::{ensure_name, fetch_inline_policies};
use crate::records::GroupRecord;

/// Fetch every group with its attached managed policies and inline policies.
pub async fn fetch_groups(source: &dyn IamSource) -> ExportResult<Vec<GroupRecord>> {
    let groups = source.list_groups().await?;
    log::debug!("ListGroups returned {} groups", groups.len());

    let mut records = Vec::with_capacity(groups.len());
    for group in groups {
        ensure_name("group", &group.name)?;

        let managed_policy_arns = source
            .list_attached_policy_arns(PrincipalKind::Group, &group.name)
            .await?;
        let policies = fetch_inline_policies(source, PrincipalKind::Group, &group.name).await?;

        records.push(GroupRecord {
            name: group.name,
            path: group.path,
            managed_policy_arns,
            policies,
        });
    }
    Ok(records)
}
