//! Fetchers: read one resource kind from an [`IamSource`] into fully populated records.
//!
//! Calls are issued strictly one after another. The first failure aborts the whole
//! fetch and nothing collected so far is returned.

mod groups;
mod policies;
mod roles;

pub use groups::fetch_groups;
pub use policies::fetch_policies;
pub use roles::fetch_roles;

use crate::aws::{IamSource, PrincipalKind};
use crate::error::{ExportError, ExportResult};
use crate::policy_document::decode_policy_document;
use crate::records::{InlinePolicy, Inventory, ResourceKind};

/// Fetch the complete inventory for `kind`.
pub async fn fetch_inventory(
    source: &dyn IamSource,
    kind: ResourceKind,
) -> ExportResult<Inventory> {
    log::info!("Fetching IAM {kind}");
    let inventory = match kind {
        ResourceKind::Groups => Inventory::Groups(fetch_groups(source).await?),
        ResourceKind::Policies => Inventory::Policies(fetch_policies(source).await?),
        ResourceKind::Roles => Inventory::Roles(fetch_roles(source).await?),
    };
    log::info!("Fetched {} {kind}", inventory.len());
    Ok(inventory)
}

/// List, fetch and decode every inline policy owned by a group or role.
pub(crate) async fn fetch_inline_policies(
    source: &dyn IamSource,
    kind: PrincipalKind,
    owner: &str,
) -> ExportResult<Vec<InlinePolicy>> {
    let names = source.list_inline_policy_names(kind, owner).await?;
    log::debug!(
        "{} '{owner}' has {} inline policies",
        kind.as_str(),
        names.len()
    );

    let mut policies = Vec::with_capacity(names.len());
    for name in names {
        let encoded = source
            .get_inline_policy_document(kind, owner, &name)
            .await?;
        let document = decode_policy_document(&encoded).map_err(|e| {
            ExportError::document(format!("{} '{owner}'", kind.as_str()), name.as_str(), e)
        })?;
        policies.push(InlinePolicy { name, document });
    }
    Ok(policies)
}

pub(crate) fn ensure_name(what: &str, name: &str) -> ExportResult<()> {
    if name.is_empty() {
        return Err(ExportError::InvalidRecord(format!("{what} with an empty name")));
    }
    Ok(())
}
