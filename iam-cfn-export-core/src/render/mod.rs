//! CloudFormation template rendering.
//!
//! Properties are written one entry at a time so that their order matches the
//! template layout users expect. Values are serialized with `serde_yaml`; policy
//! documents are embedded as their indented JSON text, which is valid YAML flow
//! content.

mod naming;
mod yaml;

use std::collections::HashSet;
use std::io::Write;

use rand::Rng;

use crate::error::{ExportError, ExportResult};
use crate::records::{GroupRecord, InlinePolicy, Inventory, PolicyRecord, RoleRecord, Tag};

pub use naming::{sanitize_logical_id, NamingMode};
use yaml::{write_block, write_entry, write_item_entry};

pub const GROUP_RESOURCE_TYPE: &str = "AWS::IAM::Group";
pub const POLICY_RESOURCE_TYPE: &str = "AWS::IAM::Policy";
pub const ROLE_RESOURCE_TYPE: &str = "AWS::IAM::Role";

/// Write `inventory` to `out` as a CloudFormation YAML template.
///
/// Resources appear in inventory order. `rng` supplies the suffixes of generated
/// managed policy names in [`NamingMode::Sanitized`].
pub fn render<W, R>(
    out: &mut W,
    inventory: &Inventory,
    mode: NamingMode,
    rng: &mut R,
) -> ExportResult<()>
where
    W: Write + ?Sized,
    R: Rng + ?Sized,
{
    writeln!(out, "---")?;
    if inventory.is_empty() {
        log::warn!("No {} found; rendering an empty Resources section", inventory.kind());
        writeln!(out, "Resources: {{}}")?;
        return Ok(());
    }
    writeln!(out, "Resources:")?;

    let mut ids = LogicalIds::new(mode);
    match inventory {
        Inventory::Groups(groups) => {
            for group in groups {
                let id = ids.assign(&group.name)?;
                write_group(out, &id, group)?;
            }
        }
        Inventory::Policies(policies) => {
            for policy in policies {
                let id = ids.assign(&policy.name)?;
                let policy_name = mode.managed_policy_name(&policy.name, &mut *rng);
                write_policy(out, &id, &policy_name, policy)?;
            }
        }
        Inventory::Roles(roles) => {
            for role in roles {
                let id = ids.assign(&role.name)?;
                write_role(out, &id, role)?;
            }
        }
    }
    log::debug!("Rendered {} {}", inventory.len(), inventory.kind());
    Ok(())
}

/// Hands out logical ids and rejects collisions, which sanitizing can introduce
/// (`a-b` and `a_b` both become `AB`).
struct LogicalIds {
    mode: NamingMode,
    seen: HashSet<String>,
}

impl LogicalIds {
    fn new(mode: NamingMode) -> Self {
        Self {
            mode,
            seen: HashSet::new(),
        }
    }

    fn assign(&mut self, name: &str) -> ExportResult<String> {
        let id = self.mode.logical_id(name);
        if id.is_empty() {
            return Err(ExportError::InvalidRecord(format!(
                "'{name}' does not yield a usable logical resource id"
            )));
        }
        if !self.seen.insert(id.clone()) {
            return Err(ExportError::InvalidRecord(format!(
                "logical resource id '{id}' (from '{name}') is used more than once"
            )));
        }
        Ok(id)
    }
}

fn write_header<W: Write + ?Sized>(out: &mut W, id: &str, resource_type: &str) -> ExportResult<()> {
    writeln!(out, "  {}:", yaml::key(id)?)?;
    write_entry(out, 4, "Type", resource_type)?;
    writeln!(out, "    Properties:")?;
    Ok(())
}

fn write_managed_policy_arns<W: Write + ?Sized>(out: &mut W, arns: &[String]) -> ExportResult<()> {
    if arns.is_empty() {
        return Ok(());
    }
    write_entry(out, 6, "ManagedPolicyArns", arns)
}

fn write_inline_policies<W: Write + ?Sized>(
    out: &mut W,
    policies: &[InlinePolicy],
) -> ExportResult<()> {
    if policies.is_empty() {
        return Ok(());
    }
    writeln!(out, "      Policies:")?;
    for policy in policies {
        write_item_entry(out, 6, "PolicyName", &policy.name)?;
        writeln!(out, "        PolicyDocument:")?;
        write_block(out, 10, &policy.document)?;
    }
    Ok(())
}

fn write_tags<W: Write + ?Sized>(out: &mut W, tags: &[Tag]) -> ExportResult<()> {
    if tags.is_empty() {
        return Ok(());
    }
    write_entry(out, 6, "Tags", tags)
}

fn write_description<W: Write + ?Sized>(
    out: &mut W,
    description: Option<&str>,
) -> ExportResult<()> {
    match description.filter(|d| !d.is_empty()) {
        Some(description) => write_entry(out, 6, "Description", description),
        None => Ok(()),
    }
}

fn write_group<W: Write + ?Sized>(out: &mut W, id: &str, group: &GroupRecord) -> ExportResult<()> {
    write_header(out, id, GROUP_RESOURCE_TYPE)?;
    write_managed_policy_arns(out, &group.managed_policy_arns)?;
    write_entry(out, 6, "Path", &group.path)?;
    write_inline_policies(out, &group.policies)
}

fn write_policy<W: Write + ?Sized>(
    out: &mut W,
    id: &str,
    policy_name: &str,
    policy: &PolicyRecord,
) -> ExportResult<()> {
    write_header(out, id, POLICY_RESOURCE_TYPE)?;
    write_description(out, policy.description.as_deref())?;
    write_entry(out, 6, "Path", &policy.path)?;
    write_entry(out, 6, "PolicyName", policy_name)?;
    writeln!(out, "      PolicyDocument:")?;
    write_block(out, 8, &policy.document)?;
    write_tags(out, &policy.tags)
}

fn write_role<W: Write + ?Sized>(out: &mut W, id: &str, role: &RoleRecord) -> ExportResult<()> {
    write_header(out, id, ROLE_RESOURCE_TYPE)?;
    writeln!(out, "      AssumeRolePolicyDocument:")?;
    write_block(out, 8, &role.assume_role_policy_document)?;
    write_description(out, role.description.as_deref())?;
    write_managed_policy_arns(out, &role.managed_policy_arns)?;
    if let Some(duration) = role.max_session_duration.filter(|d| *d > 0) {
        write_entry(out, 6, "MaxSessionDuration", &duration)?;
    }
    write_entry(out, 6, "Path", &role.path)?;
    write_tags(out, &role.tags)?;
    write_inline_policies(out, &role.policies)
}
