//! Record types produced by the fetchers and consumed by the renderer.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::ExportError;

/// Written as a CloudFormation `Tags` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// A policy document embedded in, and owned by, a single group or role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinePolicy {
    pub name: String,
    /// Normalized (decoded, two-space indented) JSON
    pub document: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupRecord {
    pub name: String,
    pub path: String,
    pub managed_policy_arns: Vec<String>,
    pub policies: Vec<InlinePolicy>,
}

/// A customer-managed policy and its default version document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyRecord {
    pub name: String,
    pub description: Option<String>,
    pub path: String,
    pub document: String,
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleRecord {
    pub name: String,
    pub description: Option<String>,
    pub path: String,
    pub max_session_duration: Option<i32>,
    pub assume_role_policy_document: String,
    pub managed_policy_arns: Vec<String>,
    pub policies: Vec<InlinePolicy>,
    pub tags: Vec<Tag>,
}

/// The resource family selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Groups,
    Policies,
    Roles,
}

impl ResourceKind {
    pub const ALL: [Self; 3] = [Self::Groups, Self::Policies, Self::Roles];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Groups => "groups",
            Self::Policies => "policies",
            Self::Roles => "roles",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| ExportError::UnknownKind(s.to_string()))
    }
}

/// Fully materialized inventory of one resource kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inventory {
    Groups(Vec<GroupRecord>),
    Policies(Vec<PolicyRecord>),
    Roles(Vec<RoleRecord>),
}

impl Inventory {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Self::Groups(_) => ResourceKind::Groups,
            Self::Policies(_) => ResourceKind::Policies,
            Self::Roles(_) => ResourceKind::Roles,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Groups(records) => records.len(),
            Self::Policies(records) => records.len(),
            Self::Roles(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
