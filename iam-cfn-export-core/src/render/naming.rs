//! Logical resource identifiers and generated policy names.

use convert_case::{Boundary, Case, Converter};
use rand::Rng;

/// How resources are keyed in the template and how managed policies are named.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamingMode {
    /// Key each resource by its literal IAM name and keep policy names unchanged.
    Plain,
    /// Key each resource by an alphanumeric identifier derived from its name, and
    /// suffix managed policy names with a random number.
    ///
    /// CloudFormation cannot adopt existing groups or policies, so the template
    /// creates parallel resources whose names must not clash with the originals.
    #[default]
    Sanitized,
}

/// Derive an alphanumeric logical identifier from an IAM name.
///
/// Names that are already alphanumeric are returned unchanged. Otherwise the name
/// is split on every non-alphanumeric character and on lower-to-upper case changes,
/// then Pascal-cased: `my-group_name` becomes `MyGroupName`.
pub fn sanitize_logical_id(name: &str) -> String {
    if name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return name.to_string();
    }

    let separated: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    Converter::new()
        .set_boundaries(&[Boundary::UNDERSCORE, Boundary::LOWER_UPPER])
        .to_case(Case::Pascal)
        .convert(separated)
}

impl NamingMode {
    pub(crate) fn logical_id(self, name: &str) -> String {
        match self {
            Self::Plain => name.to_string(),
            Self::Sanitized => sanitize_logical_id(name),
        }
    }

    pub(crate) fn managed_policy_name<R: Rng + ?Sized>(self, name: &str, rng: &mut R) -> String {
        match self {
            Self::Plain => name.to_string(),
            Self::Sanitized => format!("{name}-{}", rng.gen::<u32>()),
        }
    }
}
