//! Top-level error type for the export pipeline.

use thiserror::Error;

use crate::aws::AwsError;
use crate::policy_document::DocumentError;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("unknown resource kind '{0}' (expected one of: groups, policies, roles)")]
    UnknownKind(String),

    #[error(transparent)]
    Aws(#[from] AwsError),

    #[error("failed to decode policy document '{name}' of {owner}")]
    Document {
        owner: String,
        name: String,
        #[source]
        source: DocumentError,
    },

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("failed to serialize template value: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to write template: {0}")]
    Write(#[from] std::io::Error),
}

impl ExportError {
    pub(crate) fn document(
        owner: impl Into<String>,
        name: impl Into<String>,
        source: DocumentError,
    ) -> Self {
        Self::Document {
            owner: owner.into(),
            name: name.into(),
            source,
        }
    }
}

pub type ExportResult<T> = Result<T, ExportError>;
