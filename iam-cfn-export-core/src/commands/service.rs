//! IAM template export service layer
//!
//! The service owns the IAM source and runs the fetch-then-render pipeline for a
//! single resource kind. The CLI is a thin adapter over it.

use std::io::Write;

use rand::Rng;

use crate::aws::{load_client, AwsOptions, IamSource};
use crate::error::ExportResult;
use crate::fetch::fetch_inventory;
use crate::records::{Inventory, ResourceKind};
use crate::render::{render, NamingMode};

/// Main service struct that holds the IAM source and provides export operations
pub struct ExportService {
    source: Box<dyn IamSource>,
}

impl ExportService {
    /// Create a new service backed by the AWS SDK.
    ///
    /// The configuration is loaded using the default credential provider chain,
    /// with the region and profile overrides from `options` applied on top.
    pub async fn new(options: &AwsOptions) -> ExportResult<Self> {
        let client = load_client(options).await?;
        Ok(Self::with_source(client))
    }

    /// Create a service over any [`IamSource`].
    pub fn with_source(source: impl IamSource + 'static) -> Self {
        Self {
            source: Box::new(source),
        }
    }

    /// Fetch the complete inventory of `kind`.
    pub async fn export(&self, kind: ResourceKind) -> ExportResult<Inventory> {
        fetch_inventory(self.source.as_ref(), kind).await
    }

    /// Fetch `kind` and render it as a template into `out`.
    ///
    /// Nothing is written unless the whole inventory was fetched.
    pub async fn export_template<W, R>(
        &self,
        kind: ResourceKind,
        mode: NamingMode,
        rng: &mut R,
        out: &mut W,
    ) -> ExportResult<()>
    where
        W: Write + ?Sized,
        R: Rng + ?Sized,
    {
        let inventory = self.export(kind).await?;
        render(out, &inventory, mode, rng)
    }
}
