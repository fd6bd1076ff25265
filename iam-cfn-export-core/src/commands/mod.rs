//! Commands module - service layer for IAM template export

pub(crate) mod service;

pub use service::ExportService;
