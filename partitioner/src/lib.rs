pub mod catalog;
pub mod generator;
pub mod models;
pub mod services;
pub mod utils;


use std::sync::Arc;
use catalog::GlueCatalog;
use common::config::Settings;
use common::Result;
use services::{PartitionRegistrationService, RegistrationRequest, RegistrationSummary};

/// Registers the requested minute partitions against the Glue Data Catalog
pub async fn run_partition_registration(
    settings: &Settings,
    request: &RegistrationRequest,
) -> Result<RegistrationSummary> {
    settings.validate()?;

    let catalog = Arc::new(GlueCatalog::from_config(&settings.catalog).await);
    let service = PartitionRegistrationService::new(catalog, settings.registration.batch_size)?;

    service.register(request).await
}
