pub mod glue;

pub use glue::GlueCatalog;

use async_trait::async_trait;
use common::Result;

use crate::models::{PartitionDescriptor, TableMetadata};

#[async_trait]
pub trait PartitionCatalog: Send + Sync {
    async fn get_table(&self, database: &str, table: &str) -> Result<TableMetadata>;

    /// Registers one batch. A batch that is only partly accepted is an error;
    /// partitions already accepted by the catalog stay registered.
    async fn batch_create_partition(
        &self,
        database: &str,
        table: &str,
        partitions: &[PartitionDescriptor],
    ) -> Result<()>;
}
