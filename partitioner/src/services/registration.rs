use crate::catalog::PartitionCatalog;
use crate::generator::PartitionGenerator;
use crate::utils::chunks::break_into_chunks;
use chrono::NaiveDate;
use common::Result;
use common::config::validate_batch_size;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Number of partition columns the generator fills: date, hour, minute.
const EXPECTED_PARTITION_KEYS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRequest {
    pub database: String,
    pub table: String,
    pub start_date: NaiveDate,
    pub num_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationSummary {
    pub table: String,
    pub partitions_registered: usize,
    pub batches_submitted: usize,
}

pub struct PartitionRegistrationService {
    catalog: Arc<dyn PartitionCatalog>,
    batch_size: usize,
}

impl PartitionRegistrationService {
    pub fn new(catalog: Arc<dyn PartitionCatalog>, batch_size: usize) -> Result<Self> {
        validate_batch_size(batch_size)?;

        Ok(Self {
            catalog,
            batch_size,
        })
    }

    /// Looks up the table, then submits its minute partitions one batch at a
    /// time. Stops at the first failed batch; earlier batches are not rolled back.
    pub async fn register(&self, request: &RegistrationRequest) -> Result<RegistrationSummary> {
        let table = self
            .catalog
            .get_table(&request.database, &request.table)
            .await?;

        if table.partition_keys.len() != EXPECTED_PARTITION_KEYS {
            warn!(
                table = %request.table,
                partition_keys = ?table.partition_keys,
                "Table does not have exactly {} partition keys",
                EXPECTED_PARTITION_KEYS
            );
        }

        let generator =
            PartitionGenerator::for_table(request.start_date, request.num_days, &table)?;
        let total = generator.partition_count();

        println!("Adding {} partitions to the {} table", total, request.table);
        info!(
            database = %request.database,
            table = %request.table,
            start_date = %generator.start_date(),
            end_date = %generator.end_date(),
            batch_size = self.batch_size,
            "Registering partitions"
        );

        let mut batches_submitted = 0;
        let mut partitions_registered = 0;

        for chunk in break_into_chunks(&generator, self.batch_size)? {
            debug!(
                batch = batches_submitted,
                first = ?chunk[0].values,
                size = chunk.len(),
                "Submitting partition batch"
            );

            self.catalog
                .batch_create_partition(&request.database, &request.table, &chunk)
                .await?;

            batches_submitted += 1;
            partitions_registered += chunk.len();
        }

        println!("Partitions added successfully");

        Ok(RegistrationSummary {
            table: request.table.clone(),
            partitions_registered,
            batches_submitted,
        })
    }
}
