use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_glue::Client as GlueClient;
use aws_sdk_glue::config::Region;
use aws_sdk_glue::error::{DisplayErrorContext, SdkError};
use aws_sdk_glue::operation::batch_create_partition::BatchCreatePartitionOutput;
use aws_sdk_glue::types::SerDeInfo as GlueSerDeInfo;
use aws_sdk_glue::types::{PartitionError, PartitionInput, Table};
use common::Result;
use common::config::CatalogConfig;
use tracing::debug;

use super::PartitionCatalog;
use crate::models::{PartitionDescriptor, SerdeInfo, StorageDescriptor, TableMetadata};

pub struct GlueCatalog {
    client: GlueClient,
}

impl GlueCatalog {
    pub fn new(client: GlueClient) -> Self {
        Self { client }
    }

    /// Builds a client from the default AWS credential chain, with optional
    /// region and endpoint overrides.
    pub async fn from_config(config: &CatalogConfig) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        debug!(region = ?sdk_config.region(), "Created Glue client");

        Self::new(GlueClient::new(&sdk_config))
    }
}

#[async_trait]
impl PartitionCatalog for GlueCatalog {
    async fn get_table(&self, database: &str, table: &str) -> Result<TableMetadata> {
        let response = self
            .client
            .get_table()
            .database_name(database)
            .name(table)
            .send()
            .await
            .map_err(|e| common::Error::table_lookup(database, table, sdk_error_message(e)))?;

        let glue_table = response
            .table()
            .ok_or_else(|| common::Error::table_lookup(database, table, "no table in response"))?;

        table_metadata(database, table, glue_table)
    }

    async fn batch_create_partition(
        &self,
        database: &str,
        table: &str,
        partitions: &[PartitionDescriptor],
    ) -> Result<()> {
        let inputs: Vec<PartitionInput> = partitions.iter().map(partition_input).collect();

        let response = self
            .client
            .batch_create_partition()
            .database_name(database)
            .table_name(table)
            .set_partition_input_list(Some(inputs))
            .send()
            .await
            .map_err(|e| common::Error::submission(table, sdk_error_message(e)))?;

        check_batch_response(table, &response, partitions.len())
    }
}

/// A call can succeed while individual partitions are rejected, e.g. with
/// `AlreadyExistsException`. Any rejection fails the batch.
fn check_batch_response(
    table: &str,
    response: &BatchCreatePartitionOutput,
    submitted: usize,
) -> Result<()> {
    let errors = response.errors();
    if !errors.is_empty() {
        return Err(common::Error::submission(
            table,
            rejection_message(errors, submitted),
        ));
    }
    Ok(())
}

fn sdk_error_message<E, R>(err: SdkError<E, R>) -> String
where
    E: std::error::Error + Send + Sync + 'static,
    R: std::fmt::Debug,
{
    match err {
        SdkError::ServiceError(err) => err.into_err().to_string(),
        other => DisplayErrorContext(&other).to_string(),
    }
}

fn table_metadata(database: &str, name: &str, table: &Table) -> Result<TableMetadata> {
    let missing = |what: &str| {
        common::Error::table_lookup(database, name, format!("table is missing {}", what))
    };

    let storage = table
        .storage_descriptor()
        .ok_or_else(|| missing("a storage descriptor"))?;

    let serde_info = storage.serde_info().map(|info| SerdeInfo {
        name: info.name().map(str::to_string),
        serialization_library: info.serialization_library().map(str::to_string),
        parameters: info.parameters().cloned().unwrap_or_default(),
    });

    Ok(TableMetadata {
        database: database.to_string(),
        name: name.to_string(),
        storage: StorageDescriptor {
            location: storage.location().ok_or_else(|| missing("a location"))?.to_string(),
            input_format: storage
                .input_format()
                .ok_or_else(|| missing("an input format"))?
                .to_string(),
            output_format: storage
                .output_format()
                .ok_or_else(|| missing("an output format"))?
                .to_string(),
            serde_info,
        },
        partition_keys: table
            .partition_keys()
            .iter()
            .map(|column| column.name().to_string())
            .collect(),
    })
}

fn partition_input(partition: &PartitionDescriptor) -> PartitionInput {
    let storage = &partition.storage;

    let serde_info = storage.serde_info.as_ref().map(|info| {
        GlueSerDeInfo::builder()
            .set_name(info.name.clone())
            .set_serialization_library(info.serialization_library.clone())
            .set_parameters(if info.parameters.is_empty() {
                None
            } else {
                Some(info.parameters.clone())
            })
            .build()
    });

    let storage_descriptor = aws_sdk_glue::types::StorageDescriptor::builder()
        .location(&storage.location)
        .input_format(&storage.input_format)
        .output_format(&storage.output_format)
        .set_serde_info(serde_info)
        .build();

    PartitionInput::builder()
        .set_values(Some(partition.values.to_vec()))
        .storage_descriptor(storage_descriptor)
        .build()
}

fn rejection_message(errors: &[PartitionError], submitted: usize) -> String {
    let first = &errors[0];
    let detail = first
        .error_detail()
        .map(|detail| {
            format!(
                "{}: {}",
                detail.error_code().unwrap_or("UnknownError"),
                detail.error_message().unwrap_or("no message")
            )
        })
        .unwrap_or_else(|| "no error detail".to_string());

    format!(
        "{} of {} partitions rejected, first {:?}: {}",
        errors.len(),
        submitted,
        first.partition_values(),
        detail
    )
}
