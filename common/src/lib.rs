use thiserror::Error;

pub mod config;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Exception while fetching table info for {database}.{table} - {message}")]
    TableLookup {
        database: String,
        table: String,
        message: String,
    },

    #[error("Exception while adding partitions into the table {table} - {message}")]
    PartitionSubmission { table: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl Error {
    pub fn table_lookup(database: &str, table: &str, message: impl Into<String>) -> Self {
        Error::TableLookup {
            database: database.to_string(),
            table: table.to_string(),
            message: message.into(),
        }
    }

    pub fn submission(table: &str, message: impl Into<String>) -> Self {
        Error::PartitionSubmission {
            table: table.to_string(),
            message: message.into(),
        }
    }
}
