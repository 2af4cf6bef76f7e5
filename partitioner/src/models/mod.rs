mod partition;
mod table;

pub use partition::{PartitionDescriptor, PartitionValues};
pub use table::{SerdeInfo, StorageDescriptor, TableMetadata};
