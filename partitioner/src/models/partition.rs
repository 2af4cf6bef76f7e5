use super::table::StorageDescriptor;

/// Partition values in key order: date, hour, minute.
pub type PartitionValues = [String; 3];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionDescriptor {
    pub values: PartitionValues,
    pub storage: StorageDescriptor,
}

impl PartitionDescriptor {
    pub fn date(&self) -> &str {
        &self.values[0]
    }

    pub fn hour(&self) -> &str {
        &self.values[1]
    }

    pub fn minute(&self) -> &str {
        &self.values[2]
    }

    pub fn location(&self) -> &str {
        &self.storage.location
    }
}
