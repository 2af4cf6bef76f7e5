use std::collections::HashMap;

/// Serializer/deserializer settings of a table. Carried through to every
/// partition without being interpreted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerdeInfo {
    pub name: Option<String>,
    pub serialization_library: Option<String>,
    pub parameters: HashMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageDescriptor {
    pub location: String,
    pub input_format: String,
    pub output_format: String,
    pub serde_info: Option<SerdeInfo>,
}

/// Table definition as read from the catalog. Read-only for the whole run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableMetadata {
    pub database: String,
    pub name: String,
    pub storage: StorageDescriptor,
    pub partition_keys: Vec<String>,
}

impl TableMetadata {
    pub fn location(&self) -> &str {
        &self.storage.location
    }
}
