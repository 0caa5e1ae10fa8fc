use super::EntityMetadata;
use serde::{Deserialize, Serialize};

/// Base aggregate with the fields shared by every aggregate in the system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseAggregate<Id> {
    /// Unique identifier, immutable after creation
    pub id: Id,
    /// Business code of the record (e.g. "LOJA-1"); for stores this doubles
    /// as the client login key and must stay unique across the directory
    pub code: String,
    /// Display name of the record
    pub description: String,
    /// Lifecycle metadata
    pub metadata: EntityMetadata,
}

impl<Id> BaseAggregate<Id> {
    /// Create a new aggregate base
    pub fn new(id: Id, code: String, description: String) -> Self {
        Self {
            id,
            code,
            description,
            metadata: EntityMetadata::new(),
        }
    }

    /// Rebuild an aggregate base with existing metadata (loading from DB)
    pub fn with_metadata(
        id: Id,
        code: String,
        description: String,
        metadata: EntityMetadata,
    ) -> Self {
        Self {
            id,
            code,
            description,
            metadata,
        }
    }

    /// Refresh the update timestamp
    pub fn touch(&mut self) {
        self.metadata.touch();
    }
}
