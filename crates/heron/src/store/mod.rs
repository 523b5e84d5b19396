//! Storage for classification results.
//!
//! The classification pipeline does not depend on this module. The HTTP layer saves
//! each result it returns and serves point lookups by id.

use crate::Result;
use crate::types::ClassifierResult;
use ahash::AHashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredClassification {
    pub id: Uuid,
    pub filename: String,
    #[serde(flatten)]
    pub result: ClassifierResult,
}

/// Keyed storage for classification results.
pub trait ResultStore: Send + Sync {
    /// Persist `result` for `filename` and return the generated id.
    fn save(&self, filename: &str, result: &ClassifierResult) -> Result<Uuid>;

    /// Look up a saved classification.
    fn get(&self, id: &Uuid) -> Result<Option<StoredClassification>>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-local store; contents are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryResultStore {
    records: RwLock<AHashMap<Uuid, StoredClassification>>,
}

impl InMemoryResultStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ResultStore for InMemoryResultStore {
    fn save(&self, filename: &str, result: &ClassifierResult) -> Result<Uuid> {
        let id = Uuid::new_v4();
        let record = StoredClassification {
            id,
            filename: filename.to_string(),
            result: result.clone(),
        };
        self.records.write().insert(id, record);
        tracing::debug!(%id, filename, document_type = %result.document_type, "Stored classification");
        Ok(id)
    }

    fn get(&self, id: &Uuid) -> Result<Option<StoredClassification>> {
        Ok(self.records.read().get(id).cloned())
    }

    fn len(&self) -> usize {
        self.records.read().len()
    }
}
