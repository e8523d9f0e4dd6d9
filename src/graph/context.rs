//! Context: a named, mutable metadata record inside the space

use super::value::{Metadata, MetadataValue};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A context record, addressed by name in [`ParaPhaseSpace`](super::ParaPhaseSpace)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRecord {
    /// Caller-supplied payload (weight, state, trigger id, ...)
    pub metadata: Metadata,
    /// When the context was first added
    pub created_at: DateTime<Utc>,
    /// When the context was last upserted
    pub updated_at: DateTime<Utc>,
}

impl ContextRecord {
    /// Create a new record stamped with the current time
    pub fn new(metadata: Metadata) -> Self {
        let now = Utc::now();
        Self {
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge `metadata` into this record.
    ///
    /// Incoming keys overwrite existing ones; keys absent from `metadata`
    /// are kept. Always refreshes `updated_at`.
    pub fn merge(&mut self, metadata: Metadata) {
        for (k, v) in metadata {
            self.metadata.insert(k, v);
        }
        self.touch();
    }

    /// Get a metadata value by key
    pub fn get(&self, key: &str) -> Option<&MetadataValue> {
        self.metadata.get(key)
    }

    /// The numeric `weight` entry, if present
    pub fn weight(&self) -> Option<f64> {
        self.get("weight").and_then(MetadataValue::as_f64)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
