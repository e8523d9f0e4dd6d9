//! Bundle: an ordered grouping of phase blocks under a fixed kind

use super::block::BlockId;
use super::labels::BundleKind;
use crate::graph::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a bundle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BundleId(Uuid);

impl BundleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BundleId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BundleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BundleId> for EntityId {
    fn from(id: BundleId) -> Self {
        EntityId::from_string(format!("bundle:{}", id))
    }
}

/// A bundle of phase blocks.
///
/// Only [`PhaseEntityStore`](super::PhaseEntityStore) creates bundles and
/// appends to their block sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bundle {
    id: BundleId,
    kind: BundleKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    /// Owned blocks in composition order
    blocks: Vec<BlockId>,
    created_at: DateTime<Utc>,
}

impl Bundle {
    pub(crate) fn new(kind: BundleKind, description: Option<String>) -> Self {
        Self {
            id: BundleId::new(),
            kind,
            description,
            blocks: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> BundleId {
        self.id
    }

    pub fn kind(&self) -> BundleKind {
        self.kind
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn blocks(&self) -> &[BlockId] {
        &self.blocks
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn contains(&self, block: BlockId) -> bool {
        self.blocks.contains(&block)
    }

    pub(crate) fn push_block(&mut self, block: BlockId) {
        self.blocks.push(block);
    }
}
