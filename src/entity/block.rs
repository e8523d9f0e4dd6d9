//! PhaseBlock: a typed content unit

use super::bundle::BundleId;
use crate::graph::EntityId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a phase block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(Uuid);

impl BlockId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for BlockId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<BlockId> for EntityId {
    fn from(id: BlockId) -> Self {
        EntityId::from_string(format!("block:{}", id))
    }
}

/// Name + version pair identifying a block's schema/template
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockType {
    pub name: String,
    pub version: String,
}

impl BlockType {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// A phase block. Immutable once created, apart from its owner.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseBlock {
    id: BlockId,
    #[serde(rename = "type")]
    block_type: BlockType,
    content: String,
    owner: Option<BundleId>,
    created_at: DateTime<Utc>,
}

impl PhaseBlock {
    pub(crate) fn new(block_type: BlockType, content: String) -> Self {
        Self {
            id: BlockId::new(),
            block_type,
            content,
            owner: None,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> BlockId {
        self.id
    }

    pub fn block_type(&self) -> &BlockType {
        &self.block_type
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Bundle this block is attached to, if any
    pub fn owner(&self) -> Option<BundleId> {
        self.owner
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub(crate) fn set_owner(&mut self, owner: BundleId) {
        self.owner = Some(owner);
    }
}
