//! PhaseEntityStore: owns bundles and phase blocks for one session

use super::block::{BlockId, BlockType, PhaseBlock};
use super::bundle::{Bundle, BundleId};
use super::labels::BundleKind;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Errors raised by entity-store misuse.
///
/// Every operation validates fully before mutating, so an error leaves the
/// store unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("invalid bundle kind: {0:?}")]
    InvalidKind(String),

    #[error("block {block} is already attached to bundle {owner}")]
    AlreadyAttached { block: BlockId, owner: BundleId },

    #[error("bundle not found: {0}")]
    BundleNotFound(BundleId),

    #[error("block not found: {0}")]
    BlockNotFound(BlockId),
}

pub type EntityResult<T> = Result<T, EntityError>;

#[derive(Debug, Default)]
pub struct PhaseEntityStore {
    bundles: HashMap<BundleId, Bundle>,
    blocks: HashMap<BlockId, PhaseBlock>,
}

impl PhaseEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bundle from a (possibly localized) kind label.
    pub fn create_bundle(&mut self, kind: &str, description: Option<String>) -> EntityResult<Bundle> {
        let kind = BundleKind::from_label(kind).ok_or_else(|| EntityError::InvalidKind(kind.to_string()))?;
        Ok(self.create_bundle_of(kind, description))
    }

    /// Create a bundle from an already-resolved kind.
    pub fn create_bundle_of(&mut self, kind: BundleKind, description: Option<String>) -> Bundle {
        let bundle = Bundle::new(kind, description);
        debug!(bundle = %bundle.id(), kind = %kind, "bundle created");
        self.bundles.insert(bundle.id(), bundle.clone());
        bundle
    }

    pub fn create_block(
        &mut self,
        type_name: impl Into<String>,
        type_version: impl Into<String>,
        content: impl Into<String>,
    ) -> PhaseBlock {
        let block = PhaseBlock::new(BlockType::new(type_name, type_version), content.into());
        debug!(block = %block.id(), type_name = %block.block_type().name, "block created");
        self.blocks.insert(block.id(), block.clone());
        block
    }

    /// Attach `block` to the end of `bundle`'s block sequence.
    ///
    /// Re-attaching a block to its current owner is a no-op.
    pub fn attach(&mut self, bundle: BundleId, block: BlockId) -> EntityResult<()> {
        if !self.bundles.contains_key(&bundle) {
            return Err(EntityError::BundleNotFound(bundle));
        }
        let entry = self.blocks.get_mut(&block).ok_or(EntityError::BlockNotFound(block))?;
        match entry.owner() {
            Some(owner) if owner == bundle => return Ok(()),
            Some(owner) => return Err(EntityError::AlreadyAttached { block, owner }),
            None => entry.set_owner(bundle),
        }
        // presence checked above
        if let Some(target) = self.bundles.get_mut(&bundle) {
            debug_assert!(!target.contains(block));
            target.push_block(block);
        }
        debug!(%bundle, %block, "block attached");
        Ok(())
    }

    pub fn bundle(&self, id: BundleId) -> Option<&Bundle> {
        self.bundles.get(&id)
    }

    pub fn block(&self, id: BlockId) -> Option<&PhaseBlock> {
        self.blocks.get(&id)
    }

    /// Blocks of `bundle` in composition order
    pub fn blocks_of(&self, bundle: BundleId) -> Vec<&PhaseBlock> {
        self.bundles
            .get(&bundle)
            .map(|b| b.blocks().iter().filter_map(|id| self.blocks.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn owner_of(&self, block: BlockId) -> Option<BundleId> {
        self.blocks.get(&block).and_then(PhaseBlock::owner)
    }

    pub fn bundle_count(&self) -> usize {
        self.bundles.len()
    }

    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}
