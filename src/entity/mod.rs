//! Domain entities: bundles, phase blocks, and the store that owns them

mod block;
mod bundle;
mod labels;
mod store;

pub use block::{BlockId, BlockType, PhaseBlock};
pub use bundle::{Bundle, BundleId};
pub use labels::{BundleKind, Locale, PhaseMode, UnknownLabel};
pub use store::{EntityError, EntityResult, PhaseEntityStore};
