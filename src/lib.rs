//! SARC: Architecture Relay Core
//!
//! Sends user text to a remote zero-shot classifier and overlays the result
//! onto an in-memory model of bundles, phase blocks, and a context graph
//! recording which runs produced which results.
//!
//! # Core Concepts
//!
//! - **ClassificationCache**: memoizes classifier calls by `(text, labels)`
//! - **PhaseEntityStore**: owns bundles and the phase blocks attached to them
//! - **ParaPhaseSpace**: named contexts and weighted links recording provenance
//! - **Session**: one caller-owned instance of all three
//!
//! # Example
//!
//! ```
//! use sarc::{ParaPhaseSpace, metadata};
//!
//! let mut space = ParaPhaseSpace::new();
//! space.add_context("Activation", metadata([("weight", 0.7)])).unwrap();
//! assert_eq!(space.describe().context("Activation").unwrap().weight(), Some(0.7));
//! ```

pub mod classify;
pub mod config;
pub mod entity;
mod graph;
pub mod session;

pub use classify::{
    parse_labels, ClassificationCache, ClassificationError, ClassificationResult, Classifier,
    HttpClassifier, MockClassifier,
};
pub use config::{Config, ConfigError};
pub use entity::{
    BlockId, BlockType, Bundle, BundleId, BundleKind, EntityError, Locale, PhaseBlock,
    PhaseEntityStore, PhaseMode,
};
pub use graph::{
    metadata, ContextRecord, EntityId, GraphError, GraphEvent, GraphResult, Link, Metadata,
    MetadataValue, ParaPhaseSpace, RecordingMode, SpaceSnapshot, Strength, DEFAULT_LINK_STRENGTH,
};
pub use session::{ActionOutcome, ActionRequest, Session, SessionError, SessionOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
