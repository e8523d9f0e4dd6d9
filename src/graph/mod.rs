//! Context graph: named contexts and weighted links between entity identities

mod context;
mod events;
mod link;
mod space;
mod value;


pub use context::ContextRecord;
pub use events::{GraphEvent, RecordingMode};
pub use link::{EntityId, Link, Strength, DEFAULT_LINK_STRENGTH};
pub use space::{GraphError, GraphResult, ParaPhaseSpace, SpaceSnapshot};
pub use value::{metadata, Metadata, MetadataValue};
