//! Graph events: the two shapes a classification outcome can take in the space
//!
//! A named context carries rich metadata keyed by phase mode; a link carries
//! only a fixed strength between bundle and block. Both are variants of one
//! event so callers record provenance without probing which shape is in use.

use super::link::{EntityId, Strength};
use super::space::{GraphResult, ParaPhaseSpace};
use super::value::Metadata;
use serde::{Deserialize, Serialize};

/// A mutation recorded in a [`ParaPhaseSpace`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GraphEvent {
    /// A named context was upserted
    ContextRecorded { name: String, metadata: Metadata },
    /// A directed link was appended
    LinkRecorded {
        source: EntityId,
        target: EntityId,
        strength: Strength,
    },
}

impl GraphEvent {
    pub fn context(name: impl Into<String>, metadata: Metadata) -> Self {
        GraphEvent::ContextRecorded {
            name: name.into(),
            metadata,
        }
    }

    pub fn link(source: impl Into<EntityId>, target: impl Into<EntityId>, strength: Strength) -> Self {
        GraphEvent::LinkRecorded {
            source: source.into(),
            target: target.into(),
            strength,
        }
    }

    /// Apply this event to `space`
    pub fn apply(&self, space: &mut ParaPhaseSpace) -> GraphResult<()> {
        match self {
            GraphEvent::ContextRecorded { name, metadata } => {
                space.add_context(name.clone(), metadata.clone())
            }
            GraphEvent::LinkRecorded {
                source,
                target,
                strength,
            } => space.add_link(source.clone(), target.clone(), strength.value()),
        }
    }

    /// The weight this event records: the link strength, or the context's `weight` entry
    pub fn weight(&self) -> Option<f64> {
        match self {
            GraphEvent::ContextRecorded { metadata, .. } => {
                metadata.get("weight").and_then(|v| v.as_f64())
            }
            GraphEvent::LinkRecorded { strength, .. } => Some(strength.value()),
        }
    }
}

/// Which event shape a session records classification outcomes as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordingMode {
    /// Phase-mode keyed context with metadata (preferred)
    #[default]
    Context,
    /// Fixed-strength bundle → block link
    Link,
}

impl std::str::FromStr for RecordingMode {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "context" => Ok(Self::Context),
            "link" => Ok(Self::Link),
            _ => Err(format!("unknown recording mode: {}", s)),
        }
    }
}
