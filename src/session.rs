//! Session: one caller-owned cache, entity store, and context graph
//!
//! A session handles one user-triggered action at a time. Each action
//! classifies the text, creates a bundle with one block holding the text,
//! and (when the graph is active) records the outcome as a [`GraphEvent`].
//! Entities are only created after a successful classification, and the
//! graph is only touched after the entities exist.

use crate::classify::{ClassificationCache, ClassificationError, ClassificationResult, Classifier};
use crate::config::Config;
use crate::entity::{Bundle, BundleKind, EntityError, PhaseBlock, PhaseEntityStore, PhaseMode};
use crate::graph::{
    GraphError, GraphEvent, Metadata, MetadataValue, ParaPhaseSpace, RecordingMode, SpaceSnapshot,
    Strength, DEFAULT_LINK_STRENGTH,
};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use thiserror::Error;
use tracing::{debug, info};

/// Block type assigned to blocks holding classified text
pub const BLOCK_TYPE_NAME: &str = "classified_text";
pub const BLOCK_TYPE_VERSION: &str = "1.0";

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Classification(#[from] ClassificationError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("unknown phase mode: {0:?}")]
    InvalidPhase(String),
}

/// How a session records outcomes in its graph
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionOptions {
    pub recording: RecordingMode,
    /// Strength of bundle → block links in [`RecordingMode::Link`]
    pub link_strength: Strength,
    /// LRU bound for the classification cache; `None` = unbounded
    pub cache_capacity: Option<NonZeroUsize>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            recording: RecordingMode::Context,
            link_strength: DEFAULT_LINK_STRENGTH,
            cache_capacity: None,
        }
    }
}

impl From<&Config> for SessionOptions {
    fn from(config: &Config) -> Self {
        Self {
            recording: config.recording,
            link_strength: config.link_strength,
            cache_capacity: config.cache_capacity,
        }
    }
}

fn default_true() -> bool {
    true
}

/// One user-triggered action, as plain values from the front-end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub text: String,
    pub labels: Vec<String>,
    /// Bundle kind label, in any supported locale
    pub kind: String,
    /// Phase mode label, in any supported locale
    pub phase: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Whether to record the outcome in the context graph
    #[serde(default = "default_true")]
    pub activate_graph: bool,
}

impl ActionRequest {
    pub fn new(text: impl Into<String>, labels: Vec<String>, kind: impl Into<String>, phase: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            labels,
            kind: kind.into(),
            phase: phase.into(),
            description: None,
            activate_graph: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn without_graph(mut self) -> Self {
        self.activate_graph = false;
        self
    }
}

/// What an action produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionOutcome {
    pub result: ClassificationResult,
    pub bundle: Bundle,
    pub block: PhaseBlock,
    /// The graph mutation, if the graph was active
    pub event: Option<GraphEvent>,
}

/// Build the graph event recording one classification outcome.
///
/// Context mode keys the record by phase mode and carries the top score as
/// `weight`; link mode records a fixed-strength bundle → block link.
pub fn outcome_event(
    options: &SessionOptions,
    phase: PhaseMode,
    result: &ClassificationResult,
    bundle: &Bundle,
    block: &PhaseBlock,
) -> GraphEvent {
    match options.recording {
        RecordingMode::Context => {
            let (label, weight) = result.top();
            let scores: Metadata = result
                .pairs()
                .map(|(l, s)| (l.to_string(), MetadataValue::from(s)))
                .collect();
            let mut metadata = Metadata::new();
            metadata.insert("weight".into(), weight.into());
            metadata.insert("label".into(), label.into());
            metadata.insert("state".into(), "active".into());
            metadata.insert("trigger_id".into(), bundle.id().to_string().into());
            metadata.insert("block_id".into(), block.id().to_string().into());
            metadata.insert("bundle_kind".into(), bundle.kind().as_str().into());
            metadata.insert("phase".into(), phase.as_str().into());
            metadata.insert("scores".into(), scores.into());
            GraphEvent::context(phase.as_str(), metadata)
        }
        RecordingMode::Link => GraphEvent::link(bundle.id(), block.id(), options.link_strength),
    }
}

pub struct Session<C> {
    cache: ClassificationCache<C>,
    store: PhaseEntityStore,
    space: ParaPhaseSpace,
    journal: Vec<GraphEvent>,
    options: SessionOptions,
}

impl<C: Classifier> Session<C> {
    pub fn new(client: C, options: SessionOptions) -> Self {
        let cache = match options.cache_capacity {
            Some(capacity) => ClassificationCache::with_capacity(client, capacity),
            None => ClassificationCache::new(client),
        };
        Self {
            cache,
            store: PhaseEntityStore::new(),
            space: ParaPhaseSpace::new(),
            journal: Vec::new(),
            options,
        }
    }

    pub fn from_config(client: C, config: &Config) -> Self {
        Self::new(client, SessionOptions::from(config))
    }

    /// Run one action end to end.
    ///
    /// On error nothing past the failing step is attempted: a failed
    /// classification creates no entities, an invalid kind or phase creates
    /// no entities and records nothing.
    pub async fn run(&mut self, request: &ActionRequest) -> Result<ActionOutcome, SessionError> {
        let result = self.cache.classify(&request.text, &request.labels).await?;

        let kind = BundleKind::from_label(&request.kind)
            .ok_or_else(|| EntityError::InvalidKind(request.kind.clone()))?;
        let phase = if request.activate_graph {
            Some(PhaseMode::from_label(&request.phase).ok_or_else(|| SessionError::InvalidPhase(request.phase.clone()))?)
        } else {
            None
        };

        let bundle = self.store.create_bundle_of(kind, request.description.clone());
        let block = self
            .store
            .create_block(BLOCK_TYPE_NAME, BLOCK_TYPE_VERSION, request.text.clone());
        self.store.attach(bundle.id(), block.id())?;
        // refresh both views now that the block is attached
        let bundle = self.store.bundle(bundle.id()).cloned().unwrap_or(bundle);
        let block = self.store.block(block.id()).cloned().unwrap_or(block);

        let event = match phase {
            Some(phase) => {
                let event = outcome_event(&self.options, phase, &result, &bundle, &block);
                event.apply(&mut self.space)?;
                debug!(?event, "outcome recorded");
                self.journal.push(event.clone());
                Some(event)
            }
            None => None,
        };

        info!(
            bundle = %bundle.id(),
            kind = %kind,
            top = result.top().0,
            recorded = event.is_some(),
            "action completed"
        );
        Ok(ActionOutcome {
            result,
            bundle,
            block,
            event,
        })
    }

    pub fn describe(&self) -> SpaceSnapshot {
        self.space.describe()
    }

    pub fn store(&self) -> &PhaseEntityStore {
        &self.store
    }

    pub fn space(&self) -> &ParaPhaseSpace {
        &self.space
    }

    pub fn cache(&self) -> &ClassificationCache<C> {
        &self.cache
    }

    /// Every graph event applied so far, in order
    pub fn journal(&self) -> &[GraphEvent] {
        &self.journal
    }

    /// End the session, returning the final state of its graph.
    pub fn finish(self) -> SpaceSnapshot {
        info!(
            bundles = self.store.bundle_count(),
            contexts = self.space.context_count(),
            links = self.space.link_count(),
            "session finished"
        );
        self.space.describe()
    }
}
