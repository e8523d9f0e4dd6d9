//! ParaPhaseSpace: the context/link graph recording classification provenance

use super::context::ContextRecord;
use super::link::{EntityId, Link, Strength};
use super::value::Metadata;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised by graph mutations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("link strength {0} is outside [0, 1]")]
    InvalidStrength(f64),

    #[error("context name must not be empty")]
    EmptyContextName,
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Append-only graph of named contexts and weighted links.
///
/// Contexts are upserted by name; links only ever accumulate. Nothing is
/// pruned for the lifetime of the space.
#[derive(Debug, Default)]
pub struct ParaPhaseSpace {
    contexts: BTreeMap<String, ContextRecord>,
    links: Vec<Link>,
}

impl ParaPhaseSpace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upsert a named context.
    ///
    /// A new name creates a record; an existing name merges `metadata` into
    /// it and refreshes `updated_at`. Links are never touched.
    pub fn add_context(&mut self, name: impl Into<String>, metadata: Metadata) -> GraphResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GraphError::EmptyContextName);
        }
        match self.contexts.get_mut(&name) {
            Some(existing) => existing.merge(metadata),
            None => {
                self.contexts.insert(name, ContextRecord::new(metadata));
            }
        }
        Ok(())
    }

    /// Append a directed link. Parallel links are accepted as-is.
    pub fn add_link(
        &mut self,
        source: impl Into<EntityId>,
        target: impl Into<EntityId>,
        strength: f64,
    ) -> GraphResult<()> {
        let strength = Strength::new(strength)?;
        self.links.push(Link::new(source.into(), target.into(), strength));
        Ok(())
    }

    /// Point-in-time copy of every context and link.
    pub fn describe(&self) -> SpaceSnapshot {
        SpaceSnapshot {
            contexts: self.contexts.clone(),
            links: self.links.clone(),
            taken_at: Utc::now(),
        }
    }

    pub fn context(&self, name: &str) -> Option<&ContextRecord> {
        self.contexts.get(name)
    }

    pub fn links(&self) -> impl Iterator<Item = &Link> {
        self.links.iter()
    }

    /// Links leaving `source`, in insertion order
    pub fn links_from<'a>(&'a self, source: &'a EntityId) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| &l.source == source)
    }

    /// Links arriving at `target`, in insertion order
    pub fn links_to<'a>(&'a self, target: &'a EntityId) -> impl Iterator<Item = &'a Link> + 'a {
        self.links.iter().filter(move |l| &l.target == target)
    }

    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contexts.is_empty() && self.links.is_empty()
    }
}

/// Owned view of a [`ParaPhaseSpace`], detached from the live graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpaceSnapshot {
    pub contexts: BTreeMap<String, ContextRecord>,
    pub links: Vec<Link>,
    pub taken_at: DateTime<Utc>,
}

impl SpaceSnapshot {
    pub fn context(&self, name: &str) -> Option<&ContextRecord> {
        self.contexts.get(name)
    }

    /// Number of links from `source` to `target`
    pub fn count_links(&self, source: &EntityId, target: &EntityId) -> usize {
        self.links
            .iter()
            .filter(|l| &l.source == source && &l.target == target)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::value::{metadata, MetadataValue};

    #[test]
    fn add_link_rejects_out_of_range_strength() {
        let mut space = ParaPhaseSpace::new();

        let err = space.add_link("a", "b", 1.5).unwrap_err();

        assert_eq!(err, GraphError::InvalidStrength(1.5));
        assert_eq!(space.link_count(), 0);
    }

    #[test]
    fn add_link_appears_once_in_snapshot() {
        let mut space = ParaPhaseSpace::new();
        space.add_link("a", "b", 0.9).unwrap();

        let snapshot = space.describe();

        let (a, b) = (EntityId::from("a"), EntityId::from("b"));
        assert_eq!(snapshot.count_links(&a, &b), 1);
        assert_eq!(snapshot.links[0].strength.value(), 0.9);
    }

    #[test]
    fn parallel_links_are_kept() {
        let mut space = ParaPhaseSpace::new();
        space.add_link("a", "b", 0.3).unwrap();
        space.add_link("a", "b", 0.3).unwrap();

        assert_eq!(space.link_count(), 2);
        assert_eq!(space.links_from(&EntityId::from("a")).count(), 2);
        assert_eq!(space.links_to(&EntityId::from("a")).count(), 0);
    }

    #[test]
    fn context_upsert_keeps_single_record_with_latest_weight() {
        let mut space = ParaPhaseSpace::new();
        space.add_context("Activation", metadata([("weight", 0.5)])).unwrap();
        space.add_context("Activation", metadata([("weight", 0.9)])).unwrap();

        assert_eq!(space.context_count(), 1);
        assert_eq!(space.context("Activation").unwrap().weight(), Some(0.9));
    }

    #[test]
    fn context_upsert_does_not_drop_links() {
        let mut space = ParaPhaseSpace::new();
        space.add_link("a", "b", 0.4).unwrap();
        space.add_context("Observation", Metadata::new()).unwrap();
        space.add_context("Observation", metadata([("state", "idle")])).unwrap();

        assert_eq!(space.link_count(), 1);
    }

    #[test]
    fn blank_context_name_is_rejected() {
        let mut space = ParaPhaseSpace::new();
        assert_eq!(
            space.add_context("  ", Metadata::new()),
            Err(GraphError::EmptyContextName)
        );
        assert!(space.is_empty());
    }

    #[test]
    fn snapshot_does_not_alias_live_graph() {
        let mut space = ParaPhaseSpace::new();
        space.add_context("Activation", metadata([("weight", 0.5)])).unwrap();

        let mut snapshot = space.describe();
        snapshot
            .contexts
            .get_mut("Activation")
            .unwrap()
            .metadata
            .insert("weight".into(), MetadataValue::from(0.1));
        snapshot.links.clear();
        space.add_link("x", "y", 0.2).unwrap();

        assert_eq!(space.context("Activation").unwrap().weight(), Some(0.5));
        assert_eq!(snapshot.links.len(), 0);
        assert_eq!(space.link_count(), 1);
    }
}
