//! ClassificationCache: session-scoped memoization of classifier calls

use super::client::Classifier;
use super::result::{ClassificationError, ClassificationResult};
use lru::LruCache;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use tracing::debug;

/// Exact request identity: the text and the labels in the order sent
pub type CacheKey = (String, Vec<String>);

/// Memoizes successful classifications keyed by `(text, labels)`.
///
/// Failures are never stored. Unbounded by default; [`with_capacity`]
/// switches to least-recently-used eviction.
///
/// [`with_capacity`]: ClassificationCache::with_capacity
pub struct ClassificationCache<C> {
    client: C,
    entries: LruCache<CacheKey, ClassificationResult>,
    hits: u64,
    misses: u64,
}

impl<C: Classifier> ClassificationCache<C> {
    pub fn new(client: C) -> Self {
        Self::build(client, LruCache::unbounded())
    }

    pub fn with_capacity(client: C, capacity: NonZeroUsize) -> Self {
        Self::build(client, LruCache::new(capacity))
    }

    fn build(client: C, entries: LruCache<CacheKey, ClassificationResult>) -> Self {
        Self {
            client,
            entries,
            hits: 0,
            misses: 0,
        }
    }

    /// Classify `text` against `labels`, calling the service only on a miss.
    pub async fn classify(
        &mut self,
        text: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, ClassificationError> {
        validate_request(text, labels)?;

        let key: CacheKey = (text.to_string(), labels.to_vec());
        if let Some(hit) = self.entries.get(&key) {
            self.hits += 1;
            debug!(labels = labels.len(), "classification cache hit");
            return Ok(hit.clone());
        }

        self.misses += 1;
        debug!(labels = labels.len(), "classification cache miss");
        let result = self.client.classify(text, labels).await?;
        self.entries.put(key, result.clone());
        Ok(result)
    }

    pub fn contains(&self, text: &str, labels: &[String]) -> bool {
        self.entries.contains(&(text.to_string(), labels.to_vec()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

/// Reject requests the service should never see: empty text, no labels,
/// blank or duplicate labels.
pub fn validate_request(text: &str, labels: &[String]) -> Result<(), ClassificationError> {
    if text.trim().is_empty() {
        return Err(ClassificationError::InvalidRequest("text is empty".into()));
    }
    if labels.is_empty() {
        return Err(ClassificationError::InvalidRequest("no candidate labels".into()));
    }
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if label.trim().is_empty() {
            return Err(ClassificationError::InvalidRequest("blank candidate label".into()));
        }
        if !seen.insert(label.as_str()) {
            return Err(ClassificationError::InvalidRequest(format!(
                "duplicate candidate label: {}",
                label
            )));
        }
    }
    Ok(())
}
