//! Classifier client — the contract with the remote zero-shot service
//!
//! Two implementations:
//! - `HttpClassifier`: bearer-authenticated JSON over HTTP (production)
//! - `MockClassifier`: scripted responses with a call counter (testing)

use super::result::{ClassificationError, ClassificationResult};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Client trait for the zero-shot classification service.
///
/// Abstracts over transport so the cache doesn't depend on how the
/// service is reached.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Score `text` against `labels`. One call is one outbound request.
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, ClassificationError>;
}

#[async_trait]
impl<C: Classifier + ?Sized> Classifier for Arc<C> {
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, ClassificationError> {
        (**self).classify(text, labels).await
    }
}

#[async_trait]
impl<C: Classifier + ?Sized> Classifier for Box<C> {
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, ClassificationError> {
        (**self).classify(text, labels).await
    }
}

/// Mock classifier for testing — returns scripted responses keyed by text.
///
/// Queued one-shot failures for a text are served before its scripted
/// response. Every call, successful or not, increments the call counter.
#[derive(Default)]
pub struct MockClassifier {
    scores: HashMap<String, Vec<f64>>,
    results: HashMap<String, ClassificationResult>,
    failures: Mutex<HashMap<String, VecDeque<ClassificationError>>>,
    calls: AtomicUsize,
}

impl MockClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `text` with `scores` aligned to whatever labels were requested.
    pub fn with_scores(mut self, text: impl Into<String>, scores: Vec<f64>) -> Self {
        self.scores.insert(text.into(), scores);
        self
    }

    /// Respond to `text` with a fixed result, ignoring the requested labels.
    pub fn with_result(mut self, text: impl Into<String>, result: ClassificationResult) -> Self {
        self.results.insert(text.into(), result);
        self
    }

    /// Fail the next call for `text` with `error`.
    pub fn with_failure_once(mut self, text: impl Into<String>, error: ClassificationError) -> Self {
        if let Ok(failures) = self.failures.get_mut() {
            failures.entry(text.into()).or_default().push_back(error);
        }
        self
    }

    /// Number of outbound calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Classifier for MockClassifier {
    async fn classify(
        &self,
        text: &str,
        labels: &[String],
    ) -> Result<ClassificationResult, ClassificationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let queued = match self.failures.lock() {
            Ok(mut failures) => failures.get_mut(text).and_then(VecDeque::pop_front),
            Err(_) => None,
        };
        if let Some(error) = queued {
            return Err(error);
        }

        if let Some(result) = self.results.get(text) {
            return Ok(result.clone());
        }
        match self.scores.get(text) {
            Some(scores) => ClassificationResult::new(labels.to_vec(), scores.clone()),
            None => Err(ClassificationError::Transport(format!(
                "no mock response for text '{}'",
                text
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn mock_aligns_scores_to_requested_labels() {
        let mock = MockClassifier::new().with_scores("hello", vec![0.6, 0.4]);

        let result = mock.classify("hello", &labels(&["A", "B"])).await.unwrap();

        assert_eq!(result.labels(), &labels(&["A", "B"])[..]);
        assert_eq!(result.scores(), &[0.6, 0.4]);
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn mock_serves_queued_failure_first() {
        let mock = MockClassifier::new()
            .with_scores("hello", vec![1.0])
            .with_failure_once("hello", ClassificationError::Transport("reset".into()));

        let first = mock.classify("hello", &labels(&["A"])).await;
        let second = mock.classify("hello", &labels(&["A"])).await;

        assert!(matches!(first, Err(ClassificationError::Transport(_))));
        assert!(second.is_ok());
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn mock_without_script_reports_transport_error() {
        let mock = MockClassifier::new();
        let err = mock.classify("unknown", &labels(&["A"])).await.unwrap_err();
        assert!(matches!(err, ClassificationError::Transport(_)));
    }

    #[tokio::test]
    async fn arc_wrapped_mock_shares_counter() {
        let mock = Arc::new(MockClassifier::new().with_scores("x", vec![0.5]));
        let shared: Arc<MockClassifier> = mock.clone();

        shared.classify("x", &labels(&["A"])).await.unwrap();

        assert_eq!(mock.calls(), 1);
    }
}
