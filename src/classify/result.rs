//! Classification results and errors

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from a classification request.
///
/// None of these are ever cached: an identical retry goes back to the service.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClassificationError {
    #[error("invalid classification request: {0}")]
    InvalidRequest(String),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("classifier returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed classifier response: {0}")]
    MalformedResponse(String),
}

impl ClassificationError {
    /// Human-readable message for the triggering action
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Whether a single retry may succeed (connection-level failures only)
    pub fn is_transient(&self) -> bool {
        matches!(self, ClassificationError::Transport(_))
    }
}

#[derive(Deserialize)]
struct RawResult {
    labels: Vec<String>,
    scores: Vec<f64>,
}

/// Order-aligned label/score pairs: `scores[i]` belongs to `labels[i]`.
///
/// Scores are taken as returned; they are not assumed to sum to 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResult")]
pub struct ClassificationResult {
    labels: Vec<String>,
    scores: Vec<f64>,
}

impl ClassificationResult {
    pub fn new(labels: Vec<String>, scores: Vec<f64>) -> Result<Self, ClassificationError> {
        if labels.len() != scores.len() {
            return Err(ClassificationError::MalformedResponse(format!(
                "{} labels but {} scores",
                labels.len(),
                scores.len()
            )));
        }
        if labels.is_empty() {
            return Err(ClassificationError::MalformedResponse("no labels returned".into()));
        }
        if let Some(bad) = scores.iter().find(|s| !s.is_finite()) {
            return Err(ClassificationError::MalformedResponse(format!(
                "non-finite score {}",
                bad
            )));
        }
        Ok(Self { labels, scores })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels.iter().map(String::as_str).zip(self.scores.iter().copied())
    }

    /// Highest-scoring label. Ties go to the earlier label.
    pub fn top(&self) -> (&str, f64) {
        let mut best = (self.labels[0].as_str(), self.scores[0]);
        for (label, score) in self.pairs().skip(1) {
            if score > best.1 {
                best = (label, score);
            }
        }
        best
    }

    pub fn score_for(&self, label: &str) -> Option<f64> {
        self.pairs().find(|(l, _)| *l == label).map(|(_, s)| s)
    }
}

impl TryFrom<RawResult> for ClassificationResult {
    type Error = ClassificationError;

    fn try_from(raw: RawResult) -> Result<Self, Self::Error> {
        Self::new(raw.labels, raw.scores)
    }
}

/// Split comma-separated label input, trimming and dropping empty entries
pub fn parse_labels(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
