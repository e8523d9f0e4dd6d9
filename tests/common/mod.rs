//! Shared helpers for session-level integration tests

#![allow(dead_code)]

use sarc::{ActionRequest, MockClassifier, Session, SessionOptions};
use std::sync::Arc;

pub const KIND_LABELS: [&str; 3] = ["Analytical", "Streaming", "Structural"];

pub fn kind_labels() -> Vec<String> {
    KIND_LABELS.iter().map(|s| s.to_string()).collect()
}

pub fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// A session over a shared mock, so tests can still read its call counter
pub fn session_with(mock: MockClassifier) -> (Session<Arc<MockClassifier>>, Arc<MockClassifier>) {
    session_with_options(mock, SessionOptions::default())
}

pub fn session_with_options(
    mock: MockClassifier,
    options: SessionOptions,
) -> (Session<Arc<MockClassifier>>, Arc<MockClassifier>) {
    let mock = Arc::new(mock);
    (Session::new(mock.clone(), options), mock)
}

pub fn action(text: &str, kind: &str, phase: &str) -> ActionRequest {
    ActionRequest::new(text, kind_labels(), kind, phase)
}
