//! Zero-shot classification: client contract, HTTP transport, and the session cache

mod cache;
mod client;
mod http;
mod result;

pub use cache::{validate_request, CacheKey, ClassificationCache};
pub use client::{Classifier, MockClassifier};
pub use http::{parse_response, request_body, HttpClassifier};
pub use result::{parse_labels, ClassificationError, ClassificationResult};
