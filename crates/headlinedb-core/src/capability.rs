//! Narrow interfaces to the NLP capabilities the annotator consumes.
//!
//! Implementations live in `headlinedb-nlp`; tests plug in deterministic stubs.

use std::future::Future;

use crate::error::ModelError;
use crate::model::EntityMention;

/// Maps text to the ordered sequence of entity mentions found in it.
pub trait EntityExtractor: Send + Sync {
    /// Extract every mention in `text`, in order of appearance.
    fn extract(
        &self,
        text: &str,
    ) -> impl Future<Output = Result<Vec<EntityMention>, ModelError>> + Send;
}

/// Maps text to a compound sentiment score in `[-1.0, 1.0]`.
pub trait SentimentClassifier: Send + Sync {
    fn compound_score(&self, text: &str) -> impl Future<Output = Result<f64, ModelError>> + Send;
}
