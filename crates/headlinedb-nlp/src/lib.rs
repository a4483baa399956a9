//! NLP capabilities for headlinedb.
//!
//! Provides a rule-based compound sentiment scorer, a gazetteer entity
//! extractor, and a client for a spaCy-style NER service, plus the wiring that
//! picks between them from config.

pub mod error;
pub mod gazetteer;
pub mod ner_client;
pub mod pipeline;
pub mod scorer;

pub use error::NlpError;
pub use gazetteer::GazetteerExtractor;
pub use ner_client::NerClient;
pub use pipeline::{build_annotator, build_extractor, Extractor, HeadlineAnnotator};
pub use scorer::LexiconClassifier;
