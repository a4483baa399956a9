//! Core of headlinedb: the headline data model, the capability and store
//! seams, and the two passes that run over them.
//!
//! [`Annotator`] enriches every stored record with entity mentions and a
//! sentiment label. [`Aggregator`] answers the entity ranking and entity
//! lookup queries from the persisted annotations.

pub mod aggregate;
pub mod annotate;
pub mod app_config;
pub mod capability;
pub mod config;
pub mod error;
pub mod ingest;
pub mod model;
pub mod store;

pub use aggregate::{rank_entities, Aggregator, QueryError, DEFAULT_TOP_K};
pub use annotate::{AnnotationFailure, AnnotationSummary, Annotator, DEFAULT_PAGE_SIZE};
pub use app_config::{AppConfig, Environment};
pub use capability::{EntityExtractor, SentimentClassifier};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{BoxError, Capability, ConfigError, InputError, ModelError, StoreError};
pub use ingest::read_headlines_csv;
pub use model::{
    AnnotationResult, EntityFrequency, EntityMention, NewRecord, Record, SentimentLabel,
    NEGATIVE_THRESHOLD, POSITIVE_THRESHOLD,
};
pub use store::{InsertOutcome, MemoryStore, RecordNotFound, RecordStore};
