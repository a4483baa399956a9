use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause carried by [`StoreError`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Which external NLP capability produced a [`ModelError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    EntityExtractor,
    SentimentClassifier,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::EntityExtractor => write!(f, "entity extractor"),
            Capability::SentimentClassifier => write!(f, "sentiment classifier"),
        }
    }
}

/// An extractor or classifier failed, or returned output that violates its
/// contract. Isolated to the record being annotated.
#[derive(Debug, Clone, Error)]
#[error("{capability} failed: {message}")]
pub struct ModelError {
    pub capability: Capability,
    pub message: String,
}

impl ModelError {
    pub fn extractor(message: impl Into<String>) -> Self {
        Self {
            capability: Capability::EntityExtractor,
            message: message.into(),
        }
    }

    pub fn classifier(message: impl Into<String>) -> Self {
        Self {
            capability: Capability::SentimentClassifier,
            message: message.into(),
        }
    }
}

/// The record store failed. Fatal to the operation that hit it.
#[derive(Debug, Error)]
#[error("store operation '{operation}' failed{}: {source}", fmt_record_id(.record_id.as_deref()))]
pub struct StoreError {
    pub operation: &'static str,
    pub record_id: Option<String>,
    #[source]
    pub source: BoxError,
}

impl StoreError {
    pub fn new(operation: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            operation,
            record_id: None,
            source: source.into(),
        }
    }

    #[must_use]
    pub fn with_record(mut self, record_id: impl Into<String>) -> Self {
        self.record_id = Some(record_id.into());
        self
    }
}

fn fmt_record_id(record_id: Option<&str>) -> String {
    record_id
        .map(|id| format!(" for record '{id}'"))
        .unwrap_or_default()
}

/// Malformed or missing input handed to a command.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path} line {line}: {reason}")]
    InvalidRow {
        path: PathBuf,
        line: u64,
        reason: String,
    },

    #[error("entity ranking limit must be at least 1")]
    ZeroLimit,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
