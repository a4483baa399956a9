use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NlpError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("NER service error: {0}")]
    Ner(String),

    #[error("invalid gazetteer: {0}")]
    Gazetteer(String),

    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("gazetteer YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("gazetteer pattern error: {0}")]
    Pattern(#[from] regex::Error),
}
