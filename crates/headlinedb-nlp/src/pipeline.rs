//! Assemble the annotator from application config.

use headlinedb_core::{AppConfig, Annotator, EntityExtractor, EntityMention, ModelError};

use crate::error::NlpError;
use crate::gazetteer::GazetteerExtractor;
use crate::ner_client::NerClient;
use crate::scorer::LexiconClassifier;

/// The entity extractor selected by configuration.
pub enum Extractor {
    Gazetteer(GazetteerExtractor),
    Ner(NerClient),
}

impl Extractor {
    /// Short name for log lines.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Gazetteer(_) => "gazetteer",
            Self::Ner(_) => "ner-http",
        }
    }
}

impl EntityExtractor for Extractor {
    async fn extract(&self, text: &str) -> Result<Vec<EntityMention>, ModelError> {
        match self {
            Self::Gazetteer(gazetteer) => gazetteer.extract(text).await,
            Self::Ner(client) => client.extract(text).await,
        }
    }
}

pub type HeadlineAnnotator = Annotator<Extractor, LexiconClassifier>;

/// Pick the extractor: the NER service when `ner_url` is set, otherwise the
/// gazetteer at `gazetteer_path`.
///
/// # Errors
///
/// Returns [`NlpError`] if the NER client cannot be built or the gazetteer
/// cannot be loaded.
pub fn build_extractor(config: &AppConfig) -> Result<Extractor, NlpError> {
    match config.ner_url.as_deref() {
        Some(url) => {
            tracing::info!(url, "using NER service for entity extraction");
            Ok(Extractor::Ner(NerClient::new(url, config.ner_timeout_secs)?))
        }
        None => Ok(Extractor::Gazetteer(GazetteerExtractor::load(
            &config.gazetteer_path,
        )?)),
    }
}

/// Build the annotator used by the `annotate` command.
///
/// # Errors
///
/// See [`build_extractor`].
pub fn build_annotator(config: &AppConfig) -> Result<HeadlineAnnotator, NlpError> {
    let extractor = build_extractor(config)?;
    Ok(Annotator::new(extractor, LexiconClassifier::new())
        .with_page_size(config.annotate_page_size))
}
