//! Annotation pass: enrich every stored record with entities and sentiment.
//!
//! Each record is processed end to end (extract, classify, write) before the
//! next one is read. Model failures are isolated to their record and collected
//! into an [`AnnotationSummary`]; store failures abort the pass.

use crate::capability::{EntityExtractor, SentimentClassifier};
use crate::error::{Capability, ModelError, StoreError};
use crate::model::{AnnotationResult, Record, SentimentLabel};
use crate::store::RecordStore;

/// Records fetched per store read when no page size is configured.
pub const DEFAULT_PAGE_SIZE: usize = 500;

/// A record whose annotation failed inside the extractor or classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationFailure {
    pub record_id: String,
    pub capability: Capability,
    pub detail: String,
}

impl std::fmt::Display for AnnotationFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} failed: {}", self.record_id, self.capability, self.detail)
    }
}

/// Outcome of a completed annotation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSummary {
    pub succeeded: usize,
    pub failures: Vec<AnnotationFailure>,
}

impl AnnotationSummary {
    #[must_use]
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    #[must_use]
    pub fn processed(&self) -> usize {
        self.succeeded + self.failures.len()
    }

    #[must_use]
    pub fn failed_ids(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.record_id.as_str()).collect()
    }
}

/// Orchestrates an [`EntityExtractor`] and a [`SentimentClassifier`] over a
/// [`RecordStore`].
pub struct Annotator<E, C> {
    extractor: E,
    classifier: C,
    page_size: usize,
}

impl<E: EntityExtractor, C: SentimentClassifier> Annotator<E, C> {
    pub fn new(extractor: E, classifier: C) -> Self {
        Self {
            extractor,
            classifier,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Number of records read from the store per page. Values below 1 are
    /// raised to 1.
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    #[must_use]
    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Compute the annotation for one record without writing it.
    ///
    /// The full mention list is built before anything is returned, so the
    /// caller always writes every mention the extractor produced.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if either capability fails, if the classifier
    /// returns a score that is not finite or lies outside `[-1.0, 1.0]`, or if
    /// the extractor returns a mention with empty text or type, or one whose
    /// text is not a substring of the headline.
    pub async fn annotate(&self, record: &Record) -> Result<AnnotationResult, ModelError> {
        let entities = self.extractor.extract(&record.text).await?;
        if let Some(bad) = entities.iter().find(|m| !m.is_well_formed()) {
            return Err(ModelError::extractor(format!(
                "malformed mention {:?} of type {:?}",
                bad.surface_text, bad.entity_type
            )));
        }
        if let Some(stray) = entities
            .iter()
            .find(|m| !record.text.contains(m.surface_text.as_str()))
        {
            return Err(ModelError::extractor(format!(
                "mention {:?} does not occur in the headline",
                stray.surface_text
            )));
        }

        let score = self.classifier.compound_score(&record.text).await?;
        if !score.is_finite() || !(-1.0..=1.0).contains(&score) {
            return Err(ModelError::classifier(format!(
                "compound score {score} outside [-1.0, 1.0]"
            )));
        }

        Ok(AnnotationResult {
            entities,
            sentiment: SentimentLabel::from_compound(score),
        })
    }

    /// Annotate every record in the store, writing each result back before
    /// moving on.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a page read or an annotation write fails.
    /// Records already written stay written. Extractor and classifier
    /// failures are not errors; they are reported in the summary.
    pub async fn run<S: RecordStore>(&self, store: &S) -> Result<AnnotationSummary, StoreError> {
        let mut summary = AnnotationSummary::default();
        let mut cursor: Option<i64> = None;

        loop {
            let page = store.list_page(cursor, self.page_size).await?;
            let Some(last) = page.last() else {
                break;
            };
            cursor = Some(last.seq);

            for record in &page {
                match self.annotate(record).await {
                    Ok(annotation) => {
                        store
                            .apply_annotation(&record.record_id, &annotation)
                            .await
                            .map_err(|e| e.with_record(&record.record_id))?;
                        tracing::debug!(
                            record_id = %record.record_id,
                            entities = annotation.entities.len(),
                            sentiment = %annotation.sentiment,
                            "record annotated"
                        );
                        summary.succeeded += 1;
                    }
                    Err(e) => {
                        tracing::warn!(
                            record_id = %record.record_id,
                            capability = %e.capability,
                            error = %e.message,
                            "annotation failed; record left unchanged"
                        );
                        summary.failures.push(AnnotationFailure {
                            record_id: record.record_id.clone(),
                            capability: e.capability,
                            detail: e.message,
                        });
                    }
                }
            }

            if page.len() < self.page_size {
                break;
            }
        }

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed(),
            "annotation pass finished"
        );
        Ok(summary)
    }
}
