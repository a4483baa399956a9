//! The record store seam and an in-memory implementation of it.

use std::collections::HashSet;
use std::future::Future;
use std::sync::{Mutex, PoisonError};

use crate::aggregate::rank_entities;
use crate::error::StoreError;
use crate::model::{AnnotationResult, EntityFrequency, NewRecord, Record};

/// Counts reported by a bulk insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InsertOutcome {
    pub inserted: usize,
    /// Rows whose `record_id` already existed in the store.
    pub skipped: usize,
}

/// Document collection holding headline records.
///
/// Every method is a complete operation: callers await it to a final result.
pub trait RecordStore: Send + Sync {
    /// Insert raw records. Rows whose id is already present are skipped.
    fn insert_records(
        &self,
        records: &[NewRecord],
    ) -> impl Future<Output = Result<InsertOutcome, StoreError>> + Send;

    /// Up to `limit` records with `seq` greater than `after`, in `seq` order.
    fn list_page(
        &self,
        after: Option<i64>,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<Record>, StoreError>> + Send;

    /// Replace a record's entities and sentiment label in one write.
    fn apply_annotation(
        &self,
        record_id: &str,
        annotation: &AnnotationResult,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Entity frequencies ranked by count desc, surface text asc, type asc.
    fn top_entities(
        &self,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<EntityFrequency>, StoreError>> + Send;

    /// Headline text of every record with a mention whose surface text equals
    /// `surface_text`, once per record, in `seq` order.
    fn headlines_for(
        &self,
        surface_text: &str,
    ) -> impl Future<Output = Result<Vec<String>, StoreError>> + Send;
}

#[derive(Debug, thiserror::Error)]
#[error("record not found")]
pub struct RecordNotFound;

/// Record store backed by a `Vec` behind a mutex.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from already-annotated records, assigning `seq` in order.
    #[must_use]
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let records = records
            .into_iter()
            .zip(1_i64..)
            .map(|(mut record, seq)| {
                record.seq = seq;
                record
            })
            .collect();
        Self {
            records: Mutex::new(records),
        }
    }

    /// Snapshot of a single record by id.
    #[must_use]
    pub fn get(&self, record_id: &str) -> Option<Record> {
        self.lock()
            .iter()
            .find(|r| r.record_id == record_id)
            .cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for MemoryStore {
    async fn insert_records(&self, records: &[NewRecord]) -> Result<InsertOutcome, StoreError> {
        let mut guard = self.lock();
        let mut seen: HashSet<String> = guard.iter().map(|r| r.record_id.clone()).collect();
        let mut next_seq = guard.last().map_or(1, |r| r.seq + 1);
        let mut outcome = InsertOutcome::default();

        for row in records {
            if !seen.insert(row.record_id.clone()) {
                outcome.skipped += 1;
                continue;
            }
            guard.push(Record {
                seq: next_seq,
                record_id: row.record_id.clone(),
                text: row.text.clone(),
                entities: Vec::new(),
                sentiment: None,
            });
            next_seq += 1;
            outcome.inserted += 1;
        }

        Ok(outcome)
    }

    async fn list_page(&self, after: Option<i64>, limit: usize) -> Result<Vec<Record>, StoreError> {
        let after = after.unwrap_or(i64::MIN);
        Ok(self
            .lock()
            .iter()
            .filter(|r| r.seq > after)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn apply_annotation(
        &self,
        record_id: &str,
        annotation: &AnnotationResult,
    ) -> Result<(), StoreError> {
        let mut guard = self.lock();
        let record = guard
            .iter_mut()
            .find(|r| r.record_id == record_id)
            .ok_or_else(|| {
                StoreError::new("apply_annotation", RecordNotFound).with_record(record_id)
            })?;
        record.entities.clone_from(&annotation.entities);
        record.sentiment = Some(annotation.sentiment);
        Ok(())
    }

    async fn top_entities(&self, limit: usize) -> Result<Vec<EntityFrequency>, StoreError> {
        let guard = self.lock();
        Ok(rank_entities(
            guard.iter().flat_map(|r| r.entities.iter()),
            limit,
        ))
    }

    async fn headlines_for(&self, surface_text: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .lock()
            .iter()
            .filter(|r| r.entities.iter().any(|m| m.surface_text == surface_text))
            .map(|r| r.text.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EntityMention, SentimentLabel};

    fn rows(ids: &[&str]) -> Vec<NewRecord> {
        ids.iter()
            .map(|id| NewRecord {
                record_id: (*id).to_string(),
                text: format!("headline {id}"),
            })
            .collect()
    }

    #[tokio::test]
    async fn insert_skips_duplicate_ids() {
        let store = MemoryStore::new();
        let first = store.insert_records(&rows(&["a", "b"])).await.unwrap();
        let second = store.insert_records(&rows(&["b", "c", "c"])).await.unwrap();

        assert_eq!(first, InsertOutcome { inserted: 2, skipped: 0 });
        assert_eq!(second, InsertOutcome { inserted: 1, skipped: 2 });
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn new_records_start_unannotated() {
        let store = MemoryStore::new();
        store.insert_records(&rows(&["a"])).await.unwrap();
        let record = store.get("a").unwrap();
        assert!(record.entities.is_empty());
        assert!(record.sentiment.is_none());
    }

    #[tokio::test]
    async fn list_page_walks_in_seq_order() {
        let store = MemoryStore::new();
        store
            .insert_records(&rows(&["a", "b", "c", "d", "e"]))
            .await
            .unwrap();

        let first = store.list_page(None, 2).await.unwrap();
        let ids: Vec<&str> = first.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);

        let rest = store.list_page(Some(first[1].seq), 10).await.unwrap();
        let ids: Vec<&str> = rest.iter().map(|r| r.record_id.as_str()).collect();
        assert_eq!(ids, ["c", "d", "e"]);

        let empty = store.list_page(Some(rest[2].seq), 10).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn apply_annotation_replaces_previous_state() {
        let store = MemoryStore::new();
        store.insert_records(&rows(&["a"])).await.unwrap();

        let first = AnnotationResult {
            entities: vec![EntityMention::new("Old", "ORG"), EntityMention::new("X", "GPE")],
            sentiment: SentimentLabel::Negative,
        };
        let second = AnnotationResult {
            entities: vec![EntityMention::new("New", "ORG")],
            sentiment: SentimentLabel::Positive,
        };
        store.apply_annotation("a", &first).await.unwrap();
        store.apply_annotation("a", &second).await.unwrap();

        let record = store.get("a").unwrap();
        assert_eq!(record.entities, second.entities);
        assert_eq!(record.sentiment, Some(SentimentLabel::Positive));
    }

    #[tokio::test]
    async fn apply_annotation_to_unknown_record_is_a_store_error() {
        let store = MemoryStore::new();
        let annotation = AnnotationResult {
            entities: vec![],
            sentiment: SentimentLabel::Neutral,
        };
        let err = store.apply_annotation("ghost", &annotation).await.unwrap_err();
        assert_eq!(err.operation, "apply_annotation");
        assert_eq!(err.record_id.as_deref(), Some("ghost"));
    }

    #[tokio::test]
    async fn headlines_for_lists_each_record_once() {
        let store = MemoryStore::with_records([Record {
            seq: 0,
            record_id: "a".to_string(),
            text: "Apple sues Apple".to_string(),
            entities: vec![EntityMention::new("Apple", "ORG"), EntityMention::new("Apple", "ORG")],
            sentiment: Some(SentimentLabel::Negative),
        }]);
        let headlines = store.headlines_for("Apple").await.unwrap();
        assert_eq!(headlines, ["Apple sues Apple"]);
    }
}
