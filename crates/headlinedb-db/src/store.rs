//! [`RecordStore`] backed by the Postgres `headlines` table.

use headlinedb_core::{
    AnnotationResult, EntityFrequency, InsertOutcome, NewRecord, Record, RecordStore, StoreError,
};
use sqlx::PgPool;

use crate::{headlines, DbError};

#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn to_i64(value: usize) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl RecordStore for PgRecordStore {
    async fn insert_records(&self, records: &[NewRecord]) -> Result<InsertOutcome, StoreError> {
        let inserted = headlines::insert_headlines(&self.pool, records)
            .await
            .map_err(|e| StoreError::new("insert_records", e))?;
        let inserted = usize::try_from(inserted).unwrap_or(records.len());
        Ok(InsertOutcome {
            inserted,
            skipped: records.len().saturating_sub(inserted),
        })
    }

    async fn list_page(&self, after: Option<i64>, limit: usize) -> Result<Vec<Record>, StoreError> {
        let rows = headlines::list_headlines_page(&self.pool, after, to_i64(limit))
            .await
            .map_err(|e| StoreError::new("list_page", e))?;

        rows.into_iter()
            .map(|row| {
                let record_id = row.record_id.clone();
                Record::try_from(row)
                    .map_err(|e| StoreError::new("list_page", e).with_record(record_id))
            })
            .collect()
    }

    async fn apply_annotation(
        &self,
        record_id: &str,
        annotation: &AnnotationResult,
    ) -> Result<(), StoreError> {
        headlines::apply_annotation(&self.pool, record_id, annotation)
            .await
            .map_err(|e: DbError| StoreError::new("apply_annotation", e).with_record(record_id))
    }

    async fn top_entities(&self, limit: usize) -> Result<Vec<EntityFrequency>, StoreError> {
        headlines::top_entities(&self.pool, to_i64(limit))
            .await
            .map_err(|e| StoreError::new("top_entities", e))
    }

    async fn headlines_for(&self, surface_text: &str) -> Result<Vec<String>, StoreError> {
        headlines::headlines_for_entity(&self.pool, surface_text)
            .await
            .map_err(|e| StoreError::new("headlines_for", e))
    }
}
