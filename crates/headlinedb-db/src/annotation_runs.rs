//! Database operations for `annotation_runs`.

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

const RUN_COLUMNS: &str = "id, public_id, trigger_source, status, extractor, \
     started_at, completed_at, records_succeeded, records_failed, failed_record_ids, \
     error_message, created_at";

/// A row from the `annotation_runs` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct AnnotationRunRow {
    pub id: i64,
    pub public_id: Uuid,
    pub trigger_source: String,
    pub status: String,
    /// Which entity extractor the pass used (`gazetteer` or `ner-http`).
    pub extractor: String,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub records_succeeded: i32,
    pub records_failed: i32,
    pub failed_record_ids: Json<Vec<String>>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Creates a new annotation run in `queued` status.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn create_annotation_run(
    pool: &PgPool,
    trigger_source: &str,
    extractor: &str,
) -> Result<AnnotationRunRow, DbError> {
    let public_id = Uuid::new_v4();

    let row = sqlx::query_as::<_, AnnotationRunRow>(&format!(
        "INSERT INTO annotation_runs (public_id, trigger_source, extractor, status) \
         VALUES ($1, $2, $3, 'queued') \
         RETURNING {RUN_COLUMNS}"
    ))
    .bind(public_id)
    .bind(trigger_source)
    .bind(extractor)
    .fetch_one(pool)
    .await?;

    Ok(row)
}

/// Marks a run as `running` and sets `started_at = NOW()`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not `queued`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn start_annotation_run(pool: &PgPool, id: i64) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE annotation_runs \
         SET status = 'running', started_at = NOW() \
         WHERE id = $1 AND status = 'queued'",
    )
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "queued",
        });
    }

    Ok(())
}

/// Marks a run as `succeeded` and records its per-record outcome.
///
/// A pass where some records failed still succeeds; the failures are kept in
/// `records_failed` and `failed_record_ids`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not `running`,
/// [`DbError::InvalidData`] if a count overflows `i32`, or [`DbError::Sqlx`]
/// if the update fails.
pub async fn complete_annotation_run(
    pool: &PgPool,
    id: i64,
    records_succeeded: usize,
    failed_record_ids: &[String],
) -> Result<(), DbError> {
    let succeeded = i32::try_from(records_succeeded)
        .map_err(|_| DbError::InvalidData(format!("succeeded count {records_succeeded}")))?;
    let failed = i32::try_from(failed_record_ids.len())
        .map_err(|_| DbError::InvalidData(format!("failed count {}", failed_record_ids.len())))?;

    let result = sqlx::query(
        "UPDATE annotation_runs \
         SET status = 'succeeded', completed_at = NOW(), \
             records_succeeded = $1, records_failed = $2, failed_record_ids = $3 \
         WHERE id = $4 AND status = 'running'",
    )
    .bind(succeeded)
    .bind(failed)
    .bind(Json(failed_record_ids))
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Marks a run as `failed`, sets `completed_at = NOW()` and `error_message`.
///
/// # Errors
///
/// Returns [`DbError::InvalidRunTransition`] if the run is not `running`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn fail_annotation_run(
    pool: &PgPool,
    id: i64,
    error_message: &str,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE annotation_runs \
         SET status = 'failed', completed_at = NOW(), error_message = $1 \
         WHERE id = $2 AND status = 'running'",
    )
    .bind(error_message)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::InvalidRunTransition {
            id,
            expected_status: "running",
        });
    }

    Ok(())
}

/// Fetches a single run by its internal `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no row exists with the given `id`, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn get_annotation_run(pool: &PgPool, id: i64) -> Result<AnnotationRunRow, DbError> {
    let row = sqlx::query_as::<_, AnnotationRunRow>(&format!(
        "SELECT {RUN_COLUMNS} FROM annotation_runs WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound)?;

    Ok(row)
}

/// Returns the most recent `limit` runs, newest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_annotation_runs(
    pool: &PgPool,
    limit: i64,
) -> Result<Vec<AnnotationRunRow>, DbError> {
    let rows = sqlx::query_as::<_, AnnotationRunRow>(&format!(
        "SELECT {RUN_COLUMNS} FROM annotation_runs \
         ORDER BY created_at DESC, id DESC \
         LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
