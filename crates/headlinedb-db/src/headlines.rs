//! Database operations for the `headlines` table.

use chrono::{DateTime, Utc};
use headlinedb_core::{
    AnnotationResult, EntityFrequency, EntityMention, NewRecord, Record, SentimentLabel,
};
use sqlx::types::Json;
use sqlx::PgPool;

use crate::DbError;

/// Rows per `INSERT ... UNNEST` statement during import.
const INSERT_CHUNK: usize = 1000;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A row from the `headlines` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct HeadlineRow {
    pub id: i64,
    pub record_id: String,
    pub headline: String,
    pub entities: Json<Vec<EntityMention>>,
    pub sentiment_analysis: Option<String>,
    pub annotated_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<HeadlineRow> for Record {
    type Error = DbError;

    fn try_from(row: HeadlineRow) -> Result<Self, Self::Error> {
        let sentiment = match row.sentiment_analysis.as_deref() {
            None => None,
            Some(raw) => Some(SentimentLabel::parse(raw).ok_or_else(|| {
                DbError::InvalidData(format!(
                    "headline {} has sentiment '{raw}'",
                    row.record_id
                ))
            })?),
        };
        Ok(Record {
            seq: row.id,
            record_id: row.record_id,
            text: row.headline,
            entities: row.entities.0,
            sentiment,
        })
    }
}

// ---------------------------------------------------------------------------
// Writes
// ---------------------------------------------------------------------------

/// Bulk-insert raw headlines inside one transaction.
///
/// Rows whose `record_id` already exists (in the table or earlier in the same
/// input) are skipped. Insertion order follows input order, so `id` reflects
/// file order. Returns the number of rows actually inserted.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if any insert fails; nothing is committed then.
pub async fn insert_headlines(pool: &PgPool, rows: &[NewRecord]) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;
    let mut inserted: u64 = 0;

    for chunk in rows.chunks(INSERT_CHUNK) {
        let ids: Vec<&str> = chunk.iter().map(|r| r.record_id.as_str()).collect();
        let texts: Vec<&str> = chunk.iter().map(|r| r.text.as_str()).collect();

        let result = sqlx::query(
            "INSERT INTO headlines (record_id, headline) \
             SELECT r.record_id, r.headline \
             FROM UNNEST($1::text[], $2::text[]) WITH ORDINALITY AS r(record_id, headline, ord) \
             ORDER BY r.ord \
             ON CONFLICT (record_id) DO NOTHING",
        )
        .bind(&ids)
        .bind(&texts)
        .execute(&mut *tx)
        .await?;

        inserted += result.rows_affected();
    }

    tx.commit().await?;
    Ok(inserted)
}

/// Replace a headline's entities and sentiment in a single statement.
///
/// `annotated_at` only moves when the stored annotation actually changes, so
/// re-applying the same result leaves the row untouched.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no headline has `record_id`, or
/// [`DbError::Sqlx`] if the update fails.
pub async fn apply_annotation(
    pool: &PgPool,
    record_id: &str,
    annotation: &AnnotationResult,
) -> Result<(), DbError> {
    let result = sqlx::query(
        "UPDATE headlines \
         SET entities = $1, \
             sentiment_analysis = $2, \
             annotated_at = CASE \
                 WHEN entities = $1 AND sentiment_analysis IS NOT DISTINCT FROM $2 \
                 THEN annotated_at \
                 ELSE NOW() \
             END \
         WHERE record_id = $3",
    )
    .bind(Json(&annotation.entities))
    .bind(annotation.sentiment.as_str())
    .bind(record_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// Up to `limit` headlines with `id > after`, ordered by `id`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_headlines_page(
    pool: &PgPool,
    after: Option<i64>,
    limit: i64,
) -> Result<Vec<HeadlineRow>, DbError> {
    let rows = sqlx::query_as::<_, HeadlineRow>(
        "SELECT id, record_id, headline, entities, sentiment_analysis, annotated_at, created_at \
         FROM headlines \
         WHERE ($1::BIGINT IS NULL OR id > $1) \
         ORDER BY id \
         LIMIT $2",
    )
    .bind(after)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Total number of stored headlines.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn count_headlines(pool: &PgPool) -> Result<i64, DbError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM headlines")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Entity frequencies across all headlines, most frequent first.
///
/// Mentions are unnested from `entities`; those missing a text or type (or
/// with an empty one) are ignored. Ties are broken by surface text and then
/// entity type in byte order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, or
/// [`DbError::InvalidData`] if a count does not fit in `u64`.
pub async fn top_entities(pool: &PgPool, limit: i64) -> Result<Vec<EntityFrequency>, DbError> {
    let rows = sqlx::query_as::<_, (String, String, i64)>(
        "WITH mentions AS ( \
             SELECT m.mention -> 'entity' ->> 'text' AS surface_text, \
                    m.mention -> 'entity' ->> 'type' AS entity_type \
             FROM headlines h \
             CROSS JOIN LATERAL jsonb_array_elements(h.entities) AS m(mention) \
         ) \
         SELECT surface_text, entity_type, COUNT(*) AS frequency \
         FROM mentions \
         WHERE COALESCE(surface_text, '') <> '' \
           AND COALESCE(entity_type, '') <> '' \
         GROUP BY surface_text, entity_type \
         ORDER BY COUNT(*) DESC, surface_text COLLATE \"C\", entity_type COLLATE \"C\" \
         LIMIT $1",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    rows.into_iter()
        .map(|(surface_text, entity_type, frequency)| {
            let frequency = u64::try_from(frequency)
                .map_err(|_| DbError::InvalidData(format!("negative count {frequency}")))?;
            Ok(EntityFrequency {
                surface_text,
                entity_type,
                frequency,
            })
        })
        .collect()
}

/// Text of every headline with a mention whose `text` equals `surface_text`,
/// once per headline, in `id` order.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn headlines_for_entity(
    pool: &PgPool,
    surface_text: &str,
) -> Result<Vec<String>, DbError> {
    let rows = sqlx::query_scalar::<_, String>(
        "SELECT headline \
         FROM headlines \
         WHERE entities @> jsonb_build_array( \
             jsonb_build_object('entity', jsonb_build_object('text', $1::text))) \
         ORDER BY id",
    )
    .bind(surface_text)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(sentiment: Option<&str>) -> HeadlineRow {
        HeadlineRow {
            id: 7,
            record_id: "h-7".to_string(),
            headline: "Apple unveils new phone".to_string(),
            entities: Json(vec![EntityMention::new("Apple", "ORG")]),
            sentiment_analysis: sentiment.map(ToString::to_string),
            annotated_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn row_converts_to_record() {
        let record = Record::try_from(row(Some("Positive"))).unwrap();
        assert_eq!(record.seq, 7);
        assert_eq!(record.record_id, "h-7");
        assert_eq!(record.entities, vec![EntityMention::new("Apple", "ORG")]);
        assert_eq!(record.sentiment, Some(SentimentLabel::Positive));
    }

    #[test]
    fn unannotated_row_has_no_label() {
        let record = Record::try_from(row(None)).unwrap();
        assert!(record.sentiment.is_none());
    }

    #[test]
    fn unknown_label_is_invalid_data() {
        let err = Record::try_from(row(Some("Mixed"))).unwrap_err();
        assert!(matches!(err, DbError::InvalidData(ref m) if m.contains("Mixed")));
    }
}
