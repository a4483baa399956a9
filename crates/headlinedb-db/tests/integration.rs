//! Offline unit tests for headlinedb-db pool configuration and row types.
//! These tests do not require a live database connection.

use headlinedb_core::{AppConfig, EntityMention, Environment};
use headlinedb_db::{AnnotationRunRow, HeadlineRow, PoolConfig};
use sqlx::types::Json;
use std::path::PathBuf;

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        log_level: "info".to_string(),
        gazetteer_path: PathBuf::from("./config/gazetteer.yaml"),
        ner_url: None,
        ner_timeout_secs: 30,
        annotate_page_size: 500,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

/// Compile-time smoke test: confirm that [`AnnotationRunRow`] has all expected
/// fields with the correct types. No database required.
#[test]
fn annotation_run_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = AnnotationRunRow {
        id: 1_i64,
        public_id: Uuid::new_v4(),
        trigger_source: "cli".to_string(),
        status: "queued".to_string(),
        extractor: "gazetteer".to_string(),
        started_at: None,
        completed_at: None,
        records_succeeded: 0_i32,
        records_failed: 0_i32,
        failed_record_ids: Json(Vec::new()),
        error_message: None,
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 1);
    assert_eq!(row.trigger_source, "cli");
    assert_eq!(row.status, "queued");
    assert_eq!(row.extractor, "gazetteer");
    assert!(row.started_at.is_none());
    assert!(row.completed_at.is_none());
    assert!(row.failed_record_ids.0.is_empty());
    assert!(row.error_message.is_none());
}

#[test]
fn headline_row_has_expected_fields() {
    use chrono::Utc;

    let row = HeadlineRow {
        id: 3_i64,
        record_id: "h-3".to_string(),
        headline: "Microsoft and Apple compete".to_string(),
        entities: Json(vec![
            EntityMention::new("Microsoft", "ORG"),
            EntityMention::new("Apple", "ORG"),
        ]),
        sentiment_analysis: None,
        annotated_at: None,
        created_at: Utc::now(),
    };

    assert_eq!(row.id, 3);
    assert_eq!(row.record_id, "h-3");
    assert_eq!(row.entities.0.len(), 2);
    assert!(row.sentiment_analysis.is_none());
}
