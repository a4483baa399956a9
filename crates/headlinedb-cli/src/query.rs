//! Read-only query handlers.

use headlinedb_core::{Aggregator, EntityFrequency};
use headlinedb_db::{AnnotationRunRow, PgRecordStore};

/// Print the `limit` most frequent entities.
///
/// # Errors
///
/// Returns an error if `limit` is zero or the query fails.
pub(crate) async fn run_top_entities(pool: &sqlx::PgPool, limit: usize) -> anyhow::Result<()> {
    let store = PgRecordStore::new(pool.clone());
    let top = Aggregator::new(&store).top_entities(limit).await?;

    for line in format_top(&top) {
        println!("{line}");
    }
    Ok(())
}

/// Print every headline that mentions `entity`, numbered from 1.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_lookup(pool: &sqlx::PgPool, entity: &str) -> anyhow::Result<()> {
    let store = PgRecordStore::new(pool.clone());
    let headlines = Aggregator::new(&store).headlines_for(entity).await?;

    for line in format_lookup(entity, &headlines) {
        println!("{line}");
    }
    Ok(())
}

/// Show the most recent annotation runs.
///
/// # Errors
///
/// Returns an error if the query fails.
pub(crate) async fn run_list_runs(pool: &sqlx::PgPool, limit: i64) -> anyhow::Result<()> {
    let runs = headlinedb_db::list_annotation_runs(pool, limit).await?;

    if runs.is_empty() {
        println!("no annotation runs found; run `annotate` first");
        return Ok(());
    }

    println!(
        "{:<8}{:<12}{:<12}{:<18}{:<11}{:<8}ERROR",
        "ID", "STATUS", "EXTRACTOR", "STARTED", "SUCCEEDED", "FAILED"
    );
    for run in &runs {
        println!("{}", format_run(run));
    }
    Ok(())
}

fn format_top(top: &[EntityFrequency]) -> Vec<String> {
    top.iter().map(format_frequency).collect()
}

fn format_frequency(entry: &EntityFrequency) -> String {
    format!(
        "Entity: {}, Type: {}, Frequency: {}",
        entry.surface_text, entry.entity_type, entry.frequency
    )
}

fn format_lookup(entity: &str, headlines: &[String]) -> Vec<String> {
    if headlines.is_empty() {
        return vec![format!("No headlines found for entity: {entity}")];
    }
    headlines
        .iter()
        .enumerate()
        .map(|(i, headline)| format!("{}. {headline}", i + 1))
        .collect()
}

fn format_run(run: &AnnotationRunRow) -> String {
    let started = run.started_at.map_or_else(
        || "\u{2014}".to_string(),
        |t| t.format("%Y-%m-%d %H:%M").to_string(),
    );
    format!(
        "{:<8}{:<12}{:<12}{:<18}{:<11}{:<8}{}",
        run.id,
        run.status,
        run.extractor,
        started,
        run.records_succeeded,
        run.records_failed,
        run.error_message.as_deref().unwrap_or("")
    )
}
