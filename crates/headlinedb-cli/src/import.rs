//! `import` command handler.

use std::path::Path;

use headlinedb_core::{read_headlines_csv, RecordStore};
use headlinedb_db::PgRecordStore;

/// Read a headline CSV and insert every row whose id is not already stored.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or the insert fails.
/// Nothing is written when the file is malformed.
pub(crate) async fn run_import(pool: &sqlx::PgPool, path: &Path) -> anyhow::Result<()> {
    let records = read_headlines_csv(path)?;
    tracing::info!(path = %path.display(), rows = records.len(), "read headline csv");

    let store = PgRecordStore::new(pool.clone());
    let outcome = store.insert_records(&records).await?;

    if outcome.skipped > 0 {
        tracing::warn!(
            skipped = outcome.skipped,
            "skipped rows whose id was already stored"
        );
    }

    println!(
        "imported {} headlines ({} skipped as duplicates)",
        outcome.inserted, outcome.skipped
    );
    Ok(())
}
