//! `annotate` command handler.

use headlinedb_core::{AnnotationSummary, AppConfig};
use headlinedb_db::PgRecordStore;

/// Run one annotation pass over every stored headline.
///
/// The pass is tracked as an annotation run. Per-record model failures are
/// reported but do not fail the run; a store failure does.
///
/// # Errors
///
/// Returns an error if the extractor cannot be built, the run cannot be
/// created, or the store fails mid-pass.
pub(crate) async fn run_annotate(pool: &sqlx::PgPool, config: &AppConfig) -> anyhow::Result<()> {
    let annotator = headlinedb_nlp::build_annotator(config)?;
    let extractor = annotator.extractor().kind();

    let run = headlinedb_db::create_annotation_run(pool, "cli", extractor).await?;
    if let Err(e) = headlinedb_db::start_annotation_run(pool, run.id).await {
        fail_run_best_effort(pool, run.id, format!("{e:#}")).await;
        return Err(e.into());
    }

    let total = match headlinedb_db::count_headlines(pool).await {
        Ok(total) => total,
        Err(e) => {
            fail_run_best_effort(pool, run.id, format!("{e:#}")).await;
            return Err(e.into());
        }
    };
    tracing::info!(
        run_id = run.id,
        extractor,
        total,
        page_size = annotator.page_size(),
        "annotation pass started"
    );

    let store = PgRecordStore::new(pool.clone());
    let summary = match annotator.run(&store).await {
        Ok(summary) => summary,
        Err(e) => {
            fail_run_best_effort(pool, run.id, e.to_string()).await;
            return Err(e.into());
        }
    };

    let failed_ids: Vec<String> = summary
        .failed_ids()
        .into_iter()
        .map(ToString::to_string)
        .collect();
    if let Err(err) =
        headlinedb_db::complete_annotation_run(pool, run.id, summary.succeeded, &failed_ids).await
    {
        fail_run_best_effort(pool, run.id, format!("{err:#}")).await;
        return Err(err.into());
    }

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &AnnotationSummary) {
    println!(
        "annotated {} headlines: {} succeeded, {} failed",
        summary.processed(),
        summary.succeeded,
        summary.failed()
    );
    for failure in &summary.failures {
        println!("  {failure}");
    }
}

async fn fail_run_best_effort(pool: &sqlx::PgPool, run_id: i64, message: String) {
    if let Err(mark_err) = headlinedb_db::fail_annotation_run(pool, run_id, &message).await {
        tracing::error!(
            run_id,
            error = %mark_err,
            "failed to mark annotation run as failed"
        );
    }
}
