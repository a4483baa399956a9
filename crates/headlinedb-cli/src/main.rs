mod annotate;
mod import;
mod query;

use std::path::PathBuf;
use std::time::Instant;

use clap::{Parser, Subcommand};
use headlinedb_core::{AppConfig, DEFAULT_TOP_K};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "headlinedb")]
#[command(about = "Annotate news headlines with entities and sentiment")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database operations
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Import headlines from a CSV file with columns (id, headline)
    Import {
        /// Path to the CSV file
        path: PathBuf,
    },
    /// Extract entities and score sentiment for every stored headline
    Annotate,
    /// Show the most frequent entities across all headlines
    TopEntities {
        /// Number of entities to show
        #[arg(long, default_value_t = DEFAULT_TOP_K)]
        limit: usize,
    },
    /// List headlines mentioning an entity
    Lookup {
        /// Exact entity text (case-sensitive)
        entity: String,
    },
    /// Show recent annotation runs
    Runs {
        /// Maximum number of runs to show
        #[arg(long, default_value = "20")]
        limit: u32,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Check database connectivity
    Ping,
    /// Apply pending migrations
    Migrate,
}

/// Install the fmt subscriber. `RUST_LOG` wins over the configured level;
/// ANSI colours are off in production.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(!config.env.is_production()))
        .init();
}

fn print_elapsed(label: &str, started: Instant) {
    println!(
        "{label} completed in {:.2} seconds.",
        started.elapsed().as_secs_f64()
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let Some(command) = cli.command else {
        println!("headlinedb: no command given; run with --help for usage");
        return Ok(());
    };

    let config = headlinedb_core::load_app_config()?;
    init_tracing(&config);
    tracing::debug!(?config, "configuration loaded");

    let pool = headlinedb_db::connect_pool(
        &config.database_url,
        headlinedb_db::PoolConfig::from_app_config(&config),
    )
    .await?;

    let started = Instant::now();
    match command {
        Commands::Db {
            command: DbCommands::Ping,
        } => {
            headlinedb_db::ping(&pool).await?;
            println!("database ok");
            print_elapsed("Ping", started);
        }
        Commands::Db {
            command: DbCommands::Migrate,
        } => {
            let applied = headlinedb_db::run_migrations(&pool).await?;
            println!("applied {applied} migration(s)");
            print_elapsed("Migration", started);
        }
        Commands::Import { path } => {
            import::run_import(&pool, &path).await?;
            print_elapsed("Import", started);
        }
        Commands::Annotate => {
            annotate::run_annotate(&pool, &config).await?;
            print_elapsed("Annotation", started);
        }
        Commands::TopEntities { limit } => {
            query::run_top_entities(&pool, limit).await?;
            print_elapsed("Query", started);
        }
        Commands::Lookup { entity } => {
            query::run_lookup(&pool, &entity).await?;
            print_elapsed("Lookup", started);
        }
        Commands::Runs { limit } => {
            query::run_list_runs(&pool, i64::from(limit)).await?;
            print_elapsed("Query", started);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
