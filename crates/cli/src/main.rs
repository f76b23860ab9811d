use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use healthstat_core::{StoreConfig, StoreTarget};
use healthstat_storage::StorageBackend;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "healthstat")]
#[command(about = "Load and query public-health observations", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    store: StoreArgs,
    #[command(subcommand)]
    command: Commands,
}

/// Where the observations live. Flags win over `DATABASE_URL` and
/// `HEALTHSTAT_DB_PATH`.
#[derive(Args)]
struct StoreArgs {
    /// PostgreSQL URL (`postgres://...`) or SQLite path; takes precedence over --db-path
    #[arg(long, global = true)]
    database_url: Option<String>,
    /// SQLite database file
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
}

#[derive(Args)]
pub(crate) struct FilterArgs {
    #[arg(short, long)]
    pub(crate) disease: Option<String>,
    #[arg(short, long)]
    pub(crate) indicator: Option<String>,
    #[arg(short, long)]
    pub(crate) year: Option<String>,
    #[arg(short, long)]
    pub(crate) region: Option<String>,
}

#[derive(Args)]
pub(crate) struct PairArgs {
    #[arg(short, long)]
    pub(crate) disease: String,
    #[arg(short, long)]
    pub(crate) indicator: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Bulk-load a CSV dataset, then ensure the lookup index
    Load {
        path: PathBuf,
        /// Delete existing observations before loading
        #[arg(long)]
        replace: bool,
        /// Rows per insert batch (default from HEALTHSTAT_LOAD_BATCH_SIZE or 500)
        #[arg(long)]
        batch_size: Option<usize>,
    },
    /// Create the composite (disease, indicator, year) index if missing
    EnsureIndex,
    /// List observations matching a filter
    Query {
        #[command(flatten)]
        filter: FilterArgs,
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Summary statistics for a (disease, indicator) pair
    Stats {
        #[command(flatten)]
        pair: PairArgs,
    },
    /// Summary statistics per year for a (disease, indicator) pair
    StatsByYear {
        #[command(flatten)]
        pair: PairArgs,
    },
    /// Serve the read-only HTTP API
    Serve {
        #[arg(short, long, default_value = "8000")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
}

impl StoreArgs {
    fn config(&self) -> StoreConfig {
        let mut config = StoreConfig::from_env();
        if let Some(url) = self.database_url.as_deref().filter(|u| !u.trim().is_empty()) {
            config.target = StoreTarget::from_url(url);
        } else if let Some(path) = &self.db_path {
            config.target = StoreTarget::Sqlite(path.clone());
        }
        config
    }

    async fn open(&self) -> Result<Arc<StorageBackend>> {
        let config = self.config();
        let backend = StorageBackend::from_config(&config).await?;
        tracing::debug!(backend = backend.kind(), "store opened");
        Ok(Arc::new(backend))
    }
}

pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let storage = cli.store.open().await?;

    match cli.command {
        Commands::Load { path, replace, batch_size } => {
            commands::load::run_load(storage, &path, replace, batch_size).await?;
        },
        Commands::EnsureIndex => commands::load::run_ensure_index(storage).await?,
        Commands::Query { filter, limit } => {
            commands::query::run_query(storage, &filter, limit).await?;
        },
        Commands::Stats { pair } => commands::query::run_stats(storage, &pair).await?,
        Commands::StatsByYear { pair } => {
            commands::query::run_stats_by_year(storage, &pair).await?;
        },
        Commands::Serve { port, host } => commands::serve::run(storage, port, host).await?,
    }

    Ok(())
}
