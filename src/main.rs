use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use yurugp_progress::calculate::{check_dataset, CharacterDetail, RankingView};
use yurugp_progress::config::AppConfig;
use yurugp_progress::models::{CharacterId, Entry, Kind};
use yurugp_progress::storage::{DatasetProvider, JsonlDataset, StorageConfig};

#[derive(Parser)]
#[command(name = "yurugp-progress")]
#[command(about = "Leaderboard and point-progress tracker for the Yuru-chara Grand Prix")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory path (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Bind address
        #[arg(long)]
        host: Option<String>,

        /// Port number
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print a leaderboard page
    Leaderboard {
        /// Kind to rank: "local" or "company"
        #[arg(long)]
        kind: Option<Kind>,

        /// Page number (starting at 1)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Rows per page
        #[arg(long)]
        page_size: Option<usize>,
    },

    /// Print the chart dataset for a leaderboard page as JSON
    Chart {
        #[arg(long)]
        kind: Option<Kind>,

        #[arg(long, default_value = "1")]
        page: usize,

        #[arg(long)]
        page_size: Option<usize>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Show one character's history and standing
    Character { id: String },

    /// Report data irregularities without changing anything
    Validate,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, config_source) = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("Failed to load config {:?}", cli.config))?;
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }
    if let Some(log_level) = cli.log_level {
        config.log_level = log_level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting yurugp-progress v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("{}", config_source);

    let dataset = JsonlDataset::new(StorageConfig::new(config.data_dir.clone()));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = yurugp_progress::api::state::AppState::new(Arc::new(dataset), config);
            let app = yurugp_progress::api::build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Leaderboard {
            kind,
            page,
            page_size,
        } => {
            let kind = kind.unwrap_or(config.ranking.default_kind);
            let page_size = page_size.unwrap_or(config.ranking.page_size);
            let entries = dataset.fetch_all()?;
            let view = RankingView::build(&entries, kind, page, page_size)?;

            println!(
                "\n=== {} ({}) page {}/{} ===",
                view.kind_label,
                kind,
                view.pagination.page_number,
                view.pagination.page_count.max(1)
            );
            println!(
                "{:>6}  {:<30} {:>12} {:>10} {:>10}",
                "Rank", "Name", "Total Points", "+ Points", "Behind"
            );
            for row in &view.rows {
                let behind = row
                    .behind
                    .map(|b| b.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!(
                    "{:>6}  {:<30} {:>12} {:>10} {:>10}",
                    row.rank, row.name, row.point, row.point_delta, behind
                );
            }
            if view.rows.is_empty() {
                println!("(no characters on this page)");
            }
            println!("\n{} characters in total", view.pagination.count);
        }
        Commands::Chart {
            kind,
            page,
            page_size,
            pretty,
        } => {
            let kind = kind.unwrap_or(config.ranking.default_kind);
            let page_size = page_size.unwrap_or(config.ranking.page_size);
            let entries = dataset.fetch_all()?;
            let view = RankingView::build(&entries, kind, page, page_size)?;

            let json = if pretty {
                serde_json::to_string_pretty(&view.chart)?
            } else {
                serde_json::to_string(&view.chart)?
            };
            println!("{}", json);
        }
        Commands::Character { id } => {
            let entries = dataset.fetch_all()?;
            let detail = find_character(&entries, &CharacterId::from(id))?;

            println!("\n=== {} ({}) ===", detail.name, detail.kind_label);
            println!("Rank:         {}", detail.metrics.rank);
            println!("Total points: {}", detail.metrics.point);
            println!("+ Points:     {}", detail.metrics.point_delta);
            match detail.metrics.gap_to_above {
                Some(gap) => println!("Behind:       {}", gap),
                None => println!("Behind:       -"),
            }
            println!("\n{:<12} {:>6} {:>12}", "Date", "Rank", "Points");
            for record in &detail.records {
                println!(
                    "{:<12} {:>6} {:>12}",
                    record.date.to_string(),
                    record.rank,
                    record.point
                );
            }
        }
        Commands::Validate => {
            let entries = dataset.read_raw()?;
            let issues = check_dataset(&entries);

            println!("\n=== Dataset Validation ===");
            println!("Characters:   {}", entries.len());
            println!("Issues:       {}", issues.len());
            for issue in &issues {
                println!("  - {}", issue);
            }
            if issues.is_empty() {
                println!("\nNo irregularities found.");
            }
        }
    }

    Ok(())
}

fn find_character(entries: &[Entry], id: &CharacterId) -> Result<CharacterDetail> {
    match CharacterDetail::build(entries, id) {
        Some(detail) => Ok(detail),
        None => anyhow::bail!("Character not found: {}", id),
    }
}
