use analytics::{AggregateStats, AnalyticsError};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{Table, presets::UTF8_FULL};
use configuration::{Config, ConfigOverrides};
use core_types::DateRange;
use std::io::Write;
use std::net::IpAddr;
use std::path::PathBuf;
use tracker::{TrackerError, TrackerService};

/// The main entry point for the sales tracker.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = cli.overrides.load()?;
    if let Commands::Serve(args) = &cli.command {
        args.apply(&mut config);
    }
    let _guard = configuration::init_tracing(&config.logging)?;

    match cli.command {
        Commands::Serve(_) => web_server::run_server(&config).await,
        Commands::Migrate => handle_migrate(&config).await,
        Commands::Stats(args) => handle_stats(&config, args).await,
        Commands::Export(args) => handle_export(&config, args).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Records income and expense entries and reports statistics over date ranges.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API.
    Serve(ServeArgs),
    /// Apply pending database migrations.
    Migrate,
    /// Print summary statistics for a date range.
    Stats(RangeArgs),
    /// Write entries as CSV.
    Export(ExportArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Address to bind, overriding `server.host`.
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to bind, overriding `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

impl ServeArgs {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = self.host {
            config.server.host = host;
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
    }
}

#[derive(Parser)]
struct RangeArgs {
    /// First day of the range, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day of the range, inclusive (format: YYYY-MM-DD).
    #[arg(long)]
    to: Option<NaiveDate>,
}

impl RangeArgs {
    fn range(&self) -> Result<DateRange, TrackerError> {
        Ok(DateRange::new(self.from, self.to)?)
    }

    fn is_set(&self) -> bool {
        self.from.is_some() || self.to.is_some()
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportSchema {
    /// The stored fields of each entry.
    Plain,
    /// Each entry followed by the statistics of the whole range.
    Aggregated,
}

#[derive(Parser)]
struct ExportArgs {
    #[arg(long, value_enum, default_value_t = ExportSchema::Aggregated)]
    schema: ExportSchema,

    /// Date range of the aggregated export.
    #[command(flatten)]
    range: RangeArgs,

    /// Sort keys of the plain export, repeated or comma-separated.
    #[arg(long, value_delimiter = ',')]
    sort_by: Vec<String>,

    /// Destination file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn open_service(config: &Config) -> anyhow::Result<TrackerService> {
    let store = database::open_store(&config.database).await?;
    Ok(TrackerService::new(store))
}

async fn handle_migrate(config: &Config) -> anyhow::Result<()> {
    if config.database.in_memory {
        anyhow::bail!("the in-memory store has no migrations to apply");
    }
    let pool = database::connect(&config.database).await?;
    database::run_migrations(&pool).await?;
    println!("Migrations applied.");
    Ok(())
}

async fn handle_stats(config: &Config, args: RangeArgs) -> anyhow::Result<()> {
    let range = args.range()?;
    let service = open_service(config).await?;

    let stats = match service.statistics(&range).await {
        Ok(stats) => stats,
        Err(TrackerError::Analytics(AnalyticsError::NoData)) => {
            println!("No entries in {}.", describe_range(&range));
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec!["Metric", "Value"]);
    for (metric, value) in summary_rows(&range, &stats) {
        table.add_row(vec![metric.to_string(), value]);
    }
    println!("{table}");

    Ok(())
}

async fn handle_export(config: &Config, args: ExportArgs) -> anyhow::Result<()> {
    let csv = match args.schema {
        ExportSchema::Plain => {
            if args.range.is_set() {
                anyhow::bail!("--from/--to apply to the aggregated schema only");
            }
            let service = open_service(config).await?;
            service.export_entries_csv(&args.sort_by).await?
        }
        ExportSchema::Aggregated => {
            if !args.sort_by.is_empty() {
                anyhow::bail!("--sort-by applies to the plain schema only");
            }
            let range = args.range.range()?;
            let service = open_service(config).await?;
            service.export_aggregated_csv(&range).await?
        }
    };

    match &args.out {
        Some(path) => {
            std::fs::write(path, &csv)?;
            tracing::info!(path = %path.display(), bytes = csv.len(), "Export written.");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(&csv)?;
            stdout.flush()?;
        }
    }

    Ok(())
}

/// Rows of the `stats` table. Decimals use the same rendering as the CSV export.
fn summary_rows(range: &DateRange, stats: &AggregateStats) -> Vec<(&'static str, String)> {
    vec![
        ("Range", describe_range(range)),
        ("Entries", stats.count.to_string()),
        ("Net sum", stats.sum.to_string()),
        ("Average", export::format_two_decimals(stats.average)),
        ("Median", export::format_two_decimals(stats.median)),
        ("90th percentile", export::format_two_decimals(stats.percentile_90)),
    ]
}

fn describe_range(range: &DateRange) -> String {
    let bound = |date: Option<NaiveDate>| date.map_or_else(|| "any".to_string(), |d| d.to_string());
    format!("{} to {}", bound(range.from), bound(range.to))
}
