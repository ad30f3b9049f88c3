use anyhow::Context;
use clap::{Parser, ValueEnum};
use framing_summary::application::report::{build_report, render_table, write_csv, write_json};
use framing_summary::config::{Config, Mode};
use framing_summary::domain::dates::{format_for_display, parse_date};
use framing_summary::domain::metrics::Metric;
use framing_summary::domain::ports::StatsService;
use framing_summary::infrastructure::ServiceFactory;
use framing_summary::infrastructure::plot_decoder::decode_rgba;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use url::Url;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Prints the graded framing cohort for one date.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Game date (YYYY-MM-DD). Defaults to INITIAL_DATE or yesterday.
    #[arg(short, long)]
    date: Option<String>,

    /// Use the built-in sample cohort instead of the stats service
    #[arg(long)]
    mock: bool,

    /// Override STATS_API_BASE_URL
    #[arg(long)]
    base_url: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Order rows best first on this metric, e.g. net_impact
    #[arg(short, long)]
    sort: Option<Metric>,

    /// Only probe the service health endpoint
    #[arg(long)]
    health: bool,

    /// Fetch the gameday plot for this catcher id instead of the cohort
    #[arg(long, requires = "game")]
    plot: Option<i64>,

    /// Game id for --plot
    #[arg(long)]
    game: Option<i64>,

    /// Where to write the plot PNG
    #[arg(short, long, default_value = "plot.png")]
    out: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so report output can be piped
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load config")?;
    if cli.mock {
        config.mode = Mode::Mock;
    }
    if let Some(base_url) = &cli.base_url {
        config.api_base_url =
            Url::parse(base_url).with_context(|| format!("Invalid --base-url '{}'", base_url))?;
    }

    let (stats, _) = ServiceFactory::create_services(&config);

    if cli.health {
        return probe_health(stats).await;
    }

    let date = match &cli.date {
        Some(d) => parse_date(d)?,
        None => config.initial_date,
    };

    if let (Some(catcher_id), Some(game_pk)) = (cli.plot, cli.game) {
        let plot = stats
            .fetch_plot(catcher_id, game_pk, date)
            .await
            .with_context(|| format!("Failed to generate plot for catcher {}", catcher_id))?;
        let image = decode_rgba(&plot.bytes)?;
        std::fs::write(&cli.out, &plot.bytes)
            .with_context(|| format!("Failed to write {}", cli.out.display()))?;
        println!(
            "Wrote {}x{} {} plot to {}",
            image.width,
            image.height,
            plot.mime,
            cli.out.display()
        );
        return Ok(());
    }

    info!("Fetching cohort for {}", date);
    let catchers = stats
        .fetch_catchers(date)
        .await
        .with_context(|| format!("Failed to fetch catchers for {}", date))?;

    if catchers.is_empty() {
        eprintln!("No catcher data found for {}.", format_for_display(date));
        return Ok(());
    }

    let rows = build_report(&catchers, cli.sort);
    let stdout = std::io::stdout();

    match cli.format {
        OutputFormat::Table => {
            let mut out = stdout.lock();
            writeln!(out, "Catchers - {}", format_for_display(date))?;
            writeln!(out, "{} catchers with called pitch data\n", rows.len())?;
            write!(out, "{}", render_table(&rows))?;
        }
        OutputFormat::Json => {
            write_json(&rows, stdout.lock())?;
            println!();
        }
        OutputFormat::Csv => write_csv(&rows, stdout.lock())?,
    }

    Ok(())
}

async fn probe_health(stats: Arc<dyn StatsService>) -> anyhow::Result<()> {
    let health = stats.health().await.context("Health check failed")?;
    match &health.timestamp {
        Some(ts) => println!("status: {} ({})", health.status, ts),
        None => println!("status: {}", health.status),
    }
    if !health.is_ok() {
        anyhow::bail!("Stats service reported status '{}'", health.status);
    }
    Ok(())
}
