use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use discovery_cli::{
    http::build_client, AddressSource, DiscoveryPipeline, HttpTradeFetcher, LeaderboardDiscovery,
    StaticAddresses,
};
use discovery_core::Config;
use discovery_report::{ReportSummary, ReportWriter};
use std::path::PathBuf;
use tracing::{info, warn};

/// Find Polymarket traders that look like arbitrageurs or market makers.
#[derive(Debug, Parser)]
#[command(name = "trader-discover", version, about)]
struct Cli {
    /// JSON config file; missing sections use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Analyze these addresses instead of scraping the leaderboard
    #[arg(long = "address", value_name = "ADDR")]
    addresses: Vec<String>,

    /// Number of leaderboard addresses to analyze
    #[arg(long)]
    top: Option<usize>,

    /// Trades fetched per address
    #[arg(long)]
    limit: Option<usize>,

    /// Output directory for reports
    #[arg(long)]
    out_dir: Option<String>,

    /// Pause between addresses, in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,
}

impl Cli {
    /// Load configuration and apply command-line overrides.
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(top) = self.top {
            config.discovery.top_n = top;
        }
        if let Some(limit) = self.limit {
            config.fetch.trade_limit = limit;
        }
        if let Some(dir) = &self.out_dir {
            config.output.dir = dir.clone();
        }
        if let Some(delay) = self.delay_ms {
            config.fetch.request_delay_ms = delay;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    info!("trader-discover v{} starting", env!("CARGO_PKG_VERSION"));

    let writer = ReportWriter::from_config(&config.output);
    writer
        .prepare()
        .with_context(|| format!("preparing output directory {}", writer.dir().display()))?;

    let client = build_client(&config.fetch)?;

    let source: Box<dyn AddressSource> = if cli.addresses.is_empty() {
        Box::new(LeaderboardDiscovery::new(client.clone(), &config))
    } else {
        Box::new(StaticAddresses::new(cli.addresses.clone()))
    };
    let addresses = source
        .addresses()
        .await
        .context("address discovery failed")?;
    if addresses.is_empty() {
        warn!("no addresses found, writing empty reports");
    }
    info!(count = addresses.len(), "analyzing addresses");

    let fetcher = HttpTradeFetcher::new(client, &config.fetch);
    let pipeline = DiscoveryPipeline::new(&config);
    let entries = pipeline.run(&addresses, &fetcher).await;

    let paths = writer
        .write(&entries, Utc::now())
        .context("writing reports")?;

    let summary = ReportSummary::from_entries(&entries);
    info!(
        addresses = summary.addresses,
        analyzed = summary.analyzed,
        skipped = summary.skipped,
        flagged = summary.flagged,
        total_trades = summary.total_trades,
        total_round_trips = summary.total_round_trips,
        flagged_ratio = summary.flagged_ratio,
        "run complete"
    );
    for address in ReportSummary::flagged_addresses(&entries) {
        info!(address, "flagged as likely arbitrage / market maker");
    }

    println!("Saved JSON -> {}", paths.json.display());
    println!("Saved CSV  -> {}", paths.csv.display());
    Ok(())
}
