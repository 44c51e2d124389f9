mod config;
mod coords;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use sunwatch_client::{earliest, RequestLimiter, SunriseClient, SunriseRecord};
use tracing_subscriber::EnvFilter;

use crate::config::{load_cli_config, CliOverrides};
use crate::coords::random_coordinates;

#[derive(Debug, Parser)]
#[command(name = "sunwatch")]
#[command(about = "Find the earliest sunrise across a batch of random coordinates")]
struct Cli {
    /// Number of coordinates to query (overrides `SUNWATCH_BATCH_SIZE`).
    #[arg(long)]
    count: Option<usize>,

    /// Seed for the coordinate generator, for reproducible batches.
    #[arg(long)]
    seed: Option<u64>,

    /// API endpoint (overrides `SUNWATCH_BASE_URL`).
    #[arg(long)]
    base_url: Option<String>,
}

impl Cli {
    fn overrides(&self) -> CliOverrides<'_> {
        CliOverrides {
            count: self.count,
            base_url: self.base_url.as_deref(),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_cli_config(cli.overrides())?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let coordinates = random_coordinates(config.batch_size, &mut rng);
    let out_of_range = coordinates.iter().filter(|c| !c.is_valid()).count();
    if out_of_range > 0 {
        tracing::warn!(out_of_range, "batch contains out-of-range coordinates");
    }
    tracing::debug!(count = config.batch_size, seed = ?cli.seed, "generated coordinates");

    let client = SunriseClient::with_base_url(
        config.request_timeout_secs,
        &config.base_url,
        RequestLimiter::default(),
    )
    .context("failed to build sunrise client")?;

    let records = client
        .run_batch(&coordinates)
        .await
        .context("sunrise batch failed")?;
    let best = earliest(&records).context("no sunrise records to compare")?;
    let origin = records
        .iter()
        .position(|r| std::ptr::eq(r, best))
        .map(|i| coordinates[i]);

    println!("{}", serde_json::to_string_pretty(best)?);
    println!("day length: {}", format_day_length(best));
    if let Some(origin) = origin {
        println!("coordinate: {origin}");
    }

    Ok(())
}

fn format_day_length(record: &SunriseRecord) -> String {
    let secs = record.day_length;
    format!(
        "{secs}s ({}h {}m {}s)",
        secs / 3600,
        (secs % 3600) / 60,
        secs % 60
    )
}
