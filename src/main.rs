use anyhow::{Context, Result};
use reqwest::Client;
use rostercal::{config::Config, export::IcsWriter, fetch, process};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,rostercal=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    // ─── 2) load configuration ───────────────────────────────────────
    let cfg_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "rostercal.yaml".to_string());
    let cfg = Config::load(&cfg_path)?;
    info!(player = %cfg.player_name, sheet = %cfg.sheet_name, year = cfg.year, "configured");

    // ─── 3) fetch the sheet ──────────────────────────────────────────
    let client = Client::new();
    let grid = fetch::fetch_grid(&client, &cfg).await?;
    info!(rows = grid.height(), "fetched grid");

    // ─── 4) normalize into events ────────────────────────────────────
    let events = process::normalize_schedule(&grid, &cfg).context("normalizing schedule")?;
    info!(events = events.len(), "normalized events");

    // ─── 5) export ───────────────────────────────────────────────────
    let out_path = cfg.output_path();
    IcsWriter::new(&cfg.calendar_name).write_to(&events, &out_path)?;
    info!(path = %out_path, "all done");
    Ok(())
}
