// src/fetch/mod.rs

use anyhow::{anyhow, Context, Result};
use calamine::{Data, Range, Reader, Xlsx};
use reqwest::Client;
use std::{io::Cursor, time::Duration};
use tokio::time::sleep;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::Config;
use crate::grid::RawGrid;

const MAX_RETRIES: u32 = 3;
const INITIAL_BACKOFF_MS: u64 = 500;

/// Download the configured sheet's xlsx export and decode the named
/// worksheet into a RawGrid.
#[instrument(level = "info", skip(client, cfg), fields(sheet = %cfg.sheet_name))]
pub async fn fetch_grid(client: &Client, cfg: &Config) -> Result<RawGrid> {
    let url = cfg.export_url()?;
    let bytes = get_bytes_with_retry(client, &url, MAX_RETRIES, INITIAL_BACKOFF_MS).await?;
    debug!(len = bytes.len(), "downloaded workbook");
    decode_worksheet(&bytes, &cfg.sheet_name)
}

async fn get_bytes_core(client: &Client, url: &Url) -> Result<Vec<u8>> {
    Ok(client
        .get(url.clone())
        .send()
        .await
        .with_context(|| format!("GET {} failed", url))?
        .error_for_status()
        .with_context(|| format!("Non-success status from {}", url))?
        .bytes()
        .await
        .with_context(|| format!("Reading body from {}", url))?
        .to_vec())
}

async fn get_bytes_with_retry(
    client: &Client,
    url: &Url,
    max_retries: u32,
    initial_backoff_ms: u64,
) -> Result<Vec<u8>> {
    let mut attempts = 0;
    loop {
        match get_bytes_core(client, url).await {
            Ok(b) => return Ok(b),
            Err(e) if attempts < max_retries => {
                attempts += 1;
                let backoff = initial_backoff_ms * 2u64.pow(attempts - 1);
                warn!(%url, attempt = attempts, delay_ms = backoff, error = %e, "Retrying");
                sleep(Duration::from_millis(backoff)).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// Decode one worksheet out of an in-memory xlsx workbook.
pub fn decode_worksheet(bytes: &[u8], sheet_name: &str) -> Result<RawGrid> {
    let mut workbook: Xlsx<_> =
        Xlsx::new(Cursor::new(bytes)).context("opening workbook from downloaded bytes")?;
    let range: Range<Data> = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| anyhow!("reading worksheet {:?}: {}", sheet_name, e))?;

    // worksheet_range starts at the first used cell; re-anchor at A1 so row
    // and column indices line up with the layout config.
    let (row_off, col_off) = range.start().unwrap_or((0, 0));
    let height = row_off as usize + range.height();
    let width = col_off as usize + range.width();

    let mut rows = vec![vec![None; width]; height];
    for (r, c, cell) in range.used_cells() {
        rows[r + row_off as usize][c + col_off as usize] = cell_text(cell);
    }
    Ok(RawGrid::new(rows))
}

/// Collapse a calamine cell into the free text the normalizer works on.
fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Data::Float(f) => {
            // whole numbers come back as floats; drop the ".0"
            if f.fract() == 0.0 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}
