//! Fetch-or-cache dataset loader.

use csv::ReaderBuilder;
use reqwest::Client;
use tracing::{info, warn};

use crate::{
    cache::DatasetCache,
    config::Config,
    error::AppError,
    models::{RawRow, Record, RowSkip},
};

/// Parses the CSV body into records plus an outcome for every dropped row.
/// A bad row never aborts the loop.
pub fn parse_records(body: &str, inject_row_error: bool) -> (Vec<Record>, Vec<RowSkip>) {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut records = Vec::new();
    let mut skips = Vec::new();

    for (row, result) in reader.deserialize::<RawRow>().enumerate() {
        if row == 1 && inject_row_error {
            skips.push(RowSkip::Injected { row });
            continue;
        }

        match result {
            Ok(raw) => match Record::from_raw(row, raw) {
                Ok(record) => records.push(record),
                Err(skip) => skips.push(skip),
            },
            Err(e) => skips.push(RowSkip::Malformed {
                row,
                message: e.to_string(),
            }),
        }
    }

    (records, skips)
}

/// Returns the full record list, reading the cache when a previous load
/// completed and downloading the dataset otherwise.
///
/// An undecodable cached blob degrades to an empty list, which callers render
/// as "no data available". Network errors propagate; there are no retries.
pub async fn get_data_list(
    cache: &dyn DatasetCache,
    http: &Client,
    config: &Config,
) -> Result<Vec<Record>, AppError> {
    if cache.is_complete().await? {
        let blobs = cache.rows().await?;

        let mut records = Vec::with_capacity(blobs.len());
        for blob in &blobs {
            match serde_json::from_slice(blob) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Discarding cached dataset, undecodable entry: {e}");
                    return Ok(Vec::new());
                }
            }
        }

        return Ok(records);
    }

    info!("Dataset not cached, downloading from {}", config.dataset_url);
    let response = http
        .get(&config.dataset_url)
        .timeout(config.fetch_timeout)
        .send()
        .await?;
    let body = response.text().await?;
    info!("Finished downloading dataset");

    let (records, skips) = parse_records(&body, config.inject_row_error);
    for skip in &skips {
        warn!("{skip}");
    }

    // Rows left behind by an interrupted load must not survive the reload.
    cache.clear().await?;
    for record in &records {
        let blob = serde_json::to_vec(record)?;
        cache.push_row(&blob).await?;
    }
    cache.mark_complete().await?;

    info!("Processed {} records, skipped {}", records.len(), skips.len());
    Ok(records)
}
