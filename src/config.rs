use std::{env, fmt::Display, str::FromStr, time::Duration};

use tracing::{info, warn};

const DEFAULT_DATASET_URL: &str = "https://onu1.s2.chalmers.se/datasets/IGN_games.csv";

pub struct Config {
    pub port: u16,
    pub redis_url: String,
    pub dataset_url: String,
    pub fetch_timeout: Duration,
    /// Forces a synthetic parse error on row 1 of the dataset. Coverage only.
    pub inject_row_error: bool,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("GAMESTATS_PORT", "8080"),
            redis_url: try_load("REDIS_URL", "redis://127.0.0.1:6379"),
            dataset_url: try_load("DATASET_URL", DEFAULT_DATASET_URL),
            fetch_timeout: Duration::from_secs(try_load("FETCH_TIMEOUT_SECS", "200")),
            inject_row_error: try_load("INJECT_ROW_ERROR", "false"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            redis_url: "redis://127.0.0.1:6379".to_string(),
            dataset_url: DEFAULT_DATASET_URL.to_string(),
            fetch_timeout: Duration::from_secs(200),
            inject_row_error: false,
        }
    }
}

fn var(key: &str) -> Result<String, ()> {
    env::var(key).map_err(|_| {
        warn!("Environment variable {key} not found, using default");
    })
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
