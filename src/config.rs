use anyhow::anyhow;
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};

use tracing::info;

pub const DEFAULT_WORKSPACE: &str = "./data";
pub const DEFAULT_LISTEN: &str = "0.0.0.0:3000";
pub const DEFAULT_BUSY_TIMEOUT_MS: &str = "5000";

#[derive(Debug, Clone)]
pub struct Config {
    pub workspace: PathBuf,
    pub listen: String,
    pub busy_timeout: Duration,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let busy_timeout_ms: u64 = try_load("CHECKIN_BUSY_TIMEOUT_MS", DEFAULT_BUSY_TIMEOUT_MS)?;
        Ok(Self {
            workspace: try_load("CHECKIN_WORKSPACE", DEFAULT_WORKSPACE)?,
            listen: try_load("CHECKIN_LISTEN", DEFAULT_LISTEN)?,
            busy_timeout: Duration::from_millis(busy_timeout_ms),
        })
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> anyhow::Result<T>
where
    T::Err: Display,
{
    let raw = env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e| anyhow!("invalid {key} value {raw:?}: {e}"))
}
