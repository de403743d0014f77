use anyhow::{Context, Result};
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://catalogo.fiereparma.it/manifestazione/cibus-2024/";

/// Crawl settings. Sources, later wins: defaults, `expo.toml`, `EXPO_*` env.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub base_url: String,
    /// Stop after this many listing pages even if more exist.
    pub max_pages: Option<usize>,
    pub page_delay_ms: u64,
    pub detail_delay_ms: u64,
    /// Detail pages fetched at once. Output order never depends on it.
    pub concurrency: usize,
    pub max_retries: u32,
    pub backoff_ms: u64,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Settings {
    pub fn load() -> Result<Self> {
        let cfg = defaults()?
            .add_source(File::with_name("expo").required(false))
            .add_source(Environment::with_prefix("EXPO").try_parsing(true))
            .build()
            .context("Failed to read settings")?;
        cfg.try_deserialize().context("Invalid settings")
    }
}

fn defaults() -> Result<ConfigBuilder<DefaultState>> {
    Ok(Config::builder()
        .set_default("base_url", DEFAULT_BASE_URL)?
        .set_default("page_delay_ms", 2000_i64)?
        .set_default("detail_delay_ms", 1000_i64)?
        .set_default("concurrency", 1_i64)?
        .set_default("max_retries", 3_i64)?
        .set_default("backoff_ms", 2000_i64)?
        .set_default("timeout_secs", 30_i64)?
        .set_default("user_agent", concat!("expo_scraper/", env!("CARGO_PKG_VERSION")))?)
}
