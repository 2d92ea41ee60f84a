use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use crate::services::dataset::types::DEFAULT_PAGE_SIZE;

fn default_max_file_size() -> usize {
    // 10 MB in bytes
    10 * 1024 * 1024
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub max_file_size: usize,
    pub preview_page_size: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            max_file_size: default_max_file_size(),
            preview_page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    pub fn new() -> Result<Self> {
        // Load .env file first
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();

        let host = match lookup("HOST") {
            Some(raw) => raw
                .trim()
                .parse::<IpAddr>()
                .with_context(|| format!("Invalid HOST: {}", raw))?,
            None => defaults.host,
        };
        let port = parse_or("PORT", &lookup, defaults.port)?;
        let max_file_size = parse_or("MAX_FILE_SIZE", &lookup, defaults.max_file_size)?;
        let preview_page_size = parse_or("PREVIEW_PAGE_SIZE", &lookup, defaults.preview_page_size)?;
        if preview_page_size == 0 {
            anyhow::bail!("PREVIEW_PAGE_SIZE must be greater than zero");
        }

        Ok(Config {
            host,
            port,
            max_file_size,
            preview_page_size,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", key, raw)),
        None => Ok(default),
    }
}

pub fn load_config() -> Result<Config> {
    let config = Config::new()?;
    tracing::info!(
        "Loaded configuration: addr={}, max_file_size={}B, preview_page_size={}",
        config.addr(),
        config.max_file_size,
        config.preview_page_size
    );
    Ok(config)
}
