use anyhow::{Context, Result};
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use tracing::{debug, info};

use crate::geo::DEFAULT_GEOCODE_ENDPOINT;

/// Runtime settings, read from the environment
#[derive(Debug, Clone)]
pub struct Config {
    pub listings_path: PathBuf,
    pub services_path: PathBuf,
    pub supabase_url: Option<String>,
    pub supabase_key: Option<String>,
    pub geocode_api_key: Option<String>,
    pub geocode_endpoint: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        Ok(Self {
            listings_path: try_load("NESTFINDER_LISTINGS", "listings.json")?,
            services_path: try_load("NESTFINDER_SERVICES", "services.json")?,
            supabase_url: optional("SUPABASE_URL"),
            supabase_key: optional("SUPABASE_KEY"),
            geocode_api_key: optional("GEOCODE_API_KEY"),
            geocode_endpoint: try_load("GEOCODE_ENDPOINT", DEFAULT_GEOCODE_ENDPOINT)?,
            http_timeout: Duration::from_secs(try_load("HTTP_TIMEOUT_SECS", "30")?),
        })
    }

    /// Supabase credentials, when both halves are configured
    pub fn supabase(&self) -> Option<(&str, &str)> {
        match (&self.supabase_url, &self.supabase_key) {
            (Some(url), Some(key)) => Some((url.as_str(), key.as_str())),
            _ => None,
        }
    }
}

fn optional(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value.trim().to_string()),
        _ => {
            debug!("{key} not set");
            None
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T>
where
    T::Err: Display,
{
    let raw = optional(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });

    raw.parse()
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Invalid {key} value: {raw}"))
}
