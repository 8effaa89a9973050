//! Configuration loading and representation.
//!
//! Everything comes from environment variables, read once at startup.
//! Unparseable values fall back to their defaults with a warning instead of
//! aborting the process.

use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

use shopadvisor_ai::GeminiConfig;
use shopadvisor_ai::gemini::{DEFAULT_BASE_URL, DEFAULT_MODEL};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_AFFILIATE_TAG: &str = "shopadvisor-21";
/// Hard ceiling on products per response.
pub const MAX_PRODUCTS_CEILING: usize = 5;

/// Which capability implementations the server wires up.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum ServiceMode {
    /// Gemini + Postgres.
    #[default]
    Live,
    /// Canned generator + in-memory demo catalog; no network.
    Stub,
}

impl ServiceMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceMode::Live => "live",
            ServiceMode::Stub => "stub",
        }
    }
}

impl FromStr for ServiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" | "production" | "prod" => Ok(ServiceMode::Live),
            "stub" | "minimal" | "test" => Ok(ServiceMode::Stub),
            other => Err(format!("unknown service mode: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub mode: ServiceMode,
    pub gemini: GeminiConfig,
    pub database_url: Option<String>,
    pub db_connect_timeout: Duration,
    pub affiliate_tag: String,
    /// Products per response, in `1..=MAX_PRODUCTS_CEILING`.
    pub max_products: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            mode: ServiceMode::default(),
            gemini: GeminiConfig::default(),
            database_url: None,
            db_connect_timeout: Duration::from_secs(5),
            affiliate_tag: DEFAULT_AFFILIATE_TAG.to_string(),
            max_products: MAX_PRODUCTS_CEILING,
        }
    }
}

impl AppConfig {
    /// Stub-mode config for tests and local runs.
    pub fn stub() -> Self {
        Self {
            mode: ServiceMode::Stub,
            ..Self::default()
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map instead of the process env).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let mode = parse_or_default(&get, "SERVICE_MODE", ServiceMode::default());
        let gemini_timeout: u64 = parse_or_default(&get, "GEMINI_TIMEOUT_SECS", 30);
        let db_timeout: u64 = parse_or_default(&get, "DB_CONNECT_TIMEOUT_SECS", 5);
        let max_products: usize = parse_or_default(&get, "MAX_PRODUCTS", MAX_PRODUCTS_CEILING);

        Self {
            bind_addr: get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string()),
            mode,
            gemini: GeminiConfig {
                api_key: get("GEMINI_API_KEY"),
                model: get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
                timeout: Duration::from_secs(gemini_timeout),
            },
            database_url: get("DATABASE_URL"),
            db_connect_timeout: Duration::from_secs(db_timeout),
            affiliate_tag: get("AFFILIATE_TAG").unwrap_or_else(|| DEFAULT_AFFILIATE_TAG.to_string()),
            max_products: max_products.clamp(1, MAX_PRODUCTS_CEILING),
        }
    }
}

fn parse_or_default<T, G>(get: &G, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        None => default,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!(key, value = %raw, error = %e, "invalid config value; using default");
            default
        }),
    }
}
