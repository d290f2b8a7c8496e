//! App state: upstream clients, response cache, config.

use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use tracing::warn;

use verselight_cache::{CacheConfig, ResponseCache};
use verselight_clients::{
    EsvClient, EsvConfig, OpenAiClient, OpenAiConfig, YouTubeClient, YouTubeConfig,
};
use verselight_core::constants::{
    DEFAULT_CACHE_TTL, DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_OPENAI_MODEL, DEFAULT_SWEEP_INTERVAL,
};
use verselight_core::error::Result;
use verselight_enrich::Enricher;

/// Server configuration.
///
/// Credentials are optional here; a missing key surfaces as a configuration
/// error on the first request that needs it.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Listen port
    pub port: u16,
    /// Listen address
    pub bind_addr: String,
    /// OpenAI secret key
    pub openai_api_key: Option<String>,
    /// Default completion model
    pub openai_model: String,
    /// OpenAI base URL override
    pub openai_base_url: Option<String>,
    /// ESV API token
    pub esv_api_key: Option<String>,
    /// ESV base URL override
    pub esv_base_url: Option<String>,
    /// YouTube Data API key
    pub youtube_api_key: Option<String>,
    /// YouTube base URL override
    pub youtube_base_url: Option<String>,
    /// Outbound request timeout
    pub http_timeout_secs: u64,
    /// Cache entry lifetime
    pub cache_ttl_secs: u64,
    /// Interval between cache sweeps
    pub cache_sweep_interval_secs: u64,
    /// Prebuilt UI to serve for non-API paths
    pub static_dir: Option<PathBuf>,
    /// Include panic messages in error bodies
    pub diagnostic: bool,
}

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0";

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            bind_addr: DEFAULT_BIND_ADDR.into(),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.into(),
            openai_base_url: None,
            esv_api_key: None,
            esv_base_url: None,
            youtube_api_key: None,
            youtube_base_url: None,
            http_timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            cache_ttl_secs: DEFAULT_CACHE_TTL.as_secs(),
            cache_sweep_interval_secs: DEFAULT_SWEEP_INTERVAL.as_secs(),
            static_dir: None,
            diagnostic: false,
        }
    }
}

/// Non-empty value of an environment variable.
fn env_opt(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Parses an environment variable, falling back to `default` when unset or invalid.
fn env_parse<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match env_opt(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(var = name, value = %raw, fallback = %default, "Ignoring invalid value");
            default
        }),
        None => default,
    }
}

impl ApiConfig {
    /// Loads `.env` (if present) and reads the process environment.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let defaults = Self::default();

        Self {
            port: env_parse("PORT", defaults.port),
            bind_addr: env_opt("BIND_ADDR").unwrap_or(defaults.bind_addr),
            openai_api_key: env_opt("OPENAI_API_KEY"),
            openai_model: env_opt("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_base_url: env_opt("OPENAI_BASE_URL"),
            esv_api_key: env_opt("ESV_API_KEY"),
            esv_base_url: env_opt("ESV_BASE_URL"),
            youtube_api_key: env_opt("YOUTUBE_API_KEY"),
            youtube_base_url: env_opt("YOUTUBE_BASE_URL"),
            http_timeout_secs: env_parse("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs),
            cache_ttl_secs: env_parse("CACHE_TTL_SECS", defaults.cache_ttl_secs),
            cache_sweep_interval_secs: env_parse(
                "CACHE_SWEEP_INTERVAL_SECS",
                defaults.cache_sweep_interval_secs,
            )
            .max(1),
            static_dir: env_opt("STATIC_DIR").map(PathBuf::from),
            diagnostic: env_opt("APP_ENV")
                .map(|v| v.eq_ignore_ascii_case("development"))
                .unwrap_or(false),
        }
    }

    /// Address to listen on.
    pub fn socket_addr(&self) -> std::result::Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.bind_addr.trim().parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            default_ttl_seconds: self.cache_ttl_secs,
            sweep_interval_seconds: self.cache_sweep_interval_secs.max(1),
        }
    }

    fn openai(&self) -> OpenAiConfig {
        let mut config = OpenAiConfig {
            api_key: self.openai_api_key.clone(),
            timeout_seconds: self.http_timeout_secs,
            ..OpenAiConfig::default()
        }
        .with_model(self.openai_model.as_str());
        if let Some(base_url) = &self.openai_base_url {
            config = config.with_base_url(base_url.as_str());
        }
        config
    }

    fn esv(&self) -> EsvConfig {
        let mut config = EsvConfig {
            api_key: self.esv_api_key.clone(),
            timeout_seconds: self.http_timeout_secs,
            ..EsvConfig::default()
        };
        if let Some(base_url) = &self.esv_base_url {
            config = config.with_base_url(base_url.as_str());
        }
        config
    }

    fn youtube(&self) -> YouTubeConfig {
        let mut config = YouTubeConfig {
            api_key: self.youtube_api_key.clone(),
            timeout_seconds: self.http_timeout_secs,
            ..YouTubeConfig::default()
        };
        if let Some(base_url) = &self.youtube_base_url {
            config = config.with_base_url(base_url.as_str());
        }
        config
    }
}

/// Shared handler state.
pub struct AppState {
    /// Configuration the state was built from
    pub config: ApiConfig,
    /// Feature entry points over the shared clients and cache
    pub enricher: Enricher,
}

impl AppState {
    /// Builds the clients and a fresh cache.
    pub fn new(config: ApiConfig) -> Result<Self> {
        let completion = Arc::new(OpenAiClient::with_config(config.openai())?);
        let scripture = Arc::new(EsvClient::with_config(config.esv())?);
        let videos = Arc::new(YouTubeClient::with_config(config.youtube())?);
        let cache = Arc::new(ResponseCache::with_config(config.cache_config()));

        Ok(Self {
            enricher: Enricher::new(completion, scripture, videos, cache),
            config,
        })
    }

    /// The shared response cache.
    pub fn cache(&self) -> &Arc<ResponseCache> {
        self.enricher.cache()
    }
}
