//! Runtime configuration, loaded once from the environment at startup.
//!
//! Values come from `.env` / process environment with in-code defaults.
//! Everything here is immutable after `run()` has built the `AppState`.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// CORS policy applied process-wide to every route.
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allow_credentials: bool,
    pub max_age: usize,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                "http://localhost:3500".to_string(),
                "http://localhost:3501".to_string(),
                "http://127.0.0.1:3500".to_string(),
                "http://127.0.0.1:3501".to_string(),
            ],
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "OPTIONS".to_string(),
            ],
            allow_credentials: true,
            max_age: 3600,
        }
    }
}

impl CorsConfig {
    /// Build from `CORS_ALLOWED_ORIGINS` (comma-separated), falling back to
    /// the default localhost allow-list.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(origins) = env::var("CORS_ALLOWED_ORIGINS") {
            let origins: Vec<String> = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
            if !origins.is_empty() {
                config.allowed_origins = origins;
            }
        }
        config
    }
}

/// Settings for the report pipeline and the HTTP listener.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub bind_host: String,
    pub bind_port: u16,
    /// Upper bound on a single render, enforced around the blocking call.
    pub render_timeout: Duration,
    /// Number of renders allowed in flight at once.
    pub max_concurrent_reports: usize,
    /// Parent directory for per-render scratch directories.
    pub temp_directory: PathBuf,
    /// Directory holding the bundled report templates.
    pub template_directory: PathBuf,
    pub cache_templates: bool,
    /// Opt-in debit/credit reconciliation before rendering.
    pub validate_balance: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            bind_host: "0.0.0.0".to_string(),
            bind_port: 8080,
            render_timeout: Duration::from_millis(30_000),
            max_concurrent_reports: 10,
            temp_directory: env::temp_dir().join("voucher-reports"),
            template_directory: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
            cache_templates: true,
            validate_balance: false,
        }
    }
}

impl ReportConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            bind_host: env::var("SERVER_HOST").unwrap_or(defaults.bind_host),
            bind_port: parse_env("SERVER_PORT", defaults.bind_port)?,
            render_timeout: Duration::from_millis(parse_env(
                "REPORT_TIMEOUT_MS",
                defaults.render_timeout.as_millis() as u64,
            )?),
            max_concurrent_reports: parse_env(
                "REPORT_MAX_CONCURRENT",
                defaults.max_concurrent_reports,
            )?,
            temp_directory: env::var("REPORT_TEMP_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.temp_directory),
            template_directory: env::var("REPORT_TEMPLATE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.template_directory),
            cache_templates: parse_env("REPORT_CACHE_TEMPLATES", defaults.cache_templates)?,
            validate_balance: parse_env("REPORT_VALIDATE_BALANCE", defaults.validate_balance)?,
        })
    }
}

/// Parse an environment variable, keeping the default when the variable is
/// unset and failing loudly when it is set to garbage.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid value for {key}: {raw:?}")),
        Err(_) => Ok(default),
    }
}
