use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Deployment environment, from `ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Dev,
    Prod,
}

impl AppEnv {
    fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("prod") {
            AppEnv::Prod
        } else {
            AppEnv::Dev
        }
    }

    /// Log level used when `RUST_LOG` is not set.
    pub fn default_log_level(self) -> &'static str {
        match self {
            AppEnv::Dev => "info",
            AppEnv::Prod => "warn",
        }
    }
}

/// Allowed CORS origins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        if raw.is_empty() || raw == "*" {
            return Ok(CorsOrigins::Any);
        }
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if origins.iter().any(|o| o == "*") {
            bail!("CORS_ORIGINS cannot mix '*' with explicit origins");
        }
        Ok(CorsOrigins::List(origins))
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub env: AppEnv,
    pub port: u16,
    pub rust_log: String,
    pub cors_origins: CorsOrigins,
    /// JSON job catalog replacing the built-in postings.
    pub job_catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = AppEnv::parse(&lookup("ENV").unwrap_or_else(|| "dev".to_string()));

        Ok(Config {
            app_name: lookup("APP_NAME").unwrap_or_else(|| "HireSense AI".to_string()),
            env,
            port: lookup("PORT")
                .unwrap_or_else(|| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| env.default_log_level().to_string()),
            cors_origins: CorsOrigins::parse(&lookup("CORS_ORIGINS").unwrap_or_default())?,
            job_catalog_path: lookup("JOB_CATALOG_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
        })
    }
}
