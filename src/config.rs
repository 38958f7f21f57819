//! Configuration management for the company lookup service.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Required. Credential for the model backend.
//! - `DEFAULT_MODEL` - Optional. The LLM model to use. Defaults to `gpt-3.5-turbo`.
//! - `OPENAI_BASE_URL` - Optional. OpenAI-compatible API base. Defaults to `https://api.openai.com/v1`.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `MAX_ITERATIONS` - Optional. Maximum agent loop iterations per category. Defaults to `8`.
//! - `CATEGORY_TIMEOUT_SECS` - Optional. Time budget for one category lookup. Defaults to `60`.
//! - `MEMORY_WINDOW` - Optional. Prior exchanges replayed to the agent. Defaults to `10`.

use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model backend API key
    pub api_key: String,

    /// LLM model identifier
    pub default_model: String,

    /// Base URL of the OpenAI-compatible backend
    pub api_base: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Maximum iterations for the agent loop of a single category
    pub max_iterations: usize,

    /// Per-category lookup timeout
    pub category_timeout: Duration,

    /// Number of prior exchanges kept in per-request memory
    pub memory_window: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("OPENAI_API_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let default_model = lookup("DEFAULT_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let api_base = lookup("OPENAI_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let port = parse_var(&lookup, "PORT", 8000u16)?;
        let max_iterations = parse_var(&lookup, "MAX_ITERATIONS", 8usize)?;
        if max_iterations == 0 {
            return Err(ConfigError::InvalidValue(
                "MAX_ITERATIONS".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let timeout_secs = parse_var(&lookup, "CATEGORY_TIMEOUT_SECS", 60u64)?;
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "CATEGORY_TIMEOUT_SECS".to_string(),
                "must be at least 1".to_string(),
            ));
        }
        let category_timeout = Duration::from_secs(timeout_secs);
        let memory_window = parse_var(&lookup, "MEMORY_WINDOW", 10usize)?;

        Ok(Self {
            api_key,
            default_model,
            api_base,
            host,
            port,
            max_iterations,
            category_timeout,
            memory_window,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, default_model: String) -> Self {
        Self {
            api_key,
            default_model,
            api_base: DEFAULT_BASE_URL.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8000,
            max_iterations: 8,
            category_timeout: Duration::from_secs(60),
            memory_window: 10,
        }
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), format!("{}", e))),
        None => Ok(default),
    }
}
