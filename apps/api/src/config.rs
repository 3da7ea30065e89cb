use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::models::catalog::ModelCatalog;

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
/// Loaded once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub llm_temperature: f32,
    /// Upper bound for a single provider call.
    pub llm_timeout: Duration,
    pub models: ModelCatalog,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let models = match optional("ALLOWED_MODELS") {
            Some(raw) => ModelCatalog::parse(&raw).context("ALLOWED_MODELS is invalid")?,
            None => ModelCatalog::default(),
        };

        let timeout_secs = optional("LLM_TIMEOUT_SECS")
            .map(|v| v.parse::<u64>())
            .transpose()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            bail!("LLM_TIMEOUT_SECS must be greater than zero");
        }

        Ok(Config {
            groq_api_key: optional("GROQ_API_KEY")
                .context("Required environment variable 'GROQ_API_KEY' is not set")?,
            groq_base_url: optional("GROQ_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GROQ_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            llm_temperature: optional("LLM_TEMPERATURE")
                .map(|v| v.parse::<f32>())
                .transpose()
                .context("LLM_TEMPERATURE must be a number")?
                .unwrap_or(0.0),
            llm_timeout: Duration::from_secs(timeout_secs),
            models,
            max_upload_bytes: optional("MAX_UPLOAD_BYTES")
                .map(|v| v.parse::<usize>())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a byte count")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            port: optional("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("groq_api_key", &"<redacted>")
            .field("groq_base_url", &self.groq_base_url)
            .field("llm_temperature", &self.llm_temperature)
            .field("llm_timeout", &self.llm_timeout)
            .field("models", &self.models)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}
