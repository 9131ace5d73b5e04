use crate::services::providers::gemini::{GeminiConfig, GEMINI_API_BASE};
use secrecy::Secret;
use serde::Deserialize;
use service_core::config::{self as core_config, get_env, get_env_opt};
use service_core::error::AppError;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone, Deserialize)]
pub struct HealthbotConfig {
    #[serde(flatten)]
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub server: ServerSettings,
    pub observability: ObservabilitySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Directory served under `/static`.
    pub static_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilitySettings {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl HealthbotConfig {
    /// Load configuration from the environment (and `.env`).
    ///
    /// `GEMINI_API_KEY` is the only required setting.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;

        Ok(HealthbotConfig {
            common: common_config,
            gemini: GeminiSettings {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None)?),
                model: get_env("GEMINI_MODEL", Some(DEFAULT_MODEL))?,
                base_url: get_env("GEMINI_API_BASE", Some(GEMINI_API_BASE))?,
                timeout_secs: parse_timeout(get_env_opt("GEMINI_TIMEOUT_SECS").as_deref())?,
            },
            server: ServerSettings {
                static_dir: get_env("STATIC_DIR", Some("static"))?,
            },
            observability: ObservabilitySettings {
                log_level: get_env("LOG_LEVEL", Some("info"))?,
                otlp_endpoint: get_env_opt("OTLP_ENDPOINT"),
            },
        })
    }

    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfig {
            api_key: self.gemini.api_key.clone(),
            model: self.gemini.model.clone(),
            base_url: self.gemini.base_url.clone(),
            timeout: Duration::from_secs(self.gemini.timeout_secs),
        }
    }
}

fn parse_timeout(value: Option<&str>) -> Result<u64, AppError> {
    match value {
        None => Ok(DEFAULT_TIMEOUT_SECS),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or_else(|| {
                AppError::ConfigError(anyhow::anyhow!(
                    "GEMINI_TIMEOUT_SECS must be a positive integer, got '{}'",
                    raw
                ))
            }),
    }
}
