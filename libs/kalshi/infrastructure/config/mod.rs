//! Market maker configuration
//!
//! Loaded from YAML, with `.env` / environment overrides for the ticker list.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Environment variable selecting the config file
pub const CONFIG_PATH_ENV: &str = "KALSHI_MM_CONFIG";
/// Environment variable overriding the ticker list (comma separated)
pub const TICKERS_ENV: &str = "KALSHI_MM_TICKERS";
pub const DEFAULT_CONFIG_PATH: &str = "config/kalshi_mm.yaml";

const VALID_LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// Avellaneda-Stoikov calibration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteModelConfig {
    /// Risk aversion
    pub gamma: f64,
    /// Order arrival decay
    pub k: f64,
    /// Volatility per second, in cents
    pub sigma: f64,
    /// Time horizon (tau) in seconds
    pub horizon_secs: f64,
}

impl Default for QuoteModelConfig {
    fn default() -> Self {
        Self {
            gamma: 0.1,
            k: 0.5,
            sigma: 1.0,
            horizon_secs: 1.0,
        }
    }
}

/// What happens to queued events when the engine is stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShutdownPolicy {
    /// Process everything enqueued before the stop request
    #[default]
    Drain,
    /// Finish the in-flight event and discard the rest
    Immediate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub shutdown_policy: ShutdownPolicy,
    /// Name of the consumer thread
    pub thread_name: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            shutdown_policy: ShutdownPolicy::Drain,
            thread_name: "kalshi-engine".to_string(),
        }
    }
}

// =============================================================================
// MarketMakerConfig
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketMakerConfig {
    /// Instruments to keep ledgers and quotes for
    pub tickers: Vec<String>,
    #[serde(default)]
    pub quote_model: QuoteModelConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for MarketMakerConfig {
    fn default() -> Self {
        Self {
            tickers: Vec::new(),
            quote_model: QuoteModelConfig::default(),
            engine: EngineConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl MarketMakerConfig {
    /// Load configuration from YAML file and .env
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml_str(&yaml_content)?;

        // Don't fail if .env doesn't exist
        dotenv::dotenv().ok();

        if let Ok(raw) = std::env::var(TICKERS_ENV) {
            info!("Overriding tickers from {}", TICKERS_ENV);
            config.tickers = parse_ticker_list(&raw);
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse without touching the environment or validating
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.tickers.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one ticker is required".to_string(),
            ));
        }
        if self.tickers.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::ValidationError(
                "tickers cannot be empty strings".to_string(),
            ));
        }

        let qm = &self.quote_model;
        for (name, value) in [
            ("gamma", qm.gamma),
            ("k", qm.k),
            ("sigma", qm.sigma),
            ("horizon_secs", qm.horizon_secs),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::ValidationError(format!(
                    "quote_model.{} must be finite",
                    name
                )));
            }
        }
        if qm.gamma < 0.0 {
            return Err(ConfigError::ValidationError(
                "quote_model.gamma must be >= 0".to_string(),
            ));
        }
        if qm.k <= 0.0 {
            return Err(ConfigError::ValidationError(
                "quote_model.k must be greater than 0".to_string(),
            ));
        }
        if qm.sigma < 0.0 {
            return Err(ConfigError::ValidationError(
                "quote_model.sigma must be >= 0".to_string(),
            ));
        }
        if qm.horizon_secs < 0.0 {
            return Err(ConfigError::ValidationError(
                "quote_model.horizon_secs must be >= 0".to_string(),
            ));
        }

        if self.engine.thread_name.is_empty() {
            return Err(ConfigError::ValidationError(
                "engine.thread_name cannot be empty".to_string(),
            ));
        }

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    pub fn with_tickers<I, S>(mut self, tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tickers = tickers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_quote_model(mut self, quote_model: QuoteModelConfig) -> Self {
        self.quote_model = quote_model;
        self
    }

    pub fn with_shutdown_policy(mut self, policy: ShutdownPolicy) -> Self {
        self.engine.shutdown_policy = policy;
        self
    }

    pub fn with_thread_name(mut self, name: impl Into<String>) -> Self {
        self.engine.thread_name = name.into();
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Tickers: {}", self.tickers.join(", "));
        info!(
            "  Quote model: gamma={} k={} sigma={} horizon={}s",
            self.quote_model.gamma, self.quote_model.k, self.quote_model.sigma, self.quote_model.horizon_secs
        );
        info!("  Shutdown policy: {:?}", self.engine.shutdown_policy);
        info!("  Log level: {}", self.log_level);
    }
}

/// Split a comma separated ticker list, dropping blanks
pub fn parse_ticker_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
