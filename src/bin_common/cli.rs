//! CLI utilities for binaries
//!
//! Handles configuration path resolution and command line inputs.

use std::path::PathBuf;

use kalshi::infrastructure::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Market maker configuration (config/kalshi_mm.yaml)
    MarketMaker,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::MarketMaker => DEFAULT_CONFIG_PATH,
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        match self {
            ConfigType::MarketMaker => CONFIG_PATH_ENV,
            ConfigType::Custom(_) => CONFIG_PATH_ENV,
        }
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use kalshi_mm_bot::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::MarketMaker);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    std::env::var(config_type.env_var_name())
        .unwrap_or_else(|_| config_type.default_path().to_string())
        .into()
}

/// Where raw feed frames are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedInput {
    Stdin,
    File(PathBuf),
}

impl FeedInput {
    /// First positional argument, `-` or nothing meaning stdin
    pub fn from_args(args: &[String]) -> Self {
        match args.first().map(String::as_str) {
            None | Some("-") => FeedInput::Stdin,
            Some(path) => FeedInput::File(PathBuf::from(path)),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            FeedInput::Stdin => "stdin".to_string(),
            FeedInput::File(path) => path.display().to_string(),
        }
    }
}

/// Parse command line arguments for a binary
///
/// Returns a vector of arguments (excluding the program name)
pub fn parse_args() -> Vec<String> {
    std::env::args().skip(1).collect()
}
