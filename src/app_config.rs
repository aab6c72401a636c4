use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Caption extraction settings
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// HTTP service settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Policy applied when the requested caption language is not available
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LanguageMissingPolicy {
    /// Select the first listed track regardless of its language
    #[default]
    Fallback,
    /// Fail the extraction and report the available languages
    Report,
}

impl LanguageMissingPolicy {
    // @returns: Lowercase policy identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Fallback => "fallback".to_string(),
            Self::Report => "report".to_string(),
        }
    }
}

impl std::fmt::Display for LanguageMissingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for LanguageMissingPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fallback" => Ok(Self::Fallback),
            "report" => Ok(Self::Report),
            _ => Err(anyhow!("Invalid language-missing policy: {}", s)),
        }
    }
}

/// Caption extraction configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ExtractionConfig {
    /// User-Agent header sent with every outbound request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Origin of the video watch pages
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// What to do when the requested language has no track
    #[serde(default)]
    pub on_language_missing: LanguageMissingPolicy,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            on_language_missing: LanguageMissingPolicy::default(),
        }
    }
}

/// HTTP service configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ServerConfig {
    /// Address to bind the listener to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// Socket address string suitable for binding
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

fn default_user_agent() -> String {
    // Watch pages serve different markup to non-browser agents
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_4) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/85.0.4183.83 Safari/537.36".to_string()
}

fn default_endpoint() -> String {
    "https://www.youtube.com".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Config {
    /// Load a configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to open config file: {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        if self.extraction.user_agent.trim().is_empty() {
            return Err(anyhow!("User agent must not be empty"));
        }

        if self.extraction.timeout_secs == 0 {
            return Err(anyhow!("Request timeout must be greater than zero"));
        }

        // Endpoint must be an absolute http(s) URL
        let parsed = url::Url::parse(&self.extraction.endpoint)
            .map_err(|e| anyhow!("Invalid endpoint '{}': {}", self.extraction.endpoint, e))?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => return Err(anyhow!("Unsupported endpoint scheme: {}", other)),
        }

        if self.server.host.trim().is_empty() {
            return Err(anyhow!("Server host must not be empty"));
        }

        Ok(())
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            extraction: ExtractionConfig::default(),
            server: ServerConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
