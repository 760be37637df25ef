//! # Application Configuration
//!
//! This module defines the configuration structure for the `admitbot-server`
//! and the logic for loading it from an optional `config.yml` file and the
//! process environment. The environment variable names match the ones the
//! service has always been deployed with (`GROQ_API_KEY`, `WHATSAPP_TOKEN`,
//! `NODE_ENV`, ...).

use admitbot::constants::{
    DEFAULT_COMPLETION_API_URL, DEFAULT_COMPLETION_MODEL, DEFAULT_DOCUMENT_PATH,
    DEFAULT_WHATSAPP_API_URL,
};
use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT`.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Deployment environment name reported by the health check. Loaded from `NODE_ENV`.
    #[serde(default = "default_node_env")]
    pub node_env: String,
    /// Path of the pre-extracted policy text. Loaded from `DOCUMENT_PATH`.
    #[serde(default = "default_document_path")]
    pub document_path: String,
    /// Optional directory of static assets (the chat page). Loaded from `STATIC_DIR`.
    #[serde(default)]
    pub static_dir: Option<String>,

    /// API key for the completion endpoint. Loaded from `GROQ_API_KEY`.
    #[serde(default)]
    pub groq_api_key: Option<String>,
    #[serde(default = "default_groq_api_url")]
    pub groq_api_url: String,
    #[serde(default = "default_groq_model")]
    pub groq_model: String,

    /// The shared secret for webhook verification. Loaded from `WHATSAPP_VERIFY_TOKEN`.
    #[serde(default)]
    pub whatsapp_verify_token: Option<String>,
    /// The access token used to send messages. Loaded from `WHATSAPP_TOKEN`.
    #[serde(default)]
    pub whatsapp_token: Option<String>,
    /// The business phone number messages are sent from. Loaded from `WHATSAPP_PHONE_NUMBER_ID`.
    #[serde(default)]
    pub whatsapp_phone_number_id: Option<String>,
    #[serde(default = "default_whatsapp_api_url")]
    pub whatsapp_api_url: String,
}

fn default_port() -> u16 {
    3000
}

fn default_node_env() -> String {
    "development".to_string()
}

fn default_document_path() -> String {
    DEFAULT_DOCUMENT_PATH.to_string()
}

fn default_groq_api_url() -> String {
    DEFAULT_COMPLETION_API_URL.to_string()
}

fn default_groq_model() -> String {
    DEFAULT_COMPLETION_MODEL.to_string()
}

fn default_whatsapp_api_url() -> String {
    DEFAULT_WHATSAPP_API_URL.to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            node_env: default_node_env(),
            document_path: default_document_path(),
            static_dir: None,
            groq_api_key: None,
            groq_api_url: default_groq_api_url(),
            groq_model: default_groq_model(),
            whatsapp_verify_token: None,
            whatsapp_token: None,
            whatsapp_phone_number_id: None,
            whatsapp_api_url: default_whatsapp_api_url(),
        }
    }
}

impl AppConfig {
    /// Treats empty secrets and paths as unset.
    fn normalize(mut self) -> Self {
        for field in [
            &mut self.static_dir,
            &mut self.groq_api_key,
            &mut self.whatsapp_verify_token,
            &mut self.whatsapp_token,
            &mut self.whatsapp_phone_number_id,
        ] {
            if field.as_deref().is_some_and(|v| v.trim().is_empty()) {
                *field = None;
            }
        }
        if self.node_env.trim().is_empty() {
            self.node_env = default_node_env();
        }
        self
    }

    /// Whether both credentials needed to send WhatsApp messages are present.
    pub fn whatsapp_sending_enabled(&self) -> bool {
        self.whatsapp_token.is_some() && self.whatsapp_phone_number_id.is_some()
    }
}

// Helper to read a file, substitute `${VAR}` references from the environment,
// and return its content. Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(format!("Invalid substitution pattern: {e}")))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from a file and environment variables.
///
/// Layers, lowest priority first:
/// - Built-in defaults.
/// - A YAML file: `config_path_override` if given (it must exist), otherwise
///   `config.yml` in the working directory when present.
/// - Environment variables for top-level keys (e.g. `GROQ_API_KEY`, `PORT`).
/// - `ADMITBOT_`-prefixed variables (e.g. `ADMITBOT_GROQ_MODEL`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    let file_content = match config_path_override {
        Some(path) => Some(read_and_substitute(path)?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{path}'."))
        })?),
        None => read_and_substitute("config.yml")?,
    };
    if let Some(content) = file_content {
        info!("Loading configuration file.");
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("ADMITBOT")
                .prefix_separator("_")
                .try_parsing(true),
        )
        .build()?;

    let config: AppConfig = settings.try_deserialize()?;
    Ok(config.normalize())
}
