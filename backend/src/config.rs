//! Service configuration file support.
//!
//! Settings are read from a TOML file (`synapse.toml`) where every field has a
//! default, then selected environment variables are layered on top.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [llm]
//! model = "llama-3.3-70b-versatile"
//! api_key_env = "GROQ_API_KEY"
//!
//! [planner]
//! extra_study_keywords = ["flashcards"]
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::llm::OpenAiCompatibleConfig;
use crate::services::horizon::{HorizonWindow, DEFAULT_FLOOR_DAYS, DEFAULT_MAX_DAYS};
use crate::services::tip_correlator::DEFAULT_MAX_TOPICS;

/// Environment variable naming an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "SYNAPSE_CONFIG";

pub const CONFIG_FILE_NAME: &str = "synapse.toml";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid environment override {name}={value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub llm: LlmSettings,
    #[serde(default)]
    pub planner: PlannerSettings,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Maximum accepted request body
    #[serde(default = "default_body_limit")]
    pub body_limit_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            body_limit_bytes: default_body_limit(),
        }
    }
}

/// Generative model endpoint settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    /// Name of the environment variable holding the API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Optional operator preamble for the schedule prompt.
    /// TOML has no null, so `prompt_file = ""` turns it off.
    #[serde(default = "default_prompt_file")]
    pub prompt_file: Option<PathBuf>,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_timeout_secs(),
            prompt_file: default_prompt_file(),
        }
    }
}

/// Pipeline tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerSettings {
    /// Minimum horizon past today, in days
    #[serde(default = "default_horizon_floor_days")]
    pub horizon_floor_days: u32,
    #[serde(default = "default_max_days")]
    pub max_days: usize,
    #[serde(default = "default_max_tip_topics")]
    pub max_tip_topics: usize,
    /// Added to the built-in study keywords
    #[serde(default)]
    pub extra_study_keywords: Vec<String>,
}

impl Default for PlannerSettings {
    fn default() -> Self {
        Self {
            horizon_floor_days: default_horizon_floor_days(),
            max_days: default_max_days(),
            max_tip_topics: default_max_tip_topics(),
            extra_study_keywords: Vec::new(),
        }
    }
}

impl PlannerSettings {
    pub fn horizon(&self) -> HorizonWindow {
        HorizonWindow::new(self.horizon_floor_days, self.max_days)
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_body_limit() -> usize {
    1024 * 1024
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_key_env() -> String {
    "GROQ_API_KEY".to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_prompt_file() -> Option<PathBuf> {
    Some(PathBuf::from("prompt.txt"))
}

fn default_horizon_floor_days() -> u32 {
    DEFAULT_FLOOR_DAYS
}

fn default_max_days() -> usize {
    DEFAULT_MAX_DAYS
}

fn default_max_tip_topics() -> usize {
    DEFAULT_MAX_TOPICS
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Locate a config file.
    ///
    /// `SYNAPSE_CONFIG` wins when set. Otherwise searches for `synapse.toml` in:
    /// 1. Current directory
    /// 2. `backend/` directory
    /// 3. Parent directory
    pub fn default_location() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ]
        .into_iter()
        .find(|path| path.exists())
    }

    /// File (if any) plus environment overrides, validated.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match Self::default_location() {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                Self::from_file(&path)?
            }
            None => {
                tracing::info!("No {} found, using defaults", CONFIG_FILE_NAME);
                Self::default()
            }
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `HOST`, `PORT`, `LLM_BASE_URL` and `LLM_MODEL`.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(host) = non_empty_env("HOST") {
            self.server.host = host;
        }
        if let Some(port) = non_empty_env("PORT") {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                name: "PORT",
                value: port.clone(),
            })?;
        }
        if let Some(base_url) = non_empty_env("LLM_BASE_URL") {
            self.llm.base_url = base_url;
        }
        if let Some(model) = non_empty_env("LLM_MODEL") {
            self.llm.model = model;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.base_url must not be empty".to_string()));
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.model must not be empty".to_string()));
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::Invalid("llm.timeout_secs must be positive".to_string()));
        }
        if self.server.body_limit_bytes == 0 {
            return Err(ConfigError::Invalid(
                "server.body_limit_bytes must be positive".to_string(),
            ));
        }
        Ok(())
    }

    /// `host:port` for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// API key from the configured environment variable. Blank counts as unset.
    pub fn api_key(&self) -> Option<String> {
        non_empty_env(&self.api_key_env)
    }

    /// Transport config for [`crate::llm::OpenAiCompatibleClient`].
    pub fn client_config(&self) -> OpenAiCompatibleConfig {
        OpenAiCompatibleConfig::new(self.api_key(), self.model.clone())
            .with_base_url(self.base_url.clone())
            .with_timeout(self.timeout())
    }

    /// Preamble path, or `None` when unset or blank.
    pub fn prompt_path(&self) -> Option<&Path> {
        self.prompt_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Read the prompt preamble. A missing file is not an error.
    pub fn load_prompt_preamble(&self) -> Result<Option<String>, ConfigError> {
        let Some(path) = self.prompt_path() else {
            return Ok(None);
        };
        match fs::read_to_string(path) {
            Ok(text) if text.trim().is_empty() => Ok(None),
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Prompt file {} not found, skipping", path.display());
                Ok(None)
            }
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
