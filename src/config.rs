// ABOUTME: Configuration loading for colloquy.
// ABOUTME: Reads ~/.colloquy/config.toml, applies CLI overrides, and locates data dirs.

use std::path::PathBuf;

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub connection: ConnectionConfig,
    pub agent: AgentTarget,
}

/// How to reach the agents service.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Base URL of the service, e.g. "https://myproject.services.example/api".
    pub endpoint: String,
    /// Optional `api-version` query parameter appended to every call.
    pub api_version: Option<String>,
    /// How often to poll a run for completion, in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_version: None,
            poll_interval_ms: 1000,
        }
    }
}

/// Which agent answers the questions.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AgentTarget {
    /// Opaque agent identifier on the service, e.g. "asst_...".
    pub id: String,
}

impl Config {
    /// Load config from ~/.colloquy/config.toml, falling back to defaults.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load config from an explicit path (for testing).
    pub fn load_from(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Check that the fields every remote call needs are present.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.connection.endpoint.trim().is_empty() {
            anyhow::bail!(
                "no service endpoint configured; set [connection] endpoint in {} or pass --endpoint",
                Self::config_path().display()
            );
        }
        if self.agent.id.trim().is_empty() {
            anyhow::bail!(
                "no agent id configured; set [agent] id in {} or pass --agent",
                Self::config_path().display()
            );
        }
        Ok(())
    }

    /// Path to the config file.
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".colloquy")
            .join("config.toml")
    }

    /// Directory for logs and other per-user data.
    pub fn data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("colloquy")
    }

    /// Path to the tracing log file. The TUI owns stderr, so diagnostics
    /// go to a file instead.
    pub fn log_path() -> PathBuf {
        Self::data_dir().join("colloquy.log")
    }
}
