use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Agent configuration. Every section is optional in the TOML file; omitted
/// keys fall back to the defaults below, and a missing file means all-defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub agent: AgentSection,
    pub collectors: CollectorsConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AgentSection {
    pub interval_secs: u64,
    pub top_processes_limit: usize,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            interval_secs: 5,
            top_processes_limit: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CollectorsConfig {
    pub cpu: bool,
    pub memory: bool,
    pub disk: bool,
    pub network: bool,
}

impl Default for CollectorsConfig {
    fn default() -> Self {
        Self {
            cpu: true,
            memory: true,
            disk: true,
            network: true,
        }
    }
}

/// Upstream endpoint and retry policy. Validated here, consumed by a future
/// transport; the agent itself never ships snapshots over the network.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub retry_attempts: u32,
    pub retry_delay_secs: u64,
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:8000".into(),
            retry_attempts: 3,
            retry_delay_secs: 5,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".into() }
    }
}

impl AgentConfig {
    /// Parse config from an explicit path, the `CONFIG_FILE` env var, or
    /// `hostwatch.toml` in the working directory; defaults when none exists.
    /// Callers apply CLI overrides and then run `validate()` before starting.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => std::env::var("CONFIG_FILE")
                .ok()
                .map(PathBuf::from)
                .or_else(|| {
                    let default = Path::new("hostwatch.toml");
                    default.exists().then(|| default.to_path_buf())
                }),
        };
        match path {
            Some(p) => {
                let s = std::fs::read_to_string(&p)
                    .with_context(|| format!("read config file {}", p.display()))?;
                Ok(toml::from_str(&s)?)
            }
            None => Ok(Self::default()),
        }
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AgentConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.agent.interval_secs > 0,
            "agent.interval_secs must be > 0, got {}",
            self.agent.interval_secs
        );
        anyhow::ensure!(
            self.agent.top_processes_limit > 0,
            "agent.top_processes_limit must be > 0, got {}",
            self.agent.top_processes_limit
        );
        anyhow::ensure!(
            !self.server.url.is_empty(),
            "server.url must be non-empty"
        );
        anyhow::ensure!(
            self.server.timeout_secs > 0,
            "server.timeout_secs must be > 0, got {}",
            self.server.timeout_secs
        );
        anyhow::ensure!(
            !self.logging.level.is_empty(),
            "logging.level must be non-empty"
        );
        Ok(())
    }
}
