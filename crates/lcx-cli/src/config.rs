/*
[INPUT]:  Optional YAML configuration file and LCX_* environment variables
[OUTPUT]: Client configuration for the HTTP and WebSocket clients
[POS]:    Configuration layer - credentials and endpoint overrides
[UPDATE]: When adding new configuration options
*/

use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use lcx_adapter::{BaseUrls, ClientConfig, Credentials, Environment};
use serde::{Deserialize, Serialize};

/// Top-level configuration for the lcx command-line client
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CliConfig {
    /// API key; `LCX_API_KEY` takes precedence
    #[serde(default)]
    pub api_key: Option<String>,
    /// Secret key; `LCX_SECRET_KEY` takes precedence
    #[serde(default)]
    pub secret_key: Option<String>,
    #[serde(default)]
    pub environment: Environment,
    /// Replaces the environment's endpoints when set
    #[serde(default)]
    pub base_urls: Option<BaseUrls>,
    /// HTTP request timeout in seconds
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&content).context("parse config yaml")?;
        Ok(config)
    }

    /// Credentials from the file, each value overridden by `env` when present there
    pub fn credentials_with(&self, env: &Credentials) -> Credentials {
        let from_file = Credentials::from_parts(self.api_key.clone(), self.secret_key.clone());
        env.clone().or(from_file)
    }

    /// Build the adapter configuration, reading credentials from the environment
    pub fn client_config(&self) -> ClientConfig {
        self.client_config_with(&Credentials::from_env())
    }

    pub fn client_config_with(&self, env: &Credentials) -> ClientConfig {
        let mut config = ClientConfig::for_environment(self.environment)
            .with_credentials(self.credentials_with(env));
        if let Some(base_urls) = &self.base_urls {
            config = config.with_base_urls(base_urls.clone());
        }
        if let Some(timeout_secs) = self.timeout_secs {
            config.timeout = Duration::from_secs(timeout_secs);
        }
        config
    }
}
