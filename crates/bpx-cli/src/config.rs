/*
[INPUT]:  YAML configuration file, BPX_API_KEY / BPX_API_SECRET environment variables
[OUTPUT]: Parsed CLI configuration and a ready BpxClient
[POS]:    Configuration layer - client setup
[UPDATE]: When adding new configuration options
*/

use anyhow::Context;
use bpx_api_client::{BpxClient, ClientConfig, Credentials};
use serde::{Deserialize, Serialize};

pub const ENV_API_KEY: &str = "BPX_API_KEY";
pub const ENV_API_SECRET: &str = "BPX_API_SECRET";

/// Top-level configuration for the CLI
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    /// Base64 verifying key
    #[serde(default)]
    pub api_key: Option<String>,
    /// Base64 secret (seed, or seed followed by public key)
    #[serde(default)]
    pub api_secret: Option<String>,
    #[serde(default)]
    pub http_url: Option<String>,
    #[serde(default)]
    pub ws_url: Option<String>,
    /// Raise log verbosity to debug
    #[serde(default)]
    pub debug: bool,
}

impl CliConfig {
    /// Load configuration from YAML file
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Environment values win over file values when set and non-empty
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(
            std::env::var(ENV_API_KEY).ok(),
            std::env::var(ENV_API_SECRET).ok(),
        );
    }

    pub fn apply_overrides(&mut self, api_key: Option<String>, api_secret: Option<String>) {
        if let Some(key) = api_key.filter(|value| !value.is_empty()) {
            self.api_key = Some(key);
        }
        if let Some(secret) = api_secret.filter(|value| !value.is_empty()) {
            self.api_secret = Some(secret);
        }
    }

    pub fn client_config(&self) -> ClientConfig {
        let mut config = ClientConfig::default();
        if let Some(http_url) = &self.http_url {
            config.http_url = http_url.clone();
        }
        if let Some(ws_url) = &self.ws_url {
            config.ws_url = ws_url.clone();
        }
        config
    }

    /// Credentials, when both halves of the key pair are present
    pub fn credentials(&self) -> Option<Credentials> {
        match (&self.api_key, &self.api_secret) {
            (Some(key), Some(secret)) => Some(Credentials::new(key.clone(), secret.clone())),
            _ => None,
        }
    }

    pub fn build_client(&self) -> anyhow::Result<BpxClient> {
        let client = match self.credentials() {
            Some(credentials) => BpxClient::with_credentials(self.client_config(), credentials)
                .context("invalid api credentials")?,
            None => BpxClient::with_config(self.client_config()).context("build http client")?,
        };
        Ok(client)
    }
}
