use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

// Flask served the legacy backend on this port; the viewer default matches.
const DEFAULT_BIND: &str = "127.0.0.1:5000";
const DEFAULT_UPSTREAM: &str = "https://api.nasa.gov/neo/rest/v1";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_upstream")]
    pub upstream_base: String,
    #[serde(default)]
    pub api_key: Option<String>,
}

fn default_bind() -> String {
    DEFAULT_BIND.to_string()
}

fn default_upstream() -> String {
    DEFAULT_UPSTREAM.to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            upstream_base: default_upstream(),
            api_key: None,
        }
    }
}

impl GatewayConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading gateway config {}", path_ref.display()))?;
        let config: GatewayConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing gateway config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Apply CLI overrides, then fall back to `NASA_API_KEY` for the key.
    pub fn with_overrides(mut self, bind: Option<String>, api_key: Option<String>) -> Self {
        if let Some(bind) = bind {
            self.bind = bind;
        }
        if let Some(key) = api_key {
            self.api_key = Some(key);
        }
        if self.api_key.is_none() {
            self.api_key = std::env::var("NASA_API_KEY").ok();
        }
        self
    }

    pub fn bind_address(&self) -> anyhow::Result<SocketAddr> {
        self.bind
            .parse()
            .with_context(|| format!("parsing bind address {}", self.bind))
    }

    /// NeoWs accepts DEMO_KEY with tight rate limits; good enough when no
    /// key is configured.
    pub fn resolved_api_key(&self) -> String {
        self.api_key.clone().unwrap_or_else(|| "DEMO_KEY".to_string())
    }
}
