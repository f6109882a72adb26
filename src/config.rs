//! Configuration: controller address and credentials.
//!
//! Loaded from a YAML file with `FABRICHECK_`-prefixed environment
//! variables layered on top, so credentials can stay out of the file in
//! automation (`FABRICHECK_APIC__PASSWORD=...`, `__` separates nesting).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub apic: ApicConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApicConfig {
    /// Base URL of the controller, e.g. `https://apic.example.com`.
    pub host: String,
    pub username: String,
    pub password: String,
    /// Verify the controller's TLS certificate. Off by default: lab APICs
    /// ship self-signed certificates.
    #[serde(default)]
    pub verify_tls: bool,
}

/// Resolve the config file path: explicit flag, then `./config.yaml`,
/// then `~/.config/fabricheck/config.yaml`.
pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    if local.exists() {
        return local;
    }
    dirs::config_dir()
        .map(|dir| dir.join("fabricheck").join(DEFAULT_CONFIG_FILE))
        .unwrap_or(local)
}

pub fn load(path: &Path) -> Result<Config> {
    Figment::new()
        .merge(Yaml::file(path))
        .merge(Env::prefixed("FABRICHECK_").split("__"))
        .extract()
        .with_context(|| format!("loading config from {}", path.display()))
}
