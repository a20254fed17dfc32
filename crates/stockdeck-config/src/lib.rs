//! On-disk configuration for the stockdeck CLI.
//!
//! A TOML file plus `STOCKDECK_`-prefixed environment variables, merged
//! via figment, and translation to `stockdeck_core::ServiceConfig`. The
//! session credential file lives next door in the platform data dir;
//! this crate only knows its path.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use stockdeck_core::{ServiceConfig, TlsVerification};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    /// Presentation defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// The inventory service to talk to.
    #[serde(default)]
    pub server: Server,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_timeout() -> u64 {
    30
}

/// The inventory service connection settings.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Server {
    /// Service base URL (e.g., "https://inventory.example.com").
    pub url: Option<String>,

    /// Path to a custom CA certificate for self-hosted deployments.
    pub ca_cert: Option<PathBuf>,

    /// Accept self-signed TLS certificates.
    #[serde(default)]
    pub insecure: bool,

    /// Override the request timeout, in seconds.
    pub timeout: Option<u64>,
}

// ── Paths ───────────────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "stockdeck", "stockdeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

/// Resolve the session credential file path (platform data dir).
pub fn session_path() -> PathBuf {
    ProjectDirs::from("com", "stockdeck", "stockdeck").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("session.json");
            p
        },
        |dirs| dirs.data_dir().join("session.json"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("stockdeck");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("STOCKDECK_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

// ── ServiceConfig translation ───────────────────────────────────────

/// Build a `ServiceConfig` from the `[server]` table -- no CLI overrides.
pub fn server_to_service_config(server: &Server) -> Result<ServiceConfig, ConfigError> {
    let url_str = server
        .url
        .as_deref()
        .ok_or_else(|| ConfigError::Validation {
            field: "server.url".into(),
            reason: "no service URL configured".into(),
        })?;

    let url: url::Url = url_str.parse().map_err(|_| ConfigError::Validation {
        field: "server.url".into(),
        reason: format!("invalid URL: {url_str}"),
    })?;

    let tls = if server.insecure {
        TlsVerification::DangerAcceptInvalid
    } else if let Some(ref ca_path) = server.ca_cert {
        TlsVerification::CustomCa(ca_path.clone())
    } else {
        TlsVerification::SystemDefaults
    };

    let timeout = Duration::from_secs(server.timeout.unwrap_or(30));

    Ok(ServiceConfig { url, tls, timeout })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn server_translation_requires_a_url() {
        let server = Server::default();
        assert!(matches!(
            server_to_service_config(&server),
            Err(ConfigError::Validation { .. })
        ));
    }

    #[test]
    fn server_translation_maps_tls_modes() {
        let server = Server {
            url: Some("https://inventory.example.com".into()),
            insecure: true,
            ..Server::default()
        };
        let cfg = server_to_service_config(&server).unwrap();
        assert_eq!(cfg.tls, TlsVerification::DangerAcceptInvalid);
        assert_eq!(cfg.url.as_str(), "https://inventory.example.com/");
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let cfg = Config::default();
        let raw = toml::to_string_pretty(&cfg).unwrap();
        let back: Config = toml::from_str(&raw).unwrap();
        assert_eq!(back.defaults.output, "table");
        assert_eq!(back.defaults.timeout, 30);
    }
}
