//! Bridging the config file and global CLI flags into a `ServiceConfig`.
//!
//! Precedence: CLI flags > environment > config file. Core never reads
//! config files; this module hands it a finished `ServiceConfig`.

use stockdeck_config::{Config, ConfigError};
use stockdeck_core::ServiceConfig;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Resolve the effective service connection from file + flags.
pub fn resolve_service_config(global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    let cfg = stockdeck_config::load_config_or_default();
    resolve_with(cfg, global)
}

fn resolve_with(cfg: Config, global: &GlobalOpts) -> Result<ServiceConfig, CliError> {
    let mut server = cfg.server;

    if let Some(ref url) = global.server {
        server.url = Some(url.clone());
    }
    if global.insecure {
        server.insecure = true;
    }
    if let Some(timeout) = global.timeout {
        server.timeout = Some(timeout);
    }

    match stockdeck_config::server_to_service_config(&server) {
        Ok(service) => Ok(service),
        Err(ConfigError::Validation { ref field, .. })
            if field == "server.url" && server.url.is_none() =>
        {
            Err(CliError::NoServer {
                path: stockdeck_config::config_path().display().to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    fn global_from(args: &[&str]) -> crate::cli::GlobalOpts {
        // `whoami` is just a carrier for the global flags.
        let mut argv = vec!["stockdeck"];
        argv.extend_from_slice(args);
        argv.push("whoami");
        Cli::parse_from(argv).global
    }

    #[test]
    fn flag_overrides_empty_config() {
        let global = global_from(&["--server", "https://inv.example.com", "--timeout", "5"]);
        let service = resolve_with(Config::default(), &global).unwrap();
        assert_eq!(service.url.as_str(), "https://inv.example.com/");
        assert_eq!(service.timeout.as_secs(), 5);
    }

    #[test]
    fn missing_url_is_a_clean_error() {
        let global = global_from(&[]);
        let result = resolve_with(Config::default(), &global);
        assert!(matches!(result, Err(CliError::NoServer { .. })));
    }
}
