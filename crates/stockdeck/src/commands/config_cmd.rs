//! Config command handlers: show, init, path.

use stockdeck_config::{Config, Server};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = stockdeck_config::load_config_or_default();
            let rendered = toml::to_string_pretty(&cfg)
                .map_err(|e| CliError::Config(e.to_string()))?;
            output::print_output(&rendered, global.quiet);
            Ok(())
        }

        ConfigCommand::Init { url, insecure } => {
            let cfg = Config {
                server: Server {
                    url: Some(url),
                    insecure,
                    ..Server::default()
                },
                ..Config::default()
            };
            stockdeck_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!(
                    "Config written to {}",
                    stockdeck_config::config_path().display()
                );
            }
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(
                &stockdeck_config::config_path().display().to_string(),
                global.quiet,
            );
            Ok(())
        }
    }
}
