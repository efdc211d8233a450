//! Config subcommand handlers.

use podcast_config::Config;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

fn detail(cfg: &Config) -> String {
    let path = config::config_path();
    let state = if path.exists() { "" } else { " (not created)" };
    [
        format!("Base URL:      {}", cfg.api_base_url),
        format!("Timeout:       {}s", cfg.timeout),
        format!("Retries:       {}", cfg.retries),
        format!("Default order: {}", cfg.default_order),
        format!("Output:        {}", cfg.output),
        format!("Config file:   {}{state}", path.display()),
    ]
    .join("\n")
}

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Show => {
            let cfg = config::load_config()?;
            let format = config::output_only(global, &cfg)?;
            let out = output::render_single(format, &cfg, detail)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_path().display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Init { force } => {
            let path = config::config_path();
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let mut cfg = Config::default();
            if let Some(ref url) = global.base_url {
                cfg.api_base_url.clone_from(url);
            }
            if let Some(timeout) = global.timeout {
                cfg.timeout = timeout;
            }
            // Refuse to write values the client would reject later.
            cfg.to_client_config()?;

            let written = config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("Wrote config to {}", written.display());
            }
            Ok(())
        }
    }
}
