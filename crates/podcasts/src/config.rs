//! CLI-side config resolution: the config file and environment via
//! `podcast-config`, then global flag overrides on top.

use clap::ValueEnum;

use podcast_config::Config;
use podcast_core::ClientConfig;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

pub use podcast_config::{config_path, load_config, save_config};

/// Everything a backend-bound command needs, fully resolved.
#[derive(Debug)]
pub struct Resolved {
    pub client: ClientConfig,
    pub output: OutputFormat,
}

/// Resolve from the config file, with flags taking precedence.
pub fn resolve(global: &GlobalOpts) -> Result<Resolved, CliError> {
    let cfg = load_config()?;
    resolve_with(cfg, global)
}

pub fn resolve_with(mut cfg: Config, global: &GlobalOpts) -> Result<Resolved, CliError> {
    if let Some(ref url) = global.base_url {
        cfg.api_base_url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        cfg.timeout = timeout;
    }

    let output = match global.output {
        Some(format) => format,
        None => output_format(&cfg.output)?,
    };
    let client = cfg.to_client_config()?;

    Ok(Resolved { client, output })
}

/// Output format for commands that don't touch the backend.
pub fn output_only(global: &GlobalOpts, cfg: &Config) -> Result<OutputFormat, CliError> {
    global
        .output
        .map_or_else(|| output_format(&cfg.output), Ok)
}

fn output_format(name: &str) -> Result<OutputFormat, CliError> {
    OutputFormat::from_str(name, true).map_err(|reason| CliError::Validation {
        field: "output".into(),
        reason,
    })
}
