//! Clap derive structures for the `podcasts` CLI.
//!
//! Defines the command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use podcast_core::SortOrder;

// ── Top-Level CLI ────────────────────────────────────────────────────

/// podcasts -- browse a podcast backend from the command line
#[derive(Debug, Parser)]
#[command(
    name = "podcasts",
    version,
    about = "Browse podcasts, subscriptions and episodes from the command line",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Backend base URL (overrides the config file)
    #[arg(long, short = 'u', env = "PODCASTS_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, env = "PODCASTS_TIMEOUT", global = true)]
    pub timeout: Option<u64>,

    /// Output format (defaults to the config file's `output`, then table)
    #[arg(long, short = 'o', env = "PODCASTS_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one id per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Rating order accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortArg {
    /// Lowest rating first
    Asc,
    /// Highest rating first
    Desc,
}

impl From<SortArg> for SortOrder {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Asc => SortOrder::Asc,
            SortArg::Desc => SortOrder::Desc,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every podcast, sorted by rating
    #[command(alias = "ls")]
    List(ListArgs),

    /// List the podcasts you subscribe to
    Mine,

    /// List podcasts that are both public and subscribed
    #[command(alias = "sub")]
    Subscribed,

    /// List every episode
    #[command(alias = "ep")]
    Episodes,

    /// Manage CLI configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Rating order (defaults to the config file's `default_order`)
    #[arg(long, short = 's')]
    pub sort: Option<SortArg>,

    /// Add a column marking podcasts you subscribe to
    #[arg(long)]
    pub with_subscription: bool,
}

// ── Config ───────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a config file with default values
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_tree_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn sort_flag_maps_to_store_order() {
        let cli = Cli::try_parse_from(["podcasts", "list", "--sort", "desc"]).unwrap();
        let Command::List(args) = cli.command else {
            panic!("expected list command");
        };
        assert_eq!(args.sort.map(SortOrder::from), Some(SortOrder::Desc));
    }
}
