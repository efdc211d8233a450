//! Command dispatch: bridges CLI args -> store operations -> output formatting.

pub mod config_cmd;
pub mod episodes;
pub mod podcasts;

use podcast_core::PodcastClient;

use crate::cli::{Command, OutputFormat};
use crate::error::CliError;

/// Rendering settings shared by backend-bound handlers.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

/// Dispatch a backend-bound command to the appropriate handler.
pub async fn dispatch(
    cmd: Command,
    client: &PodcastClient,
    ctx: &Context,
) -> Result<(), CliError> {
    match cmd {
        Command::List(args) => podcasts::list(client, args, ctx).await,
        Command::Mine => podcasts::mine(client, ctx).await,
        Command::Subscribed => podcasts::subscribed(client, ctx).await,
        Command::Episodes => episodes::handle(client, ctx).await,
        // Config and Completions are handled before dispatch
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
