//! Episode command handler.

use tabled::Tabled;

use podcast_core::{Episode, PodcastClient};

use crate::error::CliError;
use crate::output;

use super::Context;

#[derive(Tabled)]
struct EpisodeRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "#")]
    number: u32,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Published")]
    published: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Category")]
    category: String,
}

impl EpisodeRow {
    fn new(e: &Episode) -> Self {
        Self {
            id: e.id,
            number: e.episode_number,
            title: e.title.clone(),
            published: e.published_date.clone(),
            duration: e.duration.clone(),
            category: e.category.clone(),
        }
    }
}

pub async fn handle(client: &PodcastClient, ctx: &Context) -> Result<(), CliError> {
    let episodes = client.list_episodes().await?;
    let out = output::render_list(ctx.format, &episodes, EpisodeRow::new, |e| {
        e.id.to_string()
    })?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
