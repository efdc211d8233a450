//! Podcast command handlers: `list`, `mine`, `subscribed`.

use tabled::Tabled;

use podcast_core::{Podcast, PodcastClient, PodcastId, SubscribedPodcast};

use crate::cli::{ListArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

use super::Context;

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct PodcastRow {
    #[tabled(rename = "ID")]
    id: PodcastId,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Lang")]
    language: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Subscribers")]
    subscribers: u64,
}

impl PodcastRow {
    fn new(p: &Podcast, color: bool) -> Self {
        Self {
            id: p.id,
            title: p.title.clone(),
            category: p.category.clone(),
            language: p.language.clone(),
            rating: output::rating(p.rating, color),
            subscribers: p.subscribers,
        }
    }
}

#[derive(Tabled)]
struct FlaggedRow {
    #[tabled(rename = "ID")]
    id: PodcastId,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Rating")]
    rating: String,
    #[tabled(rename = "Sub")]
    subscribed: String,
}

impl FlaggedRow {
    fn new(p: &SubscribedPodcast, color: bool) -> Self {
        Self {
            id: p.podcast.id,
            title: p.podcast.title.clone(),
            category: p.podcast.category.clone(),
            rating: output::rating(p.podcast.rating, color),
            subscribed: output::subscribed_mark(p.subscribed, color),
        }
    }
}

fn render_podcasts(ctx: &Context, podcasts: &[Podcast]) -> Result<String, CliError> {
    output::render_list(
        ctx.format,
        podcasts,
        |p| PodcastRow::new(p, ctx.color),
        |p| p.id.to_string(),
    )
}

// ── Handlers ────────────────────────────────────────────────────────

/// Every podcast, sorted by rating.
pub async fn list(client: &PodcastClient, args: ListArgs, ctx: &Context) -> Result<(), CliError> {
    let store = client.store();
    if let Some(sort) = args.sort {
        store.set_order(sort.into());
    }

    if !args.with_subscription {
        store.initialize().await?;
        let out = render_podcasts(ctx, &store.sort_by_rating())?;
        output::print_output(&out, ctx.quiet);
        return Ok(());
    }

    tokio::try_join!(store.initialize(), store.refresh_my_podcasts())?;

    let out = output::render_list(
        ctx.format,
        &store.sort_by_rating_with_subscription(),
        |p| FlaggedRow::new(p, ctx.color),
        |p| p.podcast.id.to_string(),
    )?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

/// The user's subscriptions, straight from the subscriptions endpoint.
pub async fn mine(client: &PodcastClient, ctx: &Context) -> Result<(), CliError> {
    let store = client.store();
    store.refresh_my_podcasts().await?;

    let out = render_podcasts(ctx, &store.my_podcasts())?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}

/// Public podcasts that also appear in the user's subscriptions.
pub async fn subscribed(client: &PodcastClient, ctx: &Context) -> Result<(), CliError> {
    let store = client.store();
    tokio::try_join!(store.initialize(), store.refresh_my_podcasts())?;

    let podcasts = store.subscribed_podcasts();
    if podcasts.is_empty() && ctx.format == OutputFormat::Table && !ctx.quiet {
        eprintln!("No subscribed podcasts");
        return Ok(());
    }

    let out = render_podcasts(ctx, &podcasts)?;
    output::print_output(&out, ctx.quiet);
    Ok(())
}
