// ── Search query pipeline ──
//
// Turns raw keystroke text into settled search queries: debounce, drop
// consecutive duplicates, drop empty text. The result feeds the store's
// filter query.

use std::time::Duration;

use async_stream::stream;
use futures_core::Stream;
use futures_util::StreamExt;
use tracing::trace;

use crate::service::PodcastSource;
use crate::store::PodcastStore;

/// Quiet period after the last keystroke before a query is emitted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Debounce a stream of search text.
///
/// A value is emitted once `delay` passes with no newer input. Values equal to
/// the previously debounced one are suppressed, then empty values are dropped,
/// so typing "a", clearing the box, and typing "a" again emits "a" twice. When
/// the input ends, a pending value is flushed immediately.
pub fn debounce_queries<I>(input: I, delay: Duration) -> impl Stream<Item = String> + Send
where
    I: Stream<Item = String> + Send,
{
    stream! {
        let mut input = std::pin::pin!(input);
        let mut pending: Option<String> = None;
        let mut last: Option<String> = None;

        loop {
            let next = if pending.is_some() {
                tokio::select! {
                    item = input.next() => Some(item),
                    () = tokio::time::sleep(delay) => None,
                }
            } else {
                Some(input.next().await)
            };

            let (settled, ended) = match next {
                // New keystroke text: restart the quiet period.
                Some(Some(text)) => {
                    pending = Some(text);
                    continue;
                }
                Some(None) => (pending.take(), true),
                None => (pending.take(), false),
            };

            if let Some(text) = settled {
                if last.as_deref() != Some(text.as_str()) {
                    last = Some(text.clone());
                    if text.is_empty() {
                        trace!("dropping empty query");
                    } else {
                        yield text;
                    }
                }
            }
            if ended {
                break;
            }
        }
    }
}

/// Feed every query from `queries` into the store's filter until the stream
/// ends.
pub async fn drive_queries<S, Q>(store: &PodcastStore<S>, queries: Q)
where
    S: PodcastSource,
    Q: Stream<Item = String>,
{
    let mut queries = std::pin::pin!(queries);
    while let Some(query) = queries.next().await {
        trace!(%query, "search query settled");
        store.set_query(query);
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use futures_util::StreamExt;
    use pretty_assertions::assert_eq;
    use tokio::sync::mpsc;
    use tokio_stream::wrappers::ReceiverStream;

    use super::*;
    use crate::model::Podcast;

    /// A source that is never asked for anything by these tests.
    struct EmptySource;

    impl PodcastSource for EmptySource {
        async fn all_podcasts(&self) -> Result<Vec<Podcast>, podcast_api::Error> {
            Ok(Vec::new())
        }

        async fn my_podcasts(&self) -> Result<Vec<Podcast>, podcast_api::Error> {
            Ok(Vec::new())
        }
    }

    /// Send `(delay_before, text)` pairs, then close the channel.
    fn typing(script: Vec<(u64, &'static str)>) -> ReceiverStream<String> {
        let (tx, rx) = mpsc::channel(16);
        tokio::spawn(async move {
            for (wait_ms, text) in script {
                tokio::time::sleep(Duration::from_millis(wait_ms)).await;
                if tx.send(text.to_owned()).await.is_err() {
                    return;
                }
            }
        });
        ReceiverStream::new(rx)
    }

    #[tokio::test(start_paused = true)]
    async fn emits_only_settled_text() {
        let input = typing(vec![(0, "r"), (100, "ru"), (100, "rust")]);
        let out: Vec<String> = debounce_queries(input, DEFAULT_DEBOUNCE).collect().await;
        assert_eq!(out, vec!["rust".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn suppresses_repeats_and_empty_text() {
        let input = typing(vec![
            (0, "rust"),
            (600, "rust"),
            (600, ""),
            (600, "go"),
        ]);
        let out: Vec<String> = debounce_queries(input, DEFAULT_DEBOUNCE).collect().await;
        assert_eq!(out, vec!["rust".to_owned(), "go".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn same_text_after_clearing_is_emitted_again() {
        let input = typing(vec![(0, "a"), (600, ""), (600, "a")]);
        let out: Vec<String> = debounce_queries(input, DEFAULT_DEBOUNCE).collect().await;
        assert_eq!(out, vec!["a".to_owned(), "a".to_owned()]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_emits_nothing() {
        let input = typing(Vec::new());
        let out: Vec<String> = debounce_queries(input, DEFAULT_DEBOUNCE).collect().await;
        assert!(out.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn settled_queries_reach_the_store_filter() {
        let store = PodcastStore::new(EmptySource);
        let input = typing(vec![(0, "r"), (100, "rust"), (600, "g"), (100, "go")]);

        drive_queries(&store, debounce_queries(input, DEFAULT_DEBOUNCE)).await;

        assert_eq!(store.filter().query, "go");
    }

    #[tokio::test(start_paused = true)]
    async fn cleared_search_box_keeps_the_stored_query() {
        let store = PodcastStore::new(EmptySource);
        let input = typing(vec![(0, "rust"), (600, ""), (600, "")]);

        drive_queries(&store, debounce_queries(input, DEFAULT_DEBOUNCE)).await;

        assert_eq!(store.filter().query, "rust");
    }
}
