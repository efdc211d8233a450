// ── Derived views ──
//
// Pure functions of a `StoreState` snapshot, plus a version-keyed memo so
// repeated reads between patches do not recompute.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use super::state::StoreState;
use crate::model::{Podcast, PodcastId, SortOrder, SubscribedPodcast};

/// Podcasts whose id also appears in `my_podcasts`, in `podcasts` order.
///
/// Builds a set of subscribed ids first, so this is O(n + m) rather than a
/// nested scan.
pub(crate) fn subscribed_podcasts(state: &StoreState) -> Vec<Podcast> {
    let mine = subscribed_ids(state);
    state
        .podcasts()
        .iter()
        .filter(|p| mine.contains(&p.id))
        .cloned()
        .collect()
}

/// A sorted copy of `podcasts`. The sort is stable, so equal ratings keep
/// their original relative order.
pub(crate) fn sort_by_rating(state: &StoreState) -> Vec<Podcast> {
    let mut sorted = state.podcasts().to_vec();
    match state.filter().order {
        SortOrder::Asc => sorted.sort_by(|a, b| a.rating.total_cmp(&b.rating)),
        SortOrder::Desc => sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
    }
    sorted
}

/// Every podcast annotated with its subscription flag.
pub(crate) fn with_subscription(state: &StoreState) -> Vec<SubscribedPodcast> {
    flag(state, state.podcasts().iter().cloned())
}

/// The rating-sorted list, each entry annotated with its subscription flag.
pub(crate) fn sorted_with_subscription(state: &StoreState) -> Vec<SubscribedPodcast> {
    flag(state, sort_by_rating(state))
}

fn flag(
    state: &StoreState,
    podcasts: impl IntoIterator<Item = Podcast>,
) -> Vec<SubscribedPodcast> {
    let mine = subscribed_ids(state);
    podcasts
        .into_iter()
        .map(|podcast| SubscribedPodcast {
            subscribed: mine.contains(&podcast.id),
            podcast,
        })
        .collect()
}

fn subscribed_ids(state: &StoreState) -> HashSet<PodcastId> {
    state.my_podcasts().iter().map(|p| p.id).collect()
}

// ── Memo ─────────────────────────────────────────────────────────────

/// Caches one computed value per state version.
///
/// Any patch bumps the version, which invalidates the cached value on the
/// next read. A reader holding an older snapshot never displaces a newer
/// cached value.
pub(crate) struct Memo<T> {
    cell: Mutex<Option<(u64, Arc<T>)>>,
}

impl<T> Memo<T> {
    pub(crate) fn new() -> Self {
        Self {
            cell: Mutex::new(None),
        }
    }

    pub(crate) fn get_or_compute(
        &self,
        state: &StoreState,
        compute: impl FnOnce(&StoreState) -> T,
    ) -> Arc<T> {
        let mut cell = self.cell.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((version, value)) = cell.as_ref() {
            if *version == state.version() {
                return Arc::clone(value);
            }
        }
        let value = Arc::new(compute(state));
        if cell
            .as_ref()
            .is_none_or(|(version, _)| state.version() >= *version)
        {
            *cell = Some((state.version(), Arc::clone(&value)));
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::store::Collection;

    fn podcast(id: u64, rating: f64) -> Podcast {
        Podcast {
            id,
            title: format!("Podcast {id}"),
            description: String::new(),
            image: String::new(),
            category: String::new(),
            language: "en".into(),
            website: String::new(),
            subscribers: 0,
            rating,
        }
    }

    fn state(all: Vec<Podcast>, mine: Vec<Podcast>) -> StoreState {
        let mut s = StoreState::default();
        s.commit(Collection::Podcasts, all);
        s.commit(Collection::MyPodcasts, mine);
        s
    }

    fn ids(list: &[Podcast]) -> Vec<u64> {
        list.iter().map(|p| p.id).collect()
    }

    #[test]
    fn subscribed_is_exact_intersection() {
        let s = state(
            vec![podcast(1, 4.5), podcast(2, 3.0), podcast(3, 1.0)],
            vec![podcast(3, 1.0), podcast(2, 3.0), podcast(99, 5.0)],
        );

        assert_eq!(ids(&subscribed_podcasts(&s)), vec![2, 3]);
    }

    #[test]
    fn subscribed_is_empty_without_my_podcasts() {
        let s = state(vec![podcast(1, 4.5)], Vec::new());
        assert!(subscribed_podcasts(&s).is_empty());
    }

    #[test]
    fn sort_ascending_and_descending() {
        let mut s = state(
            vec![podcast(1, 4.5), podcast(2, 3.0), podcast(3, 5.0)],
            Vec::new(),
        );
        assert_eq!(ids(&sort_by_rating(&s)), vec![2, 1, 3]);

        s.set_order(SortOrder::Desc);
        assert_eq!(ids(&sort_by_rating(&s)), vec![3, 1, 2]);
    }

    #[test]
    fn sort_is_stable_for_equal_ratings() {
        let mut s = state(
            vec![
                podcast(1, 2.0),
                podcast(2, 1.0),
                podcast(3, 2.0),
                podcast(4, 1.0),
            ],
            Vec::new(),
        );
        assert_eq!(ids(&sort_by_rating(&s)), vec![2, 4, 1, 3]);

        s.set_order(SortOrder::Desc);
        assert_eq!(ids(&sort_by_rating(&s)), vec![1, 3, 2, 4]);
    }

    #[test]
    fn sort_does_not_touch_source_order() {
        let s = state(vec![podcast(1, 5.0), podcast(2, 1.0)], Vec::new());
        let _ = sort_by_rating(&s);
        assert_eq!(ids(s.podcasts()), vec![1, 2]);
    }

    #[test]
    fn reversing_order_reverses_distinct_ratings() {
        let mut s = state(
            vec![podcast(1, 0.5), podcast(2, 4.0), podcast(3, 2.5), podcast(4, 3.9)],
            Vec::new(),
        );
        let asc = ids(&sort_by_rating(&s));
        s.set_order(SortOrder::Desc);
        let mut desc = ids(&sort_by_rating(&s));
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    fn with_subscription_flags_every_podcast() {
        let s = state(vec![podcast(1, 4.5), podcast(2, 3.0)], vec![podcast(2, 3.0)]);
        let flags: Vec<(u64, bool)> = with_subscription(&s)
            .iter()
            .map(|p| (p.podcast.id, p.subscribed))
            .collect();
        assert_eq!(flags, vec![(1, false), (2, true)]);
    }

    #[test]
    fn sorted_flags_follow_rating_order() {
        let mut s = state(
            vec![podcast(1, 4.5), podcast(2, 3.0), podcast(3, 4.0)],
            vec![podcast(2, 3.0)],
        );
        s.set_order(SortOrder::Desc);
        let flags: Vec<(u64, bool)> = sorted_with_subscription(&s)
            .iter()
            .map(|p| (p.podcast.id, p.subscribed))
            .collect();
        assert_eq!(flags, vec![(1, false), (3, false), (2, true)]);
    }

    #[test]
    fn memo_recomputes_only_after_a_patch() {
        let memo: Memo<usize> = Memo::new();
        let calls = AtomicUsize::new(0);
        let mut s = state(vec![podcast(1, 1.0)], Vec::new());

        let compute = |st: &StoreState| {
            calls.fetch_add(1, Ordering::SeqCst);
            st.podcasts().len()
        };

        assert_eq!(*memo.get_or_compute(&s, compute), 1);
        assert_eq!(*memo.get_or_compute(&s, compute), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        s.commit(Collection::Podcasts, vec![podcast(1, 1.0), podcast(2, 2.0)]);
        assert_eq!(*memo.get_or_compute(&s, compute), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn stale_snapshot_does_not_evict_newer_value() {
        let memo: Memo<usize> = Memo::new();
        let calls = AtomicUsize::new(0);
        let old = state(vec![podcast(1, 1.0)], Vec::new());
        let mut new = old.clone();
        new.commit(Collection::Podcasts, vec![podcast(1, 1.0), podcast(2, 2.0)]);

        let compute = |st: &StoreState| {
            calls.fetch_add(1, Ordering::SeqCst);
            st.podcasts().len()
        };

        assert_eq!(*memo.get_or_compute(&new, compute), 2);
        assert_eq!(*memo.get_or_compute(&old, compute), 1);
        assert_eq!(*memo.get_or_compute(&new, compute), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 2, "newer value stayed cached");
    }
}
