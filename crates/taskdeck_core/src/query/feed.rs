//! Home feed construction.
//!
//! # Responsibility
//! - Rank incomplete items across every project into one capped feed.
//! - Split the feed into its two display buckets deterministically.
//!
//! # Invariants
//! - The feed never holds more than the requested limit.
//! - `up_next.len() + more_to_explore.len()` equals the number of qualifying
//!   items, capped at the limit.
//! - Construction is a read-only projection over item snapshots.

use crate::model::item::Item;
use crate::query::sort::{compare_items, SortPolicy};

/// Default number of items in the home feed.
pub const DEFAULT_FEED_LIMIT: usize = 10;

/// Number of feed items promoted into the `up_next` bucket.
pub const UP_NEXT_LEN: usize = 3;

/// Globally ranked, capped, two-bucket view of incomplete items.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeFeed {
    /// Top of the feed, at most [`UP_NEXT_LEN`] items.
    pub up_next: Vec<Item>,
    /// Remainder of the capped feed.
    pub more_to_explore: Vec<Item>,
}

impl HomeFeed {
    /// Total number of items across both buckets.
    pub fn len(&self) -> usize {
        self.up_next.len() + self.more_to_explore.len()
    }

    /// True when no qualifying item exists.
    pub fn is_empty(&self) -> bool {
        self.up_next.is_empty() && self.more_to_explore.is_empty()
    }
}

/// Builds the home feed from an item snapshot.
///
/// Completed items never qualify. Owner-state filtering (items of closed
/// projects never enter the feed) is the caller's job: the snapshot passed
/// in must already be restricted to feed-eligible owners. Qualifying items
/// are ranked with the optimized comparator; its completed-first key is
/// inert here because every candidate is incomplete, leaving priority
/// descending, then creation ascending, then id. Fewer than [`UP_NEXT_LEN`]
/// qualifying items all land in `up_next` — the feed never pads and never
/// errors.
pub fn build_home_feed(items: &[Item], limit: usize) -> HomeFeed {
    let mut feed: Vec<Item> = items
        .iter()
        .filter(|item| !item.completed)
        .cloned()
        .collect();
    feed.sort_by(|a, b| compare_items(a, b, SortPolicy::Optimized));
    feed.truncate(limit);

    let more_to_explore = feed.split_off(feed.len().min(UP_NEXT_LEN));
    HomeFeed {
        up_next: feed,
        more_to_explore,
    }
}
