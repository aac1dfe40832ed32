//! Hydration: rebuild the session state from the durable store.
//!
//! Runs once per process, before anything reads the session. Every key
//! is read with an empty fallback and decoded leniently: a value of the
//! wrong shape becomes an empty collection, bad entries are dropped.

use std::collections::BTreeMap;

use serde_json::Value;
use tracing::{info, warn};

use portal_kernel::domain::{Collection, CourseId, Rating, ResourceId, SessionState};
use portal_kernel::state::state_from_parts;

use crate::config::StorageKeys;
use crate::store::{DurableStore, DurableStoreExt};

/// What hydration had to throw away, per collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HydrationReport {
    /// Collections whose stored value was absent or unusable.
    pub fallbacks: Vec<Collection>,
    /// Entries discarded from otherwise readable collections.
    pub dropped: BTreeMap<&'static str, usize>,
}

impl HydrationReport {
    pub fn is_clean(&self) -> bool {
        self.dropped.is_empty()
    }

    fn drop_entries(&mut self, collection: Collection, n: usize) {
        if n > 0 {
            *self.dropped.entry(collection_name(collection)).or_insert(0) += n;
        }
    }
}

fn collection_name(c: Collection) -> &'static str {
    match c {
        Collection::Enrollments => "enrollments",
        Collection::Bookmarks => "bookmarks",
        Collection::Ratings => "ratings",
        Collection::Visits => "visits",
    }
}

/// Read all four collections and assemble a valid SessionState.
pub fn hydrate(store: &dyn DurableStore, keys: &StorageKeys) -> (SessionState, HydrationReport) {
    let mut report = HydrationReport::default();

    let enrolled = read_id_list(store, keys, Collection::Enrollments, &mut report)
        .into_iter()
        .map(CourseId)
        .collect();
    let bookmarked = read_id_list(store, keys, Collection::Bookmarks, &mut report)
        .into_iter()
        .map(ResourceId)
        .collect();
    let ratings = read_ratings(store, keys, &mut report);
    let visits = read_visits(store, keys, &mut report);

    let state = state_from_parts(enrolled, bookmarked, ratings, visits);

    info!(
        enrolled = state.enrolled_courses.len(),
        bookmarked = state.bookmarked_resources.len(),
        rated = state.course_ratings.len(),
        pages = state.page_visits.len(),
        fallbacks = report.fallbacks.len(),
        "session hydrated"
    );
    if !report.is_clean() {
        warn!(dropped = ?report.dropped, "discarded unreadable stored entries");
    }

    (state, report)
}

fn read_value(
    store: &dyn DurableStore,
    keys: &StorageKeys,
    collection: Collection,
) -> Value {
    store.get_or(keys.key_for(collection), Value::Null)
}

/// Sequence of positive ids; anything else dropped. Duplicates are collapsed later
/// by `state_from_parts` and counted here.
fn read_id_list(
    store: &dyn DurableStore,
    keys: &StorageKeys,
    collection: Collection,
    report: &mut HydrationReport,
) -> Vec<u32> {
    let Value::Array(items) = read_value(store, keys, collection) else {
        report.fallbacks.push(collection);
        return Vec::new();
    };

    let total = items.len();
    let mut ids: Vec<u32> = Vec::with_capacity(total);
    for item in &items {
        if let Some(id) = as_u32(item) {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    report.drop_entries(collection, total - ids.len());
    ids
}

/// Mapping of stringified course id to rating. Values may be numbers or
/// numeric strings; anything outside 1-5 is dropped. Keys that name the
/// same course (`"1"`, `" 1"`, `"01"`) keep the first entry.
fn read_ratings(
    store: &dyn DurableStore,
    keys: &StorageKeys,
    report: &mut HydrationReport,
) -> BTreeMap<CourseId, Rating> {
    let Value::Object(map) = read_value(store, keys, Collection::Ratings) else {
        report.fallbacks.push(Collection::Ratings);
        return BTreeMap::new();
    };

    let mut ratings = BTreeMap::new();
    for (k, v) in &map {
        let course = k.trim().parse::<u32>().ok().filter(|&id| id > 0).map(CourseId);
        let rating = as_rating(v);
        match (course, rating) {
            (Some(c), Some(r)) if !ratings.contains_key(&c) => {
                ratings.insert(c, r);
            }
            _ => report.drop_entries(Collection::Ratings, 1),
        }
    }
    ratings
}

fn read_visits(
    store: &dyn DurableStore,
    keys: &StorageKeys,
    report: &mut HydrationReport,
) -> BTreeMap<String, u64> {
    let Value::Object(map) = read_value(store, keys, Collection::Visits) else {
        report.fallbacks.push(Collection::Visits);
        return BTreeMap::new();
    };

    let mut visits = BTreeMap::new();
    for (page, v) in &map {
        match v.as_u64() {
            Some(n) if !page.is_empty() => {
                visits.insert(page.clone(), n);
            }
            _ => report.drop_entries(Collection::Visits, 1),
        }
    }
    visits
}

/// Ids are positive integers.
fn as_u32(v: &Value) -> Option<u32> {
    v.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .filter(|&n| n > 0)
}

fn as_rating(v: &Value) -> Option<Rating> {
    let n = match v {
        Value::Number(n) => n.as_u64()?,
        Value::String(s) => s.trim().parse::<u64>().ok()?,
        _ => return None,
    };
    u8::try_from(n).ok().and_then(|n| Rating::try_from(n).ok())
}
