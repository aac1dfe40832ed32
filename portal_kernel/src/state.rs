/// Portal Kernel v1: State Construction

use std::collections::BTreeMap;

use crate::domain::{CourseId, Rating, ResourceId, SessionState};

/// Create a fresh, empty SessionState.
pub fn create_initial_state() -> SessionState {
    SessionState::default()
}

/// Assemble a SessionState from already-decoded collections.
///
/// Duplicate ids are collapsed, first occurrence wins, so the
/// uniqueness invariants hold for whatever the caller read.
pub fn state_from_parts(
    enrolled_courses: Vec<CourseId>,
    bookmarked_resources: Vec<ResourceId>,
    course_ratings: BTreeMap<CourseId, Rating>,
    page_visits: BTreeMap<String, u64>,
) -> SessionState {
    SessionState {
        enrolled_courses: dedup_preserving_order(enrolled_courses),
        bookmarked_resources: dedup_preserving_order(bookmarked_resources),
        course_ratings,
        page_visits,
    }
}

fn dedup_preserving_order<T: PartialEq>(items: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    for item in items {
        if !out.contains(&item) {
            out.push(item);
        }
    }
    out
}
