/// Portal Kernel v1: Centralized Transition Logic
///
/// ALL session-state mutation lives here.
/// Every transition is total: it always produces a new state and an
/// Outcome, never an error.

use crate::domain::{CourseId, Outcome, Rating, ResourceId, SessionState};
use crate::events::Intent;

/// Page recorded when the host supplies no identifier.
pub const DEFAULT_PAGE: &str = "index.html";

// ---------------------------------------------------------------------------
// Public dispatcher
// ---------------------------------------------------------------------------

/// Apply *intent* to *state* and return `(new_state, outcome)`.
/// The original state is never mutated; a clone is made first.
pub fn apply_intent(state: &SessionState, intent: &Intent) -> (SessionState, Outcome) {
    let mut new_state = state.clone();

    let outcome = match intent {
        Intent::Enroll(id) => apply_enroll(&mut new_state, *id),
        Intent::ToggleBookmark(id) => apply_toggle_bookmark(&mut new_state, *id),
        Intent::Rate { course, rating } => apply_rate(&mut new_state, *course, *rating),
        Intent::RecordVisit(page) => apply_record_visit(&mut new_state, page),
    };

    (new_state, outcome)
}

// ---------------------------------------------------------------------------
// Individual transition handlers (private)
// ---------------------------------------------------------------------------

/// Enrollment is one-way: there is no unenroll transition.
fn apply_enroll(state: &mut SessionState, id: CourseId) -> Outcome {
    if state.enrolled_courses.contains(&id) {
        return Outcome::AlreadyEnrolled;
    }
    state.enrolled_courses.push(id);
    Outcome::Enrolled
}

fn apply_toggle_bookmark(state: &mut SessionState, id: ResourceId) -> Outcome {
    match state.bookmarked_resources.iter().position(|r| *r == id) {
        Some(index) => {
            state.bookmarked_resources.remove(index);
            Outcome::BookmarkRemoved
        }
        None => {
            state.bookmarked_resources.push(id);
            Outcome::Bookmarked
        }
    }
}

/// Last write wins; no rating history is kept.
fn apply_rate(state: &mut SessionState, course: CourseId, rating: Option<Rating>) -> Outcome {
    match rating {
        Some(r) => {
            let previous = state.course_ratings.insert(course, r);
            Outcome::Rated { previous }
        }
        None => Outcome::RatingIgnored,
    }
}

/// A blank page identifier counts as the landing page.
fn apply_record_visit(state: &mut SessionState, page: &str) -> Outcome {
    let page = match page.trim() {
        "" => DEFAULT_PAGE,
        p => p,
    };
    let count = state.page_visits.entry(page.to_string()).or_insert(0);
    *count = count.saturating_add(1);
    Outcome::Visited { count: *count }
}
