/// Portal Kernel v1: Invariant Checks
///
/// Hard-fail validation. Every check panics on failure.

use std::collections::BTreeSet;

use crate::domain::{Rating, SessionState};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run all invariant checks. Panics on the first failure.
pub fn validate_invariants(state: &SessionState) {
    if let Err(msg) = try_validate_invariants(state) {
        panic!("Invariant violation: {}", msg);
    }
}

/// Non-panicking variant of `validate_invariants`.
/// Returns `Err(message)` on the first failure, `Ok(())` if all pass.
pub fn try_validate_invariants(state: &SessionState) -> Result<(), String> {
    check_unique_enrollments(state)?;
    check_unique_bookmarks(state)?;
    check_rating_scale(state)?;
    check_page_names(state)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Individual checks (private)
// ---------------------------------------------------------------------------

/// A course id appears at most once in the enrollment record.
fn check_unique_enrollments(state: &SessionState) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for id in &state.enrolled_courses {
        if !seen.insert(id) {
            return Err(format!(
                "[INVARIANT:unique_enrollments] course {} enrolled more than once",
                id
            ));
        }
    }
    Ok(())
}

/// A resource id appears at most once in the bookmark record.
fn check_unique_bookmarks(state: &SessionState) -> Result<(), String> {
    let mut seen = BTreeSet::new();
    for id in &state.bookmarked_resources {
        if !seen.insert(id) {
            return Err(format!(
                "[INVARIANT:unique_bookmarks] resource {} bookmarked more than once",
                id
            ));
        }
    }
    Ok(())
}

/// Rating is a newtype, but a bad value could still arrive via serde.
fn check_rating_scale(state: &SessionState) -> Result<(), String> {
    for (course, rating) in &state.course_ratings {
        let v = rating.value();
        if !(Rating::MIN..=Rating::MAX).contains(&v) {
            return Err(format!(
                "[INVARIANT:rating_scale] course {} has rating {} outside 1-5",
                course, v
            ));
        }
    }
    Ok(())
}

fn check_page_names(state: &SessionState) -> Result<(), String> {
    if state.page_visits.keys().any(|p| p.is_empty()) {
        return Err("[INVARIANT:page_names] empty page identifier in visit counter".to_string());
    }
    Ok(())
}
