/// Portal Kernel v1: Dashboard Projections
///
/// Read-only views over catalog + session. Nothing here mutates or
/// persists; callers recompute on demand.

use crate::catalog::Catalog;
use crate::domain::{DashboardStats, LearningSummary, SessionState};

/// Aggregate catalog sizes and session collection sizes.
pub fn dashboard_stats(catalog: &Catalog, state: &SessionState) -> DashboardStats {
    DashboardStats {
        total_courses: catalog.courses().len(),
        enrolled_courses: state.enrolled_courses.len(),
        total_resources: catalog.resources().len(),
        bookmarked_resources: state.bookmarked_resources.len(),
        rated_courses: state.course_ratings.len(),
        visits: state.page_visits.clone(),
    }
}

/// Resolve session ids to catalog entries. Ids the catalog does not
/// know are skipped.
pub fn learning_summary<'a>(catalog: &'a Catalog, state: &SessionState) -> LearningSummary<'a> {
    let enrolled = state
        .enrolled_courses
        .iter()
        .filter_map(|id| catalog.get_course(*id).ok())
        .collect();

    let bookmarked = state
        .bookmarked_resources
        .iter()
        .filter_map(|id| catalog.get_resource(*id).ok())
        .collect();

    let rated = state
        .course_ratings
        .iter()
        .filter_map(|(id, rating)| catalog.get_course(*id).ok().map(|c| (c, *rating)))
        .collect();

    LearningSummary {
        enrolled,
        bookmarked,
        rated,
    }
}
