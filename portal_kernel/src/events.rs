/// Portal Kernel v1: Intents
///
/// Intents are pure data. They carry what the visitor asked for and
/// contain ZERO transition logic.

use crate::domain::{Collection, CourseId, Rating, ResourceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Enroll(CourseId),
    ToggleBookmark(ResourceId),
    /// `None` is an empty selection and is ignored.
    Rate {
        course: CourseId,
        rating: Option<Rating>,
    },
    RecordVisit(String),
}

impl Intent {
    /// The single persisted collection this intent may touch.
    pub fn collection(&self) -> Collection {
        match self {
            Intent::Enroll(_) => Collection::Enrollments,
            Intent::ToggleBookmark(_) => Collection::Bookmarks,
            Intent::Rate { .. } => Collection::Ratings,
            Intent::RecordVisit(_) => Collection::Visits,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Intent::Enroll(_) => "enroll",
            Intent::ToggleBookmark(_) => "toggle_bookmark",
            Intent::Rate { .. } => "rate",
            Intent::RecordVisit(_) => "record_visit",
        }
    }
}
