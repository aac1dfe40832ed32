/// Portal Kernel v1: Error Types
///
/// Lookups and input parsing return these; none of them is fatal.

use thiserror::Error;

use crate::domain::{CourseId, ResourceId};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Course {0} not found")]
    CourseNotFound(CourseId),

    #[error("Resource {0} not found")]
    ResourceNotFound(ResourceId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RatingError {
    #[error("Rating {0} is outside the 1-5 scale")]
    OutOfRange(i64),

    #[error("Rating {0:?} is not a number")]
    NotANumber(String),
}
