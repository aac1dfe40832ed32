/// Portal Kernel v1: Core Domain Types
///
/// Pure data. No storage, no transition logic.
/// Catalog entities are immutable after enrichment; session
/// collections are owned by `SessionState`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::RatingError;

// ── Identifiers ────────────────────────────────────────────────────

/// Stable reference key of a course in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u32);

/// Stable reference key of a learning resource in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u32);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ── Catalog Types ──────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseCategory {
    Technical,
    Academic,
    Skill,
}

impl CourseCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CourseCategory::Technical => "technical",
            CourseCategory::Academic => "academic",
            CourseCategory::Skill => "skill",
        }
    }
}

impl FromStr for CourseCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "technical" => Ok(CourseCategory::Technical),
            "academic" => Ok(CourseCategory::Academic),
            "skill" => Ok(CourseCategory::Skill),
            other => Err(format!("unknown course category {:?}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Notes,
    Video,
    Assignment,
    Paper,
}

impl ResourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Notes => "notes",
            ResourceType::Video => "video",
            ResourceType::Assignment => "assignment",
            ResourceType::Paper => "paper",
        }
    }
}

impl FromStr for ResourceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "notes" => Ok(ResourceType::Notes),
            "video" => Ok(ResourceType::Video),
            "assignment" => Ok(ResourceType::Assignment),
            "paper" => Ok(ResourceType::Paper),
            other => Err(format!("unknown resource type {:?}", other)),
        }
    }
}

/// Percentage split of the final grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    pub assignments: String,
    pub quiz: String,
    pub project: String,
}

/// Descriptive fields attached to a course by the enrichment pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseDetails {
    pub overview: String,
    pub instructor_bio: String,
    pub week_plan: Vec<String>,
    pub tools: Vec<String>,
    pub assessment: Assessment,
    pub certificate: String,
    pub career_outcomes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub category: CourseCategory,
    pub duration_weeks: u32,
    pub level: CourseLevel,
    pub description: String,
    /// `None` until the catalog has been enriched.
    pub details: Option<CourseDetails>,
}

impl Course {
    /// Human-readable duration, e.g. "8 Weeks".
    pub fn duration(&self) -> String {
        format!("{} Weeks", self.duration_weeks)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: ResourceId,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub subject: String,
}

/// Filter applied by `Catalog::list_resources`. Both parts combine with AND.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceFilter {
    pub kind: Option<ResourceType>,
    pub search_text: Option<String>,
}

// ── Session Types ──────────────────────────────────────────────────

/// A score on the fixed 1..=5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn value(&self) -> u8 {
        self.0
    }

    /// Parse a raw selection value ("", "3", " 5 ").
    /// Empty selections yield `Ok(None)`.
    pub fn parse_selection(raw: &str) -> Result<Option<Rating>, RatingError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let n: u8 = trimmed
            .parse()
            .map_err(|_| RatingError::NotANumber(trimmed.to_string()))?;
        Rating::try_from(n).map(Some)
    }
}

impl TryFrom<u8> for Rating {
    type Error = RatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Rating(value))
        } else {
            Err(RatingError::OutOfRange(value as i64))
        }
    }
}

impl From<Rating> for u8 {
    fn from(r: Rating) -> u8 {
        r.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything the current visitor has done.
///
/// Enrollments and bookmarks keep insertion order; uniqueness is an
/// invariant checked after every transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionState {
    pub enrolled_courses: Vec<CourseId>,
    pub bookmarked_resources: Vec<ResourceId>,
    pub course_ratings: BTreeMap<CourseId, Rating>,
    pub page_visits: BTreeMap<String, u64>,
}

/// The four independently persisted collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Enrollments,
    Bookmarks,
    Ratings,
    Visits,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Enrollments,
        Collection::Bookmarks,
        Collection::Ratings,
        Collection::Visits,
    ];
}

/// Structured outcome of a state transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Enrolled,
    AlreadyEnrolled,
    Bookmarked,
    BookmarkRemoved,
    Rated { previous: Option<Rating> },
    RatingIgnored,
    Visited { count: u64 },
}

impl Outcome {
    /// Whether the transition changed the session state.
    pub fn changed(&self) -> bool {
        !matches!(self, Outcome::AlreadyEnrolled | Outcome::RatingIgnored)
    }

    /// Notice shown to the visitor.
    pub fn notice(&self) -> &'static str {
        match self {
            Outcome::Enrolled => "Enrollment successful!",
            Outcome::AlreadyEnrolled => "You are already enrolled in this course.",
            Outcome::Bookmarked => "Resource bookmarked",
            Outcome::BookmarkRemoved => "Bookmark removed",
            Outcome::Rated { .. } => "Thank you for rating this course!",
            Outcome::RatingIgnored => "",
            Outcome::Visited { .. } => "",
        }
    }
}

/// Aggregate numbers for the student dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_courses: usize,
    pub enrolled_courses: usize,
    pub total_resources: usize,
    pub bookmarked_resources: usize,
    pub rated_courses: usize,
    pub visits: BTreeMap<String, u64>,
}

/// Session collections resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LearningSummary<'a> {
    pub enrolled: Vec<&'a Course>,
    pub bookmarked: Vec<&'a Resource>,
    pub rated: Vec<(&'a Course, Rating)>,
}
