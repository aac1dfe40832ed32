/// Portal Kernel v1: Catalog Registry
///
/// Static reference data: 25 courses, 10 resources.
/// Built once at process start, never persisted. The only mutation
/// allowed after construction is the idempotent enrichment pass.

use crate::domain::{
    Course, CourseCategory, CourseId, CourseLevel, Resource, ResourceFilter, ResourceId,
    ResourceType,
};
use crate::enrichment::derive_details;
use crate::errors::CatalogError;

use crate::domain::CourseCategory::{Academic, Skill, Technical};
use crate::domain::CourseLevel::{Advanced, All, Beginner, Intermediate};

// (id, title, category, weeks, level, description)
const COURSE_SEED: [(u32, &str, CourseCategory, u32, CourseLevel, &str); 25] = [
    (1, "Web Development", Technical, 8, Beginner, "HTML, CSS, JavaScript and responsive design."),
    (2, "Python Programming", Technical, 7, Beginner, "Python basics, OOP and problem solving."),
    (3, "Java Programming", Technical, 8, Intermediate, "Core Java and object-oriented concepts."),
    (4, "C Programming", Technical, 6, Beginner, "Structured programming using C."),
    (5, "Data Science Basics", Technical, 10, Beginner, "Introduction to data analysis and visualization."),
    (6, "Machine Learning", Technical, 9, Intermediate, "Supervised and unsupervised learning techniques."),
    (7, "Artificial Intelligence", Technical, 8, Intermediate, "AI concepts and intelligent systems."),
    (8, "Cyber Security", Technical, 6, Beginner, "Cyber threats and security fundamentals."),
    (9, "Cloud Computing", Technical, 7, Beginner, "Cloud models and services."),
    (10, "Mobile App Development", Technical, 8, Intermediate, "Android application development basics."),
    (11, "Data Structures", Academic, 10, Intermediate, "Arrays, stacks, queues, trees and graphs."),
    (12, "Database Management Systems", Academic, 6, Beginner, "SQL, normalization and transactions."),
    (13, "Operating Systems", Academic, 8, Intermediate, "Process management and memory management."),
    (14, "Computer Networks", Academic, 7, Intermediate, "OSI, TCP/IP and networking protocols."),
    (15, "Software Engineering", Academic, 6, Beginner, "SDLC models and testing techniques."),
    (16, "Discrete Mathematics", Academic, 7, Intermediate, "Logic, relations and graph theory."),
    (17, "Compiler Design", Academic, 8, Advanced, "Lexical analysis and parsing."),
    (18, "Theory of Computation", Academic, 6, Advanced, "Automata and formal languages."),
    (19, "Object Oriented Analysis & Design", Academic, 5, Intermediate, "UML and software design principles."),
    (20, "Big Data Analytics", Academic, 9, Intermediate, "Big data tools and analytics."),
    (21, "Communication Skills", Skill, 4, All, "Improve speaking and presentation skills."),
    (22, "Aptitude & Logical Reasoning", Skill, 5, All, "Quantitative aptitude and logic."),
    (23, "Professional Ethics", Skill, 3, All, "Ethics in professional life."),
    (24, "Resume & Interview Skills", Skill, 3, All, "Resume building and interview preparation."),
    (25, "Time Management", Skill, 2, All, "Productivity and planning techniques."),
];

// (id, title, type, subject)
const RESOURCE_SEED: [(u32, &str, ResourceType, &str); 10] = [
    (1, "HTML Lecture Notes", ResourceType::Notes, "Web"),
    (2, "CSS Flexbox Tutorial", ResourceType::Video, "Web"),
    (3, "JavaScript Assignment", ResourceType::Assignment, "Web"),
    (4, "DBMS Question Paper", ResourceType::Paper, "DBMS"),
    (5, "Operating Systems Notes", ResourceType::Notes, "OS"),
    (6, "Python Video Tutorial", ResourceType::Video, "Python"),
    (7, "Data Structures Lab Manual", ResourceType::Notes, "DS"),
    (8, "Aptitude Practice Set", ResourceType::Assignment, "Aptitude"),
    (9, "Computer Networks Notes", ResourceType::Notes, "CN"),
    (10, "Software Engineering Question Bank", ResourceType::Paper, "SE"),
];

/// Read-only course and resource registry.
#[derive(Debug, Clone)]
pub struct Catalog {
    courses: Vec<Course>,
    resources: Vec<Resource>,
}

impl Catalog {
    /// Build the catalog from the seeded course and resource lists.
    /// Courses come back un-enriched.
    pub fn seeded() -> Self {
        let courses = COURSE_SEED
            .iter()
            .map(|&(id, title, category, weeks, level, description)| Course {
                id: CourseId(id),
                title: title.to_string(),
                category,
                duration_weeks: weeks,
                level,
                description: description.to_string(),
                details: None,
            })
            .collect();

        let resources = RESOURCE_SEED
            .iter()
            .map(|&(id, title, kind, subject)| Resource {
                id: ResourceId(id),
                title: title.to_string(),
                kind,
                subject: subject.to_string(),
            })
            .collect();

        Self::from_parts(courses, resources)
    }

    /// Build a catalog from explicit lists (seed data for tests or hosts).
    pub fn from_parts(courses: Vec<Course>, resources: Vec<Resource>) -> Self {
        Self { courses, resources }
    }

    /// Attach derived descriptive fields to every course.
    ///
    /// Pure and deterministic in the base fields, so running it again
    /// rewrites identical values.
    pub fn enrich(&mut self) {
        for course in &mut self.courses {
            course.details = Some(derive_details(course));
        }
    }

    pub fn is_enriched(&self) -> bool {
        self.courses.iter().all(|c| c.details.is_some())
    }

    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    /// Courses in catalog order, optionally restricted to one category.
    pub fn list_courses(&self, category: Option<CourseCategory>) -> Vec<&Course> {
        self.courses
            .iter()
            .filter(|c| category.map_or(true, |cat| c.category == cat))
            .collect()
    }

    /// Resources in catalog order matching `filter`.
    ///
    /// Text search is a case-insensitive substring match on the title,
    /// surrounding whitespace included; blank text disables it.
    pub fn list_resources(&self, filter: &ResourceFilter) -> Vec<&Resource> {
        let needle = filter
            .search_text
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_lowercase);

        self.resources
            .iter()
            .filter(|r| filter.kind.map_or(true, |k| r.kind == k))
            .filter(|r| {
                needle
                    .as_deref()
                    .map_or(true, |n| r.title.to_lowercase().contains(n))
            })
            .collect()
    }

    pub fn get_course(&self, id: CourseId) -> Result<&Course, CatalogError> {
        self.courses
            .iter()
            .find(|c| c.id == id)
            .ok_or(CatalogError::CourseNotFound(id))
    }

    pub fn get_resource(&self, id: ResourceId) -> Result<&Resource, CatalogError> {
        self.resources
            .iter()
            .find(|r| r.id == id)
            .ok_or(CatalogError::ResourceNotFound(id))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}
