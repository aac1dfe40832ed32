/// Portal Kernel v1: Catalog Enrichment
///
/// Derives the descriptive course fields shown on detail views.
/// Output depends only on the base record.

use crate::domain::{Assessment, Course, CourseDetails};

const OVERVIEW_SUFFIX: &str =
    " This course is designed with practical examples, real-world use cases, and hands-on activities.";

const INSTRUCTOR_BIO: &str =
    "The instructor has more than 10 years of academic and industry experience in this subject.";

const CERTIFICATE: &str = "Yes, a course completion certificate will be provided.";

const WEEK_PLAN: [&str; 8] = [
    "Week 1: Introduction & Fundamentals",
    "Week 2: Core Concepts",
    "Week 3: Hands-on Practice",
    "Week 4: Advanced Topics",
    "Week 5: Case Studies",
    "Week 6: Mini Project",
    "Week 7: Revision & Assessment",
    "Week 8: Final Evaluation",
];

const TOOLS: [&str; 4] = [
    "Visual Studio Code",
    "Git & GitHub",
    "Online IDE",
    "Learning Management System",
];

const CAREER_OUTCOMES: [&str; 4] = [
    "Improve subject knowledge",
    "Enhance practical skills",
    "Placement readiness",
    "Industry exposure",
];

/// Build the detail record for a course.
pub fn derive_details(course: &Course) -> CourseDetails {
    CourseDetails {
        overview: format!("{}{}", course.description, OVERVIEW_SUFFIX),
        instructor_bio: INSTRUCTOR_BIO.to_string(),
        week_plan: to_owned_list(&WEEK_PLAN),
        tools: to_owned_list(&TOOLS),
        assessment: Assessment {
            assignments: "30%".to_string(),
            quiz: "20%".to_string(),
            project: "50%".to_string(),
        },
        certificate: CERTIFICATE.to_string(),
        career_outcomes: to_owned_list(&CAREER_OUTCOMES),
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
