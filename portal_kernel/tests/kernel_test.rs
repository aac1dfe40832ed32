/// Kernel tests: catalog lookups, transitions, invariants and
/// fingerprint determinism. No storage involved.

use std::collections::BTreeMap;

use portal_kernel::catalog::Catalog;
use portal_kernel::dashboard::{dashboard_stats, learning_summary};
use portal_kernel::domain::{
    Collection, CourseCategory, CourseId, Outcome, Rating, ResourceFilter, ResourceId,
    ResourceType, SessionState,
};
use portal_kernel::engine::PortalEngine;
use portal_kernel::errors::{CatalogError, RatingError};
use portal_kernel::events::Intent;
use portal_kernel::hashing::canonical_hash;
use portal_kernel::invariants::try_validate_invariants;
use portal_kernel::state::state_from_parts;
use portal_kernel::transitions::apply_intent;

fn rating(n: u8) -> Rating {
    Rating::try_from(n).expect("valid rating")
}

// ─────────────────────────────────────────────────────────────
// Catalog
// ─────────────────────────────────────────────────────────────

#[test]
fn seeded_catalog_sizes() {
    let catalog = Catalog::seeded();
    assert_eq!(catalog.courses().len(), 25);
    assert_eq!(catalog.resources().len(), 10);
}

#[test]
fn technical_filter_returns_ten_in_order() {
    let catalog = Catalog::seeded();
    let technical = catalog.list_courses(Some(CourseCategory::Technical));
    let ids: Vec<u32> = technical.iter().map(|c| c.id.0).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
    assert!(technical.iter().all(|c| c.category == CourseCategory::Technical));
}

#[test]
fn category_counts() {
    let catalog = Catalog::seeded();
    assert_eq!(catalog.list_courses(Some(CourseCategory::Academic)).len(), 10);
    assert_eq!(catalog.list_courses(Some(CourseCategory::Skill)).len(), 5);
    assert_eq!(catalog.list_courses(None).len(), 25);
}

#[test]
fn unknown_course_is_not_found() {
    let catalog = Catalog::seeded();
    assert_eq!(
        catalog.get_course(CourseId(999)).unwrap_err(),
        CatalogError::CourseNotFound(CourseId(999))
    );
    assert!(catalog.get_resource(ResourceId(0)).is_err());
}

#[test]
fn resource_search_is_case_insensitive_and_combines_with_type() {
    let catalog = Catalog::seeded();

    let notes = catalog.list_resources(&ResourceFilter {
        kind: Some(ResourceType::Notes),
        search_text: None,
    });
    let ids: Vec<u32> = notes.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 5, 7, 9]);

    let search = catalog.list_resources(&ResourceFilter {
        kind: None,
        search_text: Some("NOTES".to_string()),
    });
    let ids: Vec<u32> = search.iter().map(|r| r.id.0).collect();
    assert_eq!(ids, vec![1, 5, 9]);

    let both = catalog.list_resources(&ResourceFilter {
        kind: Some(ResourceType::Video),
        search_text: Some("python".to_string()),
    });
    assert_eq!(both.len(), 1);
    assert_eq!(both[0].id, ResourceId(6));
}

#[test]
fn search_text_whitespace_is_part_of_the_match() {
    let catalog = Catalog::seeded();
    let search = |text: &str| -> Vec<u32> {
        catalog
            .list_resources(&ResourceFilter {
                kind: None,
                search_text: Some(text.to_string()),
            })
            .iter()
            .map(|r| r.id.0)
            .collect()
    };

    assert_eq!(search("html"), vec![1]);
    assert!(search(" html").is_empty());
    assert_eq!(search(" notes"), vec![1, 5, 9]);
}

#[test]
fn blank_search_text_is_no_filter() {
    let catalog = Catalog::seeded();
    let all = catalog.list_resources(&ResourceFilter {
        kind: None,
        search_text: Some("   ".to_string()),
    });
    assert_eq!(all.len(), 10);
}

#[test]
fn enrichment_is_idempotent() {
    let mut catalog = Catalog::seeded();
    assert!(!catalog.is_enriched());

    catalog.enrich();
    assert!(catalog.is_enriched());
    let first = catalog.courses().to_vec();

    catalog.enrich();
    assert_eq!(catalog.courses(), first.as_slice());

    let web = catalog.get_course(CourseId(1)).expect("course 1");
    let details = web.details.as_ref().expect("enriched");
    assert!(details.overview.starts_with("HTML, CSS, JavaScript and responsive design."));
    assert_eq!(details.week_plan.len(), 8);
    assert_eq!(details.assessment.project, "50%");
}

// ─────────────────────────────────────────────────────────────
// Ratings
// ─────────────────────────────────────────────────────────────

#[test]
fn rating_scale_is_enforced() {
    assert!(Rating::try_from(0).is_err());
    assert!(Rating::try_from(6).is_err());
    assert_eq!(Rating::parse_selection("").unwrap(), None);
    assert_eq!(Rating::parse_selection(" 4 ").unwrap(), Some(rating(4)));
    assert_eq!(
        Rating::parse_selection("x").unwrap_err(),
        RatingError::NotANumber("x".to_string())
    );
}

// ─────────────────────────────────────────────────────────────
// Transitions
// ─────────────────────────────────────────────────────────────

#[test]
fn enroll_twice_equals_once() {
    let mut engine = PortalEngine::new();
    assert_eq!(engine.apply(&Intent::Enroll(CourseId(3))), Outcome::Enrolled);
    let once = engine.state().clone();
    assert_eq!(engine.apply(&Intent::Enroll(CourseId(3))), Outcome::AlreadyEnrolled);
    assert_eq!(engine.state(), &once);
    assert_eq!(engine.state().enrolled_courses, vec![CourseId(3)]);
}

#[test]
fn toggle_bookmark_is_an_involution() {
    let mut engine = PortalEngine::new();
    engine.apply(&Intent::ToggleBookmark(ResourceId(1)));
    let before = engine.state().clone();

    assert_eq!(engine.apply(&Intent::ToggleBookmark(ResourceId(4))), Outcome::Bookmarked);
    assert_eq!(
        engine.apply(&Intent::ToggleBookmark(ResourceId(4))),
        Outcome::BookmarkRemoved
    );
    assert_eq!(engine.state(), &before);
}

#[test]
fn rating_is_last_write_wins() {
    let mut engine = PortalEngine::new();
    let course = CourseId(7);
    engine.apply(&Intent::Rate { course, rating: Some(rating(5)) });
    let outcome = engine.apply(&Intent::Rate { course, rating: Some(rating(2)) });

    assert_eq!(outcome, Outcome::Rated { previous: Some(rating(5)) });
    assert_eq!(engine.state().course_ratings.len(), 1);
    assert_eq!(engine.state().course_ratings[&course], rating(2));
}

#[test]
fn empty_rating_is_ignored() {
    let mut engine = PortalEngine::new();
    let outcome = engine.apply(&Intent::Rate { course: CourseId(1), rating: None });
    assert_eq!(outcome, Outcome::RatingIgnored);
    assert!(!outcome.changed());
    assert!(engine.state().course_ratings.is_empty());
}

#[test]
fn visits_accumulate() {
    let mut engine = PortalEngine::new();
    for n in 1..=5u64 {
        let outcome = engine.apply(&Intent::RecordVisit("x".to_string()));
        assert_eq!(outcome, Outcome::Visited { count: n });
    }
    assert_eq!(engine.state().page_visits["x"], 5);
    assert_eq!(engine.applied(), 5);
}

#[test]
fn blank_page_counts_as_index() {
    let (state, _) = apply_intent(&SessionState::default(), &Intent::RecordVisit(String::new()));
    assert_eq!(state.page_visits["index.html"], 1);
}

#[test]
fn apply_intent_does_not_mutate_input() {
    let original = SessionState::default();
    let (next, _) = apply_intent(&original, &Intent::Enroll(CourseId(1)));
    assert!(original.enrolled_courses.is_empty());
    assert_eq!(next.enrolled_courses, vec![CourseId(1)]);
}

#[test]
fn intents_name_their_collection() {
    assert_eq!(Intent::Enroll(CourseId(1)).collection(), Collection::Enrollments);
    assert_eq!(Intent::ToggleBookmark(ResourceId(1)).collection(), Collection::Bookmarks);
    assert_eq!(
        Intent::Rate { course: CourseId(1), rating: None }.collection(),
        Collection::Ratings
    );
    assert_eq!(Intent::RecordVisit("a".into()).collection(), Collection::Visits);
}

// ─────────────────────────────────────────────────────────────
// Invariants
// ─────────────────────────────────────────────────────────────

#[test]
fn duplicate_enrollment_violates_invariant() {
    let state = SessionState {
        enrolled_courses: vec![CourseId(1), CourseId(1)],
        ..Default::default()
    };
    let err = try_validate_invariants(&state).unwrap_err();
    assert!(err.contains("unique_enrollments"));
}

#[test]
#[should_panic(expected = "Invariant violation")]
fn engine_rejects_broken_state() {
    let state = SessionState {
        bookmarked_resources: vec![ResourceId(2), ResourceId(2)],
        ..Default::default()
    };
    PortalEngine::with_state(state);
}

#[test]
fn state_from_parts_collapses_duplicates() {
    let state = state_from_parts(
        vec![CourseId(2), CourseId(1), CourseId(2)],
        vec![ResourceId(5), ResourceId(5)],
        BTreeMap::new(),
        BTreeMap::new(),
    );
    assert_eq!(state.enrolled_courses, vec![CourseId(2), CourseId(1)]);
    assert_eq!(state.bookmarked_resources, vec![ResourceId(5)]);
    assert!(try_validate_invariants(&state).is_ok());
}

// ─────────────────────────────────────────────────────────────
// Fingerprint + dashboard
// ─────────────────────────────────────────────────────────────

#[test]
fn hash_is_deterministic_and_order_sensitive() {
    let intents = vec![
        Intent::Enroll(CourseId(1)),
        Intent::Enroll(CourseId(2)),
        Intent::ToggleBookmark(ResourceId(3)),
        Intent::Rate { course: CourseId(1), rating: Some(rating(4)) },
        Intent::RecordVisit("courses.html".to_string()),
    ];

    let mut a = PortalEngine::new();
    a.apply_sequence(&intents);
    let mut b = PortalEngine::new();
    b.apply_sequence(&intents);
    assert_eq!(canonical_hash(a.state()), canonical_hash(b.state()));

    let mut c = PortalEngine::new();
    c.apply(&Intent::Enroll(CourseId(2)));
    c.apply(&Intent::Enroll(CourseId(1)));
    let mut d = PortalEngine::new();
    d.apply(&Intent::Enroll(CourseId(1)));
    d.apply(&Intent::Enroll(CourseId(2)));
    assert_ne!(canonical_hash(c.state()), canonical_hash(d.state()));
}

#[test]
fn dashboard_and_learning_summary() {
    let catalog = Catalog::seeded();
    let mut engine = PortalEngine::new();
    engine.apply_sequence(&[
        Intent::Enroll(CourseId(11)),
        Intent::Enroll(CourseId(999)),
        Intent::ToggleBookmark(ResourceId(2)),
        Intent::Rate { course: CourseId(11), rating: Some(rating(3)) },
        Intent::RecordVisit("index.html".to_string()),
    ]);

    let stats = dashboard_stats(&catalog, engine.state());
    assert_eq!(stats.total_courses, 25);
    assert_eq!(stats.total_resources, 10);
    assert_eq!(stats.enrolled_courses, 2);
    assert_eq!(stats.bookmarked_resources, 1);
    assert_eq!(stats.rated_courses, 1);
    assert_eq!(stats.visits["index.html"], 1);

    let summary = learning_summary(&catalog, engine.state());
    assert_eq!(summary.enrolled.len(), 1);
    assert_eq!(summary.enrolled[0].title, "Data Structures");
    assert_eq!(summary.bookmarked[0].title, "CSS Flexbox Tutorial");
    assert_eq!(summary.rated[0].1, rating(3));
}
