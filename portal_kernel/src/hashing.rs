/// Portal Kernel v1: Canonical Hashing
///
/// Deterministic canonical serialization + SHA-256 hashing of the
/// session state.
///
/// Rules:
///   - state_version first, then the four collections in fixed order
///   - enrollments and bookmarks keep insertion order (order is state)
///   - ratings and visits sorted by key (BTreeMap order)
///   - UTF-8 JSON, no whitespace

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};

use crate::domain::SessionState;
use crate::STATE_VERSION;

/// Canonical serialization of SessionState to UTF-8 JSON bytes.
pub fn canonical_serialize(state: &SessionState) -> Vec<u8> {
    let obj = build_canonical_value(state);
    serde_json::to_vec(&obj).expect("canonical_serialize: serde_json::to_vec failed")
}

/// SHA-256 of canonical serialization. Lowercase hex string.
pub fn canonical_hash(state: &SessionState) -> String {
    let bytes = canonical_serialize(state);
    let digest = Sha256::digest(&bytes);
    digest
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<String>()
}

/// Build the canonical serde_json::Value in strict field order.
///
/// Field order: state_version, enrolled_courses, bookmarked_resources,
///              course_ratings, page_visits
fn build_canonical_value(state: &SessionState) -> Value {
    let enrolled: Vec<Value> = state
        .enrolled_courses
        .iter()
        .map(|id| Value::Number(id.0.into()))
        .collect();

    let bookmarks: Vec<Value> = state
        .bookmarked_resources
        .iter()
        .map(|id| Value::Number(id.0.into()))
        .collect();

    let mut ratings = Map::new();
    for (course, rating) in &state.course_ratings {
        ratings.insert(course.to_string(), Value::Number(rating.value().into()));
    }

    let mut visits = Map::new();
    for (page, count) in &state.page_visits {
        visits.insert(page.clone(), Value::Number((*count).into()));
    }

    let mut root = Map::new();
    root.insert(
        "state_version".to_string(),
        Value::Number(STATE_VERSION.into()),
    );
    root.insert("enrolled_courses".to_string(), Value::Array(enrolled));
    root.insert("bookmarked_resources".to_string(), Value::Array(bookmarks));
    root.insert("course_ratings".to_string(), Value::Object(ratings));
    root.insert("page_visits".to_string(), Value::Object(visits));

    Value::Object(root)
}
