//! Portal session: the explicit context object the Presentation Layer
//! talks to.
//!
//! Owns the catalog, the kernel engine and the durable store. A Portal
//! only exists after hydration, which is how hydrate-before-read is
//! guaranteed.
//!
//! Apply-then-flush order for every mutator:
//!   1. engine.apply(intent)            (total, always succeeds)
//!   2. flush the one touched collection, only if the outcome changed it
//!
//! A failed flush is logged by the store layer; the in-memory mutation
//! stands for the rest of the process.

use std::collections::BTreeMap;

use tracing::{debug, info, warn};

use portal_kernel::catalog::Catalog;
use portal_kernel::dashboard::{dashboard_stats, learning_summary};
use portal_kernel::domain::{
    Collection, Course, CourseCategory, CourseDetails, CourseId, DashboardStats,
    LearningSummary, Outcome, Rating, Resource, ResourceFilter, ResourceId, SessionState,
};
use portal_kernel::engine::PortalEngine;
use portal_kernel::errors::CatalogError;
use portal_kernel::events::Intent;
use portal_kernel::hashing::canonical_hash;

use crate::config::StorageKeys;
use crate::hydrate::{hydrate, HydrationReport};
use crate::store::{DurableStore, DurableStoreExt};

/// Result of a mutator: what happened, and whether it reached the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Applied {
    pub outcome: Outcome,
    /// `false` when the flush failed or was skipped because nothing changed.
    pub persisted: bool,
}

impl Applied {
    pub fn notice(&self) -> &'static str {
        self.outcome.notice()
    }
}

/// Notice for a simulated download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadNotice {
    pub resource: ResourceId,
    pub message: String,
}

pub struct Portal {
    catalog: Catalog,
    engine: PortalEngine,
    store: Box<dyn DurableStore>,
    keys: StorageKeys,
    hydration: HydrationReport,
}

impl Portal {
    /// Hydrate a session from `store` and enrich the catalog.
    /// Does not count a page visit; see `start`.
    pub fn open(store: Box<dyn DurableStore>, keys: StorageKeys) -> Self {
        Self::open_with_catalog(store, keys, Catalog::seeded())
    }

    /// Same as `open` with an explicit catalog.
    pub fn open_with_catalog(
        store: Box<dyn DurableStore>,
        keys: StorageKeys,
        mut catalog: Catalog,
    ) -> Self {
        if !catalog.is_enriched() {
            catalog.enrich();
        }

        let (state, hydration) = hydrate(store.as_ref(), &keys);

        Self {
            catalog,
            engine: PortalEngine::with_state(state),
            store,
            keys,
            hydration,
        }
    }

    /// Full page-load sequence: hydrate, then record one visit of `page`.
    pub fn start(store: Box<dyn DurableStore>, keys: StorageKeys, page: &str) -> Self {
        let mut portal = Self::open(store, keys);
        portal.record_visit(page);
        info!(page, "portal started");
        portal
    }

    /// Give the store back, e.g. to re-hydrate it in a fresh Portal.
    pub fn into_store(self) -> Box<dyn DurableStore> {
        self.store
    }

    pub fn store(&self) -> &dyn DurableStore {
        self.store.as_ref()
    }

    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    pub fn hydration_report(&self) -> &HydrationReport {
        &self.hydration
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &SessionState {
        self.engine.state()
    }

    /// Fingerprint of the current session state.
    pub fn state_hash(&self) -> String {
        canonical_hash(self.engine.state())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn list_courses(&self, category: Option<CourseCategory>) -> Vec<&Course> {
        self.catalog.list_courses(category)
    }

    pub fn list_resources(&self, filter: &ResourceFilter) -> Vec<&Resource> {
        self.catalog.list_resources(filter)
    }

    pub fn get_course(&self, id: CourseId) -> Result<&Course, CatalogError> {
        self.catalog.get_course(id)
    }

    pub fn get_resource(&self, id: ResourceId) -> Result<&Resource, CatalogError> {
        self.catalog.get_resource(id)
    }

    /// Enriched detail record for the course view.
    pub fn course_details(&self, id: CourseId) -> Result<&CourseDetails, CatalogError> {
        let course = self.catalog.get_course(id)?;
        course
            .details
            .as_ref()
            .ok_or(CatalogError::CourseNotFound(id))
    }

    pub fn is_enrolled(&self, id: CourseId) -> bool {
        self.state().enrolled_courses.contains(&id)
    }

    pub fn is_bookmarked(&self, id: ResourceId) -> bool {
        self.state().bookmarked_resources.contains(&id)
    }

    pub fn rating_of(&self, id: CourseId) -> Option<Rating> {
        self.state().course_ratings.get(&id).copied()
    }

    pub fn visits(&self) -> &BTreeMap<String, u64> {
        &self.state().page_visits
    }

    pub fn dashboard_stats(&self) -> DashboardStats {
        dashboard_stats(&self.catalog, self.engine.state())
    }

    pub fn learning_summary(&self) -> LearningSummary<'_> {
        learning_summary(&self.catalog, self.engine.state())
    }

    /// Downloads are simulated: a notice, no I/O.
    pub fn download(&self, id: ResourceId) -> Result<DownloadNotice, CatalogError> {
        let resource = self.catalog.get_resource(id)?;
        Ok(DownloadNotice {
            resource: resource.id,
            message: format!("Downloading resource ID: {}", resource.id),
        })
    }

    // ── Mutators ──────────────────────────────────────────────

    /// Add `id` to the enrollment record. Enrolling twice is a no-op
    /// that reports `AlreadyEnrolled`.
    pub fn enroll(&mut self, id: CourseId) -> Applied {
        if self.catalog.get_course(id).is_err() {
            warn!(course = %id, "enrolling in a course missing from the catalog");
        }
        self.apply(Intent::Enroll(id))
    }

    pub fn toggle_bookmark(&mut self, id: ResourceId) -> Applied {
        self.apply(Intent::ToggleBookmark(id))
    }

    /// Overwrite the rating of `course`. `None` is an empty selection.
    pub fn rate(&mut self, course: CourseId, rating: Option<Rating>) -> Applied {
        self.apply(Intent::Rate { course, rating })
    }

    /// Rate from a raw selection value such as "4" or "".
    /// Anything that is not a 1-5 integer is ignored.
    pub fn rate_selection(&mut self, course: CourseId, raw: &str) -> Applied {
        let rating = match Rating::parse_selection(raw) {
            Ok(r) => r,
            Err(e) => {
                debug!(course = %course, error = %e, "ignoring rating selection");
                None
            }
        };
        self.rate(course, rating)
    }

    pub fn record_visit(&mut self, page: &str) -> Applied {
        self.apply(Intent::RecordVisit(page.to_string()))
    }

    fn apply(&mut self, intent: Intent) -> Applied {
        let outcome = self.engine.apply(&intent);
        debug!(intent = intent.name(), outcome = ?outcome, "applied");

        let persisted = if outcome.changed() {
            self.flush(intent.collection())
        } else {
            false
        };

        Applied { outcome, persisted }
    }

    /// Write one collection back under its key. Other keys are untouched.
    fn flush(&mut self, collection: Collection) -> bool {
        let key = self.keys.key_for(collection).to_string();
        let state = self.engine.state();
        match collection {
            Collection::Enrollments => {
                let ids: Vec<u32> = state.enrolled_courses.iter().map(|c| c.0).collect();
                self.store.set(&key, &ids)
            }
            Collection::Bookmarks => {
                let ids: Vec<u32> = state.bookmarked_resources.iter().map(|r| r.0).collect();
                self.store.set(&key, &ids)
            }
            Collection::Ratings => {
                let ratings: BTreeMap<String, u8> = state
                    .course_ratings
                    .iter()
                    .map(|(c, r)| (c.to_string(), r.value()))
                    .collect();
                self.store.set(&key, &ratings)
            }
            Collection::Visits => self.store.set(&key, &state.page_visits),
        }
    }
}
