/// Portal Kernel v1: Engine
///
/// Top-level orchestrator. Delegates mutation to transitions,
/// validates via invariants.

use crate::domain::{Outcome, SessionState};
use crate::events::Intent;
use crate::invariants::validate_invariants;
use crate::state::create_initial_state;
use crate::transitions::apply_intent;

/// Stateful engine wrapping the pure functional transition layer.
#[derive(Debug, Clone)]
pub struct PortalEngine {
    state: SessionState,
    applied: u64,
}

impl PortalEngine {
    /// Create an engine over an empty session.
    pub fn new() -> Self {
        Self::with_state(create_initial_state())
    }

    /// Create an engine over a hydrated session.
    ///
    /// Panics if `state` breaks an invariant; hydration is expected to
    /// hand over sanitized collections.
    pub fn with_state(state: SessionState) -> Self {
        validate_invariants(&state);
        Self { state, applied: 0 }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Number of intents applied since construction.
    pub fn applied(&self) -> u64 {
        self.applied
    }

    /// Apply a single intent:
    ///   1. Delegate to transitions::apply_intent
    ///   2. Validate invariants on the new state
    ///   3. Store and return
    pub fn apply(&mut self, intent: &Intent) -> Outcome {
        let (new_state, outcome) = apply_intent(&self.state, intent);
        validate_invariants(&new_state);
        self.state = new_state;
        self.applied += 1;
        outcome
    }

    /// Apply an ordered sequence of intents deterministically.
    pub fn apply_sequence(&mut self, intents: &[Intent]) -> Vec<Outcome> {
        intents.iter().map(|i| self.apply(i)).collect()
    }
}

impl Default for PortalEngine {
    fn default() -> Self {
        Self::new()
    }
}
