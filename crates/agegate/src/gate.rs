//! Gate decision logic.
//!
//! Deterministic and transport-agnostic: `now` is always injected, storage is
//! behind [`VerificationStore`]. Nothing here performs IO of its own or
//! retries anything.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::store::VerificationStore;

/// Fixed storage key for the persisted expiry value.
pub const STORAGE_KEY: &str = "age_gate.verified_until";

/// Landing route for visitors who decline the age confirmation.
pub const RESTRICTED_ROUTE: &str = "/restricted";

/// Routes that must never trigger the gate, whatever is stored.
const EXEMPT_ROUTES: &[&str] = &[RESTRICTED_ROUTE, "/privacy-policy"];

/// How long one confirmation stays valid.
pub fn verification_validity() -> Duration {
    Duration::days(7)
}

/// What the view should do with the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Block content behind the confirmation overlay.
    Show,
    /// Let the visitor through.
    Hide,
}

/// Evaluate the stored expiry against `now`.
///
/// Returns [`GateDecision::Show`] when the value is absent, unparsable, or
/// already elapsed (`expiry <= now`). An unparsable value is treated exactly
/// like an absent one: the safe failure is to re-prompt, never to grant
/// access.
pub fn check_access(stored: Option<&str>, now: DateTime<Utc>) -> GateDecision {
    let Some(raw) = stored else {
        return GateDecision::Show;
    };
    match raw.trim().parse::<i64>() {
        Ok(expiry_ms) if expiry_ms > now.timestamp_millis() => GateDecision::Hide,
        _ => GateDecision::Show,
    }
}

/// Produce the value to persist after an explicit confirmation:
/// `now + 7 days`, as a decimal epoch-milliseconds string.
pub fn confirm(now: DateTime<Utc>) -> String {
    (now + verification_validity()).timestamp_millis().to_string()
}

/// A declined confirmation navigates to the restricted landing route.
/// No state is mutated.
pub fn deny() -> &'static str {
    RESTRICTED_ROUTE
}

/// Whether a route is on the static allow-list that bypasses the gate.
pub fn is_exempt_route(route: &str) -> bool {
    EXEMPT_ROUTES.contains(&route)
}

/// The gate bound to an injected store.
#[derive(Clone)]
pub struct AgeGate {
    store: Arc<dyn VerificationStore>,
}

impl AgeGate {
    pub fn new(store: Arc<dyn VerificationStore>) -> Self {
        Self { store }
    }

    /// Evaluate the gate for a visit.
    ///
    /// The allow-list is consulted before the stored value: exempt routes
    /// never trigger the check. A stored value that no longer verifies is
    /// cleared to keep storage tidy.
    pub fn status(&self, route: Option<&str>, now: DateTime<Utc>) -> GateDecision {
        if route.is_some_and(is_exempt_route) {
            return GateDecision::Hide;
        }

        let stored = self.store.get();
        let decision = check_access(stored.as_deref(), now);
        if decision == GateDecision::Show && stored.is_some() {
            self.store.clear();
        }
        decision
    }

    /// Persist a fresh confirmation and return the stored value.
    pub fn confirm(&self, now: DateTime<Utc>) -> String {
        let value = confirm(now);
        self.store.set(&value);
        value
    }

    /// Route to navigate to after a declined confirmation.
    pub fn deny(&self) -> &'static str {
        deny()
    }
}
