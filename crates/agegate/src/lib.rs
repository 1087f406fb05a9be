//! Age-verification gate.
//!
//! Decides, per visitor, whether content stays blocked behind an
//! age-confirmation overlay. The decision logic is pure and deterministic
//! (`now` is always injected); persistence of the single verification value
//! goes through the [`VerificationStore`] seam so the gate can be tested
//! without any real storage.

pub mod gate;
pub mod store;

pub use gate::{
    check_access, confirm, deny, is_exempt_route, AgeGate, GateDecision, RESTRICTED_ROUTE,
    STORAGE_KEY,
};
pub use store::{FileVerificationStore, InMemoryVerificationStore, VerificationStore};
