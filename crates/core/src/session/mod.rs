//! Session lifecycle subsystem.
//!
//! Centralizes the durable per-target authentication state: the captured
//! record schema, the file-backed store with whole-document replace
//! semantics, and the pure freshness checks that decide whether a stored
//! record can still be trusted.

/// Captured session snapshot schema.
pub mod record;
/// File-backed session store.
pub mod store;
/// Pure freshness/shape checks over session records.
pub mod validity;

pub use record::{Credential, ObservedContext, SessionRecord, Viewport};
pub use store::SessionStore;
pub use validity::{DEFAULT_MAX_AGE_HOURS, default_max_age, is_valid};
