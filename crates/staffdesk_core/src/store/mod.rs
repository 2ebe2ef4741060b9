//! Reactive state stores.
//!
//! # Responsibility
//! - Hold in-memory client state and keep storage synchronized with it.
//! - Expose mutation operations with defined merge/replace/delete semantics.
//!
//! # Invariants
//! - Each store is constructed once per process and self-hydrates from the
//!   persistence adapter at construction.
//! - Every mutation method ends with an explicit synchronous persist call;
//!   there is no implicit reactivity.
//! - No store calls another; each owns its storage key(s) exclusively.

pub mod records;
pub mod session;
pub mod theme;
