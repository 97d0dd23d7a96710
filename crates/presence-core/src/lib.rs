//! Presence core: the in-memory presence store, its typing-expiry sweeper,
//! and the error surface shared with the gateway.
//!
//! The store tracks which users are online (reference-counted per
//! connection) and which are typing (timestamped, expired by the sweeper).
//! Both registries sit behind one reader/writer lock so every operation
//! observes a consistent point-in-time view.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here. Store operations
//! are total; the only fallible paths live in the gateway layers and surface
//! as `PresenceError`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod store;
pub mod sweeper;

/// Shared result type.
pub use error::{ClientCode, PresenceError, Result};
pub use store::{PresenceSnapshot, PresenceStore};
pub use sweeper::{ExpirySweeper, SweeperConfig, SweeperState};
