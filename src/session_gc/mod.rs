//! Session lifecycle management and garbage collection.
//!
//! This module holds the three collaborating stores and the background
//! collector that keeps them consistent:
//! - **Store (`store.rs`)**: concurrent id -> session map shared with
//!   request-handling tasks.
//! - **Factory (`factory.rs`)**: creation bookkeeping with its own live-id
//!   index, kept in sync by explicit removal calls.
//! - **Persistence (`persistence.rs`)**: per-session files under the
//!   configured save path.
//! - **Collector (`collector.rs`)**: the wake/sweep daemon that evicts
//!   expired sessions across all three.

pub mod collector;
pub mod factory;
pub mod persistence;
pub mod session;
pub mod store;

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod session_tests;

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod store_tests;

#[cfg(test)]
#[path = "tests/factory_tests.rs"]
mod factory_tests;

#[cfg(test)]
#[path = "tests/persistence_tests.rs"]
mod persistence_tests;

#[cfg(test)]
#[path = "tests/collector_tests.rs"]
mod collector_tests;

pub use collector::GarbageCollector;
pub use factory::SessionFactory;
pub use session::{Session, SessionState};
pub use store::SessionStore;
