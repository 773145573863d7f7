//! Local persistence: key-value store contracts and board snapshots.
//!
//! # Responsibility
//! - Provide the local storage seam used by session and board persistence.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - Every write with a retention re-stamps the entry's expiry (rolling).
//! - Expired entries are never observable through reads.

pub mod board_store;
pub mod state_store;

pub use board_store::{BoardStore, BOARD_KEY};
pub use state_store::{
    SqliteStateStore, StateStore, StoreError, StoreResult, DEFAULT_RETENTION_MS,
};
