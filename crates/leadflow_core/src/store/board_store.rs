//! Whole-board persistence over the state store.
//!
//! # Responsibility
//! - Serialize the complete board under a single storage key.
//! - Reject corrupt or inconsistent persisted snapshots on load.
//!
//! # Invariants
//! - The board is always written as one JSON payload; no partial updates.
//! - Loaded snapshots pass `Board::verify_integrity` before being returned.
//! - Saves roll the retention window forward.

use crate::board::Board;
use crate::store::state_store::{StateStore, StoreError, StoreResult, DEFAULT_RETENTION_MS};

/// Storage key holding the serialized board.
pub const BOARD_KEY: &str = "leadflow-board";

/// Board snapshot reader/writer bound to one state store.
pub struct BoardStore<S: StateStore> {
    store: S,
    retention_ms: i64,
}

impl<S: StateStore> BoardStore<S> {
    /// Creates a board store with the default 30-day rolling retention.
    pub fn new(store: S) -> Self {
        Self::with_retention(store, DEFAULT_RETENTION_MS)
    }

    /// Creates a board store with a caller-chosen retention window.
    pub fn with_retention(store: S, retention_ms: i64) -> Self {
        Self {
            store,
            retention_ms,
        }
    }

    /// Persists the whole board, rolling the expiry window forward.
    pub fn save(&self, board: &Board) -> StoreResult<()> {
        let payload = serde_json::to_string(board).map_err(|err| StoreError::InvalidPayload {
            key: BOARD_KEY.to_string(),
            message: err.to_string(),
        })?;
        self.store.put(BOARD_KEY, &payload, Some(self.retention_ms))
    }

    /// Loads the persisted board, or `None` when absent or expired.
    ///
    /// # Errors
    /// - `InvalidPayload` when the snapshot fails to decode or its column
    ///   lists disagree with its lead map.
    pub fn load(&self) -> StoreResult<Option<Board>> {
        let payload = match self.store.get(BOARD_KEY)? {
            Some(payload) => payload,
            None => return Ok(None),
        };

        let board: Board =
            serde_json::from_str(&payload).map_err(|err| StoreError::InvalidPayload {
                key: BOARD_KEY.to_string(),
                message: err.to_string(),
            })?;

        board
            .verify_integrity()
            .map_err(|err| StoreError::InvalidPayload {
                key: BOARD_KEY.to_string(),
                message: err.to_string(),
            })?;

        Ok(Some(board))
    }

    /// Drops the persisted snapshot.
    pub fn clear(&self) -> StoreResult<()> {
        self.store.remove(BOARD_KEY)
    }
}
