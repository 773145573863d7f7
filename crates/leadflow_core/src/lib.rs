//! Core domain logic for LeadFlow.
//! This crate is the single source of truth for board business invariants.

pub mod auth;
pub mod board;
pub mod db;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use auth::{AuthError, AuthResult, AuthService, User, USER_KEY};
pub use board::filter::LeadFilter;
pub use board::{Board, BoardError, BoardIntegrityError, BoardResult, Column, MoveRequest};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::lead::{Lead, LeadId, LeadValidationError, NewLead, Priority, Status};
pub use service::board_service::{BoardService, ServiceError, ServiceResult};
pub use store::{
    BoardStore, SqliteStateStore, StateStore, StoreError, StoreResult, BOARD_KEY,
    DEFAULT_RETENTION_MS,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
