//! Authentication stubs and session persistence.
//!
//! # Responsibility
//! - Validate the single demo credential and mint a session user.
//! - Persist the session under `leadflow-user` with rolling 30-day expiry.
//! - Gate board access behind an active session.
//!
//! # Invariants
//! - No credential ever leaves this module or reaches the store or logs.
//! - Session expiry is enforced by the state store, not re-checked here.

use crate::model::lead::validate_email_shape;
use crate::store::state_store::{StateStore, StoreError, StoreResult, DEFAULT_RETENTION_MS};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Storage key holding the serialized session user.
pub const USER_KEY: &str = "leadflow-user";

/// The only credential the stub accepts on login.
const DEMO_EMAIL: &str = "user@example.com";
const DEMO_PASSWORD: &str = "password";
const DEMO_NAME: &str = "Demo User";

pub type AuthResult<T> = Result<T, AuthError>;

/// Signed-in user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Authentication and session error.
#[derive(Debug)]
pub enum AuthError {
    /// Email/password pair does not match the demo credential.
    InvalidCredentials,
    /// No live session; the caller must log in first.
    NotAuthenticated,
    /// Registration input is unusable (named field is blank or malformed).
    InvalidInput(&'static str),
    Store(StoreError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid email or password"),
            Self::NotAuthenticated => write!(f, "no active session"),
            Self::InvalidInput(field) => write!(f, "invalid registration input: {field}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for AuthError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Session manager bound to one state store.
pub struct AuthService<S: StateStore> {
    store: S,
    retention_ms: i64,
}

impl<S: StateStore> AuthService<S> {
    /// Creates a service with the default 30-day rolling session retention.
    pub fn new(store: S) -> Self {
        Self::with_retention(store, DEFAULT_RETENTION_MS)
    }

    /// Creates a service with a caller-chosen session retention window.
    pub fn with_retention(store: S, retention_ms: i64) -> Self {
        Self {
            store,
            retention_ms,
        }
    }

    /// Validates the demo credential and opens a persisted session.
    ///
    /// # Errors
    /// - `InvalidCredentials` on any other email/password pair.
    pub fn login(&self, email: &str, password: &str) -> AuthResult<User> {
        if email != DEMO_EMAIL || password != DEMO_PASSWORD {
            warn!("event=login module=auth status=denied error_code=invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        }

        let user = User {
            id: "1".to_string(),
            name: DEMO_NAME.to_string(),
            email: DEMO_EMAIL.to_string(),
        };
        self.persist_session(&user)?;
        info!("event=login module=auth status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Registers a new user and opens a persisted session.
    ///
    /// Stub semantics: any well-formed input is accepted; nothing but the
    /// resulting session user is stored.
    pub fn register(&self, name: &str, email: &str, password: &str) -> AuthResult<User> {
        if name.trim().is_empty() {
            return Err(AuthError::InvalidInput("name"));
        }
        if email.is_empty() || validate_email_shape(email).is_err() {
            return Err(AuthError::InvalidInput("email"));
        }
        if password.is_empty() {
            return Err(AuthError::InvalidInput("password"));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            email: email.to_string(),
        };
        self.persist_session(&user)?;
        info!("event=register module=auth status=ok user_id={}", user.id);
        Ok(user)
    }

    /// Returns the live session user, or `None` when absent or expired.
    pub fn current_user(&self) -> AuthResult<Option<User>> {
        let payload = match self.store.get(USER_KEY)? {
            Some(payload) => payload,
            None => return Ok(None),
        };

        let user = serde_json::from_str(&payload).map_err(|err| {
            AuthError::Store(StoreError::InvalidPayload {
                key: USER_KEY.to_string(),
                message: err.to_string(),
            })
        })?;
        Ok(Some(user))
    }

    /// Returns the live session user or refuses access.
    ///
    /// Board-mutating callers go through this gate.
    pub fn require_session(&self) -> AuthResult<User> {
        self.current_user()?.ok_or(AuthError::NotAuthenticated)
    }

    /// Closes the session and clears it from storage.
    pub fn logout(&self) -> AuthResult<()> {
        self.store.remove(USER_KEY)?;
        info!("event=logout module=auth status=ok");
        Ok(())
    }

    fn persist_session(&self, user: &User) -> StoreResult<()> {
        let payload = serde_json::to_string(user).map_err(|err| StoreError::InvalidPayload {
            key: USER_KEY.to_string(),
            message: err.to_string(),
        })?;
        self.store.put(USER_KEY, &payload, Some(self.retention_ms))
    }
}
