//! Lead record, pipeline status and priority types.
//!
//! # Responsibility
//! - Define the canonical lead shape shared by board, store and services.
//! - Provide constructor and validation helpers for write paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another lead.
//! - `status` always names one of the four pipeline columns.
//! - `updated_at >= created_at` (both epoch milliseconds).

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for every lead on the board.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type LeadId = Uuid;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

/// Pipeline stage a lead currently sits in.
///
/// Each variant corresponds to exactly one board column, in pipeline order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Freshly captured, no outreach yet.
    New,
    /// First contact has been made.
    Contacted,
    /// Terms are being negotiated.
    Negotiation,
    /// Deal closed (won or lost, the board does not distinguish).
    Closed,
}

impl Status {
    /// All statuses in pipeline order. Column iteration relies on this order.
    pub const ALL: [Status; 4] = [
        Status::New,
        Status::Contacted,
        Status::Negotiation,
        Status::Closed,
    ];

    /// Human-readable column title.
    pub fn title(self) -> &'static str {
        match self {
            Status::New => "New",
            Status::Contacted => "Contacted",
            Status::Negotiation => "In Negotiation",
            Status::Closed => "Closed",
        }
    }

    /// Stable lowercase key used in storage and log events.
    pub fn key(self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Contacted => "contacted",
            Status::Negotiation => "negotiation",
            Status::Closed => "closed",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Follow-up urgency assigned by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let key = match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        };
        f.write_str(key)
    }
}

/// Canonical lead record.
///
/// Contact fields other than `name` may be empty strings; the original data
/// entry form treats them as optional free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    /// Stable global ID used for column membership and lookups.
    pub id: LeadId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    /// Where the lead came from (referral, web form, cold call, ...).
    pub source: String,
    pub notes: String,
    pub priority: Priority,
    pub status: Status,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Stamped on every mutation.
    pub updated_at: i64,
}

/// Create-request shape: everything the user supplies for a new lead.
///
/// Identity and timestamps are assigned by the board on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub source: String,
    pub notes: String,
    pub priority: Priority,
    pub status: Status,
}

/// Validation failure for lead write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadValidationError {
    /// `name` is empty or whitespace-only.
    EmptyName,
    /// `email` is non-empty but not shaped like an address.
    InvalidEmail(String),
    /// `updated_at` precedes `created_at`.
    TimestampOrder { created_at: i64, updated_at: i64 },
}

impl Display for LeadValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "lead name cannot be empty"),
            Self::InvalidEmail(value) => write!(f, "invalid lead email: `{value}`"),
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "lead updated_at {updated_at} precedes created_at {created_at}"
            ),
        }
    }
}

impl Error for LeadValidationError {}

/// Returns current wall-clock time as unix epoch milliseconds.
///
/// Saturates to 0 for clocks set before the epoch instead of panicking.
pub fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

impl Lead {
    /// Materializes a lead from user input with a generated stable ID.
    ///
    /// # Invariants
    /// - `created_at == updated_at` at creation time.
    pub fn from_new(new: NewLead) -> Self {
        let now = now_epoch_ms();
        Self {
            id: Uuid::new_v4(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            company: new.company,
            source: new.source,
            notes: new.notes,
            priority: new.priority,
            status: new.status,
            created_at: now,
            updated_at: now,
        }
    }

    /// Checks the record against model invariants.
    ///
    /// # Errors
    /// - `EmptyName` when the name is blank.
    /// - `InvalidEmail` when a non-empty email has no address shape.
    /// - `TimestampOrder` when `updated_at < created_at`.
    pub fn validate(&self) -> Result<(), LeadValidationError> {
        if self.name.trim().is_empty() {
            return Err(LeadValidationError::EmptyName);
        }
        validate_email_shape(&self.email)?;
        if self.updated_at < self.created_at {
            return Err(LeadValidationError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }

    /// Stamps `updated_at` with the current time.
    pub fn touch(&mut self) {
        self.updated_at = now_epoch_ms();
    }
}

/// Validates an optional email field: empty passes, non-empty must look like
/// `local@domain.tld`.
pub(crate) fn validate_email_shape(email: &str) -> Result<(), LeadValidationError> {
    if email.is_empty() || EMAIL_RE.is_match(email) {
        Ok(())
    } else {
        Err(LeadValidationError::InvalidEmail(email.to_string()))
    }
}
