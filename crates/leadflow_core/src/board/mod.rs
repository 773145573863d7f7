//! Pipeline board state and mutation operations.
//!
//! # Responsibility
//! - Own the two denormalized views of board state: per-status ordered id
//!   lists and the id-to-lead map.
//! - Keep both views consistent under add/update/delete/move operations.
//!
//! # Invariants
//! - Every id listed in a column exists in the lead map with matching status.
//! - Every lead in the map is listed exactly once, in its status column.
//! - Column order inside a list is user-controlled insertion/drag order.

pub mod filter;

use crate::model::lead::{Lead, LeadId, LeadValidationError, NewLead, Priority, Status};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BoardResult<T> = Result<T, BoardError>;

/// Board mutation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    Validation(LeadValidationError),
    NotFound(LeadId),
    /// A drag position referenced a slot outside the column list.
    IndexOutOfRange {
        status: Status,
        index: usize,
        len: usize,
    },
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "lead not found: {id}"),
            Self::IndexOutOfRange { status, index, len } => write!(
                f,
                "index {index} out of range for column `{status}` of length {len}"
            ),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::NotFound(_) | Self::IndexOutOfRange { .. } => None,
        }
    }
}

impl From<LeadValidationError> for BoardError {
    fn from(value: LeadValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Consistency violation between column lists and the lead map.
///
/// Only reachable through manual state corruption (e.g. a hand-edited
/// persisted payload); normal board operations never produce one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardIntegrityError {
    /// A pipeline status has no column at all.
    MissingColumn(Status),
    /// A pipeline status appears as more than one column.
    DuplicateColumn(Status),
    /// A column lists an id missing from the lead map.
    UnknownListedId { status: Status, id: LeadId },
    /// A listed lead's own status disagrees with its column.
    StatusMismatch {
        column: Status,
        id: LeadId,
        lead_status: Status,
    },
    /// The same id appears in more than one column slot.
    DuplicateListing(LeadId),
    /// A mapped lead is listed in no column.
    UnlistedLead(LeadId),
}

impl Display for BoardIntegrityError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn(status) => {
                write!(f, "board has no column for status `{status}`")
            }
            Self::DuplicateColumn(status) => {
                write!(f, "board has more than one column for status `{status}`")
            }
            Self::UnknownListedId { status, id } => {
                write!(f, "column `{status}` lists unknown lead {id}")
            }
            Self::StatusMismatch {
                column,
                id,
                lead_status,
            } => write!(
                f,
                "column `{column}` lists lead {id} whose status is `{lead_status}`"
            ),
            Self::DuplicateListing(id) => write!(f, "lead {id} is listed more than once"),
            Self::UnlistedLead(id) => write!(f, "lead {id} is missing from its column"),
        }
    }
}

impl Error for BoardIntegrityError {}

/// One pipeline column: a status bucket with an ordered id list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub status: Status,
    pub lead_ids: Vec<LeadId>,
}

/// Drag-and-drop move request: source and destination slots.
///
/// Indexes address positions within the column id lists at the time of the
/// drop, matching drag-library result semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    pub from_status: Status,
    pub from_index: usize,
    pub to_status: Status,
    pub to_index: usize,
}

/// Aggregate board state: all columns plus the lead map.
///
/// The whole board is the unit of persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    columns: Vec<Column>,
    leads: HashMap<LeadId, Lead>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Creates an empty board with one column per pipeline status.
    pub fn new() -> Self {
        Self {
            columns: Status::ALL
                .iter()
                .map(|status| Column {
                    status: *status,
                    lead_ids: Vec::new(),
                })
                .collect(),
            leads: HashMap::new(),
        }
    }

    /// All columns in pipeline order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The column for one status.
    pub fn column(&self, status: Status) -> &Column {
        // Board construction guarantees one column per status.
        self.columns
            .iter()
            .find(|column| column.status == status)
            .unwrap_or_else(|| unreachable!("board is missing column `{status}`"))
    }

    fn column_mut(&mut self, status: Status) -> &mut Column {
        self.columns
            .iter_mut()
            .find(|column| column.status == status)
            .unwrap_or_else(|| unreachable!("board is missing column `{status}`"))
    }

    /// Total number of leads on the board.
    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }

    /// Looks up one lead by id.
    pub fn get_lead(&self, id: LeadId) -> Option<&Lead> {
        self.leads.get(&id)
    }

    /// Validates user input, assigns identity and inserts the lead at the end
    /// of its status column.
    pub fn add_lead(&mut self, new: NewLead) -> BoardResult<LeadId> {
        let lead = Lead::from_new(new);
        lead.validate()?;

        let id = lead.id;
        let status = lead.status;
        self.leads.insert(id, lead);
        self.column_mut(status).lead_ids.push(id);
        Ok(id)
    }

    /// Replaces an existing lead wholesale, re-stamping `updated_at`.
    ///
    /// A status change re-homes the id: removed from the old column, appended
    /// to the new column's end.
    pub fn update_lead(&mut self, mut lead: Lead) -> BoardResult<()> {
        let old_status = match self.leads.get(&lead.id) {
            Some(existing) => existing.status,
            None => return Err(BoardError::NotFound(lead.id)),
        };

        lead.touch();
        lead.validate()?;

        if old_status != lead.status {
            let id = lead.id;
            let new_status = lead.status;
            self.column_mut(old_status).lead_ids.retain(|x| *x != id);
            self.column_mut(new_status).lead_ids.push(id);
        }
        self.leads.insert(lead.id, lead);
        Ok(())
    }

    /// Removes a lead from both the map and its column list.
    pub fn delete_lead(&mut self, id: LeadId) -> BoardResult<Lead> {
        let lead = self.leads.remove(&id).ok_or(BoardError::NotFound(id))?;
        self.column_mut(lead.status).lead_ids.retain(|x| *x != id);
        Ok(lead)
    }

    /// Applies a drag-and-drop move.
    ///
    /// Same-column moves splice the id to its new slot. Cross-column moves
    /// additionally rewrite the lead's status and stamp `updated_at`.
    /// Dropping a lead back onto its source slot is a no-op.
    pub fn move_lead(&mut self, request: MoveRequest) -> BoardResult<()> {
        let from = self.column(request.from_status);
        if request.from_index >= from.lead_ids.len() {
            return Err(BoardError::IndexOutOfRange {
                status: request.from_status,
                index: request.from_index,
                len: from.lead_ids.len(),
            });
        }

        if request.from_status == request.to_status {
            if request.from_index == request.to_index {
                return Ok(());
            }
            let column = self.column_mut(request.from_status);
            if request.to_index > column.lead_ids.len() - 1 {
                return Err(BoardError::IndexOutOfRange {
                    status: request.to_status,
                    index: request.to_index,
                    len: column.lead_ids.len(),
                });
            }
            let id = column.lead_ids.remove(request.from_index);
            column.lead_ids.insert(request.to_index, id);
            return Ok(());
        }

        let to_len = self.column(request.to_status).lead_ids.len();
        if request.to_index > to_len {
            return Err(BoardError::IndexOutOfRange {
                status: request.to_status,
                index: request.to_index,
                len: to_len,
            });
        }

        let id = self
            .column_mut(request.from_status)
            .lead_ids
            .remove(request.from_index);
        self.column_mut(request.to_status)
            .lead_ids
            .insert(request.to_index, id);

        // The id came from a column list, so the map entry must exist.
        let lead = self.leads.get_mut(&id).ok_or(BoardError::NotFound(id))?;
        lead.status = request.to_status;
        lead.touch();
        Ok(())
    }

    /// Moves a lead to the end of another status column.
    ///
    /// No-op when the lead already has the target status.
    pub fn set_status(&mut self, id: LeadId, status: Status) -> BoardResult<()> {
        let old_status = match self.leads.get(&id) {
            Some(lead) => lead.status,
            None => return Err(BoardError::NotFound(id)),
        };
        if old_status == status {
            return Ok(());
        }

        self.column_mut(old_status).lead_ids.retain(|x| *x != id);
        self.column_mut(status).lead_ids.push(id);
        let lead = self.leads.get_mut(&id).ok_or(BoardError::NotFound(id))?;
        lead.status = status;
        lead.touch();
        Ok(())
    }

    /// Reassigns a lead's priority.
    pub fn set_priority(&mut self, id: LeadId, priority: Priority) -> BoardResult<()> {
        let lead = self.leads.get_mut(&id).ok_or(BoardError::NotFound(id))?;
        lead.priority = priority;
        lead.touch();
        Ok(())
    }

    /// Checks the column-list/lead-map consistency invariant.
    ///
    /// Intended for loads of externally persisted state, where hand-edited
    /// payloads can desynchronize the two views. Also requires exactly one
    /// column per pipeline status, which `column`/`column_mut` rely on.
    pub fn verify_integrity(&self) -> Result<(), BoardIntegrityError> {
        let mut statuses: HashSet<Status> = HashSet::with_capacity(Status::ALL.len());
        for column in &self.columns {
            if !statuses.insert(column.status) {
                return Err(BoardIntegrityError::DuplicateColumn(column.status));
            }
        }
        for status in Status::ALL {
            if !statuses.contains(&status) {
                return Err(BoardIntegrityError::MissingColumn(status));
            }
        }

        let mut listed: HashSet<LeadId> = HashSet::with_capacity(self.leads.len());

        for column in &self.columns {
            for id in &column.lead_ids {
                let lead = self.leads.get(id).ok_or(BoardIntegrityError::UnknownListedId {
                    status: column.status,
                    id: *id,
                })?;
                if lead.status != column.status {
                    return Err(BoardIntegrityError::StatusMismatch {
                        column: column.status,
                        id: *id,
                        lead_status: lead.status,
                    });
                }
                if !listed.insert(*id) {
                    return Err(BoardIntegrityError::DuplicateListing(*id));
                }
            }
        }

        for id in self.leads.keys() {
            if !listed.contains(id) {
                return Err(BoardIntegrityError::UnlistedLead(*id));
            }
        }
        Ok(())
    }
}
