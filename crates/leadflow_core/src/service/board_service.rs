//! Board use-case service.
//!
//! # Responsibility
//! - Load the persisted board (or start empty) and expose its operations.
//! - Persist the whole board after every successful mutation.
//!
//! # Invariants
//! - In-memory state is mutated first; a persistence failure is logged and
//!   surfaced while the applied mutation stands.
//! - Log events carry ids and statuses only, never contact details.

use crate::board::filter::LeadFilter;
use crate::board::{Board, BoardError, MoveRequest};
use crate::model::lead::{Lead, LeadId, NewLead, Priority, Status};
use crate::store::board_store::BoardStore;
use crate::store::state_store::{StateStore, StoreError};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error: board rule violation or persistence failure.
#[derive(Debug)]
pub enum ServiceError {
    Board(BoardError),
    Store(StoreError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Board(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Board(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<BoardError> for ServiceError {
    fn from(value: BoardError) -> Self {
        Self::Board(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Board facade bound to one state store.
pub struct BoardService<S: StateStore> {
    board: Board,
    store: BoardStore<S>,
}

impl<S: StateStore> BoardService<S> {
    /// Opens the board from persisted state, or starts empty when no live
    /// snapshot exists.
    pub fn open(store: S) -> ServiceResult<Self> {
        let store = BoardStore::new(store);
        let (board, restored) = match store.load()? {
            Some(board) => (board, true),
            None => (Board::new(), false),
        };
        info!(
            "event=board_open module=service status=ok restored={restored} leads={}",
            board.len()
        );
        Ok(Self { board, store })
    }

    /// Read-only view of the current board state.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn get_lead(&self, id: LeadId) -> Option<&Lead> {
        self.board.get_lead(id)
    }

    /// One column's leads narrowed by the dashboard filter.
    pub fn filtered_column(&self, status: Status, filter: &LeadFilter) -> Vec<&Lead> {
        self.board.filtered_column(status, filter)
    }

    /// Creates a lead and persists the board.
    pub fn add_lead(&mut self, new: NewLead) -> ServiceResult<LeadId> {
        let id = self.board.add_lead(new)?;
        self.persist("lead_added")?;
        info!("event=lead_added module=service status=ok lead_id={id}");
        Ok(id)
    }

    /// Replaces a lead wholesale and persists the board.
    pub fn update_lead(&mut self, lead: Lead) -> ServiceResult<()> {
        let id = lead.id;
        self.board.update_lead(lead)?;
        self.persist("lead_updated")?;
        info!("event=lead_updated module=service status=ok lead_id={id}");
        Ok(())
    }

    /// Deletes a lead and persists the board. Returns the removed record.
    pub fn delete_lead(&mut self, id: LeadId) -> ServiceResult<Lead> {
        let lead = self.board.delete_lead(id)?;
        self.persist("lead_deleted")?;
        info!("event=lead_deleted module=service status=ok lead_id={id}");
        Ok(lead)
    }

    /// Applies a drag-and-drop move and persists the board.
    pub fn move_lead(&mut self, request: MoveRequest) -> ServiceResult<()> {
        self.board.move_lead(request)?;
        self.persist("lead_moved")?;
        info!(
            "event=lead_moved module=service status=ok from={} to={}",
            request.from_status, request.to_status
        );
        Ok(())
    }

    /// Recategorizes a lead and persists the board.
    pub fn set_status(&mut self, id: LeadId, status: Status) -> ServiceResult<()> {
        self.board.set_status(id, status)?;
        self.persist("lead_status_set")?;
        info!("event=lead_status_set module=service status=ok lead_id={id} to={status}");
        Ok(())
    }

    /// Reprioritizes a lead and persists the board.
    pub fn set_priority(&mut self, id: LeadId, priority: Priority) -> ServiceResult<()> {
        self.board.set_priority(id, priority)?;
        self.persist("lead_priority_set")?;
        info!("event=lead_priority_set module=service status=ok lead_id={id} to={priority}");
        Ok(())
    }

    fn persist(&self, after: &str) -> ServiceResult<()> {
        if let Err(err) = self.store.save(&self.board) {
            error!(
                "event=board_persist module=service status=error after={after} error={err}"
            );
            return Err(err.into());
        }
        Ok(())
    }
}
