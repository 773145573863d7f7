//! Search and filter projections over board columns.
//!
//! # Responsibility
//! - Narrow a column's leads by free-text query, status and priority.
//! - Preserve column ordering in filtered output.
//!
//! # Invariants
//! - Query matching is case-insensitive substring over name, company, email.
//! - A status filter that names a different column yields an empty view.

use crate::board::Board;
use crate::model::lead::{Lead, Priority, Status};

/// Dashboard filter state: any combination of the three criteria.
///
/// `None` means "all" for that criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadFilter {
    pub query: Option<String>,
    pub status: Option<Status>,
    pub priority: Option<Priority>,
}

impl LeadFilter {
    /// Filter accepting every lead.
    pub fn all() -> Self {
        Self::default()
    }

    /// Whether a lead passes the priority and query criteria.
    ///
    /// The status criterion is applied per-column, not per-lead; see
    /// [`Board::filtered_column`].
    pub fn matches(&self, lead: &Lead) -> bool {
        if let Some(priority) = self.priority {
            if lead.priority != priority {
                return false;
            }
        }
        match self.query.as_deref() {
            None | Some("") => true,
            Some(query) => {
                let query = query.to_lowercase();
                lead.name.to_lowercase().contains(&query)
                    || lead.company.to_lowercase().contains(&query)
                    || lead.email.to_lowercase().contains(&query)
            }
        }
    }
}

impl Board {
    /// Returns one column's leads, column-ordered, narrowed by the filter.
    ///
    /// An active status filter blanks every other column rather than hiding
    /// individual cards.
    pub fn filtered_column(&self, status: Status, filter: &LeadFilter) -> Vec<&Lead> {
        if let Some(wanted) = filter.status {
            if wanted != status {
                return Vec::new();
            }
        }

        self.column(status)
            .lead_ids
            .iter()
            .filter_map(|id| self.get_lead(*id))
            .filter(|lead| filter.matches(lead))
            .collect()
    }
}
