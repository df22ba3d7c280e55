//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A stored short link.
///
/// `code` and `target_url` never change after insert. The click counters are
/// owned by the redirect path and start at zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub code: String,
    pub target_url: String,
    pub total_clicks: i64,
    pub last_clicked_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link that has never been clicked.
    pub fn new(id: i64, code: String, target_url: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            code,
            target_url,
            total_clicks: 0,
            last_clicked_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    /// Returns true if the link has been followed at least once.
    pub fn has_clicks(&self) -> bool {
        self.last_clicked_at.is_some()
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target_url: String,
}
