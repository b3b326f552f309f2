use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Entry of the administrative change log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemChange {
    pub id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl SystemChange {
    /// Case-insensitive match on author, action or details.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.user_name.to_lowercase().contains(&term)
            || self.action.to_lowercase().contains(&term)
            || self.details.to_lowercase().contains(&term)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChangeQuery {
    pub search: Option<String>,
}
