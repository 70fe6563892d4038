use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Todo domain model. Serde derives exist for the store's write-through
/// cache slot; the REST layer has its own DTOs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new todo. The service assigns id, `completed = false`
/// and both timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub owner_id: Option<Uuid>,
}

/// Partial update data for a todo. Absent fields are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Listing filters; all present filters compose with logical AND.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TodoFilters {
    /// Exact match on `completed`.
    pub completed: Option<bool>,
    /// Case-insensitive substring match against title or description.
    pub search: Option<String>,
    /// Exact match on `owner_id`.
    pub owner_id: Option<Uuid>,
}
