use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::contract::model::{NewTodo, Todo, TodoFilters, TodoPatch};

/// REST DTO for todo representation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDto {
    pub id: Uuid,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// REST DTO for creating a new todo.
///
/// `title` is optional at the transport level so that a missing field
/// surfaces as the domain's validation error (HTTP 400), not a decode error.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CreateTodoReq {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "userId")]
    pub user_id: Option<Uuid>,
}

/// REST DTO for updating a todo (partial)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpdateTodoReq {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// REST DTO for list query parameters.
///
/// Clients send `GET /todos?userId=&completed=&search=` with unused params
/// left empty; an empty value reads as "not provided".
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListTodosQuery {
    #[serde(
        rename = "userId",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub user_id: Option<Uuid>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub search: Option<String>,
}

/// Query params arrive as strings; map `""` to `None` before parsing.
fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref() {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

/// Confirmation body for DELETE
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    pub message: String,
}

// Conversion implementations between REST DTOs and contract models

impl From<Todo> for TodoDto {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            owner_id: todo.owner_id,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

impl From<CreateTodoReq> for NewTodo {
    fn from(req: CreateTodoReq) -> Self {
        Self {
            title: req.title.unwrap_or_default(),
            description: req.description,
            owner_id: req.user_id,
        }
    }
}

impl From<UpdateTodoReq> for TodoPatch {
    fn from(req: UpdateTodoReq) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
        }
    }
}

impl From<ListTodosQuery> for TodoFilters {
    fn from(q: ListTodosQuery) -> Self {
        Self {
            completed: q.completed,
            search: q.search,
            owner_id: q.user_id,
        }
    }
}
