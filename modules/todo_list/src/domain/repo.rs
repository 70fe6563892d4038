use crate::contract::model::{Todo, TodoFilters};
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Load a todo by id. Absence is `Ok(None)`, never an error.
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Todo>>;
    /// Insert a fully-formed domain todo.
    ///
    /// Service computes id/timestamps/validation; repo persists.
    async fn insert(&self, todo: Todo) -> anyhow::Result<()>;
    /// Update an existing todo (by primary key in `todo.id`).
    async fn update(&self, todo: Todo) -> anyhow::Result<()>;
    /// Delete by id. Returns true if a row was deleted.
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
    /// List todos matching the filters, newest `created_at` first.
    async fn list(&self, filters: &TodoFilters) -> anyhow::Result<Vec<Todo>>;
}
