//! In-process repository used for tests, demos and `--mock` mode.
//!
//! Honors the same observable contract as the SeaORM implementation.

use anyhow::bail;
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::contract::model::{Todo, TodoFilters};
use crate::domain::repo::TodoRepository;

#[derive(Default)]
pub struct InMemoryTodoRepository {
    rows: RwLock<Vec<Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn matches(todo: &Todo, filters: &TodoFilters) -> bool {
    if let Some(completed) = filters.completed {
        if todo.completed != completed {
            return false;
        }
    }
    if let Some(owner_id) = filters.owner_id {
        if todo.owner_id != Some(owner_id) {
            return false;
        }
    }
    if let Some(search) = filters.search.as_deref() {
        // Same normalization as the SeaORM backend: trimmed, lowercased,
        // whitespace-only means no filter.
        let needle = search.trim().to_lowercase();
        if !needle.is_empty() {
            let in_title = todo.title.to_lowercase().contains(&needle);
            let in_description = todo
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&needle));
            if !in_title && !in_description {
                return false;
            }
        }
    }
    true
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Todo>> {
        Ok(self.rows.read().iter().find(|t| t.id == id).cloned())
    }

    async fn insert(&self, todo: Todo) -> anyhow::Result<()> {
        let mut rows = self.rows.write();
        if rows.iter().any(|t| t.id == todo.id) {
            bail!("todo {} already exists", todo.id);
        }
        rows.push(todo);
        Ok(())
    }

    async fn update(&self, todo: Todo) -> anyhow::Result<()> {
        let mut rows = self.rows.write();
        match rows.iter_mut().find(|t| t.id == todo.id) {
            Some(slot) => {
                *slot = todo;
                Ok(())
            }
            None => bail!("todo {} not found", todo.id),
        }
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut rows = self.rows.write();
        let before = rows.len();
        rows.retain(|t| t.id != id);
        Ok(rows.len() < before)
    }

    async fn list(&self, filters: &TodoFilters) -> anyhow::Result<Vec<Todo>> {
        let mut out: Vec<Todo> = self
            .rows
            .read()
            .iter()
            .filter(|t| matches(t, filters))
            .cloned()
            .collect();
        out.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(out)
    }
}
