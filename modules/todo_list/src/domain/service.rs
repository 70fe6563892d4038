use std::sync::Arc;

use crate::contract::model::{NewTodo, Todo, TodoFilters, TodoPatch};
use crate::domain::error::DomainError;
use crate::domain::repo::TodoRepository;
use chrono::Utc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Domain service with business rules for todo management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn TodoRepository>,
    config: ServiceConfig,
}

/// Configuration for the domain service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub max_title_len: usize,
    pub max_description_len: usize,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            max_title_len: 100,
            max_description_len: 500,
        }
    }
}

impl Service {
    /// Create a service with dependencies.
    pub fn new(repo: Arc<dyn TodoRepository>, config: ServiceConfig) -> Self {
        Self { repo, config }
    }

    #[instrument(name = "todo_list.service.get_todo", skip(self), fields(todo_id = %id))]
    pub async fn get_todo(&self, id: Uuid) -> Result<Todo, DomainError> {
        debug!("Getting todo by id");

        let todo = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::not_found(id))?;
        Ok(todo)
    }

    #[instrument(name = "todo_list.service.list_todos", skip(self, filters))]
    pub async fn list_todos(&self, filters: &TodoFilters) -> Result<Vec<Todo>, DomainError> {
        debug!("Listing todos");

        let todos = self
            .repo
            .list(filters)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        debug!("Listed {} todos", todos.len());
        Ok(todos)
    }

    #[instrument(name = "todo_list.service.create_todo", skip(self, new_todo))]
    pub async fn create_todo(&self, new_todo: NewTodo) -> Result<Todo, DomainError> {
        info!("Creating new todo");

        let title = self.validate_title(&new_todo.title)?;
        let description = self.validate_description(new_todo.description.as_deref())?;

        let now = Utc::now();
        let todo = Todo {
            id: Uuid::new_v4(),
            title,
            description,
            completed: false,
            owner_id: new_todo.owner_id,
            created_at: now,
            updated_at: now,
        };

        self.repo
            .insert(todo.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully created todo with id={}", todo.id);
        Ok(todo)
    }

    #[instrument(name = "todo_list.service.update_todo", skip(self, patch), fields(todo_id = %id))]
    pub async fn update_todo(&self, id: Uuid, patch: TodoPatch) -> Result<Todo, DomainError> {
        info!("Updating todo");

        // Validate only the fields present in the patch
        let title = match patch.title.as_deref() {
            Some(t) => Some(self.validate_title(t)?),
            None => None,
        };
        let description = match patch.description.as_deref() {
            Some(d) => Some(self.validate_description(Some(d))?),
            None => None,
        };

        // Load current; absent id fails before any write
        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::not_found(id))?;

        if let Some(title) = title {
            current.title = title;
        }
        if let Some(description) = description {
            current.description = description;
        }
        if let Some(completed) = patch.completed {
            current.completed = completed;
        }
        current.updated_at = Utc::now();

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Successfully updated todo");
        Ok(current)
    }

    #[instrument(name = "todo_list.service.delete_todo", skip(self), fields(todo_id = %id))]
    pub async fn delete_todo(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting todo");

        let deleted = self
            .repo
            .delete(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        if !deleted {
            return Err(DomainError::not_found(id));
        }

        info!("Successfully deleted todo");
        Ok(())
    }

    #[instrument(name = "todo_list.service.toggle_todo", skip(self), fields(todo_id = %id))]
    pub async fn toggle_todo(&self, id: Uuid) -> Result<Todo, DomainError> {
        info!("Toggling todo completion");

        let mut current = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?
            .ok_or_else(|| DomainError::not_found(id))?;

        current.completed = !current.completed;
        current.updated_at = Utc::now();

        self.repo
            .update(current.clone())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;

        info!("Todo completed={}", current.completed);
        Ok(current)
    }

    // --- validation helpers ---

    fn validate_title(&self, title: &str) -> Result<String, DomainError> {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Todo title is required"));
        }
        if trimmed.chars().count() > self.config.max_title_len {
            return Err(DomainError::validation(
                "Todo title must be less than 100 characters",
            ));
        }
        Ok(trimmed.to_string())
    }

    /// Trims the description; an empty or absent description becomes `None`.
    fn validate_description(
        &self,
        description: Option<&str>,
    ) -> Result<Option<String>, DomainError> {
        match description.map(str::trim) {
            None => Ok(None),
            Some("") => Ok(None),
            Some(d) => {
                if d.chars().count() > self.config.max_description_len {
                    return Err(DomainError::validation(
                        "Todo description must be less than 500 characters",
                    ));
                }
                Ok(Some(d.to_string()))
            }
        }
    }
}
