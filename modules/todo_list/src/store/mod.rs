//! Client-side state container mirroring repository state for presentation.
//!
//! Every action follows the same status contract: mark loading and clear the
//! previous error, run the use-case, then either splice the result into
//! `items` or record the failure's message and leave `items` untouched.
//! No optimistic updates, no rollback, no retry.

pub mod cache;

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;
use uuid::Uuid;

use crate::contract::model::{NewTodo, Todo, TodoFilters, TodoPatch};
use crate::domain::service::Service;
pub use cache::{JsonFileCache, StoreCache};

/// Observable store state.
#[derive(Debug, Clone, Default)]
pub struct TodoState {
    pub items: Vec<Todo>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub filters: TodoFilters,
}

pub struct TodoStore {
    service: Arc<Service>,
    cache: Option<Box<dyn StoreCache>>,
    state: RwLock<TodoState>,
}

impl TodoStore {
    pub fn new(service: Arc<Service>) -> Self {
        Self {
            service,
            cache: None,
            state: RwLock::new(TodoState::default()),
        }
    }

    pub fn with_cache(service: Arc<Service>, cache: Box<dyn StoreCache>) -> Self {
        Self {
            service,
            cache: Some(cache),
            state: RwLock::new(TodoState::default()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> TodoState {
        self.state.read().clone()
    }

    /// Read-through at startup: seed `items` from the cache slot if one was
    /// ever written. Failures are logged and ignored.
    pub fn restore_from_cache(&self) {
        let Some(cache) = &self.cache else { return };
        match cache.load() {
            Ok(Some(items)) => self.state.write().items = items,
            Ok(None) => {}
            Err(e) => warn!("todo cache restore failed: {e:#}"),
        }
    }

    pub async fn load(&self, filters: Option<TodoFilters>) {
        let filters = {
            let mut state = self.state.write();
            state.is_loading = true;
            state.error = None;
            if let Some(filters) = filters {
                state.filters = filters;
            }
            state.filters.clone()
        };

        match self.service.list_todos(&filters).await {
            Ok(items) => self.finish_ok(|state| state.items = items),
            Err(e) => self.finish_err(e.to_string()),
        }
    }

    pub async fn create(&self, data: NewTodo) {
        self.begin();
        match self.service.create_todo(data).await {
            Ok(todo) => self.finish_ok(|state| state.items.insert(0, todo)),
            Err(e) => self.finish_err(e.to_string()),
        }
    }

    pub async fn update(&self, id: Uuid, data: TodoPatch) {
        self.begin();
        match self.service.update_todo(id, data).await {
            Ok(updated) => self.finish_ok(|state| replace_item(&mut state.items, updated)),
            Err(e) => self.finish_err(e.to_string()),
        }
    }

    pub async fn delete(&self, id: Uuid) {
        self.begin();
        match self.service.delete_todo(id).await {
            Ok(()) => self.finish_ok(|state| state.items.retain(|t| t.id != id)),
            Err(e) => self.finish_err(e.to_string()),
        }
    }

    pub async fn toggle(&self, id: Uuid) {
        self.begin();
        match self.service.toggle_todo(id).await {
            Ok(toggled) => self.finish_ok(|state| replace_item(&mut state.items, toggled)),
            Err(e) => self.finish_err(e.to_string()),
        }
    }

    pub fn set_filters(&self, filters: TodoFilters) {
        self.state.write().filters = filters;
    }

    pub fn clear_error(&self) {
        self.state.write().error = None;
    }

    // --- status contract helpers ---

    fn begin(&self) {
        let mut state = self.state.write();
        state.is_loading = true;
        state.error = None;
    }

    fn finish_ok(&self, apply: impl FnOnce(&mut TodoState)) {
        let items = {
            let mut state = self.state.write();
            apply(&mut state);
            state.is_loading = false;
            state.items.clone()
        };
        // Write-through after every successful action; failures are
        // logged and swallowed, the cache is not a source of truth.
        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save(&items) {
                warn!("todo cache write failed: {e:#}");
            }
        }
    }

    fn finish_err(&self, message: String) {
        let mut state = self.state.write();
        state.error = Some(message);
        state.is_loading = false;
    }
}

fn replace_item(items: &mut [Todo], updated: Todo) {
    if let Some(slot) = items.iter_mut().find(|t| t.id == updated.id) {
        *slot = updated;
    }
}
