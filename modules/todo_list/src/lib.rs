// === PUBLIC CONTRACT ===
pub mod contract;

pub use contract::model::{NewTodo, Todo, TodoFilters, TodoPatch};

// === INTERNAL LAYERS ===
// Exposed for the server binary and integration tests; the stable surface
// for consumers is `contract` plus the store.
pub mod api;
pub mod domain;
pub mod infra;
pub mod store;
