pub mod model;

pub use model::{NewTodo, Todo, TodoFilters, TodoPatch};
