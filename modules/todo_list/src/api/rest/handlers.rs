use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::Json,
    Extension,
};
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::rest::dto::{
    CreateTodoReq, DeleteConfirmation, ListTodosQuery, TodoDto, UpdateTodoReq,
};
use crate::api::rest::error::{map_domain_error, ApiError};
use crate::domain::service::Service;

pub async fn list_todos(
    Extension(svc): Extension<Arc<Service>>,
    Query(query): Query<ListTodosQuery>,
) -> Result<Json<Vec<TodoDto>>, ApiError> {
    info!("Listing todos with query: {:?}", query);

    match svc.list_todos(&query.into()).await {
        Ok(todos) => Ok(Json(todos.into_iter().map(TodoDto::from).collect())),
        Err(e) => {
            error!("Failed to list todos: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Get a specific todo by ID
pub async fn get_todo(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoDto>, ApiError> {
    info!("Getting todo with id: {}", id);

    match svc.get_todo(id).await {
        Ok(todo) => Ok(Json(TodoDto::from(todo))),
        Err(e) => {
            error!("Failed to get todo {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Create a new todo
pub async fn create_todo(
    Extension(svc): Extension<Arc<Service>>,
    Json(req_body): Json<CreateTodoReq>,
) -> Result<(StatusCode, Json<TodoDto>), ApiError> {
    info!("Creating todo: {:?}", req_body);

    match svc.create_todo(req_body.into()).await {
        Ok(todo) => Ok((StatusCode::CREATED, Json(TodoDto::from(todo)))),
        Err(e) => {
            error!("Failed to create todo: {}", e);
            Err(map_domain_error(&e))
        }
    }
}

/// Update an existing todo
pub async fn update_todo(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
    Json(req_body): Json<UpdateTodoReq>,
) -> Result<Json<TodoDto>, ApiError> {
    info!("Updating todo {} with: {:?}", id, req_body);

    match svc.update_todo(id, req_body.into()).await {
        Ok(todo) => Ok(Json(TodoDto::from(todo))),
        Err(e) => {
            error!("Failed to update todo {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Delete a todo by ID
pub async fn delete_todo(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeleteConfirmation>, ApiError> {
    info!("Deleting todo: {}", id);

    match svc.delete_todo(id).await {
        Ok(()) => Ok(Json(DeleteConfirmation {
            message: "Todo deleted successfully".to_string(),
        })),
        Err(e) => {
            error!("Failed to delete todo {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}

/// Toggle a todo's completion flag
pub async fn toggle_todo(
    Extension(svc): Extension<Arc<Service>>,
    Path(id): Path<Uuid>,
) -> Result<Json<TodoDto>, ApiError> {
    info!("Toggling todo: {}", id);

    match svc.toggle_todo(id).await {
        Ok(todo) => Ok(Json(TodoDto::from(todo))),
        Err(e) => {
            error!("Failed to toggle todo {}: {}", id, e);
            Err(map_domain_error(&e))
        }
    }
}
