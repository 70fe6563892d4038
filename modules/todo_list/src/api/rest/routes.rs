use crate::api::rest::handlers;
use crate::domain::service::Service;
use axum::{routing::get, Extension, Router};
use std::sync::Arc;

/// Build the `/todos` router with the service injected via `Extension`.
pub fn router(service: Arc<Service>) -> Router {
    Router::new()
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo)
                .patch(handlers::toggle_todo),
        )
        .layer(Extension(service))
}
