use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tower::ServiceExt;
use uuid::Uuid;

use todo_list::{
    api::rest::dto::TodoDto,
    contract::model::{NewTodo, TodoFilters, TodoPatch},
    domain::{error::DomainError, Service, ServiceConfig, TodoRepository},
    infra::storage::{migrations::Migrator, InMemoryTodoRepository, SeaOrmTodoRepository},
};

/// Create a fresh test database for each test
async fn create_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to test database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

async fn create_test_service() -> Arc<Service> {
    let db = create_test_db().await;
    let repo = Arc::new(SeaOrmTodoRepository::new(db));
    Arc::new(Service::new(repo, ServiceConfig::default()))
}

async fn create_test_router() -> Router {
    todo_list::api::rest::router(create_test_service().await)
}

/// The timestamp granularity of two back-to-back `Utc::now()` calls can
/// collide; a short sleep keeps "strictly increases" assertions honest.
async fn tick() {
    tokio::time::sleep(Duration::from_millis(5)).await;
}

#[tokio::test]
async fn test_service_crud_roundtrip() -> Result<()> {
    let service = create_test_service().await;

    let created = service
        .create_todo(NewTodo {
            title: "Buy milk".to_string(),
            ..Default::default()
        })
        .await?;
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, None);
    assert!(!created.completed);
    assert_eq!(created.created_at, created.updated_at);

    // Round-trip: findById returns the created entity
    let fetched = service.get_todo(created.id).await?;
    assert_eq!(fetched, created);

    tick().await;
    let updated = service
        .update_todo(
            created.id,
            TodoPatch {
                description: Some("2 liters".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.description.as_deref(), Some("2 liters"));
    assert_eq!(updated.title, "Buy milk");
    assert!(updated.updated_at > created.updated_at);

    service.delete_todo(created.id).await?;
    let missing = service.get_todo(created.id).await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));

    Ok(())
}

#[tokio::test]
async fn test_create_validation_messages() {
    let service = create_test_service().await;

    let err = service
        .create_todo(NewTodo {
            title: "".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Todo title is required");

    let err = service
        .create_todo(NewTodo {
            title: "   ".to_string(),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Todo title is required");

    let err = service
        .create_todo(NewTodo {
            title: "x".repeat(101),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Todo title must be less than 100 characters"
    );

    let err = service
        .create_todo(NewTodo {
            title: "ok".to_string(),
            description: Some("y".repeat(501)),
            ..Default::default()
        })
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "Todo description must be less than 500 characters"
    );
}

#[tokio::test]
async fn test_create_trims_whitespace() -> Result<()> {
    let service = create_test_service().await;

    let todo = service
        .create_todo(NewTodo {
            title: "  Buy milk  ".to_string(),
            description: Some("  soon  ".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(todo.title, "Buy milk");
    assert_eq!(todo.description.as_deref(), Some("soon"));

    // A 100-char title is accepted after trimming surrounding spaces
    let todo = service
        .create_todo(NewTodo {
            title: format!("  {}  ", "t".repeat(100)),
            ..Default::default()
        })
        .await?;
    assert_eq!(todo.title.chars().count(), 100);

    Ok(())
}

#[tokio::test]
async fn test_toggle_is_an_involution() -> Result<()> {
    let service = create_test_service().await;

    let created = service
        .create_todo(NewTodo {
            title: "flip me".to_string(),
            ..Default::default()
        })
        .await?;
    assert!(!created.completed);

    tick().await;
    let once = service.toggle_todo(created.id).await?;
    assert!(once.completed);
    assert!(once.updated_at > created.updated_at);

    tick().await;
    let twice = service.toggle_todo(created.id).await?;
    assert!(!twice.completed);
    assert!(twice.updated_at > once.updated_at);

    Ok(())
}

#[tokio::test]
async fn test_second_delete_fails_with_not_found() -> Result<()> {
    let service = create_test_service().await;

    let created = service
        .create_todo(NewTodo {
            title: "once".to_string(),
            ..Default::default()
        })
        .await?;

    service.delete_todo(created.id).await?;
    let err = service.delete_todo(created.id).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));

    Ok(())
}

#[tokio::test]
async fn test_update_missing_todo_fails_before_write() {
    let service = create_test_service().await;

    let err = service
        .update_todo(
            Uuid::new_v4(),
            TodoPatch {
                title: Some("new title".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotFound { .. }));
}

#[tokio::test]
async fn test_filters_compose_with_and() -> Result<()> {
    let service = create_test_service().await;

    let foo_done = service
        .create_todo(NewTodo {
            title: "foo errand".to_string(),
            ..Default::default()
        })
        .await?;
    service.toggle_todo(foo_done.id).await?;
    service
        .create_todo(NewTodo {
            title: "foo open".to_string(),
            ..Default::default()
        })
        .await?;
    let bar = service
        .create_todo(NewTodo {
            title: "bar".to_string(),
            description: Some("mentions FOO here".to_string()),
            ..Default::default()
        })
        .await?;
    service.toggle_todo(bar.id).await?;

    let found = service
        .list_todos(&TodoFilters {
            completed: Some(true),
            search: Some("foo".to_string()),
            ..Default::default()
        })
        .await?;

    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|t| t.completed));

    Ok(())
}

#[tokio::test]
async fn test_list_orders_newest_first() -> Result<()> {
    let service = create_test_service().await;

    let first = service
        .create_todo(NewTodo {
            title: "first".to_string(),
            ..Default::default()
        })
        .await?;
    tick().await;
    let second = service
        .create_todo(NewTodo {
            title: "second".to_string(),
            ..Default::default()
        })
        .await?;

    let all = service.list_todos(&TodoFilters::default()).await?;
    assert_eq!(all[0].id, second.id);
    assert_eq!(all[1].id, first.id);

    Ok(())
}

#[tokio::test]
async fn test_owner_filter_exact_match() -> Result<()> {
    let service = create_test_service().await;

    let alice = Uuid::new_v4();
    service
        .create_todo(NewTodo {
            title: "hers".to_string(),
            owner_id: Some(alice),
            ..Default::default()
        })
        .await?;
    service
        .create_todo(NewTodo {
            title: "nobody's".to_string(),
            ..Default::default()
        })
        .await?;

    let found = service
        .list_todos(&TodoFilters {
            owner_id: Some(alice),
            ..Default::default()
        })
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "hers");

    Ok(())
}

/// Both repository implementations must produce identical observable
/// behavior; run the spec scenario against the in-memory variant too.
#[tokio::test]
async fn test_in_memory_backend_scenario() -> Result<()> {
    let repo = Arc::new(InMemoryTodoRepository::new());
    let service = Service::new(repo.clone(), ServiceConfig::default());

    let created = service
        .create_todo(NewTodo {
            title: "Buy milk".to_string(),
            ..Default::default()
        })
        .await?;
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, None);
    assert!(!created.completed);

    let toggled = service.toggle_todo(created.id).await?;
    assert!(toggled.completed);

    service.delete_todo(created.id).await?;
    assert!(repo.find_by_id(created.id).await?.is_none());

    Ok(())
}

// --- HTTP layer ---

#[tokio::test]
async fn test_http_create_and_list() -> Result<()> {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/todos")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"title":"Buy milk","description":"2 liters"}"#,
        ))?;
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let created: TodoDto = serde_json::from_slice(&body)?;
    assert_eq!(created.title, "Buy milk");
    assert!(!created.completed);

    let request = Request::builder().uri("/todos").body(Body::empty())?;
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let todos: Vec<TodoDto> = serde_json::from_slice(&body)?;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].id, created.id);

    Ok(())
}

#[tokio::test]
async fn test_http_missing_title_is_bad_request() -> Result<()> {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/todos")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"description":"no title"}"#))?;
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let err: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(err["error"], "Todo title is required");

    Ok(())
}

#[tokio::test]
async fn test_http_not_found_shape() -> Result<()> {
    let router = create_test_router().await;

    let request = Request::builder()
        .uri(format!("/todos/{}", Uuid::new_v4()))
        .body(Body::empty())?;
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let err: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(err["error"], "Todo not found");

    Ok(())
}

#[tokio::test]
async fn test_http_toggle_and_delete() -> Result<()> {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/todos")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"title":"flip"}"#))?;
    let response = router.clone().oneshot(request).await.unwrap();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let created: TodoDto = serde_json::from_slice(&body)?;

    let request = Request::builder()
        .method("PATCH")
        .uri(format!("/todos/{}", created.id))
        .body(Body::empty())?;
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let toggled: TodoDto = serde_json::from_slice(&body)?;
    assert!(toggled.completed);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/todos/{}", created.id))
        .body(Body::empty())?;
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let confirmation: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(confirmation["message"], "Todo deleted successfully");

    // Deleting again reports not found
    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/todos/{}", created.id))
        .body(Body::empty())?;
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn test_http_list_filters_via_query() -> Result<()> {
    let router = create_test_router().await;
    let owner = Uuid::new_v4();

    for (title, with_owner) in [("alpha", true), ("beta", false)] {
        let body = if with_owner {
            format!(r#"{{"title":"{title}","userId":"{owner}"}}"#)
        } else {
            format!(r#"{{"title":"{title}"}}"#)
        };
        let request = Request::builder()
            .method("POST")
            .uri("/todos")
            .header("content-type", "application/json")
            .body(Body::from(body))?;
        let response = router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let request = Request::builder()
        .uri(format!("/todos?userId={owner}&search=alp"))
        .body(Body::empty())?;
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let todos: Vec<TodoDto> = serde_json::from_slice(&body)?;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "alpha");
    assert_eq!(todos[0].owner_id, Some(owner));

    Ok(())
}

/// Both backends must read `%`/`_` in the search text as literal
/// characters, not LIKE wildcards.
async fn assert_search_is_literal(service: &Service) -> Result<()> {
    for title in ["50% off milk", "50 percent off milk", "a_b", "aXb"] {
        service
            .create_todo(NewTodo {
                title: title.to_string(),
                ..Default::default()
            })
            .await?;
    }

    let found = service
        .list_todos(&TodoFilters {
            search: Some("50%".to_string()),
            ..Default::default()
        })
        .await?;
    let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["50% off milk"]);

    let found = service
        .list_todos(&TodoFilters {
            search: Some("a_b".to_string()),
            ..Default::default()
        })
        .await?;
    let titles: Vec<&str> = found.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["a_b"]);

    // Whitespace-only search means no filter at all
    let found = service
        .list_todos(&TodoFilters {
            search: Some("   ".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(found.len(), 4);

    Ok(())
}

#[tokio::test]
async fn test_search_wildcards_are_literal_on_both_backends() -> Result<()> {
    let sea_orm = create_test_service().await;
    assert_search_is_literal(&sea_orm).await?;

    let in_memory = Service::new(
        Arc::new(InMemoryTodoRepository::new()),
        ServiceConfig::default(),
    );
    assert_search_is_literal(&in_memory).await?;

    Ok(())
}

#[tokio::test]
async fn test_http_list_with_empty_query_params_is_ok() -> Result<()> {
    let router = create_test_router().await;

    let request = Request::builder()
        .method("POST")
        .uri("/todos")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"title":"Buy milk"}"#))?;
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    // Clients leave unused params empty rather than omitting them
    let request = Request::builder()
        .uri("/todos?userId=&completed=&search=")
        .body(Body::empty())?;
    let response = router.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    let todos: Vec<TodoDto> = serde_json::from_slice(&body)?;
    assert_eq!(todos.len(), 1);
    assert_eq!(todos[0].title, "Buy milk");

    Ok(())
}
