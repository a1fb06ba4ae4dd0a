//! # Web API
//!
//! JSON API over the list collection, mounted under `/api`.
//!
//! | Method | Path | Operation |
//! |--------|------|-----------|
//! | GET | `/lists` | All lists |
//! | POST | `/lists` | Add a list |
//! | GET | `/lists/last` | Last list (or `null`) |
//! | GET, PATCH, DELETE | `/lists/{listId}` | Show, rename, delete a list |
//! | POST | `/lists/{listId}/tasks` | Add a task |
//! | GET | `/lists/{listId}/tasks/last` | Last task (or `null`) |
//! | PATCH, DELETE | `/lists/{listId}/tasks/{taskId}` | Edit, delete a task |
//! | POST | `/lists/{listId}/tasks/{taskId}/toggle` | Toggle done |
//!
//! Unknown IDs answer 404, malformed IDs and request bodies 400.

pub mod handlers;
mod error;
mod state;

pub use error::{ApiError, ErrorResponse};
pub use state::{AppState, SharedState};

use std::path::PathBuf;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

/// Create the API router
pub fn create_api_router() -> Router<SharedState> {
    Router::new()
        .route("/health", get(handlers::health))
        // Lists API
        .route(
            "/lists",
            get(handlers::list_lists).post(handlers::create_list),
        )
        .route("/lists/last", get(handlers::last_list))
        .route(
            "/lists/{listId}",
            get(handlers::get_list)
                .patch(handlers::rename_list)
                .delete(handlers::delete_list),
        )
        // Tasks API
        .route("/lists/{listId}/tasks", post(handlers::create_task))
        .route("/lists/{listId}/tasks/last", get(handlers::last_task))
        .route(
            "/lists/{listId}/tasks/{taskId}",
            patch(handlers::edit_task).delete(handlers::delete_task),
        )
        .route(
            "/lists/{listId}/tasks/{taskId}/toggle",
            post(handlers::toggle_task),
        )
}

/// Create the full router with optional static file serving
pub fn create_router(state: SharedState, static_dir: Option<PathBuf>) -> Router {
    let router = Router::new()
        .nest("/api", create_api_router())
        .with_state(state);

    let router = match static_dir {
        Some(dir) => {
            let index_file = dir.join("index.html");
            let serve_dir = ServeDir::new(&dir).not_found_service(ServeFile::new(&index_file));
            router.fallback_service(serve_dir)
        }
        None => router,
    };

    router.layer(TraceLayer::new_for_http())
}

/// Start the web server
pub async fn start_server(
    addr: &str,
    state: SharedState,
    static_dir: Option<PathBuf>,
) -> std::io::Result<()> {
    let app = create_router(state, static_dir);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let port = listener.local_addr()?.port();
    tracing::info!("listening at port {}", port);
    println!("listening at port {}", port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(std::io::Error::other)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        tracing::info!("Shutting down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::CollectionStore;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use serde_json::{json, Value};
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn setup(initial: &str) -> (TempDir, CollectionStore, Router) {
        let dir = TempDir::new().unwrap();
        let store = CollectionStore::new(dir.path().join("lists.json"));
        std::fs::write(store.path(), initial).unwrap();

        let state = AppState::load(store.clone()).unwrap().shared();
        (dir, store, create_router(state, None))
    }

    fn home_work() -> (TempDir, CollectionStore, Router) {
        setup(
            r#"[{"id":"tl-1","title":"Home Work","tasks":[
                {"id":"task-1","text":"Maths","hasDone":false},
                {"id":"task-2","text":"English","hasDone":false}]}]"#,
        )
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_dir, _store, app) = home_work();
        let (status, body) = send(app, Method::GET, "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok", "lists": 1}));
    }

    #[tokio::test]
    async fn test_list_lists_returns_serialized_form() {
        let (_dir, _store, app) = setup(r#"[{"id":"tl-1","title":"Home Work","tasks":[]}]"#);
        let (status, body) = send(app, Method::GET, "/api/lists", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{"id": "tl-1", "title": "Home Work", "tasks": []}]));
    }

    #[tokio::test]
    async fn test_create_list_persists() {
        let (_dir, store, app) = setup(r#"[{"id":"tl-1","title":"Home Work","tasks":[]}]"#);
        let (status, body) = send(
            app,
            Method::POST,
            "/api/lists",
            Some(json!({"title": "Class Work"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({"id": "tl-2", "title": "Class Work", "tasks": []}));
        assert_eq!(
            store.read().unwrap().to_json().unwrap(),
            r#"[{"id":"tl-1","title":"Home Work","tasks":[]},{"id":"tl-2","title":"Class Work","tasks":[]}]"#
        );
    }

    #[tokio::test]
    async fn test_last_list_of_empty_collection_is_null() {
        let (_dir, _store, app) = setup("[]");
        let (status, body) = send(app, Method::GET, "/api/lists/last", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, Value::Null);
    }

    #[tokio::test]
    async fn test_get_and_rename_list() {
        let (_dir, _store, app) = home_work();
        let (status, body) = send(app.clone(), Method::GET, "/api/lists/tl-1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "Home Work");

        let (status, body) = send(
            app.clone(),
            Method::PATCH,
            "/api/lists/tl-1",
            Some(json!({"title": "School Work"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["title"], "School Work");

        let (_, body) = send(app, Method::GET, "/api/lists/last", None).await;
        assert_eq!(body["title"], "School Work");
    }

    #[tokio::test]
    async fn test_delete_task_preserves_order() {
        let (_dir, store, app) = home_work();
        let (status, body) =
            send(app, Method::DELETE, "/api/lists/tl-1/tasks/task-1", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["text"], "Maths");

        let collection = store.read().unwrap();
        let texts: Vec<_> = collection.lists()[0]
            .tasks
            .iter()
            .map(|t| t.text.clone())
            .collect();
        assert_eq!(texts, vec!["English"]);
    }

    #[tokio::test]
    async fn test_toggle_task() {
        let (_dir, _store, app) = home_work();
        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/lists/tl-1/tasks/task-1/toggle",
            None,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": "task-1", "text": "Maths", "hasDone": true}));

        let (_, body) = send(app, Method::GET, "/api/lists/tl-1", None).await;
        assert_eq!(body["tasks"][1]["hasDone"], false);
    }

    #[tokio::test]
    async fn test_create_edit_and_last_task() {
        let (_dir, _store, app) = home_work();
        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/lists/tl-1/tasks",
            Some(json!({"text": "Science"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "task-3");

        let (status, _) = send(
            app.clone(),
            Method::PATCH,
            "/api/lists/tl-1/tasks/task-3",
            Some(json!({"text": "Physics"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(app, Method::GET, "/api/lists/tl-1/tasks/last", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": "task-3", "text": "Physics", "hasDone": false}));
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let (_dir, store, app) = home_work();
        let before = store.read().unwrap();

        let (status, body) = send(app.clone(), Method::DELETE, "/api/lists/tl-9", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "To-do list not found: tl-9");

        let (status, _) = send(
            app.clone(),
            Method::POST,
            "/api/lists/tl-1/tasks/task-7/toggle",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app, Method::GET, "/api/lists/tl-4/tasks/last", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        assert_eq!(store.read().unwrap(), before);
    }

    #[tokio::test]
    async fn test_malformed_ids_are_bad_requests() {
        let (_dir, _store, app) = home_work();
        let (status, _) = send(app.clone(), Method::GET, "/api/lists/list-1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(app, Method::DELETE, "/api/lists/tl-1/tasks/1", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_bad_bodies_are_bad_requests() {
        let (_dir, store, app) = home_work();
        let before = store.read().unwrap();

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/lists",
            Some(json!({"name": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("title"));

        let (status, body) = send(
            app.clone(),
            Method::PATCH,
            "/api/lists/tl-1/tasks/task-1",
            Some(json!({"text": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        // No body and no content type
        let (status, body) = send(app, Method::POST, "/api/lists/tl-1/tasks", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        assert_eq!(store.read().unwrap(), before);
    }

    #[tokio::test]
    async fn test_mutation_keeps_edits_made_outside_the_server() {
        let (_dir, store, app) = setup(r#"[{"id":"tl-1","title":"Home Work","tasks":[]}]"#);

        store
            .update(|c| {
                c.add("From CLI")?;
                Ok(())
            })
            .unwrap();

        let (status, body) = send(
            app.clone(),
            Method::POST,
            "/api/lists",
            Some(json!({"title": "From API"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["id"], "tl-3");

        let titles: Vec<_> = store
            .read()
            .unwrap()
            .lists()
            .iter()
            .map(|l| l.title.clone())
            .collect();
        assert_eq!(titles, vec!["Home Work", "From CLI", "From API"]);

        let (_, body) = send(app, Method::GET, "/api/lists", None).await;
        assert_eq!(body.as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_method_not_allowed() {
        let (_dir, _store, app) = home_work();
        let (status, _) = send(app, Method::PUT, "/api/lists", None).await;

        assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn test_static_dir_fallback() {
        let (dir, store, _) = home_work();
        let static_dir = dir.path().join("public");
        std::fs::create_dir_all(&static_dir).unwrap();
        std::fs::write(static_dir.join("index.html"), "<h1>To-Do</h1>").unwrap();

        let state = AppState::load(store).unwrap().shared();
        let app = create_router(state, Some(static_dir));

        let request = Request::builder().uri("/").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>To-Do</h1>");
    }
}
