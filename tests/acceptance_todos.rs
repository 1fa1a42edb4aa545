use axum::Router;
use axum::body::to_bytes;
use serde_json::{Value, json};
use todo_api::application::todo_service::TodoServiceImpl;
use todo_api::http::routing::{self, todos};
use todo_api::infrastructure::{event_log::EventLog, file_repo::FileTodoRepository};

fn app(dir: &tempfile::TempDir) -> Router {
    let repo = FileTodoRepository::new(dir.path().join("todos.json"));
    let service = TodoServiceImpl::new(repo);
    let events = EventLog::spawn(dir.path().join("logs.txt"));
    routing::app(todos::router(todos::AppState { service, events }))
}

#[tokio::test]
async fn acceptance_create_get_update_delete() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    // create on an empty store assigns id 1
    let res = request(&app, "POST", "/todos", Some(json!({ "title": "buy milk" }))).await;
    assert_eq!(res.status(), 201);
    let created = body_json(res).await;
    assert_eq!(created, json!({ "id": 1, "title": "buy milk", "completed": false }));

    // get returns the identical object, repeatedly
    for _ in 0..2 {
        let res = request(&app, "GET", "/todos/1", None).await;
        assert_eq!(res.status(), 200);
        assert_eq!(body_json(res).await, created);
    }

    // partial update keeps unspecified fields
    let res = request(&app, "PUT", "/todos/1", Some(json!({ "completed": true }))).await;
    assert_eq!(res.status(), 200);
    assert_eq!(
        body_json(res).await,
        json!({ "id": 1, "title": "buy milk", "completed": true })
    );

    // delete
    let res = request(&app, "DELETE", "/todos/1", None).await;
    assert_eq!(res.status(), 200);
    assert_eq!(body_json(res).await, json!({ "message": "Todo deleted" }));

    // gone
    let res = request(&app, "GET", "/todos/1", None).await;
    assert_eq!(res.status(), 404);
    assert_eq!(body_json(res).await, json!({ "message": "Todo not found" }));
}

#[tokio::test]
async fn acceptance_missing_title_is_rejected_and_nothing_persists() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let res = request(&app, "POST", "/todos", Some(json!({ "completed": true }))).await;
    assert_eq!(res.status(), 400);
    assert_eq!(body_json(res).await, json!({ "message": "Title is required" }));

    let res = request(&app, "POST", "/todos", Some(json!({ "title": "" }))).await;
    assert_eq!(res.status(), 400);

    let res = request(&app, "GET", "/todos", None).await;
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn acceptance_malformed_json_is_a_400() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let res = request_raw(&app, "POST", "/todos", "{not json").await;
    assert_eq!(res.status(), 400);
    assert_eq!(body_json(res).await, json!({ "message": "Invalid JSON" }));

    let res = request_raw(&app, "PUT", "/todos/1", "{not json").await;
    assert_eq!(res.status(), 400);
    assert_eq!(body_json(res).await, json!({ "message": "Invalid JSON" }));
}

#[tokio::test]
async fn acceptance_completed_filter_is_compared_as_string() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    request(&app, "POST", "/todos", Some(json!({ "title": "a", "completed": true }))).await;
    request(&app, "POST", "/todos", Some(json!({ "title": "b" }))).await;

    let res = request(&app, "GET", "/todos?completed=true", None).await;
    assert_eq!(
        body_json(res).await,
        json!([{ "id": 1, "title": "a", "completed": true }])
    );

    // only the literal strings "true"/"false" can match
    let res = request(&app, "GET", "/todos?completed=yes", None).await;
    assert_eq!(body_json(res).await, json!([]));
}

#[tokio::test]
async fn acceptance_id_restarts_after_delete_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let res = request(&app, "POST", "/todos", Some(json!({ "title": "a" }))).await;
    assert_eq!(body_json(res).await["id"], 1);
    request(&app, "DELETE", "/todos/1", None).await;
    let res = request(&app, "POST", "/todos", Some(json!({ "title": "b" }))).await;
    assert_eq!(body_json(res).await["id"], 1);
}

#[tokio::test]
async fn acceptance_update_and_delete_of_missing_ids_are_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);
    request(&app, "POST", "/todos", Some(json!({ "title": "keep me" }))).await;

    let res = request(&app, "PUT", "/todos/9", Some(json!({ "completed": true }))).await;
    assert_eq!(res.status(), 404);

    let res = request(&app, "DELETE", "/todos/9", None).await;
    assert_eq!(res.status(), 404);
    assert_eq!(body_json(res).await, json!({ "message": "Todo not found" }));

    // non-numeric ids can never exist
    let res = request(&app, "GET", "/todos/abc", None).await;
    assert_eq!(res.status(), 404);

    let res = request(&app, "GET", "/todos", None).await;
    assert_eq!(body_json(res).await.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn acceptance_unmatched_routes_are_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = app(&dir);

    let res = request(&app, "GET", "/nope", None).await;
    assert_eq!(res.status(), 404);
    assert_eq!(body_json(res).await, json!({ "message": "Route not found" }));
}

async fn request(app: &Router, method: &str, path: &str, body: Option<Value>) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder().method(Method::from_bytes(method.as_bytes()).unwrap()).uri(path);
    let req = match body {
        Some(json) => req.header("content-type", "application/json").body(Body::from(json.to_string())).unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(req).await.unwrap()
}

async fn request_raw(app: &Router, method: &str, path: &str, body: &str) -> hyper::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    let req = Request::builder()
        .method(Method::from_bytes(method.as_bytes()).unwrap())
        .uri(path)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(res: hyper::Response<axum::body::Body>) -> Value {
    serde_json::from_slice(&to_bytes(res.into_body(), 1024 * 1024).await.unwrap()).unwrap()
}
