use std::path::PathBuf;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

struct TestApp {
    router: Router,
    db_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_path);
    }
}

async fn build_app() -> anyhow::Result<TestApp> {
    let db_path = std::env::temp_dir().join(format!("users_api_routes_{}.json", Uuid::new_v4()));
    let mut cfg = configs::AppConfig::default();
    cfg.storage.path = db_path.display().to_string();
    let router = server::startup::build_app(&cfg).await?;
    Ok(TestApp { router, db_path })
}

async fn send(app: &TestApp, method: &str, uri: &str, body: Option<Value>) -> anyhow::Result<(StatusCode, Value)> {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&b)?))?,
        None => builder.body(Body::empty())?,
    };
    let resp = app.router.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes)? };
    Ok((status, json))
}

async fn send_raw(app: &TestApp, method: &str, uri: &str, body: &'static str) -> anyhow::Result<(StatusCode, Value)> {
    let req = Request::builder().method(method).uri(uri).body(Body::from(body))?;
    let resp = app.router.clone().oneshot(req).await?;
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&bytes)?))
}

fn ann() -> Value {
    json!({"firstName": "Ann", "lastName": "Lee", "email": "a@x.com", "mobile": "123", "city": "NYC"})
}

async fn create(app: &TestApp, body: Value) -> anyhow::Result<String> {
    let (status, json) = send(app, "POST", "/createUser", Some(body)).await?;
    assert_eq!(status, StatusCode::CREATED);
    Ok(json["user"]["id"].as_str().unwrap().to_string())
}

#[tokio::test]
async fn list_on_empty_store_is_404() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/users", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "No Users Found!"}));
    Ok(())
}

#[tokio::test]
async fn create_then_view_returns_same_record() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/createUser", Some(ann())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully!");

    let id = body["user"]["id"].as_str().unwrap().to_string();
    assert!(chrono_like(&id), "id should be an ISO-8601 timestamp: {id}");
    let mut expected = ann();
    expected["id"] = json!(id);
    assert_eq!(body["user"], expected);

    let (status, body) = send(&app, "GET", &format!("/viewUser/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Fetched User Successfully!");
    assert_eq!(body["data"], expected);
    Ok(())
}

// 2024-05-01T12:00:00.000Z
fn chrono_like(id: &str) -> bool {
    let b = id.as_bytes();
    id.len() == 24 && b[4] == b'-' && b[10] == b'T' && b[19] == b'.' && id.ends_with('Z')
}

#[tokio::test]
async fn list_returns_exactly_the_collection() -> anyhow::Result<()> {
    let app = build_app().await?;
    let first = create(&app, ann()).await?;
    let second = create(&app, json!({"firstName": "Bea"})).await?;
    assert_ne!(first, second);

    let (status, body) = send(&app, "GET", "/users", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Fetched user data successfully!");
    let users = body["users"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert_eq!(users[0]["id"], json!(first));
    assert_eq!(users[1], json!({"id": second, "firstName": "Bea"}));
    Ok(())
}

#[tokio::test]
async fn unknown_ids_are_404_with_route_wording() -> anyhow::Result<()> {
    let app = build_app().await?;
    create(&app, ann()).await?;

    let (status, body) = send(&app, "GET", "/viewUser/unknown-id", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "User Not Found"}));

    let (status, body) = send(&app, "DELETE", "/deleteUser/unknown-id", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "No such user exists!"}));

    let (status, body) = send(&app, "PUT", "/updateUser/unknown-id", Some(ann())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "No such user exists!"}));
    Ok(())
}

#[tokio::test]
async fn delete_all_then_list_is_404() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "DELETE", "/deleteAllUsers", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "No Users Found!"}));

    create(&app, ann()).await?;
    create(&app, ann()).await?;
    let (status, body) = send(&app, "DELETE", "/deleteAllUsers", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Deleted all users successfully!"}));

    let (status, _) = send(&app, "GET", "/users", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_by_id_removes_only_that_user() -> anyhow::Result<()> {
    let app = build_app().await?;
    let gone = create(&app, ann()).await?;
    let kept = create(&app, json!({"firstName": "Bea"})).await?;

    let (status, body) = send(&app, "DELETE", &format!("/deleteUser/{gone}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Deleted user successfully!"}));

    let (status, _) = send(&app, "GET", &format!("/viewUser/{gone}"), None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, "GET", &format!("/viewUser/{kept}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn full_update_is_visible_on_view() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create(&app, ann()).await?;
    let update = json!({"firstName": "Bea", "lastName": "Kim", "email": "b@y.com", "mobile": "456", "city": "SF"});

    let (status, body) = send(&app, "PUT", &format!("/updateUser/{id}"), Some(update.clone())).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User updated successfully!"}));

    let (_, body) = send(&app, "GET", &format!("/viewUser/{id}"), None).await?;
    let mut expected = update;
    expected["id"] = json!(id);
    assert_eq!(body["data"], expected);
    Ok(())
}

#[tokio::test]
async fn partial_update_keeps_other_fields() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create(&app, ann()).await?;

    let (status, _) = send(&app, "PUT", &format!("/updateUser/{id}"), Some(json!({"city": "LA", "role": "admin"}))).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/viewUser/{id}"), None).await?;
    assert_eq!(body["data"]["city"], "LA");
    assert_eq!(body["data"]["firstName"], "Ann");
    assert!(body["data"].get("role").is_none());
    Ok(())
}

#[tokio::test]
async fn caller_id_is_overwritten_and_extra_fields_kept() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/createUser", Some(json!({"id": "mine", "firstName": "Ann", "nickname": "annie"}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(body["user"]["id"], "mine");
    assert_eq!(body["user"]["nickname"], "annie");
    Ok(())
}

#[tokio::test]
async fn mutations_are_written_to_the_store_file() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create(&app, ann()).await?;

    let on_disk: Value = serde_json::from_slice(&tokio::fs::read(&app.db_path).await?)?;
    let users = on_disk["users"].as_array().unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0]["id"], json!(id));
    assert_eq!(users[0]["email"], "a@x.com");
    Ok(())
}

#[tokio::test]
async fn unmatched_routes_get_route_not_found() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/nope", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Route not found!"}));

    // known path, unsupported method
    let (status, body) = send(&app, "POST", "/users", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "Route not found!"}));
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_rejected_by_extractor() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method("POST")
        .uri("/createUser")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))?;
    let resp = app.router.clone().oneshot(req).await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/users", None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_document() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "GET", "/health", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await?;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/createUser"].is_object());
    Ok(())
}

#[tokio::test]
async fn non_string_fields_are_stored_as_sent() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/createUser", Some(json!({"firstName": "Ann", "mobile": 9876543210u64}))).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["mobile"], json!(9876543210u64));
    let id = body["user"]["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "PUT", &format!("/updateUser/{id}"), Some(json!({"city": 1}))).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/viewUser/{id}"), None).await?;
    assert_eq!(body["data"]["city"], json!(1));
    assert_eq!(body["data"]["mobile"], json!(9876543210u64));
    Ok(())
}

#[tokio::test]
async fn create_without_body_or_content_type_succeeds() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, "POST", "/createUser", None).await?;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["user"], json!({"id": id}));

    // JSON text without a content-type header is still read
    let (status, body) = send_raw(&app, "POST", "/createUser", r#"{"firstName": "Bea"}"#).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["firstName"], "Bea");
    Ok(())
}

#[tokio::test]
async fn update_without_body_succeeds_and_changes_nothing() -> anyhow::Result<()> {
    let app = build_app().await?;
    let id = create(&app, ann()).await?;

    let (status, body) = send(&app, "PUT", &format!("/updateUser/{id}"), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "User updated successfully!"}));

    let (_, body) = send(&app, "GET", &format!("/viewUser/{id}"), None).await?;
    let mut expected = ann();
    expected["id"] = json!(id);
    assert_eq!(body["data"], expected);
    Ok(())
}
