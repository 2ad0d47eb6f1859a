use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
};
use campus_server::{build_router, state::AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

fn app() -> axum::Router {
    let state = AppState::in_memory().expect("in-memory store should open");
    build_router(state)
}

async fn send_json(
    app: &axum::Router,
    method: Method,
    uri: &str,
    payload: Value,
) -> (StatusCode, Value) {
    send_raw(app, method, uri, Some(payload.to_string())).await
}

async fn send_empty(app: &axum::Router, method: Method, uri: &str) -> (StatusCode, Value) {
    send_raw(app, method, uri, None).await
}

async fn send_raw(
    app: &axum::Router,
    method: Method,
    uri: &str,
    body: Option<String>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body)),
        None => builder.body(Body::empty()),
    }
    .expect("request should build");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("response expected");
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("response body should be readable");

    if body.is_empty() {
        return (status, Value::Null);
    }

    let json = serde_json::from_slice::<Value>(&body).expect("body should be valid JSON");
    (status, json)
}

fn student_json(name: &str, email: &str, age: i32) -> Value {
    json!({
        "name": name,
        "email": email,
        "address": { "street": "123 Main St", "city": "Anytown", "postcode": 12335 },
        "age": age,
        "courses": ["X"],
        "fullTime": true,
        "gpa": 3.0,
        "registerDate": "2024-07-19T08:45:05.546"
    })
}

async fn create(app: &axum::Router, name: &str, email: &str, age: i32) -> String {
    let (status, body) = send_json(
        app,
        Method::POST,
        "/students",
        student_json(name, email, age),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let message = body["message"].as_str().expect("create message expected");
    message
        .rsplit("ID: ")
        .next()
        .expect("message should carry the id")
        .to_string()
}

#[tokio::test]
async fn create_and_get_student() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/students",
        student_json("A", "a@x.com", 10),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let message = body["message"].as_str().unwrap();
    assert!(message.starts_with("A new student is successfully created with ID: "));

    let id = message.rsplit("ID: ").next().unwrap();
    let (status, fetched) = send_empty(&app, Method::GET, &format!("/students/{id}")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id);
    assert_eq!(fetched["name"], "A");
    assert_eq!(fetched["fullTime"], true);
    assert!(fetched.get("graduationDate").is_none());
}

#[tokio::test]
async fn create_with_malformed_body_is_bad_request() {
    let app = app();

    let (status, body) = send_json(
        &app,
        Method::POST,
        "/students",
        json!({ "name": "A", "email": "a@x.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn create_with_duplicate_email_is_conflict() {
    let app = app();
    create(&app, "A", "a@x.com", 10).await;

    let (status, _) = send_json(
        &app,
        Method::POST,
        "/students",
        student_json("B", "a@x.com", 11),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn list_all_returns_empty_array_with_ok() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/students/all").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_unknown_or_malformed_id_is_not_found() {
    let app = app();

    let (status, _) = send_empty(
        &app,
        Method::GET,
        "/students/7d9f1b9e-51a1-4f44-8c1f-0b7f8f2b9a11",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_empty(&app, Method::GET, "/students/not-an-id").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn name_prefix_search_returns_matches_or_no_content() {
    let app = app();
    create(&app, "Anna", "anna@x.com", 20).await;
    create(&app, "Bob", "bob@x.com", 20).await;

    let (status, body) = send_empty(&app, Method::GET, "/students?name=An").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().map(Vec::len), Some(1));
    assert_eq!(body[0]["name"], "Anna");

    let (status, body) = send_empty(&app, Method::GET, "/students?name=Zed").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send_empty(&app, Method::GET, "/students").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn age_range_search_is_inclusive() {
    let app = app();
    for age in [17, 18, 22, 23] {
        create(&app, &format!("S{age}"), &format!("s{age}@x.com"), age).await;
    }

    let (status, body) =
        send_empty(&app, Method::GET, "/students/age?minAge=18&maxAge=22").await;
    assert_eq!(status, StatusCode::OK);
    let ages: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["age"].as_i64().unwrap())
        .collect();
    assert_eq!(ages, vec![18, 22]);

    let (status, _) = send_empty(&app, Method::GET, "/students/age?minAge=40&maxAge=50").await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn patch_changes_only_present_fields() {
    let app = app();
    let id = create(&app, "A", "a@x.com", 10).await;
    let (_, before) = send_empty(&app, Method::GET, &format!("/students/{id}")).await;

    let (status, body) = send_json(
        &app,
        Method::PATCH,
        &format!("/students/{id}"),
        json!({ "email": "b@x.com" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Student partially updated successfully with ID: {id}")
    );
    let mut expected = before.clone();
    expected["email"] = json!("b@x.com");
    assert_eq!(body["student"], expected);
}

#[tokio::test]
async fn patch_unknown_student_is_not_found() {
    let app = app();

    let (status, _) = send_json(
        &app,
        Method::PATCH,
        "/students/7d9f1b9e-51a1-4f44-8c1f-0b7f8f2b9a11",
        json!({ "age": 30 }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn patch_null_clears_graduation_date() {
    let app = app();
    let id = create(&app, "A", "a@x.com", 10).await;

    let (status, body) = send_json(
        &app,
        Method::PATCH,
        &format!("/students/{id}"),
        json!({ "graduationDate": "2030-06-30T00:00:00" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["student"]["graduationDate"], "2030-06-30T00:00:00");

    let (status, body) = send_json(
        &app,
        Method::PATCH,
        &format!("/students/{id}"),
        json!({ "graduationDate": null }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["student"].get("graduationDate").is_none());
}

#[tokio::test]
async fn put_missing_gpa_is_bad_request_and_persists_nothing() {
    let app = app();
    let target = "7d9f1b9e-51a1-4f44-8c1f-0b7f8f2b9a11";

    let mut payload = student_json("A", "a@x.com", 10);
    payload.as_object_mut().unwrap().remove("gpa");

    let (status, body) =
        send_json(&app, Method::PUT, &format!("/students/{target}"), payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing required field: gpa");

    let (status, _) = send_empty(&app, Method::GET, &format!("/students/{target}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_replaces_existing_student() {
    let app = app();
    let id = create(&app, "A", "a@x.com", 10).await;

    let (status, body) = send_json(
        &app,
        Method::PUT,
        &format!("/students/{id}"),
        student_json("B", "b@x.com", 19),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["message"],
        format!("Student updated successfully with ID: {id}")
    );
    assert_eq!(body["student"]["id"], id.as_str());
    assert_eq!(body["student"]["name"], "B");

    let (_, all) = send_empty(&app, Method::GET, "/students/all").await;
    assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn put_unknown_id_creates_student_and_rejects_malformed_id() {
    let app = app();
    let target = "7d9f1b9e-51a1-4f44-8c1f-0b7f8f2b9a11";

    let (status, _) = send_json(
        &app,
        Method::PUT,
        &format!("/students/{target}"),
        student_json("A", "a@x.com", 10),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send_empty(&app, Method::GET, &format!("/students/{target}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], target);

    let (status, _) = send_json(
        &app,
        Method::PUT,
        "/students/not-an-id",
        student_json("A", "a@x.com", 10),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_student_then_reports_not_found() {
    let app = app();
    let id = create(&app, "A", "a@x.com", 10).await;

    let (status, body) = send_empty(&app, Method::DELETE, &format!("/students/{id}")).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, _) = send_empty(&app, Method::GET, &format!("/students/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send_empty(&app, Method::DELETE, &format!("/students/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn healthcheck_reports_version() {
    let app = app();

    let (status, body) = send_empty(&app, Method::GET, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], campus_core::core_version());
}

#[tokio::test]
async fn body_id_of_any_shape_is_ignored_on_patch_and_put() {
    let app = app();
    let id = create(&app, "A", "a@x.com", 10).await;

    let (status, body) = send_json(
        &app,
        Method::PATCH,
        &format!("/students/{id}"),
        json!({ "id": "abc123", "age": 11 }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["student"]["id"], id.as_str());
    assert_eq!(body["student"]["age"], 11);

    let mut payload = student_json("B", "b@x.com", 12);
    payload["id"] = json!("abc123");
    let (status, body) = send_json(&app, Method::PUT, &format!("/students/{id}"), payload).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["student"]["id"], id.as_str());
    assert_eq!(body["student"]["name"], "B");

    let (_, all) = send_empty(&app, Method::GET, "/students/all").await;
    assert_eq!(all.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn openapi_document_describes_student_routes() {
    let app = app();

    let (status, doc) = send_empty(&app, Method::GET, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["openapi"].as_str().unwrap().starts_with("3."));

    let by_id = &doc["paths"]["/students/{id}"];
    for method in ["get", "put", "patch", "delete"] {
        assert!(by_id.get(method).is_some(), "missing {method} /students/{{id}}");
    }
    assert!(by_id["put"]["responses"].get("400").is_some());
    assert!(by_id["patch"]["responses"].get("404").is_some());

    let collection = &doc["paths"]["/students"];
    assert!(collection["post"]["responses"].get("201").is_some());
    assert!(collection["get"]["responses"].get("204").is_some());
    assert!(doc["paths"]["/students/age"].get("get").is_some());
    assert!(doc["paths"]["/students/all"].get("get").is_some());

    let schemas = &doc["components"]["schemas"];
    for name in ["Student", "StudentPatch", "Address", "ErrorBody"] {
        assert!(schemas.get(name).is_some(), "missing schema {name}");
    }
}
