use std::path::Path;

use axum::{
    body::Body,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use rusqlite::Connection;
use serde_json::{json, Value};
use server::{db, routes, AppState};
use shared::{api::Object, types::Uuid};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    // Keeps the shared-cache in-memory database alive across pool connections
    _guard: Connection,
}

async fn test_app() -> TestApp {
    let uri = format!("file:{}?mode=memory&cache=shared", Uuid::new_v4().simple());

    let mut guard = Connection::open(&uri).expect("open in-memory database");
    db::get_migrations()
        .expect("load migrations")
        .to_latest(&mut guard)
        .expect("run migrations");

    let pool = deadpool_sqlite::Config::new(uri)
        .builder(deadpool_sqlite::Runtime::Tokio1)
        .expect("pool builder")
        .build()
        .expect("pool");

    let assets_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets");
    TestApp { router: routes::router(AppState { pool }, &assets_dir), _guard: guard }
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Vec<u8>) {
    let response = router.clone().oneshot(request).await.expect("request");
    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes()
        .to_vec();
    (status, body)
}

async fn post_json(router: &Router, path: &str, body: Value) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(router, request).await
}

async fn post_form(router: &Router, path: &str, body: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method("POST")
        .uri(path)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .unwrap();
    send(router, request).await
}

async fn get(router: &Router, path: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(path).body(Body::empty()).unwrap();
    send(router, request).await
}

fn parse(body: &[u8]) -> Value {
    serde_json::from_slice(body).expect("json body")
}

async fn create_user(router: &Router, username: &str) -> String {
    let (status, body) =
        post_json(router, Object::NewUser.path(), json!({ "username": username })).await;
    assert_eq!(status, StatusCode::OK);
    parse(&body)["_id"].as_str().expect("_id").to_owned()
}

async fn add_exercise(
    router: &Router,
    user_id: &str,
    description: &str,
    duration: &str,
    date: Option<&str>,
) -> (StatusCode, Vec<u8>) {
    let mut body = json!({
        "userId": user_id,
        "description": description,
        "duration": duration,
    });
    if let Some(date) = date {
        body["date"] = json!(date);
    }
    post_json(router, Object::Add.path(), body).await
}

#[tokio::test]
async fn new_user_is_idempotent() {
    let app = test_app().await;

    let first = create_user(&app.router, "alice").await;
    let second = create_user(&app.router, "alice").await;
    assert_eq!(first, second);

    let (status, body) = get(&app.router, Object::Users.path()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(parse(&body)["users"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn new_user_accepts_form_bodies() {
    let app = test_app().await;

    let (status, body) = post_form(&app.router, Object::NewUser.path(), "username=bob").await;
    assert_eq!(status, StatusCode::OK);
    let form_id = parse(&body)["_id"].as_str().unwrap().to_owned();

    // Same username over JSON resolves to the same record
    let json_id = create_user(&app.router, "bob").await;
    assert_eq!(form_id, json_id);
}

#[tokio::test]
async fn new_user_without_username_is_not_found() {
    let app = test_app().await;

    let (status, body) = post_json(&app.router, Object::NewUser.path(), json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"not found");

    let (status, _) =
        post_json(&app.router, Object::NewUser.path(), json!({ "username": "" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_listing_projects_id_and_username_only() {
    let app = test_app().await;

    let id = create_user(&app.router, "carol").await;
    add_exercise(&app.router, &id, "situps", "30", None).await;

    let (status, body) = get(&app.router, Object::Users.path()).await;
    assert_eq!(status, StatusCode::OK);

    let users = parse(&body)["users"].as_array().unwrap().clone();
    assert_eq!(users.len(), 1);
    let user = users[0].as_object().unwrap();
    assert_eq!(user.len(), 2);
    assert_eq!(user["id"].as_str().unwrap(), id);
    assert_eq!(user["username"], "carol");
}

#[tokio::test]
async fn add_returns_submitted_values_verbatim() {
    let app = test_app().await;
    let id = create_user(&app.router, "dave").await;

    let (status, body) = add_exercise(&app.router, &id, "jumping jacks", "007", None).await;
    assert_eq!(status, StatusCode::OK);

    let response = parse(&body);
    assert_eq!(response["user"], "dave");
    assert_eq!(response["description"], "jumping jacks");
    // String passthrough, no numeric coercion
    assert_eq!(response["duration"], "007");
    // Omitted date defaults to today's UTC date
    assert_eq!(
        response["date"].as_str().unwrap(),
        chrono::Utc::now().date_naive().to_string()
    );
}

#[tokio::test]
async fn add_with_unknown_user_reports_no_such_user() {
    let app = test_app().await;

    let missing = Uuid::new_v4().to_string();
    let (status, body) = add_exercise(&app.router, &missing, "situps", "30", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"No such user");
}

#[tokio::test]
async fn add_resolves_the_user_before_casting_the_date() {
    let app = test_app().await;

    // An unknown user wins over an unparsable date
    let missing = Uuid::new_v4().to_string();
    let (status, body) = add_exercise(&app.router, &missing, "situps", "30", Some("soonish")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"No such user");
}

#[tokio::test]
async fn add_with_malformed_user_id_is_an_internal_error() {
    let app = test_app().await;

    let (status, _) = add_exercise(&app.router, "abc", "situps", "30", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn add_with_missing_field_is_not_found() {
    let app = test_app().await;
    let id = create_user(&app.router, "erin").await;

    let (status, body) = post_json(
        &app.router,
        Object::Add.path(),
        json!({ "userId": id, "duration": "30" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"not found");
}

#[tokio::test]
async fn add_with_unparsable_date_is_a_validation_error() {
    let app = test_app().await;
    let id = create_user(&app.router, "frank").await;

    let (status, body) = add_exercise(&app.router, &id, "situps", "30", Some("soonish")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let message = String::from_utf8(body).unwrap();
    assert!(message.contains("date"), "unexpected message: {message}");
}

#[tokio::test]
async fn log_filters_by_inclusive_date_window() {
    let app = test_app().await;
    let id = create_user(&app.router, "grace").await;

    for date in ["2020-01-01", "2020-02-01", "2020-03-01"] {
        let (status, _) = add_exercise(&app.router, &id, "situps", "30", Some(date)).await;
        assert_eq!(status, StatusCode::OK);
    }

    let path = format!(
        "{}?userId={id}&from=2020-01-15&to=2020-02-15",
        Object::Log.path()
    );
    let (status, body) = get(&app.router, &path).await;
    assert_eq!(status, StatusCode::OK);

    let response = parse(&body);
    assert_eq!(response["count"], 1);
    let log = response["log"].as_array().unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0]["date"], "2020-02-01");
}

#[tokio::test]
async fn log_truncates_to_limit_in_insertion_order() {
    let app = test_app().await;
    let id = create_user(&app.router, "heidi").await;

    // Inserted out of date order on purpose: the log keeps insertion order
    for (description, date) in [
        ("first", "2020-05-01"),
        ("second", "2020-01-01"),
        ("third", "2020-03-01"),
        ("fourth", "2020-02-01"),
        ("fifth", "2020-04-01"),
    ] {
        add_exercise(&app.router, &id, description, "10", Some(date)).await;
    }

    let path = format!("{}?userId={id}&limit=2", Object::Log.path());
    let (status, body) = get(&app.router, &path).await;
    assert_eq!(status, StatusCode::OK);

    let response = parse(&body);
    assert_eq!(response["username"], "heidi");
    assert_eq!(response["count"], 2);
    let log = response["log"].as_array().unwrap();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0]["description"], "first");
    assert_eq!(log[1]["description"], "second");
}

#[tokio::test]
async fn log_with_invalid_limit_is_untruncated() {
    let app = test_app().await;
    let id = create_user(&app.router, "ivan").await;

    for date in ["2020-01-01", "2020-02-01", "2020-03-01"] {
        add_exercise(&app.router, &id, "situps", "30", Some(date)).await;
    }

    let path = format!("{}?userId={id}&limit=two", Object::Log.path());
    let (_, body) = get(&app.router, &path).await;
    assert_eq!(parse(&body)["count"], 3);
}

#[tokio::test]
async fn log_with_unparsable_bound_matches_nothing() {
    let app = test_app().await;
    let id = create_user(&app.router, "judy").await;
    add_exercise(&app.router, &id, "situps", "30", Some("2020-02-01")).await;

    let path = format!(
        "{}?userId={id}&from=whenever&to=2020-12-31",
        Object::Log.path()
    );
    let (status, body) = get(&app.router, &path).await;
    assert_eq!(status, StatusCode::OK);

    let response = parse(&body);
    assert_eq!(response["count"], 0);
    assert!(response["log"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn log_with_unknown_user_reports_no_such_user() {
    let app = test_app().await;

    let path = format!("{}?userId={}", Object::Log.path(), Uuid::new_v4());
    let (status, body) = get(&app.router, &path).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"\"No such user!\"");
}

#[tokio::test]
async fn log_with_malformed_user_id_is_an_internal_error() {
    let app = test_app().await;

    let path = format!("{}?userId=abc", Object::Log.path());
    let (status, _) = get(&app.router, &path).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn log_without_user_id_is_not_found() {
    let app = test_app().await;

    let (status, body) = get(&app.router, Object::Log.path()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"not found");
}

#[tokio::test]
async fn unmatched_routes_are_not_found_for_any_method() {
    let app = test_app().await;

    let (status, body) = get(&app.router, "/api/exercise/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"not found");

    let (status, body) = post_json(&app.router, "/api/exercise/nope", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, b"not found");
}

#[tokio::test]
async fn index_page_is_served() {
    let app = test_app().await;

    let (status, body) = get(&app.router, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(String::from_utf8(body).unwrap().contains("Exercise Tracker"));
}
