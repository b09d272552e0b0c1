use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use jsonwebtoken::{decode, DecodingKey, Validation};
use kys_backend::auth::Claims;
use kys_backend::{app, store, AppState, Settings};
use serde_json::{json, Value};
use tower::ServiceExt;

const SECRET: &str = "test-secret";

async fn test_app() -> (Router, AppState) {
    let settings = Settings::from_lookup(|key| match key {
        "JWT_SECRET" => Some(SECRET.to_string()),
        "DATABASE_URL" => Some("sqlite::memory:".to_string()),
        _ => None,
    })
    .unwrap();
    let pool = store::connect(&settings.database_url, settings.max_connections)
        .await
        .unwrap();
    store::ensure_tables(&pool).await.unwrap();
    let state = AppState::new(pool, &settings).unwrap();
    (app(state.clone()), state)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(b) => builder
            .header("content-type", "application/json")
            .body(Body::from(b.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, method: &str, uri: &str, raw: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn health_and_ready() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ok");

    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ready");

    let (status, body) = send(&app, "GET", "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "kys-backend");
}

#[tokio::test]
async fn ready_reports_503_in_error_envelope_when_database_is_gone() {
    let (app, state) = test_app().await;
    state.pool.close().await;
    let (status, body) = send(&app, "GET", "/ready", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"error": "database unavailable"}));
}

#[tokio::test]
async fn empty_tables_list_as_404() {
    let (app, _) = test_app().await;
    for (uri, message) in [
        ("/user/", "No Users Found"),
        ("/admin/", "No Admins Found"),
        ("/sneaker/", "No Sneakers Found"),
        ("/sneaker/info", "No Sneakers Found"),
        ("/sneaker/availability", "No Sneakers Found"),
        ("/provider/", "No Providers Found"),
    ] {
        let (status, body) = send(&app, "GET", uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"], message, "{}", uri);
    }
}

#[tokio::test]
async fn user_create_then_fetch_returns_email_without_password() {
    let (app, _) = test_app().await;
    let (status, body) = send(
        &app,
        "POST",
        "/user/",
        Some(json!({"email": "ana@kys.io", "password": "pw"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], "User added to the database");

    let (status, body) = send(&app, "GET", "/user/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["email"], "ana@kys.io");
    assert!(body["data"].get("password").is_none());
    assert!(body["data"]["createdAt"].is_string());

    let (status, body) = send(&app, "GET", "/user", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_and_malformed_ids() {
    let (app, _) = test_app().await;
    let (status, body) = send(&app, "GET", "/user/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    let (status, body) = send(&app, "GET", "/admin/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "incorrect ID");

    let (status, _) = send(&app, "DELETE", "/user/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", "/provider/7", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let (app, _) = test_app().await;
    let (status, body) = send_raw(&app, "POST", "/admin/", "{\"email\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad JSON");

    let (status, body) = send(&app, "POST", "/admin/", Some(json!({"email": "x@kys.io"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "bad JSON");
}

#[tokio::test]
async fn admin_patch_and_delete() {
    let (app, _) = test_app().await;
    send(
        &app,
        "POST",
        "/admin/",
        Some(json!({"email": "root@kys.io", "password": "pw"})),
    )
    .await;

    let (status, body) = send(&app, "PATCH", "/admin/1", Some(json!({"email": "", "password": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no fields to update");
    let (_, body) = send(&app, "GET", "/admin/1", None).await;
    assert_eq!(body["data"]["email"], "root@kys.io");

    let (status, body) = send(&app, "PATCH", "/admin/1", Some(json!({"email": "ops@kys.io"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Admin Updated!");
    let (_, body) = send(&app, "GET", "/admin/1", None).await;
    assert_eq!(body["data"]["email"], "ops@kys.io");

    let (status, body) = send(&app, "DELETE", "/admin/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Admin Deleted!");
    let (status, _) = send(&app, "DELETE", "/admin/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_email_is_conflict() {
    let (app, _) = test_app().await;
    let body = json!({"email": "dup@kys.io", "password": "pw"});
    let (status, _) = send(&app, "POST", "/user/", Some(body.clone())).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "POST", "/user/", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "User with this email already exists");
}

#[tokio::test]
async fn patch_onto_taken_email_is_conflict_without_sqlite_details() {
    let (app, _) = test_app().await;
    for email in ["a@kys.io", "b@kys.io"] {
        let (status, _) = send(
            &app,
            "POST",
            "/user/",
            Some(json!({"email": email, "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    let (status, body) = send(&app, "PATCH", "/user/2", Some(json!({"email": "a@kys.io"}))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body, json!({"error": "User with this email already exists"}));

    let (_, body) = send(&app, "GET", "/user/2", None).await;
    assert_eq!(body["data"]["email"], "b@kys.io");
}

#[tokio::test]
async fn login_issues_token_for_exact_credentials_only() {
    let (app, _) = test_app().await;
    send(
        &app,
        "POST",
        "/user/",
        Some(json!({"email": "first@kys.io", "password": "a"})),
    )
    .await;
    send(
        &app,
        "POST",
        "/user/",
        Some(json!({"email": "Lee@kys.io", "password": "open sesame"})),
    )
    .await;

    let (status, body) = send(
        &app,
        "POST",
        "/login/",
        Some(json!({"email": "Lee@kys.io", "password": "open sesame"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["token"].as_str().unwrap();
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(SECRET.as_bytes()),
        &Validation::default(),
    )
    .unwrap()
    .claims;
    assert_eq!(claims.user_id, 2);

    for (email, password) in [
        ("Lee@kys.io", "open sesam"),
        ("lee@kys.io", "open sesame"),
        ("Lee@kys.io", "OPEN SESAME"),
        ("nobody@kys.io", "open sesame"),
    ] {
        let (status, body) = send(
            &app,
            "POST",
            "/login",
            Some(json!({"email": email, "password": password})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{} / {}", email, password);
        assert_eq!(body["error"], "incorrect email or password");
    }
}

#[tokio::test]
async fn availability_aggregates_one_entry_per_sneaker() {
    let (app, state) = test_app().await;
    for name in ["Dunk", "Samba"] {
        let (status, _) = send(
            &app,
            "POST",
            "/sneaker/",
            Some(json!({"name": name, "model": "Low", "brand": "Nike"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    for name in ["Footshop", "Zalando"] {
        let (status, _) = send(&app, "POST", "/provider/", Some(json!({"providerName": name}))).await;
        assert_eq!(status, StatusCode::OK);
    }
    // Second sneaker's row lands between the first sneaker's two rows.
    for (product, provider, price) in [(1, 1, 100.0), (2, 1, 80.0), (1, 2, 95.5)] {
        sqlx::query(
            "INSERT INTO provider_information (product_id, provider_id, price, available) VALUES (?, ?, ?, 1)",
        )
        .bind(product as i64)
        .bind(provider as i64)
        .bind(price)
        .execute(&state.pool)
        .await
        .unwrap();
    }

    let (status, body) = send(&app, "GET", "/sneaker/availability", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["id"], 1);
    assert_eq!(data[0]["name"], "Dunk");
    let offers = data[0]["availability"].as_array().unwrap();
    assert_eq!(offers.len(), 2);
    assert_eq!(offers[0]["providerId"], 1);
    assert_eq!(offers[1]["providerId"], 2);
    assert_eq!(offers[1]["price"], 95.5);
    assert_eq!(offers[1]["available"], true);
    assert_eq!(data[1]["availability"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn sneaker_information_and_scrappers() {
    let (app, state) = test_app().await;
    let (status, _) = send(
        &app,
        "POST",
        "/sneaker",
        Some(json!({
            "name": "Gel",
            "model": "1130",
            "brand": "Asics",
            "information": {"mainInfo": "runner", "mainImageUrl": "https://img/gel.png"}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    send(&app, "POST", "/provider", Some(json!({"providerName": "Footshop"}))).await;

    let (status, body) = send(&app, "GET", "/sneaker/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["brand"], "Asics");
    assert_eq!(body["data"]["sneakerInformation"]["mainInfo"], "runner");
    assert_eq!(body["data"]["sneakerInformation"]["additionalInfo"], "");

    let (status, body) = send(&app, "GET", "/sneaker/info", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "GET", "/sneaker/1/scrapper", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for term in ["asics gel 1130", "gel-1130 white"] {
        sqlx::query(
            "INSERT INTO availability_scrappers (product_id, provider_id, search_for) VALUES (1, 1, ?)",
        )
        .bind(term)
        .execute(&state.pool)
        .await
        .unwrap();
    }
    let (status, body) = send(&app, "GET", "/sneaker/1/scrapper", None).await;
    assert_eq!(status, StatusCode::OK);
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    let scrappers = data[0]["scrapper"].as_array().unwrap();
    assert_eq!(scrappers.len(), 2);
    assert_eq!(scrappers[0]["searchFor"], "asics gel 1130");

    let (status, _) = send(&app, "GET", "/sneaker/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sneaker_and_provider_patch() {
    let (app, _) = test_app().await;
    send(
        &app,
        "POST",
        "/sneaker/",
        Some(json!({"name": "Dunk", "model": "Low", "brand": "Nike"})),
    )
    .await;
    send(&app, "POST", "/provider/", Some(json!({"providerName": "Footshop"}))).await;

    let (status, _) = send(&app, "PATCH", "/sneaker/1", Some(json!({"model": "High"}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/sneaker/", None).await;
    assert_eq!(body["data"][0]["model"], "High");
    assert_eq!(body["data"][0]["name"], "Dunk");

    let (status, _) = send(&app, "PATCH", "/sneaker/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PATCH", "/provider/1", Some(json!({"providerName": "Snipes"}))).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/provider/1", None).await;
    assert_eq!(body["data"]["providerName"], "Snipes");

    let (status, _) = send(&app, "PATCH", "/provider/9", Some(json!({"providerName": "X"}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
