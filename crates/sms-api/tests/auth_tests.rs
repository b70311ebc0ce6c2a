use axum::http::StatusCode;
use serde_json::json;

use sms_api::{auth::Role, router};

use crate::common::{self, TestClient, TestStateBuilder};

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_health_check() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");

    let client = TestClient::new(router::router().with_state(state.clone()));

    let response = client.get("/health", None).await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_register_then_login_then_me() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let admin = common::admin_token(&state);

    let response = client
        .post_json(
            "/api/v1/auth/register",
            &json!({
                "email": "clerk@example.com",
                "password": "password123",
                "full_name": "Front Office",
                "role": "Faculty"
            }),
            Some(&admin),
        )
        .await;
    response.assert_status(StatusCode::CREATED);
    assert_eq!(response.json()["role"], "Faculty");

    let login = client
        .post_json(
            "/api/v1/auth/login",
            &json!({
                "email": "clerk@example.com",
                "password": "password123"
            }),
            None,
        )
        .await;
    login.assert_status(StatusCode::OK);
    let token = login.json()["token"].as_str().unwrap().to_string();

    let me = client.get("/api/v1/auth/me", Some(&token)).await;
    me.assert_status(StatusCode::OK);
    assert_eq!(me.json()["email"], "clerk@example.com");

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_login_with_wrong_password() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let admin = common::admin_token(&state);

    client
        .post_json(
            "/api/v1/auth/register",
            &json!({
                "email": "clerk@example.com",
                "password": "password123",
                "full_name": "Front Office",
                "role": "Faculty"
            }),
            Some(&admin),
        )
        .await
        .assert_status(StatusCode::CREATED);

    let response = client
        .post_json(
            "/api/v1/auth/login",
            &json!({
                "email": "clerk@example.com",
                "password": "wrong-password1"
            }),
            None,
        )
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    // Unknown email yields the same message as a wrong password
    let unknown = client
        .post_json(
            "/api/v1/auth/login",
            &json!({
                "email": "nobody@example.com",
                "password": "wrong-password1"
            }),
            None,
        )
        .await;
    unknown.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.json()["error"], response.json()["error"]);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_register_is_admin_only() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let faculty = common::token_for(&state, Role::Faculty);

    let body = json!({
        "email": "clerk@example.com",
        "password": "password123",
        "full_name": "Front Office",
        "role": "Student"
    });

    client
        .post_json("/api/v1/auth/register", &body, Some(&faculty))
        .await
        .assert_status(StatusCode::FORBIDDEN);
    client
        .post_json("/api/v1/auth/register", &body, None)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_register_rejects_weak_passwords() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let admin = common::admin_token(&state);

    for password in ["short1", "lettersonly", "12345678"] {
        let response = client
            .post_json(
                "/api/v1/auth/register",
                &json!({
                    "email": "clerk@example.com",
                    "password": password,
                    "full_name": "Front Office",
                    "role": "Faculty"
                }),
                Some(&admin),
            )
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
    }

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_protected_route_rejects_missing_and_garbage_tokens() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");

    let client = TestClient::new(router::router().with_state(state.clone()));

    client
        .get("/api/v1/students", None)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    client
        .get("/api/v1/students", Some("not.a.jwt"))
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}
