use axum::http::StatusCode;
use chrono::{Duration, Utc};
use serde_json::json;

use sms_api::router;

use crate::common::{self, TestClient, TestStateBuilder};

async fn create_student(client: &TestClient, token: &str, email: &str) -> String {
    let response = client
        .post_json(
            "/api/v1/students",
            &json!({
                "first_name": "Student",
                "last_name": "Test",
                "email": email
            }),
            Some(token),
        )
        .await;
    response.assert_status(StatusCode::CREATED);
    response.json()["id"].as_str().unwrap().to_string()
}

async fn create_fee(
    client: &TestClient,
    token: &str,
    student_id: &str,
    total: f64,
    due_in_days: i64,
) -> crate::common::TestResponse {
    let due_date = (Utc::now().date_naive() + Duration::days(due_in_days)).to_string();
    client
        .post_json(
            "/api/v1/fees",
            &json!({
                "student_id": student_id,
                "fee_type": "Tuition",
                "term": "2026-T1",
                "total_amount": total,
                "due_date": due_date
            }),
            Some(token),
        )
        .await
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_new_fee_starts_pending_with_full_amount_due() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "payer@example.com").await;
    let response = create_fee(&client, &token, &student, 1000.0, 30).await;
    response.assert_status(StatusCode::CREATED);

    let fee = response.json();
    assert_eq!(fee["payment_status"], "Pending");
    assert_eq!(fee["total_amount"], 1000.0);
    assert_eq!(fee["paid_amount"], 0.0);
    assert_eq!(fee["amount_due"], 1000.0);
    assert_eq!(fee["is_overdue"], false);
    assert_eq!(fee["days_overdue"], 0);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_duplicate_fee_type_and_term_is_a_conflict() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "payer@example.com").await;
    create_fee(&client, &token, &student, 1000.0, 30)
        .await
        .assert_status(StatusCode::CREATED);
    create_fee(&client, &token, &student, 500.0, 30)
        .await
        .assert_status(StatusCode::CONFLICT);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_payments_move_status_partial_then_paid() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "payer@example.com").await;
    let created = create_fee(&client, &token, &student, 1000.0, 30).await;
    let fee_id = created.json()["id"].as_str().unwrap().to_string();

    let partial = client
        .post_json(
            &format!("/api/v1/fees/{fee_id}/payments"),
            &json!({ "amount": 400.0 }),
            Some(&token),
        )
        .await;
    partial.assert_status(StatusCode::OK);
    assert_eq!(partial.json()["payment_status"], "Partial");
    assert_eq!(partial.json()["amount_due"], 600.0);
    assert!(partial.json()["paid_date"].is_null());

    let settled = client
        .post_json(
            &format!("/api/v1/fees/{fee_id}/payments"),
            &json!({ "amount": 600.0 }),
            Some(&token),
        )
        .await;
    settled.assert_status(StatusCode::OK);
    assert_eq!(settled.json()["payment_status"], "Paid");
    assert_eq!(settled.json()["amount_due"], 0.0);
    assert!(settled.json()["paid_date"].is_string());

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_overpayment_is_rejected() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "payer@example.com").await;
    let created = create_fee(&client, &token, &student, 1000.0, 30).await;
    let fee_id = created.json()["id"].as_str().unwrap().to_string();

    client
        .post_json(
            &format!("/api/v1/fees/{fee_id}/payments"),
            &json!({ "amount": 1500.0 }),
            Some(&token),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    client
        .post_json(
            &format!("/api/v1/fees/{fee_id}/payments"),
            &json!({ "amount": -10.0 }),
            Some(&token),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_past_due_fee_reads_as_overdue() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "payer@example.com").await;
    let created = create_fee(&client, &token, &student, 1000.0, -10).await;
    created.assert_status(StatusCode::CREATED);
    let fee_id = created.json()["id"].as_str().unwrap().to_string();

    // The stored status stays Pending; Overdue is derived at read time
    let fee = client
        .get(&format!("/api/v1/fees/{fee_id}"), Some(&token))
        .await;
    assert_eq!(fee.json()["payment_status"], "Overdue");
    assert_eq!(fee.json()["is_overdue"], true);
    assert_eq!(fee.json()["days_overdue"], 10);

    let overdue = client.get("/api/v1/fees/overdue", Some(&token)).await;
    overdue.assert_status(StatusCode::OK);
    let ids: Vec<_> = overdue
        .json()
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, vec![fee_id]);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_late_fee_accrues_and_is_idempotent_per_day() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "payer@example.com").await;
    let created = create_fee(&client, &token, &student, 1000.0, -10).await;
    let fee_id = created.json()["id"].as_str().unwrap().to_string();

    // 1000 outstanding at 0.1% per day for 10 days
    let first = client
        .post_json(
            &format!("/api/v1/fees/{fee_id}/late-fee"),
            &json!({ "daily_rate": 0.001 }),
            Some(&token),
        )
        .await;
    first.assert_status(StatusCode::OK);
    assert_eq!(first.json()["fine_amount"], 10.0);
    assert_eq!(first.json()["amount_due"], 1010.0);

    // Same day, same overdue span: the fine is recomputed, not stacked
    let second = client
        .post_json(
            &format!("/api/v1/fees/{fee_id}/late-fee"),
            &json!({ "daily_rate": 0.001 }),
            Some(&token),
        )
        .await;
    assert_eq!(second.json()["fine_amount"], 10.0);
    assert_eq!(second.json()["amount_due"], 1010.0);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_amounts_are_stored_encrypted() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "payer@example.com").await;
    create_fee(&client, &token, &student, 1000.0, 30)
        .await
        .assert_status(StatusCode::CREATED);

    let stored: String = sqlx::query_scalar("SELECT total_amount_enc FROM student_fees")
        .fetch_one(&state.pool)
        .await
        .expect("Failed to read stored amount");

    assert!(!stored.contains("1000"), "amount must not be plaintext");
    assert_eq!(state.cipher.decrypt_amount(&stored).unwrap(), 1000.0);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}
