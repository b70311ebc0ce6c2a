use axum::http::StatusCode;
use serde_json::json;

use sms_api::{auth::Role, router};

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

fn exam_body(student_id: &str, subject: &str, score: f64, max_score: f64) -> serde_json::Value {
    json!({
        "student_id": student_id,
        "subject": subject,
        "exam_type": "Midterm",
        "exam_date": "2026-03-15",
        "score": score,
        "max_score": max_score
    })
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_record_carries_derived_percentage_and_grade() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "pupil@example.com").await;
    let response = client
        .post_json(
            "/api/v1/performance",
            &exam_body(&student, "Mathematics", 45.0, 50.0),
            Some(&token),
        )
        .await;
    response.assert_status(StatusCode::CREATED);

    let record = response.json();
    assert_eq!(record["score"], 45.0);
    assert_eq!(record["percentage"], 90.0);
    assert_eq!(record["grade"], "A+");

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_duplicate_exam_record_is_a_conflict() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "pupil@example.com").await;
    let body = exam_body(&student, "Mathematics", 45.0, 50.0);

    client
        .post_json("/api/v1/performance", &body, Some(&token))
        .await
        .assert_status(StatusCode::CREATED);
    client
        .post_json("/api/v1/performance", &body, Some(&token))
        .await
        .assert_status(StatusCode::CONFLICT);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_score_must_fit_the_maximum() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "pupil@example.com").await;

    client
        .post_json(
            "/api/v1/performance",
            &exam_body(&student, "Mathematics", 60.0, 50.0),
            Some(&token),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);
    client
        .post_json(
            "/api/v1/performance",
            &exam_body(&student, "Mathematics", 10.0, 0.0),
            Some(&token),
        )
        .await
        .assert_status(StatusCode::BAD_REQUEST);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_update_rederives_grade_fields() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "pupil@example.com").await;
    let created = client
        .post_json(
            "/api/v1/performance",
            &exam_body(&student, "Physics", 20.0, 50.0),
            Some(&token),
        )
        .await;
    let id = created.json()["id"].as_str().unwrap().to_string();
    assert_eq!(created.json()["grade"], "D");

    let updated = client
        .put_json(
            &format!("/api/v1/performance/{id}"),
            &json!({ "score": 35.0, "max_score": 50.0, "remarks": "re-marked" }),
            Some(&token),
        )
        .await;
    updated.assert_status(StatusCode::OK);
    assert_eq!(updated.json()["percentage"], 70.0);
    assert_eq!(updated.json()["grade"], "B+");
    assert_eq!(updated.json()["remarks"], "re-marked");

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_scores_are_stored_encrypted() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let student = create_student(&client, &token, "pupil@example.com").await;
    client
        .post_json(
            "/api/v1/performance",
            &exam_body(&student, "Mathematics", 45.0, 50.0),
            Some(&token),
        )
        .await
        .assert_status(StatusCode::CREATED);

    let stored: String = sqlx::query_scalar("SELECT score_enc FROM student_performance")
        .fetch_one(&state.pool)
        .await
        .expect("Failed to read stored score");

    assert!(!stored.contains("45"), "score must not be plaintext");
    assert_eq!(state.cipher.decrypt_amount(&stored).unwrap(), 45.0);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_subject_averages_group_across_students() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let token = common::admin_token(&state);

    let first = create_student(&client, &token, "first@example.com").await;
    let second = create_student(&client, &token, "second@example.com").await;

    for (student, score) in [(&first, 80.0), (&second, 90.0)] {
        client
            .post_json(
                "/api/v1/performance",
                &exam_body(student, "Mathematics", score, 100.0),
                Some(&token),
            )
            .await
            .assert_status(StatusCode::CREATED);
    }

    let response = client.get("/api/v1/stats/performance", Some(&token)).await;
    response.assert_status(StatusCode::OK);
    let stats = response.json();
    let stats = stats.as_array().unwrap().clone();
    assert_eq!(stats.len(), 1);
    assert_eq!(stats[0]["subject"], "Mathematics");
    assert_eq!(stats[0]["exams"], 2);
    assert_eq!(stats[0]["average_score"], 85.0);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}

#[tokio::test]
#[ignore = "requires a running PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_students_cannot_record_performance() {
    let state = TestStateBuilder::new()
        .build()
        .await
        .expect("Failed to create test state");
    common::db::cleanup(&state.pool).await.expect("cleanup");

    let client = TestClient::new(router::router().with_state(state.clone()));
    let admin = common::admin_token(&state);
    let student_token = common::token_for(&state, Role::Student);

    let student = create_student(&client, &admin, "pupil@example.com").await;

    client
        .post_json(
            "/api/v1/performance",
            &exam_body(&student, "Mathematics", 45.0, 50.0),
            Some(&student_token),
        )
        .await
        .assert_status(StatusCode::FORBIDDEN);

    common::db::cleanup(&state.pool).await.expect("cleanup");
}
