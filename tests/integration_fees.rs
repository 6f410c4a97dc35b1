mod common;

use axum::http::StatusCode;
use common::{create_campus, send, setup_test_app, student_body, unique_code};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_one_fee_structure_per_program(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (status, fee) = send(
        &app,
        "POST",
        "/api/fee-structures",
        Some(json!({ "program_id": campus.program_id, "semester_fee": "450.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fee["semester_fee"], "450.00");
    assert_eq!(
        fee["program_name"],
        "National Diploma in Electrical Engineering"
    );
    let id = fee["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/fee-structures",
        Some(json!({ "program_id": campus.program_id, "semester_fee": "500.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, by_program) = send(
        &app,
        "GET",
        &format!("/api/programs/{}/fees", campus.program_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_program["id"], id.as_str());

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/fee-structures/{}", id),
        Some(json!({ "semester_fee": "475.25" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["semester_fee"], "475.25");

    let (status, _) = send(&app, "DELETE", &format!("/api/fee-structures/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/programs/{}/fees", campus.program_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_fee_rules(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/fee-structures",
        Some(json!({ "program_id": campus.program_id, "semester_fee": "-1.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "POST",
        "/api/fee-structures",
        Some(json!({ "program_id": Uuid::new_v4(), "semester_fee": "10.00" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, fee) = send(
        &app,
        "POST",
        "/api/fee-structures",
        Some(json!({ "program_id": campus.program_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(fee["semester_fee"], "0.00");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_payment_amount_must_be_positive(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (_, student) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, &unique_code())),
    )
    .await;
    let student_id = student["id"].as_str().unwrap().to_string();

    for amount in ["0", "-5.00"] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/payments",
            Some(json!({ "student_id": student_id, "amount": amount, "date_paid": "2024-03-01" })),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", amount);
    }

    let (status, _) = send(
        &app,
        "POST",
        "/api/payments",
        Some(json!({ "student_id": Uuid::new_v4(), "amount": "10.00", "date_paid": "2024-03-01" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_payment_date_filters(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (_, student) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, &unique_code())),
    )
    .await;
    let student_id = student["id"].as_str().unwrap().to_string();

    for date in ["2024-01-10", "2024-05-10", "2024-09-10"] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/payments",
            Some(json!({ "student_id": student_id, "amount": "100.00", "date_paid": date })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(
        &app,
        "GET",
        &format!(
            "/api/payments?student_id={}&paid_from=2024-02-01&paid_to=2024-09-10",
            student_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 2);
    assert_eq!(page["data"][0]["date_paid"], "2024-09-10");

    let id = page["data"][0]["id"].as_str().unwrap().to_string();
    let (status, _) = send(&app, "DELETE", &format!("/api/payments/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", &format!("/api/payments/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
