mod common;

use axum::http::StatusCode;
use common::{
    count_rows, create_campus, create_user, send, setup_test_app, student_body, test_cipher, timestamp,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

async fn raw_names(pool: &PgPool, id: &str) -> (Vec<u8>, Vec<u8>) {
    sqlx::query_as::<_, (Vec<u8>, Vec<u8>)>(
        "SELECT first_name, last_name FROM students WHERE id = $1",
    )
    .bind(Uuid::parse_str(id).unwrap())
    .fetch_one(pool)
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_personal_data_is_encrypted_at_rest(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    let (status, student) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HP-2024-001")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(student["first_name"], "Tendai");
    assert_eq!(student["national_id"], "63-123456A27");
    assert_eq!(student["disability_type"], "None");
    assert_eq!(student["status"], "Active");

    let id = student["id"].as_str().unwrap();
    let (first_name, last_name) = raw_names(&pool, id).await;
    assert_ne!(first_name, b"Tendai".to_vec());
    assert!(!first_name.windows(6).any(|w| w == b"Tendai"));
    assert!(!last_name.windows(4).any(|w| w == b"Moyo"));

    let cipher = test_cipher();
    assert_eq!(cipher.open(&first_name).unwrap(), "Tendai");
    assert_eq!(cipher.open(&last_name).unwrap(), "Moyo");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_reseals_only_changed_personal_data(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    let (_, student) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HP-2024-002")),
    )
    .await;
    let id = student["id"].as_str().unwrap().to_string();
    let before = raw_names(&pool, &id).await;

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/students/{}", id),
        Some(json!({ "status": "Attachment" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Attachment");
    assert_eq!(updated["first_name"], "Tendai");
    assert_eq!(raw_names(&pool, &id).await, before);

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/students/{}", id),
        Some(json!({ "first_name": "Rudo", "national_id": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["first_name"], "Rudo");
    assert_eq!(updated["last_name"], "Moyo");
    assert!(updated["national_id"].is_null());

    let after = raw_names(&pool, &id).await;
    assert_eq!(test_cipher().open(&after.0).unwrap(), "Rudo");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_number_is_unique(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HP-2024-003")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HP-2024-003")),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_list_filters(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    for number in ["HP-A-1", "HP-A-2", "HP-B-1"] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/students",
            Some(student_body(&campus, number)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(
        &app,
        "GET",
        &format!(
            "/api/students?institution_id={}&student_id=HP-A",
            campus.institution_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 2);
    assert_eq!(page["data"][0]["student_id"], "HP-A-1");
    assert_eq!(page["data"][1]["student_id"], "HP-A-2");

    let (status, page) = send(
        &app,
        "GET",
        &format!(
            "/api/students?program_id={}&status=Graduated",
            campus.program_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_payments(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (_, student) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HP-2024-004")),
    )
    .await;
    let id = student["id"].as_str().unwrap().to_string();

    for (amount, date) in [("150.00", "2024-02-01"), ("75.50", "2024-06-15")] {
        let (status, payment) = send(
            &app,
            "POST",
            "/api/payments",
            Some(json!({ "student_id": id, "amount": amount, "date_paid": date })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(payment["student_number"], "HP-2024-004");
    }

    let (status, payments) = send(&app, "GET", &format!("/api/students/{}/payments", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments["meta"]["total"], 2);
    assert_eq!(payments["data"][0]["amount"], "75.50");
    assert_eq!(payments["data"][1]["amount"], "150.00");

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/students/{}/payments", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/api/students/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, page) = send(&app, "GET", "/api/payments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_with_unknown_program_is_rejected(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let mut body = student_body(&campus, "HP-2024-005");
    body["program_id"] = json!(Uuid::new_v4());

    let (status, _) = send(&app, "POST", "/api/students", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_program_must_belong_to_institution(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let other = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let mut body = student_body(&campus, "HP-2024-006");
    body["program_id"] = json!(other.program_id);
    let (status, _) = send(&app, "POST", "/api/students", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, student) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HP-2024-006")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/students/{}", student["id"].as_str().unwrap());

    let (status, _) = send(&app, "PATCH", &uri, Some(json!({ "program_id": other.program_id }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "institution_id": other.institution_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, moved) = send(
        &app,
        "PATCH",
        &uri,
        Some(json!({ "institution_id": other.institution_id, "program_id": other.program_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["program_id"], json!(other.program_id));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrolled_program_and_department_cannot_be_deleted(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    let (status, _) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HP-2024-007")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    for uri in [
        format!("/api/programs/{}", campus.program_id),
        format!("/api/departments/{}", campus.department_id),
        format!("/api/faculties/{}", campus.faculty_id),
    ] {
        let (status, _) = send(&app, "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::CONFLICT, "{uri}");
    }
    assert_eq!(count_rows(&pool, "programs", "id", campus.program_id).await, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_user_link(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let user_id = create_user(&pool).await;
    let app = setup_test_app(pool.clone());

    let mut body = student_body(&campus, "HP-2024-008");
    body["user_id"] = json!(user_id);
    let (status, student) = send(&app, "POST", "/api/students", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(student["user_id"], json!(user_id));

    let mut duplicate = student_body(&campus, "HP-2024-009");
    duplicate["user_id"] = json!(user_id);
    let (status, _) = send(&app, "POST", "/api/students", Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let uri = format!("/api/students/{}", student["id"].as_str().unwrap());
    let (status, student) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(student["user_id"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_update_bumps_updated_at(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (_, created) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HP-2024-010")),
    )
    .await;
    let uri = format!("/api/students/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PATCH", &uri, Some(json!({ "hours_pledged": 40 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert!(timestamp(&updated["updated_at"]) > timestamp(&created["updated_at"]));
}
