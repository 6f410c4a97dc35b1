mod common;

use axum::http::StatusCode;
use common::{
    count_rows, create_campus, create_user, send, setup_test_app, staff_body, test_cipher, timestamp,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_staff_crud_with_encrypted_contact_details(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    let (status, member) = send(&app, "POST", "/api/staff", Some(staff_body(&campus, "EMP-001"))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(member["email"], "farai.ncube@example.com");
    assert_eq!(member["is_active"], true);
    let id = member["id"].as_str().unwrap().to_string();

    let (email, phone) = sqlx::query_as::<_, (Vec<u8>, Vec<u8>)>(
        "SELECT email, phone FROM staff WHERE id = $1",
    )
    .bind(Uuid::parse_str(&id).unwrap())
    .fetch_one(&pool)
    .await
    .unwrap();
    assert!(!email.windows(7).any(|w| w == b"example"));
    assert_eq!(test_cipher().open(&email).unwrap(), "farai.ncube@example.com");
    assert_eq!(test_cipher().open(&phone).unwrap(), "+263 77 123 4567");

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/staff/{}", id),
        Some(json!({ "position": "Professor", "is_active": false })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["position"], "Professor");
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["first_name"], "Farai");

    let (status, page) = send(
        &app,
        "GET",
        &format!(
            "/api/staff?institution_id={}&is_active=false",
            campus.institution_id
        ),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/staff/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "DELETE", &format!("/api/staff/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_staff_placement_must_match_institution(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let other = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let mut body = staff_body(&campus, "EMP-002");
    body["department_id"] = json!(other.department_id);
    body["faculty_id"] = json!(null);
    let (status, error) = send(&app, "POST", "/api/staff", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(error["error"], "Department does not belong to the institution");

    let mut body = staff_body(&campus, "EMP-003");
    body["faculty_id"] = json!(other.faculty_id);
    let (status, _) = send(&app, "POST", "/api/staff", Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let mut body = staff_body(&campus, "EMP-004");
    body["department_id"] = json!(Uuid::new_v4());
    let (status, _) = send(&app, "POST", "/api/staff", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut body = staff_body(&campus, "EMP-005");
    body["faculty_id"] = json!(null);
    body["department_id"] = json!(null);
    let (status, member) = send(&app, "POST", "/api/staff", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(member["department_id"].is_null());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_staff_rejects_invalid_email(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let mut body = staff_body(&campus, "EMP-006");
    body["email"] = json!("not-an-email");
    let (status, _) = send(&app, "POST", "/api/staff", Some(body)).await;
    assert!(status.is_client_error());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_vacancy_lifecycle(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let other = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (status, vacancy) = send(
        &app,
        "POST",
        "/api/vacancies",
        Some(json!({
            "institution_id": campus.institution_id,
            "title": "Lecturer in Power Systems",
            "faculty_id": campus.faculty_id,
            "department_id": campus.department_id,
            "quantity": 2,
            "deadline": "2030-03-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(vacancy["status"], "Open");
    let id = vacancy["id"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        "PATCH",
        &format!("/api/vacancies/{}", id),
        Some(json!({ "department_id": other.department_id })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, closed) = send(
        &app,
        "PATCH",
        &format!("/api/vacancies/{}", id),
        Some(json!({ "status": "Closed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(closed["status"], "Closed");

    let (status, page) = send(
        &app,
        "GET",
        &format!("/api/institutions/{}/vacancies", campus.institution_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 1);

    let (status, _) = send(
        &app,
        "POST",
        "/api/vacancies",
        Some(json!({
            "institution_id": campus.institution_id,
            "title": "Misplaced",
            "department_id": other.department_id,
            "deadline": "2030-03-31"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send(&app, "DELETE", &format!("/api/vacancies/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

async fn create_vacancy(app: &axum::Router, campus: &common::Campus) -> String {
    let (status, vacancy) = send(
        app,
        "POST",
        "/api/vacancies",
        Some(json!({
            "institution_id": campus.institution_id,
            "title": "Assistant Lecturer in Electrical Engineering",
            "faculty_id": campus.faculty_id,
            "department_id": campus.department_id,
            "deadline": "2030-06-30"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    vacancy["id"].as_str().unwrap().to_string()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_faculty_unplaces_staff_and_removes_vacancies(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    let (_, member) = send(&app, "POST", "/api/staff", Some(staff_body(&campus, "EMP-101"))).await;
    let member_uri = format!("/api/staff/{}", member["id"].as_str().unwrap());
    let vacancy_id = create_vacancy(&app, &campus).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/faculties/{}", campus.faculty_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, member) = send(&app, "GET", &member_uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(member["faculty_id"].is_null());
    assert!(member["department_id"].is_null());
    assert_eq!(member["institution_id"], json!(campus.institution_id));

    let (status, _) = send(&app, "GET", &format!("/api/vacancies/{}", vacancy_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(count_rows(&pool, "departments", "faculty_id", campus.faculty_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deleting_department_keeps_staff_faculty(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (_, member) = send(&app, "POST", "/api/staff", Some(staff_body(&campus, "EMP-102"))).await;
    let member_uri = format!("/api/staff/{}", member["id"].as_str().unwrap());
    let vacancy_id = create_vacancy(&app, &campus).await;

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/departments/{}", campus.department_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, member) = send(&app, "GET", &member_uri, None).await;
    assert_eq!(member["faculty_id"], json!(campus.faculty_id));
    assert!(member["department_id"].is_null());

    let (status, _) = send(&app, "GET", &format!("/api/vacancies/{}", vacancy_id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_staff_user_link_and_updated_at(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let user_id = create_user(&pool).await;
    let app = setup_test_app(pool.clone());

    let mut body = staff_body(&campus, "EMP-103");
    body["user_id"] = json!(user_id);
    let (status, member) = send(&app, "POST", "/api/staff", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/staff/{}", member["id"].as_str().unwrap());

    let mut duplicate = staff_body(&campus, "EMP-104");
    duplicate["user_id"] = json!(user_id);
    let (status, _) = send(&app, "POST", "/api/staff", Some(duplicate)).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = send(&app, "PATCH", &uri, Some(json!({ "is_active": false }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_active"], false);
    assert!(timestamp(&updated["updated_at"]) > timestamp(&member["updated_at"]));

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id)
        .execute(&pool)
        .await
        .unwrap();

    let (status, member) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(member["user_id"].is_null());
}
