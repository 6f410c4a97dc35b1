mod common;

use axum::http::StatusCode;
use common::{
    count_rows, create_campus, send, setup_test_app, staff_body, student_body, timestamp, unique,
};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

#[sqlx::test(migrations = "./migrations")]
async fn test_institution_crud(pool: PgPool) {
    let app = setup_test_app(pool);
    let name = unique("Harare Polytechnic");

    let (status, created) = send(
        &app,
        "POST",
        "/api/institutions",
        Some(json!({
            "name": name,
            "type": "Polytechnic",
            "location": "Harare",
            "established": 1927
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], name);
    assert_eq!(created["province"], "Harare");
    assert_eq!(created["status"], "Active");
    assert_eq!(created["has_innovation_hub"], false);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = send(&app, "GET", &format!("/api/institutions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());

    let (status, updated) = send(
        &app,
        "PATCH",
        &format!("/api/institutions/{}", id),
        Some(json!({ "status": "Renovation", "capacity": 4500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Renovation");
    assert_eq!(updated["capacity"], 4500);
    assert_eq!(updated["name"], name);

    let (status, _) = send(&app, "DELETE", &format!("/api/institutions/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/institutions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_institution_name_conflicts(pool: PgPool) {
    let app = setup_test_app(pool);
    let body = json!({
        "name": unique("Bulawayo Polytechnic"),
        "type": "Polytechnic",
        "province": "Bulawayo",
        "location": "Bulawayo",
        "established": 1927
    });

    let (status, _) = send(&app, "POST", "/api/institutions", Some(body.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = send(&app, "POST", "/api/institutions", Some(body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(error["error"].as_str().unwrap().contains("already exists"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_institution_validation(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, error) = send(
        &app,
        "POST",
        "/api/institutions",
        Some(json!({ "type": "Polytechnic", "location": "Harare", "established": 1927 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["error"], "name is required");

    let (status, _) = send(
        &app,
        "POST",
        "/api/institutions",
        Some(json!({
            "name": unique("Negative"),
            "type": "Polytechnic",
            "location": "Harare",
            "established": 1927,
            "capacity": -1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_institution_with_students_is_blocked(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HIT-0001")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/institutions/{}", campus.institution_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_institution_list_filters_and_paginates(pool: PgPool) {
    let app = setup_test_app(pool);
    let marker = Uuid::new_v4().simple().to_string();

    for (idx, kind) in ["Polytechnic", "Teachers College", "Polytechnic"]
        .iter()
        .enumerate()
    {
        let (status, _) = send(
            &app,
            "POST",
            "/api/institutions",
            Some(json!({
                "name": format!("{} {}", marker, idx),
                "type": kind,
                "location": "Gweru",
                "province": "Midlands",
                "established": 1990
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, page) = send(
        &app,
        "GET",
        &format!("/api/institutions?name={}&type=Polytechnic&limit=1", marker),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["meta"]["total"], 2);
    assert_eq!(page["data"].as_array().unwrap().len(), 1);
    assert_eq!(page["data"][0]["name"], format!("{} 0", marker));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_institution_reverse_relations(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (status, _) = send(
        &app,
        "POST",
        "/api/students",
        Some(student_body(&campus, "HIT-0002")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, students) = send(
        &app,
        "GET",
        &format!("/api/institutions/{}/students", campus.institution_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(students["meta"]["total"], 1);
    assert_eq!(students["data"][0]["first_name"], "Tendai");

    for relation in ["facilities", "staff", "vacancies"] {
        let (status, page) = send(
            &app,
            "GET",
            &format!("/api/institutions/{}/{}", campus.institution_id, relation),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{}", relation);
        assert_eq!(page["meta"]["total"], 0, "{}", relation);
    }

    let missing = Uuid::new_v4();
    for relation in ["facilities", "students", "staff", "vacancies"] {
        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/institutions/{}/{}", missing, relation),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", relation);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_facility_carries_institution_name(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let app = setup_test_app(pool);

    let (status, facility) = send(
        &app,
        "POST",
        "/api/facilities",
        Some(json!({
            "institution_id": campus.institution_id,
            "name": "Main Library",
            "facility_type": "Library",
            "capacity": 200,
            "current_usage": 250
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(
        facility["institution_name"]
            .as_str()
            .unwrap()
            .starts_with("Test Polytechnic")
    );
    assert_eq!(facility["building"], "Main Building");
    assert_eq!(facility["manager"], "Pending");
    assert_eq!(facility["current_usage"], 250);

    let (status, _) = send(
        &app,
        "POST",
        "/api/facilities",
        Some(json!({
            "institution_id": campus.institution_id,
            "name": "Main Library"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        "POST",
        "/api/facilities",
        Some(json!({
            "institution_id": Uuid::new_v4(),
            "name": "Orphan"
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_institution_cascades_to_its_records(pool: PgPool) {
    let campus = create_campus(&pool).await;
    let neighbour = create_campus(&pool).await;
    let app = setup_test_app(pool.clone());

    for target in [&campus, &neighbour] {
        let (status, _) = send(
            &app,
            "POST",
            "/api/facilities",
            Some(json!({ "institution_id": target.institution_id, "name": "Workshop 1" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            "POST",
            "/api/staff",
            Some(staff_body(target, &unique("EMP"))),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(
            &app,
            "POST",
            "/api/vacancies",
            Some(json!({
                "institution_id": target.institution_id,
                "title": "Lecturer in Electrical Engineering",
                "department_id": target.department_id,
                "deadline": "2030-01-31"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/institutions/{}", campus.institution_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for table in ["facilities", "faculties", "staff", "vacancies"] {
        assert_eq!(
            count_rows(&pool, table, "institution_id", campus.institution_id).await,
            0,
            "{table}"
        );
        assert_eq!(
            count_rows(&pool, table, "institution_id", neighbour.institution_id).await,
            1,
            "{table}"
        );
    }
    assert_eq!(count_rows(&pool, "programs", "id", campus.program_id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_institution_update_bumps_updated_at(pool: PgPool) {
    let app = setup_test_app(pool);

    let (status, created) = send(
        &app,
        "POST",
        "/api/institutions",
        Some(json!({
            "name": unique("Bulawayo Polytechnic"),
            "type": "Polytechnic",
            "location": "Bulawayo",
            "established": 1927
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let uri = format!("/api/institutions/{}", created["id"].as_str().unwrap());

    let (status, updated) = send(&app, "PATCH", &uri, Some(json!({ "status": "Renovation" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "Renovation");
    assert!(timestamp(&updated["updated_at"]) > timestamp(&created["updated_at"]));
}
