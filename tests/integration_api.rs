mod common;

use axum::http::StatusCode;
use campusdesk_core::permissions;
use common::{send, setup_offline_app};

#[tokio::test]
async fn test_permissions_catalogue_is_served() {
    let app = setup_offline_app();

    let (status, body) = send(&app, "GET", "/api/permissions", None).await;
    assert_eq!(status, StatusCode::OK);

    let entries = body.as_array().unwrap();
    assert_eq!(entries.len(), permissions::ALL.len());
    assert!(entries.iter().all(|entry| entry["codename"].is_string()));
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let app = setup_offline_app();

    let (status, doc) = send(&app, "GET", "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(doc["info"]["title"], "Campusdesk API");

    let paths = doc["paths"].as_object().unwrap();
    for path in [
        "/api/institutions",
        "/api/institutions/{id}/students",
        "/api/students/{id}/payments",
        "/api/programs/{id}/fees",
        "/api/permissions",
    ] {
        assert!(paths.contains_key(path), "missing {}", path);
    }
}

#[tokio::test]
async fn test_unknown_choice_in_query_is_bad_request() {
    let app = setup_offline_app();

    let (status, body) = send(&app, "GET", "/api/institutions?type=University", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid query parameters")
    );
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = setup_offline_app();

    let (status, _) = send(&app, "GET", "/api/students/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
