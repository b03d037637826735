//! HTTP-level integration tests for the `/lines` resource.
//!
//! Uses Axum's tower::ServiceExt to send requests directly to the router
//! without an actual TCP listener.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, body_text, delete, get, post_json, put_json};
use sqlx::PgPool;

async fn create_line(pool: &PgPool, name: &str, line_type: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/lines",
        &admin_token(),
        serde_json::json!({
            "name": name,
            "line_type": line_type,
            "start_station_id": "1",
            "end_station_id": "20",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_line_returns_201(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/lines",
        &admin_token(),
        serde_json::json!({
            "name": "Ridge Track",
            "line_type": "Transect",
            "start_station_id": "1",
            "end_station_id": "30",
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["name"], "Ridge Track");
    assert!(json["id"].is_number());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_requires_auth(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/lines",
        "not-a-token",
        serde_json::json!({
            "name": "Ridge Track",
            "line_type": "Transect",
            "start_station_id": "1",
            "end_station_id": "30",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invalid_line_type_rejected(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/lines",
        &admin_token(),
        serde_json::json!({
            "name": "Ridge Track",
            "line_type": "Spur",
            "start_station_id": "1",
            "end_station_id": "30",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn duplicate_name_conflicts(pool: PgPool) {
    create_line(&pool, "Ridge Track", "Transect").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/lines",
        &admin_token(),
        serde_json::json!({
            "name": "Ridge Track",
            "line_type": "Transect",
            "start_station_id": "1",
            "end_station_id": "10",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn get_nonexistent_line_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/lines/999999", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_line(pool: PgPool) {
    let id = create_line(&pool, "Ridge Track", "Transect").await;

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/lines/{id}"),
        &admin_token(),
        serde_json::json!({"line_type": "MouseLine"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["line_type"], "MouseLine");
    assert_eq!(json["name"], "Ridge Track");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn delete_line_returns_204(pool: PgPool) {
    let id = create_line(&pool, "Ridge Track", "Transect").await;

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/lines/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/lines/{id}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_is_ordered_and_counts_outings(pool: PgPool) {
    let kea = create_line(&pool, "Kea", "Transect").await;
    create_line(&pool, "Alpha", "MouseLine").await;

    // Two outings on Kea, one completed.
    for (date, status) in [("2024-01-10", "Completed"), ("2024-02-11", "Partial")] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/outings",
            &admin_token(),
            serde_json::json!({
                "line_id": kea,
                "date": date,
                "completion_status": status,
                "hours": 3.0,
            }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/lines", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Ordered by name ascending.
    assert_eq!(rows[0]["name"], "Alpha");
    assert_eq!(rows[1]["name"], "Kea");
    assert_eq!(rows[1]["outing_count"], 2);
    assert_eq!(rows[1]["completed_outings_count"], 1);
    assert_eq!(rows[0]["outing_count"], 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn listing_filters_by_type_and_search(pool: PgPool) {
    create_line(&pool, "Ridge Track", "Transect").await;
    create_line(&pool, "Creek Loop", "MouseLine").await;

    let app = common::build_test_app(pool.clone());
    let response = get(app, "/api/v1/lines?line_type=MouseLine", &admin_token()).await;
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Creek Loop");

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/lines?q=ridge", &admin_token()).await;
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Ridge Track");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn export_is_csv_attachment(pool: PgPool) {
    create_line(&pool, "Ridge Track", "Transect").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/lines/export", &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "text/csv"
    );

    let text = body_text(response).await;
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "id,name,line_type,start_station_id,end_station_id"
    );
    assert!(lines.next().unwrap().contains("Ridge Track"));
}
