//! HTTP-level integration tests for the `/outings` resource.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, delete, get, post_json, put_json};
use sqlx::PgPool;

async fn create_line(pool: &PgPool, name: &str, start: &str, end: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/lines",
        &admin_token(),
        serde_json::json!({
            "name": name,
            "line_type": "Transect",
            "start_station_id": start,
            "end_station_id": end,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_member(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/team-members",
        &admin_token(),
        serde_json::json!({"name": name}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn create_outing_with_participants(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track", "1", "30").await;
    let ab = create_member(&pool, "AB").await;
    let cd = create_member(&pool, "CD").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/outings",
        &admin_token(),
        serde_json::json!({
            "line_id": line,
            "date": "2024-03-15",
            "completion_status": "Partial",
            "start_station_id": "5",
            "end_station_id": "12",
            "hours": 4.5,
            "number_of_workers": 2.5,
            "participant_ids": [ab, cd],
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["completion_status"], "Partial");
    assert_eq!(json["participants"], serde_json::json!(["AB", "CD"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sub_range_outside_line_rejected(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track", "1", "20").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/outings",
        &admin_token(),
        serde_json::json!({
            "line_id": line,
            "date": "2024-03-15",
            "start_station_id": "5",
            "end_station_id": "25",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_completion_status_rejected(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track", "1", "20").await;

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        "/api/v1/outings",
        &admin_token(),
        serde_json::json!({
            "line_id": line,
            "date": "2024-03-15",
            "completion_status": "Tagged",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn update_replaces_participant_set(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track", "1", "30").await;
    let ab = create_member(&pool, "AB").await;
    let cd = create_member(&pool, "CD").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/outings",
        &admin_token(),
        serde_json::json!({
            "line_id": line,
            "date": "2024-03-15",
            "participant_ids": [ab],
        }),
    )
    .await;
    let id = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = put_json(
        app,
        &format!("/api/v1/outings/{id}"),
        &admin_token(),
        serde_json::json!({"participant_ids": [cd]}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["participants"], serde_json::json!(["CD"]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn line_outings_listing(pool: PgPool) {
    let ridge = create_line(&pool, "Ridge Track", "1", "30").await;
    let creek = create_line(&pool, "Creek Loop", "1", "10").await;

    for (line, date) in [(ridge, "2024-01-05"), (ridge, "2024-02-06"), (creek, "2024-01-07")] {
        let app = common::build_test_app(pool.clone());
        let response = post_json(
            app,
            "/api/v1/outings",
            &admin_token(),
            serde_json::json!({"line_id": line, "date": date}),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/lines/{ridge}/outings"), &admin_token()).await;
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    // Newest first.
    assert_eq!(rows[0]["date"], "2024-02-06");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn inline_issue_derives_line_from_outing(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track", "1", "30").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/outings",
        &admin_token(),
        serde_json::json!({"line_id": line, "date": "2024-03-15"}),
    )
    .await;
    let outing = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool);
    let response = post_json(
        app,
        &format!("/api/v1/outings/{outing}/issues"),
        &admin_token(),
        serde_json::json!({
            "start_station_id": "7",
            "issue_type": "MissingHoop",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["line_id"].as_i64().unwrap(), line);
    assert_eq!(json["outing_id"].as_i64().unwrap(), outing);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn deleting_line_cascades_to_outings(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track", "1", "30").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/outings",
        &admin_token(),
        serde_json::json!({"line_id": line, "date": "2024-03-15"}),
    )
    .await;
    let outing = body_json(response).await["id"].as_i64().unwrap();

    let app = common::build_test_app(pool.clone());
    let response = delete(app, &format!("/api/v1/lines/{line}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let app = common::build_test_app(pool);
    let response = get(app, &format!("/api/v1/outings/{outing}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
