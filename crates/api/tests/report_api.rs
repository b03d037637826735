//! HTTP-level integration tests for the completion report.

mod common;

use axum::http::StatusCode;
use common::{admin_token, body_json, body_text, get, post_json, put_json};
use sqlx::PgPool;

async fn create_line(pool: &PgPool, name: &str) -> i64 {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/lines",
        &admin_token(),
        serde_json::json!({
            "name": name,
            "line_type": "Transect",
            "start_station_id": "1",
            "end_station_id": "50",
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}

async fn create_outing(pool: &PgPool, line: i64, date: &str, status: &str) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/outings",
        &admin_token(),
        serde_json::json!({
            "line_id": line,
            "date": date,
            "completion_status": status,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn create_issue(pool: &PgPool, line: i64, status: &str) {
    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/issues",
        &admin_token(),
        serde_json::json!({
            "line_id": line,
            "start_station_id": "5",
            "issue_type": "Complicated",
            "issue_status": status,
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}

async fn report_rows(pool: &PgPool, query: &str) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let response = get(app, &format!("/api/v1/report{query}"), &admin_token()).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn line_without_outings_shows_zeroes(pool: PgPool) {
    create_line(&pool, "Quiet Line").await;

    let rows = report_rows(&pool, "").await;
    let row = &rows.as_array().unwrap()[0];
    assert_eq!(row["completed_count"], 0);
    assert_eq!(row["partial_count"], 0);
    assert!(row["last_completed"].is_null());
    assert!(row["last_partial"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn completed_stats_match_outings(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track").await;
    create_outing(&pool, line, "2024-01-10", "Completed").await;
    create_outing(&pool, line, "2024-03-05", "Completed").await;
    create_outing(&pool, line, "2024-02-20", "Partial").await;

    let rows = report_rows(&pool, "").await;
    let row = &rows.as_array().unwrap()[0];
    assert_eq!(row["completed_count"], 2);
    assert_eq!(row["last_completed"], "2024-03-05");
    assert_eq!(row["partial_count"], 1);
    assert_eq!(row["last_partial"], "2024-02-20");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unresolved_count_excludes_fixed_and_no_action(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track").await;
    create_issue(&pool, line, "NeedsWork").await;
    create_issue(&pool, line, "Progressing").await;
    create_issue(&pool, line, "Fixed").await;
    create_issue(&pool, line, "NoActionReq").await;

    let rows = report_rows(&pool, "").await;
    let row = &rows.as_array().unwrap()[0];
    assert_eq!(row["issues_count"], 4);
    assert_eq!(row["issues_unresolved_count"], 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn sort_by_completed_count_desc_is_non_increasing(pool: PgPool) {
    for (name, completed) in [("Alpha", 1), ("Bravo", 3), ("Charlie", 2)] {
        let line = create_line(&pool, name).await;
        for day in 1..=completed {
            create_outing(&pool, line, &format!("2024-01-{day:02}"), "Completed").await;
        }
    }

    let rows = report_rows(&pool, "?sort=completed_count&order=desc").await;
    let counts: Vec<i64> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["completed_count"].as_i64().unwrap())
        .collect();
    assert_eq!(counts, vec![3, 2, 1]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_sort_field_keeps_natural_order(pool: PgPool) {
    create_line(&pool, "Kea").await;
    create_line(&pool, "Alpha").await;

    let rows = report_rows(&pool, "?sort=bogus&order=desc").await;
    let names: Vec<&str> = rows
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["line_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Alpha", "Kea"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn csv_export_has_documented_headers_and_sort_order(pool: PgPool) {
    let alpha = create_line(&pool, "Alpha").await;
    let kea = create_line(&pool, "Kea").await;
    create_outing(&pool, kea, "2024-01-10", "Completed").await;
    create_outing(&pool, alpha, "2024-02-01", "Completed").await;

    let app = common::build_test_app(pool);
    let response = get(
        app,
        "/api/v1/report?sort=last_completed&order=desc&format=csv",
        &admin_token(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("content-type").unwrap(), "text/csv");

    let text = body_text(response).await;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(
        lines[0],
        "Line Name,Type,Last Completed,Last Partial,Completed Count,Partial Count,Unresolved Issues,Total Issues"
    );
    // One row per line, in the requested order.
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("Alpha,Transect,2024-02-01,Never,1,0,0,0"));
    assert!(lines[2].starts_with("Kea,Transect,2024-01-10,Never,1,0,0,0"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn csv_export_substitutes_never(pool: PgPool) {
    create_line(&pool, "Quiet Line").await;

    let app = common::build_test_app(pool);
    let response = get(app, "/api/v1/report?format=csv", &admin_token()).await;
    let text = body_text(response).await;
    assert_eq!(
        text.lines().nth(1).unwrap(),
        "Quiet Line,Transect,Never,Never,0,0,0,0"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn issues_fixed_later_update_report(pool: PgPool) {
    let line = create_line(&pool, "Ridge Track").await;

    let app = common::build_test_app(pool.clone());
    let response = post_json(
        app,
        "/api/v1/issues",
        &admin_token(),
        serde_json::json!({
            "line_id": line,
            "start_station_id": "5",
            "issue_type": "MissingHoop",
        }),
    )
    .await;
    let issue = body_json(response).await["id"].as_i64().unwrap();

    let rows = report_rows(&pool, "").await;
    assert_eq!(rows.as_array().unwrap()[0]["issues_unresolved_count"], 1);

    let app = common::build_test_app(pool.clone());
    let response = put_json(
        app,
        &format!("/api/v1/issues/{issue}"),
        &admin_token(),
        serde_json::json!({"issue_status": "Fixed"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    // The report is recomputed per request.
    let rows = report_rows(&pool, "").await;
    assert_eq!(rows.as_array().unwrap()[0]["issues_unresolved_count"], 0);
    assert_eq!(rows.as_array().unwrap()[0]["issues_count"], 1);
}
