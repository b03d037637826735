//! Integration tests for the outing importer.

use sqlx::PgPool;
use trapline_api::import::outings;
use trapline_db::models::line::CreateLine;
use trapline_db::repositories::LineRepo;

const HEADER: &str = "Field reports\n\nSeason 2024\ndate\tline\tstatus\tstart\tend\thours\twho count\tx\ty\tnotes\twho\n";

async fn seed_line(pool: &PgPool, name: &str) {
    LineRepo::create(
        pool,
        &CreateLine {
            name: name.to_string(),
            line_type: "Transect".to_string(),
            start_station_id: "1".to_string(),
            end_station_id: "50".to_string(),
        },
    )
    .await
    .expect("seed line");
}

async fn count(pool: &PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*)::BIGINT FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn imports_outing_participants_and_note_issue(pool: PgPool) {
    seed_line(&pool, "Ridge Track").await;

    let data = format!(
        "{HEADER}2024-03-15\tRidge Track\tCompleted\t1\t15\t4.5\t2.5\t\t\tstation 7 needs rope\tAB, CD\n"
    );
    let summary = outings::run(&pool, data.as_bytes()).await.unwrap();

    assert_eq!(summary.created_outings, 1);
    assert_eq!(summary.created_members, 2);
    assert_eq!(summary.created_issues, 1);
    assert_eq!(summary.skipped_rows, 0);

    let issue_type: String = sqlx::query_scalar("SELECT issue_type FROM issues")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(issue_type, "NeedsRope");

    let hours: f64 = sqlx::query_scalar("SELECT hours FROM outings")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(hours, 4.5);

    assert_eq!(count(&pool, "outing_participants").await, 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn rerun_does_not_duplicate_outings(pool: PgPool) {
    seed_line(&pool, "Ridge Track").await;

    let data = format!("{HEADER}2024-03-15\tRidge Track\tCompleted\t1\t15\t4.5\t2\n");

    let first = outings::run(&pool, data.as_bytes()).await.unwrap();
    assert_eq!(first.created_outings, 1);

    let second = outings::run(&pool, data.as_bytes()).await.unwrap();
    assert_eq!(second.created_outings, 0);
    assert_eq!(second.existing_outings, 1);

    assert_eq!(count(&pool, "outings").await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unparseable_date_skips_row(pool: PgPool) {
    seed_line(&pool, "Ridge Track").await;

    let data = format!("{HEADER}15/03/2024\tRidge Track\tCompleted\n");
    let summary = outings::run(&pool, data.as_bytes()).await.unwrap();

    assert_eq!(summary.skipped_rows, 1);
    assert_eq!(count(&pool, "outings").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_line_skips_row(pool: PgPool) {
    seed_line(&pool, "Ridge Track").await;

    let data = format!(
        "{HEADER}2024-03-15\tNo Such Line\tCompleted\n2024-03-16\tRidge Track\tCompleted\n"
    );
    let summary = outings::run(&pool, data.as_bytes()).await.unwrap();

    assert_eq!(summary.skipped_rows, 1);
    assert_eq!(summary.created_outings, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn tagged_status_maps_to_partial_and_defaults_apply(pool: PgPool) {
    seed_line(&pool, "Ridge Track").await;

    let data = format!("{HEADER}2024-03-15\tRidge Track\tTagged\t\t\tn/a\t\n");
    let summary = outings::run(&pool, data.as_bytes()).await.unwrap();
    assert_eq!(summary.created_outings, 1);

    let (status, hours, workers): (String, f64, f64) = sqlx::query_as(
        "SELECT completion_status, hours, number_of_workers FROM outings",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(status, "Partial");
    assert_eq!(hours, 0.0);
    assert_eq!(workers, 1.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn row_without_note_creates_no_issue(pool: PgPool) {
    seed_line(&pool, "Ridge Track").await;

    let data = format!("{HEADER}2024-03-15\tRidge Track\tCompleted\t1\t15\t2\t1\n");
    let summary = outings::run(&pool, data.as_bytes()).await.unwrap();

    assert_eq!(summary.created_issues, 0);
    assert_eq!(count(&pool, "issues").await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn existing_initials_are_reused(pool: PgPool) {
    seed_line(&pool, "Ridge Track").await;
    seed_line(&pool, "Creek Loop").await;

    let data = format!(
        "{HEADER}2024-03-15\tRidge Track\tCompleted\t\t\t2\t1\t\t\t\tAB\n2024-03-16\tCreek Loop\tCompleted\t\t\t2\t1\t\t\t\tAB\n"
    );
    let summary = outings::run(&pool, data.as_bytes()).await.unwrap();

    assert_eq!(summary.created_members, 1);
    assert_eq!(count(&pool, "team_members").await, 1);
    assert_eq!(count(&pool, "outing_participants").await, 2);
}
