//! Integration tests for the baitout issue importer.

use sqlx::PgPool;
use trapline_api::import::baitout::{self, BaitoutImportOptions};
use trapline_db::models::line::CreateLine;
use trapline_db::repositories::LineRepo;

async fn seed_line(pool: &PgPool, name: &str, start: &str, end: &str) {
    LineRepo::create(
        pool,
        &CreateLine {
            name: name.to_string(),
            line_type: "Transect".to_string(),
            start_station_id: start.to_string(),
            end_station_id: end.to_string(),
        },
    )
    .await
    .expect("seed line");
}

fn opts(commit: bool, limit: usize) -> BaitoutImportOptions {
    BaitoutImportOptions {
        commit,
        limit,
        tag: "baitout-2023".to_string(),
    }
}

async fn issue_count(pool: &PgPool) -> i64 {
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*)::BIGINT FROM issues")
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "../db/migrations")]
async fn resolves_station_and_creates_issue(pool: PgPool) {
    seed_line(&pool, "ABC", "1", "20").await;

    let data = "ABC12|x|y|J Smith|03/11/2023|z|hoop rusted through\n";
    let summary = baitout::run(&pool, data.as_bytes(), &opts(true, 0))
        .await
        .unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.skipped, 0);

    let (station, issue_type, station_type, origin, reported_by): (
        String,
        String,
        String,
        String,
        String,
    ) = sqlx::query_as(
        "SELECT start_station_id, issue_type, station_type, origin, reported_by FROM issues",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(station, "12");
    assert_eq!(issue_type, "RustingHoop");
    assert_eq!(station_type, "NA");
    assert_eq!(origin, "baitout-2023");
    assert_eq!(reported_by, "J Smith");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_station_logs_and_skips(pool: PgPool) {
    seed_line(&pool, "ABC", "1", "20").await;

    let data = "XYZ9|x|y|J Smith|03/11/2023|z|rope gone\nABC3|x|y|J Smith|04/11/2023|z|rope gone\n";
    let summary = baitout::run(&pool, data.as_bytes(), &opts(true, 0))
        .await
        .unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(issue_count(&pool).await, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn station_outside_range_is_skipped(pool: PgPool) {
    seed_line(&pool, "ABC", "1", "20").await;

    let data = "ABC21|x|y|J Smith|03/11/2023|z|rope gone\n";
    let summary = baitout::run(&pool, data.as_bytes(), &opts(true, 0))
        .await
        .unwrap();

    assert_eq!(summary.created, 0);
    assert_eq!(summary.skipped, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn dry_run_creates_nothing(pool: PgPool) {
    seed_line(&pool, "ABC", "1", "20").await;

    let data = "ABC12|x|y|J Smith|03/11/2023|z|hoop rusted\n";
    let summary = baitout::run(&pool, data.as_bytes(), &opts(false, 0))
        .await
        .unwrap();

    assert_eq!(summary.created, 1);
    assert_eq!(issue_count(&pool).await, 0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn limit_caps_created_rows(pool: PgPool) {
    seed_line(&pool, "ABC", "1", "20").await;

    let data = "\
ABC1|x|y|A|01/11/2023|z|rope gone
ABC2|x|y|B|02/11/2023|z|rope gone
ABC3|x|y|C|03/11/2023|z|rope gone
";
    let summary = baitout::run(&pool, data.as_bytes(), &opts(true, 2))
        .await
        .unwrap();

    assert_eq!(summary.created, 2);
    assert_eq!(issue_count(&pool).await, 2);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn malformed_date_skips_row(pool: PgPool) {
    seed_line(&pool, "ABC", "1", "20").await;

    let data = "ABC12|x|y|J Smith|2023-11-03|z|rope gone\n";
    let summary = baitout::run(&pool, data.as_bytes(), &opts(true, 0))
        .await
        .unwrap();

    assert_eq!(summary.created, 0);
    assert_eq!(summary.skipped, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn directional_suffix_resolution(pool: PgPool) {
    seed_line(&pool, "ridge east", "1", "30").await;

    let data = "ridge14|x|y|J Smith|03/11/2023|z|not found\n";
    let summary = baitout::run(&pool, data.as_bytes(), &opts(true, 0))
        .await
        .unwrap();

    assert_eq!(summary.created, 1);
    let issue_type: String = sqlx::query_scalar("SELECT issue_type FROM issues")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(issue_type, "MissingStation");
}
