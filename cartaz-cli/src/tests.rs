//! Unit coverage for the `recommend` command plumbing.

use camino::Utf8PathBuf;
use rstest::{fixture, rstest};
use rusqlite::Connection;
use tempfile::TempDir;

use crate::CliError;
use crate::recommend::{
    DefaultRecommenderBuilder, RecommendArgs, RecommendConfig, load_recommend_request, serve,
};

fn utf8(path: std::path::PathBuf) -> Utf8PathBuf {
    Utf8PathBuf::from_path_buf(path).expect("utf8 path")
}

#[rstest]
fn config_requires_a_request_path() {
    let err = RecommendConfig::try_from(RecommendArgs::default())
        .expect_err("missing request path should error");
    assert!(matches!(
        err,
        CliError::MissingArgument {
            field: "request",
            ..
        }
    ));
}

#[rstest]
fn config_defaults_the_catalog_path() {
    let args = RecommendArgs {
        request_path: Some(Utf8PathBuf::from("request.json")),
        catalog: None,
    };
    let config = RecommendConfig::try_from(args).expect("config");
    assert_eq!(config.catalog, Utf8PathBuf::from("cartaz.db"));
}

#[rstest]
fn validation_reports_missing_files() {
    let config = RecommendConfig {
        request_path: Utf8PathBuf::from("/no/such/request.json"),
        catalog: Utf8PathBuf::from("/no/such/cartaz.db"),
    };
    let err = config.validate_sources().expect_err("absent files");
    assert!(matches!(err, CliError::MissingSourceFile { .. }));
}

#[fixture]
fn seeded_paths() -> (TempDir, Utf8PathBuf, Utf8PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let catalog_path = utf8(dir.path().join("cartaz.db"));
    let request_path = utf8(dir.path().join("request.json"));

    let connection = Connection::open(catalog_path.as_std_path()).expect("create catalog");
    connection
        .execute_batch(
            "CREATE TABLE users (id TEXT PRIMARY KEY, interests TEXT, location_city TEXT);
            CREATE TABLE events (
                id TEXT PRIMARY KEY,
                title TEXT NOT NULL,
                category TEXT NOT NULL,
                tags TEXT,
                venue_city TEXT,
                is_featured INTEGER NOT NULL DEFAULT 0,
                date TEXT NOT NULL,
                status TEXT NOT NULL,
                details TEXT
            );
            CREATE TABLE tickets (id TEXT PRIMARY KEY, user_id TEXT NOT NULL, event_id TEXT NOT NULL);
            INSERT INTO users (id, interests, location_city)
                VALUES ('u-1', '[\"rock\"]', 'Lisboa');
            INSERT INTO events (id, title, category, tags, venue_city, is_featured, date, status)
                VALUES ('ev-rock', 'Noite de Rock', 'music', '[\"rock\"]', 'Lisboa', 1,
                        '2099-08-10T21:00:00Z', 'published');",
        )
        .expect("seed catalog");
    drop(connection);

    std::fs::write(
        request_path.as_std_path(),
        r#"{"userId":"u-1","limit":5,"seed":7,"now":"2099-08-07T12:00:00Z"}"#,
    )
    .expect("write request file");

    (dir, catalog_path, request_path)
}

#[rstest]
fn request_file_round_trips(seeded_paths: (TempDir, Utf8PathBuf, Utf8PathBuf)) {
    let (_dir, _catalog, request_path) = seeded_paths;
    let request = load_recommend_request(&request_path).expect("load request");
    assert_eq!(request.user_id, "u-1");
    assert_eq!(request.limit, 5);
    assert!(request.include_reasons);
}

#[rstest]
fn serve_writes_a_json_page(seeded_paths: (TempDir, Utf8PathBuf, Utf8PathBuf)) {
    let (_dir, catalog, request_path) = seeded_paths;
    let config = RecommendConfig {
        request_path,
        catalog,
    };

    let mut output = Vec::new();
    serve(&config, &DefaultRecommenderBuilder, &mut output).expect("serve request");

    let text = String::from_utf8(output).expect("utf8 output");
    assert!(text.ends_with('\n'));
    let response: serde_json::Value = serde_json::from_str(&text).expect("json output");
    let recommendations = response
        .get("recommendations")
        .and_then(serde_json::Value::as_array)
        .expect("recommendations array");
    assert_eq!(recommendations.len(), 1);
    let first = recommendations.first().expect("one recommendation");
    assert_eq!(
        first.get("eventId").and_then(serde_json::Value::as_str),
        Some("ev-rock")
    );
    assert_eq!(
        first.get("rank").and_then(serde_json::Value::as_u64),
        Some(1)
    );
}

#[rstest]
fn serve_rejects_invalid_requests(seeded_paths: (TempDir, Utf8PathBuf, Utf8PathBuf)) {
    let (_dir, catalog, request_path) = seeded_paths;
    std::fs::write(
        request_path.as_std_path(),
        r#"{"userId":"u-1","limit":0}"#,
    )
    .expect("write request file");
    let config = RecommendConfig {
        request_path,
        catalog,
    };

    let mut output = Vec::new();
    let err = serve(&config, &DefaultRecommenderBuilder, &mut output)
        .expect_err("zero limit should fail");
    assert!(matches!(err, CliError::InvalidRequest { .. }));
}
