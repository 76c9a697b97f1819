//! End-to-end export against a mock HTTP server

use fieldservice::adapters::api::{ApiClient, MemoryTokenStore, ReportsApi, Session};
use fieldservice::adapters::artifact::{DownloadSaver, LogShare, ShareSaver};
use fieldservice::config::ApiConfig;
use fieldservice::core::export::{PollPolicy, ZipExportRequest, ZipExporter};
use fieldservice::domain::{ApiError, AppError, CongregationId, UnauthenticatedReason};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

const ZIP_BYTES: &[u8] = b"PK\x05\x06\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00";

fn token(exp: i64) -> String {
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &serde_json::json!({"sub": 1, "exp": exp}),
        &jsonwebtoken::EncodingKey::from_secret(b"test-key"),
    )
    .unwrap()
}

fn reports_api(server: &mockito::Server, session: Session) -> ReportsApi {
    let config = ApiConfig {
        base_url: format!("{}/", server.url()),
        ..ApiConfig::default()
    };
    ReportsApi::new(ApiClient::new(&config, session).unwrap())
}

fn signed_in() -> Session {
    Session::new(Arc::new(MemoryTokenStore::with_token(token(4_102_444_800))))
}

fn request() -> ZipExportRequest {
    ZipExportRequest {
        congregation_id: CongregationId::new(3),
        service_year: 2024,
    }
}

async fn mock_job(server: &mut mockito::Server, download_headers: &[(&str, &str)]) -> Vec<mockito::Mock> {
    let start = server
        .mock("POST", "/reports/zip/generate/3/service-year/2024")
        .match_header("authorization", mockito::Matcher::Regex("^Bearer ".to_string()))
        .with_status(201)
        .with_body(
            r#"{"jobId":"j1","congregation":{"id":3},"progressUrl":"/reports/zip/progress/j1","downloadUrl":"/reports/zip/download/j1"}"#,
        )
        .expect(1)
        .create_async()
        .await;

    let progress = server
        .mock("GET", "/reports/zip/progress/j1")
        .with_status(200)
        .with_body(r#"{"jobId":"j1","total":2,"completed":2,"percent":100,"status":"completed"}"#)
        .expect(1)
        .create_async()
        .await;

    let mut download = server
        .mock("GET", "/reports/zip/download/j1")
        .with_status(200)
        .with_header("content-type", "application/zip")
        .with_body(ZIP_BYTES)
        .expect(1);
    for (name, value) in download_headers {
        download = download.with_header(*name, *value);
    }
    let download = download.create_async().await;

    vec![start, progress, download]
}

#[tokio::test]
async fn test_export_downloads_into_directory() {
    let mut server = mockito::Server::new_async().await;
    let mocks = mock_job(
        &mut server,
        &[("content-disposition", "attachment; filename=\"central_2024.zip\"")],
    )
    .await;

    let dir = TempDir::new().unwrap();
    let reports = reports_api(&server, signed_in());
    let saver = DownloadSaver::new(dir.path());
    let exporter = ZipExporter::new(&reports, &saver, PollPolicy::new(Duration::ZERO, 5));

    let outcome = exporter
        .download_congregation_publishers_service_year_zip(request(), None)
        .await
        .unwrap();

    assert_eq!(outcome.file_name, "central_2024.zip");
    assert_eq!(outcome.path, dir.path().join("central_2024.zip"));
    assert_eq!(std::fs::read(&outcome.path).unwrap(), ZIP_BYTES);
    for mock in mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_export_shares_from_cache_downloads() {
    let mut server = mockito::Server::new_async().await;
    let _mocks = mock_job(&mut server, &[]).await;

    let cache = TempDir::new().unwrap();
    let reports = reports_api(&server, signed_in());
    let saver = ShareSaver::new(cache.path(), Arc::new(LogShare));
    let exporter = ZipExporter::new(&reports, &saver, PollPolicy::new(Duration::ZERO, 5));

    let outcome = exporter
        .download_congregation_publishers_service_year_zip(request(), None)
        .await
        .unwrap();

    assert!(outcome.shared);
    assert_eq!(
        outcome.path,
        cache
            .path()
            .join("downloads")
            .join("registro_publicadores_2024.zip")
    );
}

#[tokio::test]
async fn test_export_without_session_sends_nothing() {
    let mut server = mockito::Server::new_async().await;
    let start = server
        .mock("POST", mockito::Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let reports = reports_api(&server, Session::in_memory());
    let saver = DownloadSaver::new(dir.path());
    let exporter = ZipExporter::new(&reports, &saver, PollPolicy::new(Duration::ZERO, 5));

    let err = exporter
        .download_congregation_publishers_service_year_zip(request(), None)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::Api(ApiError::Unauthenticated(UnauthenticatedReason::Missing))
    ));
    start.assert_async().await;
}

#[tokio::test]
async fn test_expired_session_is_cleared() {
    let server = mockito::Server::new_async().await;
    let store = Arc::new(MemoryTokenStore::with_token(token(1)));
    let session = Session::new(store);

    let dir = TempDir::new().unwrap();
    let reports = reports_api(&server, session.clone());
    let saver = DownloadSaver::new(dir.path());
    let exporter = ZipExporter::new(&reports, &saver, PollPolicy::new(Duration::ZERO, 5));

    let err = exporter
        .download_congregation_publishers_service_year_zip(request(), None)
        .await
        .unwrap_err();
    assert!(err.is_unauthenticated());

    // Second attempt sees no token at all
    let err = exporter
        .download_congregation_publishers_service_year_zip(request(), None)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        AppError::Api(ApiError::Unauthenticated(UnauthenticatedReason::Missing))
    ));
}

#[tokio::test]
async fn test_download_http_error_uses_fallback_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/reports/zip/generate/3/service-year/2024")
        .with_status(201)
        .with_body(r#"{"jobId":"j1","progressUrl":"","downloadUrl":""}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/reports/zip/progress/j1")
        .with_status(200)
        .with_body(r#"{"jobId":"j1","total":1,"completed":1,"percent":100,"status":"completed"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/reports/zip/download/j1")
        .with_status(500)
        .with_body("internal")
        .create_async()
        .await;

    let dir = TempDir::new().unwrap();
    let reports = reports_api(&server, signed_in());
    let saver = DownloadSaver::new(dir.path());
    let exporter = ZipExporter::new(&reports, &saver, PollPolicy::new(Duration::ZERO, 5));

    let err = exporter
        .download_congregation_publishers_service_year_zip(request(), None)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "API error: Request failed with status 500");
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}
