//! Report endpoints: the congregation dashboard and the ZIP export job

use super::client::{with_query, ApiClient};
use crate::domain::{
    ApiError, CongregationHomeReport, CongregationId, JobId, Result, ServicePeriod, ZipJob,
    ZipPayload, ZipProgress,
};
use async_trait::async_trait;
use reqwest::Method;

/// Server side of the ZIP export job
///
/// The export flow only talks to the server through this trait.
#[async_trait]
pub trait ZipJobApi: Send + Sync {
    /// Submits a generation job; issues exactly one request
    async fn start_zip_generation(
        &self,
        congregation_id: CongregationId,
        service_year: i32,
    ) -> Result<ZipJob>;

    /// Current progress snapshot of a job
    async fn get_zip_progress(&self, job_id: &JobId) -> Result<ZipProgress>;

    /// Finished archive with its naming headers
    async fn get_zip_buffer(&self, job_id: &JobId) -> Result<ZipPayload>;
}

pub struct ReportsApi {
    client: ApiClient,
}

impl ReportsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Dashboard totals for one congregation and month
    pub async fn congregation_home(
        &self,
        congregation_id: CongregationId,
        period: ServicePeriod,
    ) -> Result<CongregationHomeReport> {
        let endpoint = with_query(
            &format!("/reports/congregations/{congregation_id}/home"),
            [
                ("year", period.year.to_string()),
                ("month", period.month.to_string()),
            ],
        );
        self.client.get(&endpoint).await
    }
}

#[async_trait]
impl ZipJobApi for ReportsApi {
    async fn start_zip_generation(
        &self,
        congregation_id: CongregationId,
        service_year: i32,
    ) -> Result<ZipJob> {
        let endpoint =
            format!("/reports/zip/generate/{congregation_id}/service-year/{service_year}");
        self.client
            .request::<(), ZipJob>(Method::POST, &endpoint, None)
            .await?
            .ok_or_else(|| ApiError::EmptyResponse(endpoint).into())
    }

    async fn get_zip_progress(&self, job_id: &JobId) -> Result<ZipProgress> {
        self.client
            .get(&format!("/reports/zip/progress/{job_id}"))
            .await
    }

    async fn get_zip_buffer(&self, job_id: &JobId) -> Result<ZipPayload> {
        let raw = self
            .client
            .get_raw(&format!("/reports/zip/download/{job_id}"))
            .await?;

        Ok(ZipPayload {
            x_filename: raw.header("x-filename"),
            content_disposition: raw.header("content-disposition"),
            bytes: raw.bytes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::api::session::tests::make_token;
    use crate::adapters::api::{MemoryTokenStore, Session};
    use crate::config::ApiConfig;
    use crate::domain::{AppError, ZipStatus};
    use mockito::Matcher;
    use std::sync::Arc;

    fn api(server: &mockito::Server) -> ReportsApi {
        let config = ApiConfig {
            base_url: server.url(),
            ..ApiConfig::default()
        };
        let session = Session::new(Arc::new(MemoryTokenStore::with_token(make_token(None))));
        ReportsApi::new(ApiClient::new(&config, session).unwrap())
    }

    #[tokio::test]
    async fn test_start_zip_generation() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/reports/zip/generate/3/service-year/2025")
            .with_status(201)
            .with_body(
                serde_json::json!({
                    "jobId": "abc123",
                    "congregation": {"id": 3, "name": "Central"},
                    "progressUrl": "/reports/zip/progress/abc123",
                    "downloadUrl": "/reports/zip/download/abc123"
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let job = api(&server)
            .start_zip_generation(CongregationId::new(3), 2025)
            .await
            .unwrap();
        assert_eq!(job.job_id.as_str(), "abc123");
        assert_eq!(job.download_url, "/reports/zip/download/abc123");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_start_zip_generation_error_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/reports/zip/generate/3/service-year/1999")
            .with_status(404)
            .with_body(r#"{"message":"Congregation not found"}"#)
            .create_async()
            .await;

        let err = api(&server)
            .start_zip_generation(CongregationId::new(3), 1999)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(ApiError::Http { status: 404, .. })
        ));
        assert!(err.to_string().contains("Congregation not found"));
    }

    #[tokio::test]
    async fn test_get_zip_progress() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/reports/zip/progress/abc123")
            .with_status(200)
            .with_body(
                r#"{"jobId":"abc123","total":10,"completed":4,"percent":40,"status":"processing"}"#,
            )
            .create_async()
            .await;

        let job_id = JobId::new("abc123").unwrap();
        let progress = api(&server).get_zip_progress(&job_id).await.unwrap();
        assert_eq!(progress.status, ZipStatus::Processing);
        assert_eq!(progress.completed, 4);
    }

    #[tokio::test]
    async fn test_get_zip_buffer_reads_headers() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/reports/zip/download/abc123")
            .with_status(200)
            .with_header("content-type", "application/zip")
            .with_header("x-filename", "central_2025.zip")
            .with_header("content-disposition", "attachment; filename=\"other.zip\"")
            .with_body(vec![0x50, 0x4b, 0x05, 0x06])
            .create_async()
            .await;

        let job_id = JobId::new("abc123").unwrap();
        let payload = api(&server).get_zip_buffer(&job_id).await.unwrap();
        assert_eq!(payload.bytes, vec![0x50, 0x4b, 0x05, 0x06]);
        assert_eq!(payload.x_filename.as_deref(), Some("central_2025.zip"));
        assert_eq!(
            payload.content_disposition.as_deref(),
            Some("attachment; filename=\"other.zip\"")
        );
    }

    #[tokio::test]
    async fn test_congregation_home_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/reports/congregations/3/home")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("year".into(), "2025".into()),
                Matcher::UrlEncoded("month".into(), "4".into()),
            ]))
            .with_status(200)
            .with_body(
                serde_json::json!({
                    "total_teams": 4,
                    "total_people": 40,
                    "total_active_people": 36,
                    "expected_reports": 36,
                    "registered_reports": 18,
                    "missing_reports": 18,
                    "summary": {
                        "publishers": {"reports": 12, "bible_courses": 3},
                        "regular_pioneers": {"reports": 5, "bible_courses": 4, "hours": 250},
                        "auxiliary_pioneers": {"reports": 1, "bible_courses": 0, "hours": 30}
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let period = ServicePeriod::new(2025, 4).unwrap();
        let home = api(&server)
            .congregation_home(CongregationId::new(3), period)
            .await
            .unwrap();
        assert_eq!(home.completion_rate(), 50.0);
        assert_eq!(home.total_bible_courses(), 7);
        mock.assert_async().await;
    }
}
