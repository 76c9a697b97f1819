//! Monthly publisher report endpoints

use super::client::{with_query, ApiClient};
use crate::domain::{AppError, PublisherReport, PublisherReportId, PublisherReportQuery, Result};

pub struct PublisherReportsApi {
    client: ApiClient,
}

impl PublisherReportsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Creates a report; reported hours mark the month as participated
    pub async fn create(&self, report: PublisherReport) -> Result<PublisherReport> {
        let report = report.normalized();
        report.validate().map_err(AppError::Validation)?;
        self.client.post("/publisher-reports", &report).await
    }

    pub async fn list(&self, query: &PublisherReportQuery) -> Result<Vec<PublisherReport>> {
        let endpoint = with_query("/publisher-reports", query.to_pairs());
        self.client.get(&endpoint).await
    }

    pub async fn get(&self, id: PublisherReportId) -> Result<PublisherReport> {
        self.client.get(&format!("/publisher-reports/{id}")).await
    }

    pub async fn update(&self, id: PublisherReportId, report: PublisherReport) -> Result<PublisherReport> {
        let report = report.normalized();
        report.validate().map_err(AppError::Validation)?;
        self.client
            .put(&format!("/publisher-reports/{id}"), &report)
            .await
    }

    /// Reports are never deleted from the client
    pub async fn delete(&self, id: PublisherReportId) -> Result<()> {
        tracing::warn!(report_id = %id, "Refusing to delete publisher report");
        Err(AppError::NotPermitted(
            "publisher reports cannot be deleted".to_string(),
        ))
    }
}
