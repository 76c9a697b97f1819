//! Congregation endpoints; both are public

use super::client::ApiClient;
use crate::domain::{AppError, Congregation, Result};

pub struct CongregationsApi {
    client: ApiClient,
}

impl CongregationsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Congregation>> {
        self.client.get("/congregations").await
    }

    pub async fn create(&self, congregation: &Congregation) -> Result<Congregation> {
        congregation.validate().map_err(AppError::Validation)?;
        self.client.post("/congregations", congregation).await
    }
}
