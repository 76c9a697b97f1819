//! Team endpoints

use super::client::{with_query, ApiClient};
use crate::domain::{AppError, CongregationId, Result, Team, TeamId};

pub struct TeamsApi {
    client: ApiClient,
}

impl TeamsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, team: &Team) -> Result<Team> {
        team.validate().map_err(AppError::Validation)?;
        self.client.post("/teams", team).await
    }

    pub async fn list_by_congregation(&self, congregation_id: CongregationId) -> Result<Vec<Team>> {
        let endpoint = with_query("/teams", [("congregation_id", congregation_id.to_string())]);
        self.client.get(&endpoint).await
    }

    pub async fn get(&self, id: TeamId) -> Result<Team> {
        self.client.get(&format!("/teams/{id}")).await
    }

    pub async fn update(&self, id: TeamId, team: &Team) -> Result<Team> {
        team.validate().map_err(AppError::Validation)?;
        self.client.put(&format!("/teams/{id}"), team).await
    }

    pub async fn delete(&self, id: TeamId) -> Result<()> {
        self.client.delete(&format!("/teams/{id}")).await
    }
}
