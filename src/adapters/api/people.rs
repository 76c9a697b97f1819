//! People endpoints

use super::client::ApiClient;
use crate::domain::{AppError, CongregationId, Person, PersonId, Result};

pub struct PeopleApi {
    client: ApiClient,
}

impl PeopleApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, person: &Person) -> Result<Person> {
        person.validate().map_err(AppError::Validation)?;
        self.client.post("/people", person).await
    }

    pub async fn list_by_congregation(&self, congregation_id: CongregationId) -> Result<Vec<Person>> {
        self.client
            .get(&format!("/congregations/{congregation_id}/people"))
            .await
    }

    pub async fn get(&self, id: PersonId) -> Result<Person> {
        self.client.get(&format!("/people/{id}")).await
    }

    pub async fn update(&self, id: PersonId, person: &Person) -> Result<Person> {
        person.validate().map_err(AppError::Validation)?;
        self.client.put(&format!("/people/{id}"), person).await
    }

    pub async fn delete(&self, id: PersonId) -> Result<()> {
        self.client.delete(&format!("/people/{id}")).await
    }
}
