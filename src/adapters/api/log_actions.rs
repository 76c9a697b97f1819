//! Audit log endpoint

use super::client::{with_query, ApiClient};
use crate::domain::{LogActionsPage, Result};

pub struct LogActionsApi {
    client: ApiClient,
}

impl LogActionsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of the audit log; unset or zero paging values are left to the server
    pub async fn list(&self, page: Option<u32>, limit: Option<u32>) -> Result<LogActionsPage> {
        let pairs = [("page", page), ("limit", limit)]
            .into_iter()
            .filter_map(|(key, value)| value.filter(|v| *v > 0).map(|v| (key, v.to_string())));
        self.client.get(&with_query("/log-actions", pairs)).await
    }
}
