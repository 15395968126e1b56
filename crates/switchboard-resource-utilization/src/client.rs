//! Remote proxy for the org-wide routing utilization settings
//!
//! There is no collection endpoint. Create and update both replace the one
//! object, delete resets it to the platform defaults.

use async_trait::async_trait;
use switchboard_resource_api::{
    ListFilter,
    Page,
    PageCursor,
    PlatformClient,
    RemoteProxy,
    RemoteResult,
};

use crate::types::RoutingUtilization;

const UTILIZATION_PATH: &str = "/api/v2/routing/utilization";

pub struct RoutingUtilizationProxy {
    client: PlatformClient,
}

impl RoutingUtilizationProxy {
    pub fn new(client: &PlatformClient) -> Self {
        Self {
            client: client.clone(),
        }
    }
}

#[async_trait]
impl RemoteProxy for RoutingUtilizationProxy {
    type Object = RoutingUtilization;

    fn family(&self) -> &str {
        "routing utilization"
    }

    async fn create(&self, utilization: &RoutingUtilization) -> RemoteResult<RoutingUtilization> {
        self.client.put_json(UTILIZATION_PATH, utilization).await
    }

    async fn get_by_id(&self, _id: &str) -> RemoteResult<RoutingUtilization> {
        self.client.get_json(UTILIZATION_PATH, &[]).await
    }

    async fn update(
        &self, _id: &str, utilization: &RoutingUtilization,
    ) -> RemoteResult<RoutingUtilization> {
        self.client.put_json(UTILIZATION_PATH, utilization).await
    }

    async fn delete(&self, _id: &str) -> RemoteResult<()> {
        self.client.delete(UTILIZATION_PATH).await
    }

    /// The single object on the first page, nothing after it
    async fn list_page(
        &self, cursor: PageCursor, _filter: &ListFilter,
    ) -> RemoteResult<Page<RoutingUtilization>> {
        if cursor.page > 1 {
            return Ok(Page::empty());
        }
        let utilization = self.get_by_id("").await?;
        Ok(Page::new(vec![utilization]))
    }
}
