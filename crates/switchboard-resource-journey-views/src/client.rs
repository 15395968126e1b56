//! Remote proxy for journey views

use async_trait::async_trait;
use switchboard_resource_api::transport::segment;
use switchboard_resource_api::{
    ListFilter,
    Page,
    PageCursor,
    PlatformClient,
    RemoteProxy,
    RemoteResult,
};

use crate::types::JourneyView;

const VIEWS_PATH: &str = "/api/v2/journey/views";

pub struct JourneyViewProxy {
    client: PlatformClient,
}

impl JourneyViewProxy {
    pub fn new(client: &PlatformClient) -> Self {
        Self {
            client: client.clone(),
        }
    }

    fn view_path(id: &str) -> String {
        format!("{VIEWS_PATH}/{}", segment(id))
    }
}

#[async_trait]
impl RemoteProxy for JourneyViewProxy {
    type Object = JourneyView;

    fn family(&self) -> &str {
        "journey view"
    }

    async fn create(&self, view: &JourneyView) -> RemoteResult<JourneyView> {
        self.client.post_json(VIEWS_PATH, view).await
    }

    /// Latest saved version
    async fn get_by_id(&self, id: &str) -> RemoteResult<JourneyView> {
        self.client.get_json(&Self::view_path(id), &[]).await
    }

    /// Views are never edited in place, every update saves a new version
    async fn update(&self, id: &str, view: &JourneyView) -> RemoteResult<JourneyView> {
        self.client
            .post_json(&format!("{}/versions", Self::view_path(id)), view)
            .await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.client.delete(&Self::view_path(id)).await
    }

    async fn list_page(
        &self, cursor: PageCursor, filter: &ListFilter,
    ) -> RemoteResult<Page<JourneyView>> {
        self.client.get_json(VIEWS_PATH, &filter.query(cursor)).await
    }
}
