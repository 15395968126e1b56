//! Remote proxy for outbound digital rule sets

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

use crate::types::DigitalRuleSet;

const RULESETS_PATH: &str = "/api/v2/outbound/digitalrulesets";

pub struct OutboundDigitalRuleSetProxy {
    client: PlatformClient,
}

impl OutboundDigitalRuleSetProxy {
    pub fn new(client: &PlatformClient) -> Self {
        Self {
            client: client.clone(),
        }
    }

    fn ruleset_path(id: &str) -> String {
        format!("{RULESETS_PATH}/{}", segment(id))
    }
}

#[async_trait]
impl RemoteProxy for OutboundDigitalRuleSetProxy {
    type Object = DigitalRuleSet;

    fn family(&self) -> &str {
        "outbound digital rule set"
    }

    async fn create(&self, rule_set: &DigitalRuleSet) -> RemoteResult<DigitalRuleSet> {
        self.client.post_json(RULESETS_PATH, rule_set).await
    }

    async fn get_by_id(&self, id: &str) -> RemoteResult<DigitalRuleSet> {
        self.client
            .get_json(&Self::ruleset_path(id), &[])
            .await
    }

    /// Full replace; the body must carry the current version
    async fn update(&self, id: &str, rule_set: &DigitalRuleSet) -> RemoteResult<DigitalRuleSet> {
        self.client
            .put_json(&Self::ruleset_path(id), rule_set)
            .await
    }

    async fn delete(&self, id: &str) -> RemoteResult<()> {
        self.client.delete(&Self::ruleset_path(id)).await
    }

    async fn list_page(
        &self, cursor: PageCursor, filter: &ListFilter,
    ) -> RemoteResult<Page<DigitalRuleSet>> {
        self.client
            .get_json(RULESETS_PATH, &filter.query(cursor))
            .await
    }
}
