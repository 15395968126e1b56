use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use switchboard_resource_api::{
    ConfigNode,
    ListFilter,
    Page,
    PageCursor,
    RemoteError,
    RemoteProxy,
    RemoteResult,
    Resource,
    ResourceError,
    Timeouts,
};
use switchboard_resource_digitalruleset::types::DigitalRuleSet;
use switchboard_resource_digitalruleset::DigitalRuleSetResource;
use tokio::time::Instant;

/// Rule sets become readable after `hidden_reads` reads and vanish
/// `linger` after a delete
struct MockRuleSets {
    stored: Mutex<Option<DigitalRuleSet>>,
    hidden_reads: usize,
    reads: AtomicUsize,
    calls: AtomicUsize,
    linger: Duration,
    deleted_at: Mutex<Option<Instant>>,
    put_versions: Mutex<Vec<Option<i64>>>,
}

impl MockRuleSets {
    fn new() -> Self {
        Self {
            stored: Mutex::new(None),
            hidden_reads: 0,
            reads: AtomicUsize::new(0),
            calls: AtomicUsize::new(0),
            linger: Duration::ZERO,
            deleted_at: Mutex::new(None),
            put_versions: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RemoteProxy for MockRuleSets {
    type Object = DigitalRuleSet;

    fn family(&self) -> &str {
        "outbound digital rule set"
    }

    async fn create(&self, rule_set: &DigitalRuleSet) -> RemoteResult<DigitalRuleSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let created = DigitalRuleSet {
            id: Some("rs-1".to_string()),
            version: Some(1),
            ..rule_set.clone()
        };
        *self.stored.lock().unwrap() = Some(created.clone());
        Ok(created)
    }

    async fn get_by_id(&self, _id: &str) -> RemoteResult<DigitalRuleSet> {
        let read = self.reads.fetch_add(1, Ordering::SeqCst);
        if read < self.hidden_reads {
            return Err(RemoteError::not_found("rule set not found"));
        }
        if let Some(deleted_at) = *self.deleted_at.lock().unwrap() {
            if deleted_at.elapsed() >= self.linger {
                return Err(RemoteError::not_found("rule set not found"));
            }
        }
        self.stored
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| RemoteError::not_found("rule set not found"))
    }

    async fn update(&self, _id: &str, rule_set: &DigitalRuleSet) -> RemoteResult<DigitalRuleSet> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.put_versions.lock().unwrap().push(rule_set.version);
        let updated = DigitalRuleSet {
            id: Some("rs-1".to_string()),
            version: rule_set.version.map(|v| v + 1),
            ..rule_set.clone()
        };
        *self.stored.lock().unwrap() = Some(updated.clone());
        Ok(updated)
    }

    async fn delete(&self, _id: &str) -> RemoteResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.deleted_at.lock().unwrap() = Some(Instant::now());
        Ok(())
    }

    async fn list_page(
        &self, _cursor: PageCursor, _filter: &ListFilter,
    ) -> RemoteResult<Page<DigitalRuleSet>> {
        Ok(Page::empty())
    }
}

fn config(order: i64) -> ConfigNode {
    ConfigNode::try_from(json!({
        "name": "Email Rules",
        "contact_list_id": "cl-1",
        "rules": [{
            "name": "suppress",
            "order": order,
            "category": "PreContact",
            "conditions": [{"contact_address_condition_settings": [{"operator": "Contains", "value": "@test"}]}],
            "actions": [{"mark_contact_uncontactable_action_settings": [{"media_types": ["Email", "SMS"]}]}]
        }]
    }))
    .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_create_reads_after_propagation_delay() {
    let mut mock = MockRuleSets::new();
    mock.hidden_reads = 2;
    let resource = DigitalRuleSetResource::with_proxy(mock, Timeouts::default());

    let state = resource.create(&config(0)).await.unwrap();

    assert_eq!(state.handle.id, "rs-1");
    assert_eq!(state.handle.version.as_deref(), Some("1"));
    assert!(state.config.semantic_eq(&config(0)));
    assert_eq!(resource.proxy().unwrap().reads.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn test_update_sends_current_version() {
    let resource = DigitalRuleSetResource::with_proxy(MockRuleSets::new(), Timeouts::default());
    resource.create(&config(0)).await.unwrap();

    let state = resource.update("rs-1", &config(4)).await.unwrap();

    assert_eq!(*resource.proxy().unwrap().put_versions.lock().unwrap(), vec![Some(1)]);
    assert_eq!(state.handle.version.as_deref(), Some("2"));
    assert!(state.config.semantic_eq(&config(4)));
}

#[tokio::test(start_paused = true)]
async fn test_shape_mismatch_makes_no_remote_call() {
    let resource = DigitalRuleSetResource::with_proxy(MockRuleSets::new(), Timeouts::default());

    let err = resource
        .create(&ConfigNode::try_from(json!({"name": "x", "rules": {"name": "r"}})).unwrap())
        .await
        .unwrap_err();

    assert!(matches!(err, ResourceError::ShapeMismatch { .. }));
    assert_eq!(resource.proxy().unwrap().calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_delete_tolerates_slow_disappearance() {
    let mut mock = MockRuleSets::new();
    mock.linger = Duration::from_secs(170);
    let resource = DigitalRuleSetResource::with_proxy(mock, Timeouts::default());
    resource.create(&config(0)).await.unwrap();

    resource.delete("rs-1").await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_delete_times_out_when_object_lingers() {
    let mut mock = MockRuleSets::new();
    mock.linger = Duration::from_secs(600);
    let resource = DigitalRuleSetResource::with_proxy(mock, Timeouts::default());
    resource.create(&config(0)).await.unwrap();

    let err = resource.delete("rs-1").await.unwrap_err();
    assert!(matches!(err, ResourceError::TimeoutExceeded { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_update_of_missing_rule_set_fails_fast() {
    let resource = DigitalRuleSetResource::with_proxy(MockRuleSets::new(), Timeouts::default());
    let started = Instant::now();

    let err = resource.update("rs-gone", &config(1)).await.unwrap_err();

    assert!(matches!(err, ResourceError::PermanentRemote(_)));
    assert_eq!(err.status(), Some(404));
    assert_eq!(started.elapsed(), Duration::ZERO);
    assert_eq!(resource.proxy().unwrap().reads.load(Ordering::SeqCst), 1);
    assert_eq!(resource.proxy().unwrap().calls.load(Ordering::SeqCst), 0);
}
