//! Generic create/read/update/delete loop over a [`RemoteProxy`]

use std::future::Future;
use std::time::Duration;

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    info,
    warn,
};

use crate::error::{
    ResourceError,
    ResourceResult,
};
use crate::mapper::ToConfigNode;
use crate::node::ConfigNode;
use crate::paginator;
use crate::proxy::RemoteProxy;
use crate::retry::{
    Backoff,
    ConsistencyReader,
    DEFAULT_DELETE_TIMEOUT,
    DEFAULT_READ_TIMEOUT,
};
use crate::types::{
    ListFilter,
    RemoteObject,
    ResourceHandle,
    ResourceState,
};

/// Budgets for the two eventual-consistency waits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeouts {
    pub read: Duration,
    pub delete: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            read: DEFAULT_READ_TIMEOUT,
            delete: DEFAULT_DELETE_TIMEOUT,
        }
    }
}

pub struct Reconciler<'a, P: ?Sized> {
    proxy: &'a P,
    timeouts: Timeouts,
    backoff: Backoff,
}

impl<'a, P> Reconciler<'a, P>
where
    P: RemoteProxy + ?Sized,
{
    pub fn new(proxy: &'a P, timeouts: Timeouts) -> Self {
        Self {
            proxy,
            timeouts,
            backoff: Backoff::default(),
        }
    }

    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    fn reader(&self, timeout: Duration) -> ConsistencyReader {
        ConsistencyReader::new(timeout).with_backoff(self.backoff)
    }

    fn describe(&self, id: &str) -> String {
        format!("{} {id}", self.proxy.family())
    }

    /// Creates the parent object; children are the orchestrator's concern
    pub async fn create(&self, object: &P::Object) -> ResourceResult<(ResourceHandle, P::Object)> {
        let family = self.proxy.family();
        info!("Creating {family} {}", object.name().unwrap_or_default());

        let created = self.proxy.create(object).await?;
        let handle = created.handle().ok_or_else(|| {
            ResourceError::Internal(format!("Created {family} came back without an id"))
        })?;

        info!("Created {family} {} with id {}", handle.name, handle.id);
        Ok((handle, created))
    }

    /// Fetches the object, waiting out the propagation window after a create
    pub async fn read(&self, id: &str) -> ResourceResult<P::Object> {
        self.reader(self.timeouts.read)
            .wait_for_existence(&self.describe(id), || self.proxy.get_by_id(id))
            .await
    }

    /// Full replace of the parent-level fields
    pub async fn update(
        &self, id: &str, object: &P::Object,
    ) -> ResourceResult<(ResourceHandle, P::Object)> {
        let family = self.proxy.family();
        info!("Updating {family} {id}");

        let updated = self.proxy.update(id, object).await?;
        let handle = updated
            .handle()
            .unwrap_or_else(|| ResourceHandle::new(id, object.name().unwrap_or_default()));

        info!("Updated {family} {id}");
        Ok((handle, updated))
    }

    /// Deletes and waits until the remote side stops returning the object
    pub async fn delete(&self, id: &str) -> ResourceResult<()> {
        let family = self.proxy.family();
        info!("Deleting {family} {id}");

        match self.proxy.delete(id).await {
            Ok(()) => {}
            Err(e) if e.is_not_found() => {
                debug!("{family} {id} was already gone");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        }

        self.reader(self.timeouts.delete)
            .wait_for_absence(&self.describe(id), || self.proxy.get_by_id(id))
            .await?;

        info!("Deleted {family} {id}");
        Ok(())
    }

    /// Handles of every object in the family
    pub async fn export_all(&self) -> ResourceResult<Vec<ResourceHandle>> {
        let objects = paginator::list_all(self.proxy, &ListFilter::default()).await?;

        let handles: Vec<_> = objects.iter().filter_map(RemoteObject::handle).collect();
        if handles.len() < objects.len() {
            warn!(
                "Skipped {} {} entries without an id",
                objects.len() - handles.len(),
                self.proxy.family()
            );
        }
        Ok(handles)
    }

    pub async fn lookup_id(&self, name: &str) -> ResourceResult<String> {
        self.proxy.get_id_by_name(name).await
    }
}

impl<'a, P> Reconciler<'a, P>
where
    P: RemoteProxy + ?Sized,
    P::Object: ToConfigNode,
{
    /// Reads and flattens the fresh remote state
    pub async fn read_state(&self, id: &str) -> ResourceResult<ResourceState> {
        let object = self.read(id).await?;
        Ok(state_of(id, &object))
    }

    /// Reads back after a write and re-applies once if the declaration drifted
    pub async fn settle<F, Fut>(
        &self, id: &str, declared: &ConfigNode, reapply: F,
    ) -> ResourceResult<ResourceState>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ResourceResult<()>>,
    {
        let state = self.read_state(id).await?;
        let drifted = declared.drifted_keys(&state.config);
        if drifted.is_empty() {
            return Ok(state);
        }

        warn!(
            "{} drifted from its declaration on {}, re-applying once",
            self.describe(id),
            drifted.join(", ")
        );
        reapply().await?;
        self.read_state(id).await
    }
}

/// Pairs a fetched object with its flattened configuration
pub fn state_of<O>(id: &str, object: &O) -> ResourceState
where
    O: RemoteObject + ToConfigNode,
{
    ResourceState {
        handle: object
            .handle()
            .unwrap_or_else(|| ResourceHandle::new(id, object.name().unwrap_or_default())),
        config: object.to_node(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{
        AtomicBool,
        AtomicUsize,
        Ordering,
    };
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::error::{
        RemoteError,
        RemoteResult,
    };
    use crate::mapper::NodeBuilder;
    use crate::types::{
        Page,
        PageCursor,
    };

    #[derive(Debug, Clone, PartialEq)]
    struct Queue {
        id: Option<String>,
        name: Option<String>,
        capacity: Option<i64>,
    }

    impl RemoteObject for Queue {
        fn id(&self) -> Option<&str> {
            self.id.as_deref()
        }

        fn name(&self) -> Option<&str> {
            self.name.as_deref()
        }
    }

    impl ToConfigNode for Queue {
        fn to_node(&self) -> ConfigNode {
            NodeBuilder::new()
                .string("name", self.name.as_deref())
                .int("capacity", self.capacity)
                .build()
        }
    }

    fn queue(id: &str, name: &str, capacity: i64) -> Queue {
        Queue {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            capacity: Some(capacity),
        }
    }

    /// Remote that hides new objects for `visible_after` reads
    #[derive(Default)]
    struct MockQueues {
        stored: Mutex<Option<Queue>>,
        visible_after: usize,
        reads: AtomicUsize,
        deleted: AtomicBool,
        updates: AtomicUsize,
        listing: Vec<Queue>,
    }

    #[async_trait]
    impl RemoteProxy for MockQueues {
        type Object = Queue;

        fn family(&self) -> &str {
            "queue"
        }

        async fn create(&self, object: &Queue) -> RemoteResult<Queue> {
            let created = Queue {
                id: Some("q-1".to_string()),
                ..object.clone()
            };
            *self.stored.lock().unwrap() = Some(created.clone());
            Ok(created)
        }

        async fn get_by_id(&self, _id: &str) -> RemoteResult<Queue> {
            let read = self.reads.fetch_add(1, Ordering::SeqCst);
            if self.deleted.load(Ordering::SeqCst) || read < self.visible_after {
                return Err(RemoteError::not_found("queue not found"));
            }
            self.stored
                .lock()
                .unwrap()
                .clone()
                .ok_or_else(|| RemoteError::not_found("queue not found"))
        }

        async fn update(&self, id: &str, object: &Queue) -> RemoteResult<Queue> {
            self.updates.fetch_add(1, Ordering::SeqCst);
            let updated = Queue {
                id: Some(id.to_string()),
                ..object.clone()
            };
            *self.stored.lock().unwrap() = Some(updated.clone());
            Ok(updated)
        }

        async fn delete(&self, _id: &str) -> RemoteResult<()> {
            self.deleted.store(true, Ordering::SeqCst);
            Ok(())
        }

        async fn list_page(
            &self, cursor: PageCursor, filter: &ListFilter,
        ) -> RemoteResult<Page<Queue>> {
            if cursor.page > 1 {
                return Ok(Page::empty());
            }
            let entities = self
                .listing
                .iter()
                .filter(|q| filter.name.is_none() || q.name == filter.name)
                .cloned()
                .collect();
            Ok(Page::new(entities))
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_create_then_read_waits_for_propagation() {
        let proxy = MockQueues {
            visible_after: 2,
            ..Default::default()
        };
        let reconciler = Reconciler::new(&proxy, Timeouts::default());

        let (handle, _) = reconciler
            .create(&Queue {
                id: None,
                name: Some("support".to_string()),
                capacity: Some(3),
            })
            .await
            .unwrap();
        assert_eq!(handle.id, "q-1");

        let state = reconciler.read_state(&handle.id).await.unwrap();
        assert_eq!(state.handle.name, "support");
        assert_eq!(state.config.get("capacity"), Some(&ConfigNode::int(3)));
        assert_eq!(proxy.reads.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_waits_for_absence() {
        let proxy = MockQueues::default();
        *proxy.stored.lock().unwrap() = Some(queue("q-1", "support", 1));
        let reconciler = Reconciler::new(&proxy, Timeouts::default());

        reconciler.delete("q-1").await.unwrap();
        assert!(proxy.reads.load(Ordering::SeqCst) >= 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_reapplies_once_on_drift() {
        let proxy = MockQueues::default();
        *proxy.stored.lock().unwrap() = Some(queue("q-1", "support", 1));
        let reconciler = Reconciler::new(&proxy, Timeouts::default());
        let declared = queue("q-1", "support", 5);

        let state = reconciler
            .settle("q-1", &declared.to_node(), || async {
                reconciler.update("q-1", &declared).await.map(|_| ())
            })
            .await
            .unwrap();

        assert_eq!(proxy.updates.load(Ordering::SeqCst), 1);
        assert_eq!(state.config.get("capacity"), Some(&ConfigNode::int(5)));
    }

    #[tokio::test]
    async fn test_export_all_skips_entries_without_id() {
        let proxy = MockQueues {
            listing: vec![
                queue("q-1", "support", 1),
                Queue {
                    id: None,
                    name: Some("orphan".to_string()),
                    capacity: None,
                },
                queue("q-2", "sales", 2),
            ],
            ..Default::default()
        };
        let reconciler = Reconciler::new(&proxy, Timeouts::default());

        let handles = reconciler.export_all().await.unwrap();
        let ids: Vec<_> = handles.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["q-1", "q-2"]);
    }

    #[tokio::test]
    async fn test_lookup_id_exact_match() {
        let proxy = MockQueues {
            listing: vec![queue("q-7", "billing", 1)],
            ..Default::default()
        };
        let reconciler = Reconciler::new(&proxy, Timeouts::default());

        assert_eq!(reconciler.lookup_id("billing").await.unwrap(), "q-7");

        let err = reconciler.lookup_id("unknown").await.unwrap_err();
        assert!(err.is_retryable());
    }
}
