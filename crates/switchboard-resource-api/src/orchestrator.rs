//! Sub-resource orchestration
//!
//! Children are reconciled one at a time in declaration order, each followed by
//! its attachment uploads. Nothing is rolled back: the first failure stops the
//! pass and is reported as a [`PartialFailure`] so the caller knows the parent
//! is persisted but incomplete. Re-running [`Orchestrator::update_children`]
//! heals such a parent, since it creates whatever is still missing.

use tracing::{
    debug,
    info,
    warn,
};

use crate::error::{
    OrchestrationPhase,
    PartialFailure,
    ResourceError,
    ResourceResult,
};
use crate::proxy::{
    ChildProxy,
    SubResource,
};
use crate::types::ResourceHandle;
use crate::upload::Transfer;

pub struct Orchestrator<'a, C: ?Sized, T: ?Sized> {
    children: &'a C,
    transfer: &'a T,
}

struct Failure {
    child: String,
    phase: OrchestrationPhase,
    source: ResourceError,
}

impl Failure {
    fn new(child: &str, phase: OrchestrationPhase, source: impl Into<ResourceError>) -> Self {
        Self {
            child: child.to_string(),
            phase,
            source: source.into(),
        }
    }
}

impl<'a, C, T> Orchestrator<'a, C, T>
where
    C: ChildProxy + ?Sized,
    T: Transfer + ?Sized,
{
    pub fn new(children: &'a C, transfer: &'a T) -> Self {
        Self { children, transfer }
    }

    /// Creates every child of a freshly created parent
    pub async fn create_children(
        &self, parent: &ResourceHandle, children: &[C::Child],
    ) -> ResourceResult<()> {
        self.run(parent, children, |child| self.create_one(parent, child))
            .await
    }

    /// Creates missing children and patches existing ones
    pub async fn update_children(
        &self, parent: &ResourceHandle, children: &[C::Child],
    ) -> ResourceResult<()> {
        self.run(parent, children, |child| self.upsert_one(parent, child))
            .await
    }

    async fn run<'c, F, Fut>(
        &self, parent: &ResourceHandle, children: &'c [C::Child], mut step: F,
    ) -> ResourceResult<()>
    where
        F: FnMut(&'c C::Child) -> Fut,
        Fut: std::future::Future<Output = Result<(), Failure>>,
    {
        let mut completed = Vec::with_capacity(children.len());

        for child in children {
            let key = child.natural_key();
            if let Err(failure) = step(child).await {
                warn!(
                    "Child '{}' of {} failed during {}: {}",
                    failure.child, parent.id, failure.phase, failure.source
                );
                return Err(ResourceError::partial(PartialFailure {
                    parent: parent.clone(),
                    child: failure.child,
                    phase: failure.phase,
                    completed,
                    source: failure.source,
                }));
            }
            completed.push(key.to_string());
        }

        if !completed.is_empty() {
            info!("Reconciled {} children of {}", completed.len(), parent.id);
        }
        Ok(())
    }

    async fn create_one(&self, parent: &ResourceHandle, child: &C::Child) -> Result<(), Failure> {
        let key = child.natural_key();
        self.children
            .create_child(&parent.id, child)
            .await
            .map_err(|e| Failure::new(key, OrchestrationPhase::ChildCreate, e))?;
        debug!("Created child '{key}' of {}", parent.id);

        self.upload_attachments(parent, child).await
    }

    async fn upsert_one(&self, parent: &ResourceHandle, child: &C::Child) -> Result<(), Failure> {
        let key = child.natural_key();
        match self.children.get_child(&parent.id, key).await {
            Ok(_) => {
                self.children
                    .patch_child(&parent.id, key, &child.patch())
                    .await
                    .map_err(|e| Failure::new(key, OrchestrationPhase::ChildPatch, e))?;
                debug!("Patched child '{key}' of {}", parent.id);
            }
            Err(e) if e.is_not_found() => {
                debug!("Child '{key}' of {} not found, creating it", parent.id);
                self.children
                    .create_child(&parent.id, child)
                    .await
                    .map_err(|e| Failure::new(key, OrchestrationPhase::ChildCreate, e))?;
            }
            Err(e) => return Err(Failure::new(key, OrchestrationPhase::ChildLookup, e)),
        }

        self.upload_attachments(parent, child).await
    }

    /// Runs both upload phases for every attachment the child declares
    async fn upload_attachments(
        &self, parent: &ResourceHandle, child: &C::Child,
    ) -> Result<(), Failure> {
        let key = child.natural_key();

        for attachment in child.attachments() {
            let target = self
                .children
                .request_upload_target(&parent.id, key, &attachment)
                .await
                .map_err(|e| {
                    Failure::new(
                        key,
                        OrchestrationPhase::UploadTarget {
                            kind: attachment.kind.clone(),
                        },
                        e,
                    )
                })?;

            self.transfer
                .put_file(&target, &attachment.file_name)
                .await
                .map_err(|e| {
                    Failure::new(
                        key,
                        OrchestrationPhase::UploadTransfer {
                            kind: attachment.kind.clone(),
                        },
                        e,
                    )
                })?;

            debug!(
                "Uploaded {} file {} for child '{key}'",
                attachment.kind,
                attachment.file_name.display()
            );
        }

        Ok(())
    }
}
