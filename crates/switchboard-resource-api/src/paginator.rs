//! Page-by-page walking of remote listing endpoints

use std::future::Future;

use tracing::debug;

use crate::error::{
    RemoteResult,
    ResourceError,
    ResourceResult,
};
use crate::proxy::RemoteProxy;
use crate::types::{
    ListFilter,
    Page,
    PageCursor,
    RemoteObject,
};

/// Requests pages starting at page one until an empty page comes back.
///
/// Entities are accumulated without deduplication; the listing is assumed
/// not to repeat ids across pages.
pub async fn collect_all<T, F, Fut>(mut fetch_page: F) -> ResourceResult<Vec<T>>
where
    F: FnMut(PageCursor) -> Fut,
    Fut: Future<Output = RemoteResult<Page<T>>>,
{
    let mut all = Vec::new();
    let mut cursor = PageCursor::first();

    loop {
        let page = fetch_page(cursor).await?;
        if page.is_empty() {
            break;
        }

        let entities = page.into_entities();
        debug!(
            "Fetched page {} with {} entities",
            cursor.page,
            entities.len()
        );
        all.extend(entities);
        cursor = cursor.next();
    }

    Ok(all)
}

/// Lists every entity of a family
pub async fn list_all<P>(proxy: &P, filter: &ListFilter) -> ResourceResult<Vec<P::Object>>
where
    P: RemoteProxy + ?Sized,
{
    let objects = collect_all(|cursor| proxy.list_page(cursor, filter)).await?;
    debug!("Listed {} {} entities", objects.len(), proxy.family());
    Ok(objects)
}

/// Scans the first name-filtered page for an exact name match.
///
/// An empty page is reported as retryable; a page with no exact match is not.
pub async fn find_id_by_name<P>(proxy: &P, name: &str) -> ResourceResult<String>
where
    P: RemoteProxy + ?Sized,
{
    let page = proxy
        .list_page(PageCursor::first(), &ListFilter::by_name(name))
        .await?;

    if page.is_empty() {
        return Err(ResourceError::TransientNotFound(format!(
            "No {} found with name {name}",
            proxy.family()
        )));
    }

    page.into_entities()
        .iter()
        .find(|object| object.name() == Some(name))
        .and_then(|object| object.id().map(str::to_string))
        .inspect(|id| debug!("Retrieved {} id {id} by name {name}", proxy.family()))
        .ok_or_else(|| {
            ResourceError::NotFound(format!("Unable to find {} with name {name}", proxy.family()))
        })
}
