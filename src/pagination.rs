//! Offset pagination over Accela list responses.
//!
//! A [`PagedResult`] holds one page plus what it needs to ask for the next
//! one: the request path and filters and a handle to the client. Advancing
//! overwrites the page in place.

use std::collections::VecDeque;

use futures::stream::{self, Stream};
use serde::Deserialize;
use serde_json::Value;

use crate::client::AccelaClient;
use crate::error::{AccelaError, Result};
use crate::traits::ResourceModel;

/// Default page size for list operations.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Whether another page can follow one of `len` items fetched at `offset`.
///
/// A short page ends the sequence even if `total` claims otherwise.
pub fn compute_has_more(len: usize, limit: u32, offset: u32, total: u64) -> bool {
    len as u64 == u64::from(limit) && u64::from(offset) + u64::from(limit) < total
}

/// Path and filters of a list call, replayed for every page.
#[derive(Debug, Clone)]
pub(crate) struct ListRequest {
    path: String,
    filters: Vec<(String, String)>,
}

impl ListRequest {
    pub(crate) fn new(path: String, filters: Vec<(String, String)>) -> Self {
        Self { path, filters }
    }

    fn params(&self, limit: u32, offset: u32) -> Vec<(String, String)> {
        let mut params = self.filters.clone();
        params.push(("limit".to_string(), limit.to_string()));
        params.push(("offset".to_string(), offset.to_string()));
        params
    }

    /// Fetch one page, returning its items and the total to use.
    async fn fetch_page<T: ResourceModel>(
        &self,
        client: &AccelaClient,
        limit: u32,
        offset: u32,
        previous_total: Option<u64>,
    ) -> Result<(Vec<T>, u64)> {
        let body = client.get_json(&self.path, &self.params(limit, offset)).await?;
        let envelope = ListEnvelope::from_body(body)?;

        let reported = envelope.total();
        let items: Vec<T> = envelope.decode_items()?;

        // Without a reported total the page count is all we know; a first
        // page then never has a successor.
        let total = reported
            .or(previous_total)
            .unwrap_or(items.len() as u64);

        Ok((items, total))
    }
}

/// API response wrapper for list endpoints.
///
/// Most endpoints report `total` at the top level; record types nest it in
/// a `page` object instead. The server's `hasmore` flag is ignored since
/// `has_more` is always recomputed from the page itself.
#[derive(Debug, Deserialize)]
pub(crate) struct ListEnvelope {
    #[serde(default)]
    result: Option<Vec<Value>>,
    #[serde(default)]
    total: Option<u64>,
    #[serde(default)]
    page: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PageInfo {
    #[serde(default)]
    total: Option<u64>,
}

impl ListEnvelope {
    pub(crate) fn from_body(body: Value) -> Result<Self> {
        serde_json::from_value(body).map_err(|e| AccelaError::decode("response body", e.to_string()))
    }

    fn total(&self) -> Option<u64> {
        self.page.as_ref().and_then(|page| page.total).or(self.total)
    }

    /// Decode every item; a missing `result` key means an empty page.
    pub(crate) fn decode_items<T: ResourceModel>(self) -> Result<Vec<T>> {
        self.result
            .unwrap_or_default()
            .into_iter()
            .map(T::from_json)
            .collect()
    }
}

/// One page of a list call, able to fetch the pages after it.
///
/// Iterating a `PagedResult` directly yields only the current page. Use
/// [`PagedResult::auto_paging`] or [`PagedResult::collect_all`] to walk every
/// remaining page, or [`PagedResult::next_page`] to step manually.
///
/// # Example
///
/// ```ignore
/// use futures::TryStreamExt;
///
/// let page = Record::list(&client, &RecordListQuery::default(), 100, 0).await?;
/// let records: Vec<Record> = page.auto_paging().try_collect().await?;
/// ```
#[derive(Debug)]
pub struct PagedResult<T> {
    /// The items on this page, in server order.
    pub items: Vec<T>,
    /// Offset of the first item on this page.
    pub offset: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total number of items across all pages.
    pub total: u64,
    /// Whether another page should be fetched.
    pub has_more: bool,
    client: AccelaClient,
    request: ListRequest,
}

impl<T: ResourceModel> PagedResult<T> {
    pub(crate) async fn fetch(
        client: AccelaClient,
        request: ListRequest,
        limit: u32,
        offset: u32,
    ) -> Result<Self> {
        if limit == 0 {
            return Err(AccelaError::ConfigInvalid(
                "limit must be positive".to_string(),
            ));
        }

        let (items, total) = request.fetch_page(&client, limit, offset, None).await?;
        let has_more = compute_has_more(items.len(), limit, offset, total);

        Ok(Self {
            items,
            offset,
            limit,
            total,
            has_more,
            client,
            request,
        })
    }

    /// Replace this page with the next one.
    ///
    /// Returns `false` without any request once the results are exhausted.
    /// On error the current page is left as it was.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or any item fails to decode.
    pub async fn next_page(&mut self) -> Result<bool> {
        if !self.has_more {
            return Ok(false);
        }

        let Some(offset) = self.offset.checked_add(self.limit) else {
            self.has_more = false;
            return Ok(false);
        };
        let (items, total) = self
            .request
            .fetch_page(&self.client, self.limit, offset, Some(self.total))
            .await?;

        tracing::debug!(
            path = %self.request.path,
            offset,
            count = items.len(),
            total,
            "fetched next page"
        );

        self.has_more = compute_has_more(items.len(), self.limit, offset, total);
        self.items = items;
        self.offset = offset;
        self.total = total;
        Ok(true)
    }

    /// Drain this page and every following page into one vector.
    ///
    /// # Errors
    ///
    /// Returns the first page request or decode failure.
    pub async fn collect_all(mut self) -> Result<Vec<T>> {
        let mut all_items = std::mem::take(&mut self.items);
        while self.next_page().await? {
            all_items.append(&mut self.items);
        }
        Ok(all_items)
    }

    /// Lazily yield every item from this page onwards.
    ///
    /// The next page is requested only after the current one has been
    /// consumed. A failed request yields one `Err` and ends the stream.
    pub fn auto_paging(mut self) -> impl Stream<Item = Result<T>> {
        let buffered: VecDeque<T> = self.items.drain(..).collect();
        stream::try_unfold(
            AutoPaging {
                page: self,
                buffered,
            },
            AutoPaging::next_item,
        )
    }
}

impl<T> PagedResult<T> {
    /// Returns true if this page has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns an iterator over the items in this page.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Apply `f` to each item on this page.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Vec<U> {
        self.items.iter().map(f).collect()
    }
}

struct AutoPaging<T> {
    page: PagedResult<T>,
    buffered: VecDeque<T>,
}

impl<T: ResourceModel> AutoPaging<T> {
    async fn next_item(mut self) -> Result<Option<(T, Self)>> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Ok(Some((item, self)));
            }
            if !self.page.next_page().await? {
                return Ok(None);
            }
            self.buffered.extend(self.page.items.drain(..));
        }
    }
}

impl<T> IntoIterator for PagedResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a PagedResult<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
