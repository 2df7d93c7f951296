//! List trait for fetching collections of entities.

use async_trait::async_trait;
use serde::Serialize;

use crate::client::AccelaClient;
use crate::endpoint::ResourceEndpoint;
use crate::error::Result;
use crate::pagination::{PagedResult, DEFAULT_PAGE_SIZE};
use crate::traits::ResourceModel;

/// List/filter entities with offset pagination.
///
/// Implementors name the collection path for a query and serialize their
/// filters; the query string gets `limit` and `offset` appended.
///
/// # Example
///
/// ```ignore
/// use accela::{AccelaClient, List, Record, RecordListQuery};
///
/// let client = AccelaClient::from_env()?;
///
/// // Fetch a single page
/// let page = Record::list(&client, &RecordListQuery::default(), 50, 0).await?;
///
/// // Fetch all pages
/// let all_records = Record::list_all(&client, &RecordListQuery::default()).await?;
/// ```
#[async_trait]
pub trait List: ResourceModel {
    /// Query parameters for filtering. Path parameters are skipped when
    /// serializing.
    type Query: Serialize + Send + Sync;

    /// Collection path for the query (e.g. `records/{id}/addresses`).
    fn list_path(query: &Self::Query) -> String;

    /// List one page of entities matching the query.
    ///
    /// The returned [`PagedResult`] can fetch the following pages on demand.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or any item fails to decode.
    async fn list(
        client: &AccelaClient,
        query: &Self::Query,
        limit: u32,
        offset: u32,
    ) -> Result<PagedResult<Self>> {
        ResourceEndpoint::<Self>::new(client, Self::list_path(query))
            .list(query, limit, offset)
            .await
    }

    /// List all entities matching the query (fetches all pages).
    ///
    /// # Errors
    ///
    /// Returns an error if any page request fails.
    async fn list_all(client: &AccelaClient, query: &Self::Query) -> Result<Vec<Self>> {
        Self::list(client, query, DEFAULT_PAGE_SIZE, 0)
            .await?
            .collect_all()
            .await
    }
}
