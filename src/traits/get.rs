//! Get trait for fetching single entities.

use std::fmt::Display;

use async_trait::async_trait;

use crate::client::AccelaClient;
use crate::endpoint::ResourceEndpoint;
use crate::error::Result;
use crate::traits::ResourceModel;

/// Fetch a single entity by ID.
///
/// Implement this trait for entity types exposed at `{COLLECTION}/{id}`.
/// The API wraps the item in a one-element `result` array.
///
/// # Example
///
/// ```ignore
/// use accela::{AccelaClient, Get, Record};
///
/// let client = AccelaClient::from_env()?;
/// let record = Record::get(&client, "CHARLOTTE-23CAP-00000-00001".to_string()).await?;
/// ```
#[async_trait]
pub trait Get: ResourceModel {
    /// The ID type for this entity.
    type Id: Display + Send + Sync;

    /// Collection path the entity lives under (e.g. `records`).
    const COLLECTION: &'static str;

    /// Fetch the entity by ID.
    ///
    /// # Errors
    ///
    /// Returns [`crate::AccelaError::NotFound`] on 404, and API, transport,
    /// or decode errors otherwise.
    async fn get(client: &AccelaClient, id: Self::Id) -> Result<Self> {
        ResourceEndpoint::<Self>::new(client, Self::COLLECTION)
            .get(&id.to_string())
            .await
    }
}
