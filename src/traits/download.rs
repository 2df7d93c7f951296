//! Download trait for binary content.

use async_trait::async_trait;

use crate::client::AccelaClient;
use crate::endpoint::{ContentStream, ResourceEndpoint};
use crate::error::Result;
use crate::traits::Get;

/// Fetch the binary content behind an entity at `{COLLECTION}/{id}/download`.
#[async_trait]
pub trait Download: Get {
    /// Open the content stream. The body is not JSON-decoded.
    ///
    /// # Errors
    ///
    /// Fails like [`Get::get`] on transport and status errors.
    async fn download(client: &AccelaClient, id: Self::Id) -> Result<ContentStream> {
        ResourceEndpoint::<Self>::new(client, Self::COLLECTION)
            .download(&id.to_string())
            .await
    }
}
