//! Generic GET / list / download operations over one resource collection.

use std::marker::PhantomData;
use std::path::Path;

use bytes::Bytes;
use reqwest::Response;
use serde::Serialize;
use serde_json::Value;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::client::AccelaClient;
use crate::error::{AccelaError, Result};
use crate::pagination::{ListEnvelope, ListRequest, PagedResult};
use crate::traits::ResourceModel;

const NO_QUERY: &[(&str, &str)] = &[];

/// Operations on the collection at `path`, decoding items as `T`.
///
/// Items live at `{path}/{id}` and their binary content, where the resource
/// has any, at `{path}/{id}/download`.
pub struct ResourceEndpoint<T> {
    client: AccelaClient,
    path: String,
    _model: PhantomData<fn() -> T>,
}

impl<T> std::fmt::Debug for ResourceEndpoint<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceEndpoint")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

impl<T: ResourceModel> ResourceEndpoint<T> {
    pub fn new(client: &AccelaClient, path: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            path: path.into(),
            _model: PhantomData,
        }
    }

    /// Collection path relative to the API base URL.
    pub fn path(&self) -> &str {
        &self.path
    }

    fn item_path(&self, id: &str) -> String {
        format!("{}/{}", self.path, urlencoding::encode(id))
    }

    /// Fetch one item.
    ///
    /// # Errors
    ///
    /// [`AccelaError::NotFound`] on 404 or an empty `result` array,
    /// [`AccelaError::Decode`] when the body has no `result` array or the item
    /// does not decode.
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    pub async fn get(&self, id: &str) -> Result<T> {
        let path = self.item_path(id);
        let body = self.client.get_json(&path, NO_QUERY).await?;
        T::from_json(single_item(body, &path)?)
    }

    /// Fetch the page at `offset`, with `filters` merged into the query.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or any item fails to decode.
    #[tracing::instrument(skip(self, filters), fields(path = %self.path))]
    pub async fn list<Q: Serialize + ?Sized>(
        &self,
        filters: &Q,
        limit: u32,
        offset: u32,
    ) -> Result<PagedResult<T>> {
        let request = ListRequest::new(self.path.clone(), query_pairs(filters)?);
        PagedResult::fetch(self.client.clone(), request, limit, offset).await
    }

    /// Fetch a collection the API serves in one response, without paging.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or any item fails to decode.
    #[tracing::instrument(skip(self, filters), fields(path = %self.path))]
    pub async fn list_unpaged<Q: Serialize + ?Sized>(&self, filters: &Q) -> Result<Vec<T>> {
        let body = self.client.get_json(&self.path, &query_pairs(filters)?).await?;
        ListEnvelope::from_body(body)?.decode_items()
    }

    /// Open the binary content of an item.
    ///
    /// # Errors
    ///
    /// Fails like [`ResourceEndpoint::get`] on transport and status errors.
    #[tracing::instrument(skip(self), fields(path = %self.path))]
    pub async fn download(&self, id: &str) -> Result<ContentStream> {
        let path = format!("{}/download", self.item_path(id));
        let response = self.client.get_raw(&path).await?;
        Ok(ContentStream::new(response))
    }
}

/// Take element 0 of the `result` array of a single-item response.
fn single_item(body: Value, path: &str) -> Result<Value> {
    let result = match body {
        Value::Object(mut object) => object.remove("result"),
        _ => None,
    };

    match result {
        Some(Value::Array(items)) => items.into_iter().next().ok_or_else(|| AccelaError::NotFound {
            path: path.to_string(),
        }),
        _ => Err(AccelaError::decode("result", "expected a result array")),
    }
}

/// Flatten serialized filters into query pairs, dropping unset values.
pub(crate) fn query_pairs<Q: Serialize + ?Sized>(filters: &Q) -> Result<Vec<(String, String)>> {
    match serde_json::to_value(filters)? {
        Value::Null => Ok(Vec::new()),
        Value::Object(map) => Ok(map
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(s) => Some((key, s)),
                other => Some((key, other.to_string())),
            })
            .collect()),
        other => Err(AccelaError::ConfigInvalid(format!(
            "list filters must serialize to an object, got {other}"
        ))),
    }
}

/// Binary response body, read on demand.
#[derive(Debug)]
pub struct ContentStream {
    content_type: Option<String>,
    response: Response,
}

impl ContentStream {
    fn new(response: Response) -> Self {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Self {
            content_type,
            response,
        }
    }

    /// `Content-Type` sent by the server.
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// `Content-Length` sent by the server, if any.
    pub fn content_length(&self) -> Option<u64> {
        self.response.content_length()
    }

    /// Next chunk of the body, or `None` once it is exhausted.
    pub async fn chunk(&mut self) -> Result<Option<Bytes>> {
        Ok(self.response.chunk().await?)
    }

    /// Read the whole body into memory.
    pub async fn bytes(self) -> Result<Bytes> {
        Ok(self.response.bytes().await?)
    }

    /// Stream the body into `writer`, returning the number of bytes written.
    pub async fn write_to<W: AsyncWrite + Unpin>(mut self, writer: &mut W) -> Result<u64> {
        let mut written = 0u64;
        while let Some(chunk) = self.chunk().await? {
            writer.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        writer.flush().await?;
        Ok(written)
    }

    /// Stream the body into a new file at `path`.
    ///
    /// A file left incomplete by a failed read or write is removed.
    pub async fn save_to(self, path: &Path) -> Result<u64> {
        let mut file = tokio::fs::File::create(path).await?;
        match self.write_to(&mut file).await {
            Ok(written) => Ok(written),
            Err(err) => {
                drop(file);
                if let Err(remove_err) = tokio::fs::remove_file(path).await {
                    tracing::warn!(path = %path.display(), error = %remove_err, "could not remove partial download");
                }
                Err(err)
            }
        }
    }
}
