//! Accela API client library.
//!
//! A Rust library for reading the Accela Construct REST API (records,
//! addresses, parcels, documents, modules, record types and agencies)
//! using a trait-based architecture where each operation (Get, List,
//! Download) is defined as a trait that model types implement.
//!
//! # Quick Start
//!
//! ```no_run
//! use accela::{AccelaClient, Get, List, Record, RecordListQuery};
//!
//! #[tokio::main]
//! async fn main() -> accela::Result<()> {
//!     // Create client from environment variables
//!     let client = AccelaClient::from_env()?;
//!
//!     // Get a record by ID
//!     let record = Record::get(&client, "CHARLOTTE-23CAP-00000-00A1B".to_string()).await?;
//!     println!("Record: {:?}", record.custom_id);
//!
//!     // Walk the Building records page by page
//!     let query = RecordListQuery {
//!         module: Some("Building".to_string()),
//!         ..Default::default()
//!     };
//!     let mut page = Record::list(&client, &query, 50, 0).await?;
//!     loop {
//!         for record in &page {
//!             println!("{:?}", record.id);
//!         }
//!         if !page.next_page().await? {
//!             break;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Every model owns a static field table ([`FieldCodec`]) that maps the
//! API's camelCase names to snake_case fields and coerces flags, booleans
//! and date/times. Operations are traits:
//!
//! - [`Get`] - Fetch a single entity by ID
//! - [`List`] - Fetch offset-paginated collections as a [`PagedResult`]
//! - [`Download`] - Stream binary content
//!
//! # Configuration
//!
//! The client reads configuration from environment variables:
//!
//! - `ACCELA_ACCESS_TOKEN` (required) - OAuth access token
//! - `ACCELA_AGENCY` (required) - Agency name
//! - `ACCELA_ENVIRONMENT` (required) - Environment name (e.g. `PROD`)
//! - `ACCELA_API_URL` (optional) - Base URL (defaults to `https://apis.accela.com/v4`)

pub mod cli;
mod client;
mod endpoint;
mod error;
pub mod fields;
mod models;
mod output;
mod pagination;
mod traits;

// Re-export core types
pub use client::{AccelaClient, ClientConfig, AGENCY_HEADER, ENVIRONMENT_HEADER};
pub use endpoint::{ContentStream, ResourceEndpoint};
pub use error::{AccelaError, Result};
pub use fields::{FieldCodec, FieldSpec};
pub use output::PrettyPrint;
pub use pagination::{compute_has_more, PagedResult, DEFAULT_PAGE_SIZE};

// Re-export traits
pub use traits::{Download, Get, List, RawPayload, ResourceModel};

// Re-export models
pub use models::{
    // Records and their sub-resources
    Record,
    RecordListQuery,
    RecordAddress,
    RecordAddressListQuery,
    RecordParcel,
    RecordParcelListQuery,
    Document,
    RecordDocumentListQuery,
    // Settings
    Module,
    RecordType,
    RecordTypeListQuery,
    // Agencies
    Agency,
    AgencyListQuery,
    AgencyEnvironment,
    AgencyEnvironmentListQuery,
    JsonObject,
};
