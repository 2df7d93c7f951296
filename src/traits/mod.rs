//! Trait definitions for Accela operations.
//!
//! Each entity type implements the traits it supports; the generic work
//! lives in [`crate::endpoint::ResourceEndpoint`].

mod download;
mod get;
mod list;
mod model;

pub use download::Download;
pub use get::Get;
pub use list::List;
pub use model::{RawPayload, ResourceModel};
