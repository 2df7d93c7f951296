//! Module model.

use serde::{Deserialize, Serialize};

use crate::client::AccelaClient;
use crate::endpoint::ResourceEndpoint;
use crate::error::Result;
use crate::fields::{FieldCodec, FieldSpec};
use crate::traits::{RawPayload, ResourceModel};

const MODULE_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain("value", "value"),
    FieldSpec::plain("text", "text"),
];

static MODULE_CODEC: FieldCodec = FieldCodec::new(MODULE_FIELDS, &["value", "text"]);

/// A functional area of the agency (e.g. Building, Enforcement, Licenses).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Module {
    pub value: String,
    pub text: String,

    #[serde(skip)]
    pub raw: RawPayload,
}

impl Module {
    /// List every module configured for the agency.
    ///
    /// The API returns all modules in one unpaged response.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or a module lacks `value` or
    /// `text`.
    pub async fn list(client: &AccelaClient) -> Result<Vec<Module>> {
        ResourceEndpoint::<Module>::new(client, "settings/modules")
            .list_unpaged(&())
            .await
    }
}

impl ResourceModel for Module {
    const NAME: &'static str = "module";
    const CODEC: &'static FieldCodec = &MODULE_CODEC;

    fn raw(&self) -> &RawPayload {
        &self.raw
    }

    fn attach_raw(&mut self, raw: RawPayload) {
        self.raw = raw;
    }
}
