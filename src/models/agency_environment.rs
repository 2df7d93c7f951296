//! Agency environment model.

use serde::{Deserialize, Serialize};

use crate::fields::{FieldCodec, FieldSpec};
use crate::models::serde_helpers::string_or_number;
use crate::models::JsonObject;
use crate::traits::{List, RawPayload, ResourceModel};

const ENVIRONMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain("bizServerURL", "biz_server_url"),
    FieldSpec::plain("bizServerVersion", "biz_server_version"),
    FieldSpec::boolean("enabled", "enabled"),
    FieldSpec::plain("gatewayVersion", "gateway_version"),
    FieldSpec::nested_list("hostEnvironmentDetailModels", "host_environment_detail_models"),
    FieldSpec::plain("hostId", "host_id"),
    FieldSpec::plain("id", "id"),
    FieldSpec::boolean("isAABizServer", "is_aa_biz_server"),
    FieldSpec::boolean("isAzureHosted", "is_azure_hosted"),
    FieldSpec::boolean("isDefault", "is_default"),
    FieldSpec::plain("name", "name"),
    FieldSpec::plain("product", "product"),
    FieldSpec::nested_list("tenants", "tenants"),
    FieldSpec::plain("version", "version"),
];

static ENVIRONMENT_CODEC: FieldCodec = FieldCodec::new(ENVIRONMENT_FIELDS, &["name"]);

/// A deployment environment of an agency (e.g. PROD, TEST).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgencyEnvironment {
    /// Environment name, as sent in the environment routing header.
    pub name: String,
    pub biz_server_url: Option<String>,
    pub biz_server_version: Option<String>,
    pub enabled: Option<bool>,
    pub gateway_version: Option<String>,
    pub host_environment_detail_models: Option<Vec<JsonObject>>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub host_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub is_aa_biz_server: Option<bool>,
    pub is_azure_hosted: Option<bool>,
    pub is_default: Option<bool>,
    pub product: Option<String>,
    pub tenants: Option<Vec<JsonObject>>,
    pub version: Option<String>,

    #[serde(skip)]
    pub raw: RawPayload,
}

/// Query for listing an agency's environments.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgencyEnvironmentListQuery {
    /// Agency whose environments to list (path parameter).
    #[serde(skip)]
    pub agency: String,
}

impl AgencyEnvironmentListQuery {
    pub fn for_agency(agency: impl Into<String>) -> Self {
        Self {
            agency: agency.into(),
        }
    }
}

impl ResourceModel for AgencyEnvironment {
    const NAME: &'static str = "agency environment";
    const CODEC: &'static FieldCodec = &ENVIRONMENT_CODEC;

    fn raw(&self) -> &RawPayload {
        &self.raw
    }

    fn attach_raw(&mut self, raw: RawPayload) {
        self.raw = raw;
    }
}

impl List for AgencyEnvironment {
    type Query = AgencyEnvironmentListQuery;

    fn list_path(query: &Self::Query) -> String {
        format!("agencies/{}/environments", urlencoding::encode(&query.agency))
    }
}
