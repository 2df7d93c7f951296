//! Agency model.

use serde::{Deserialize, Serialize};

use crate::fields::{FieldCodec, FieldSpec};
use crate::traits::{List, RawPayload, ResourceModel};

const AGENCY_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain("country", "country"),
    FieldSpec::plain("displayName", "display_name"),
    FieldSpec::boolean("enabled", "enabled"),
    FieldSpec::boolean("hostedACA", "hosted_aca"),
    FieldSpec::plain("iconName", "icon_name"),
    FieldSpec::boolean("isForDemo", "is_for_demo"),
    FieldSpec::plain("name", "name"),
    FieldSpec::plain("serviceProviderCode", "service_provider_code"),
    FieldSpec::plain("state", "state"),
];

static AGENCY_CODEC: FieldCodec = FieldCodec::new(AGENCY_FIELDS, &["name"]);

/// An agency (tenant) hosted on the Accela platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agency {
    /// Agency name, as sent in the agency routing header.
    pub name: String,
    pub country: Option<String>,
    pub display_name: Option<String>,
    pub enabled: Option<bool>,
    /// Whether Accela hosts the agency's Citizen Access site.
    pub hosted_aca: Option<bool>,
    pub icon_name: Option<String>,
    pub is_for_demo: Option<bool>,
    pub service_provider_code: Option<String>,
    pub state: Option<String>,

    #[serde(skip)]
    pub raw: RawPayload,
}

/// Query parameters for listing agencies.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgencyListQuery {
    /// Filter by agency name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ResourceModel for Agency {
    const NAME: &'static str = "agency";
    const CODEC: &'static FieldCodec = &AGENCY_CODEC;

    fn raw(&self) -> &RawPayload {
        &self.raw
    }

    fn attach_raw(&mut self, raw: RawPayload) {
        self.raw = raw;
    }
}

impl List for Agency {
    type Query = AgencyListQuery;

    fn list_path(_query: &Self::Query) -> String {
        "agencies".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::query_pairs;
    use crate::models::assert_codec_well_formed;
    use serde_json::json;

    #[test]
    fn test_agency_table_well_formed() {
        assert_codec_well_formed(Agency::CODEC);
    }

    #[test]
    fn test_agency_decode() {
        let agency = Agency::from_json(json!({
            "name": "CHARLOTTE",
            "displayName": "City of Charlotte",
            "enabled": true,
            "hostedACA": false,
            "isForDemo": false,
            "state": "NC",
            "country": "US"
        }))
        .unwrap();

        assert_eq!(agency.name, "CHARLOTTE");
        assert_eq!(agency.display_name.as_deref(), Some("City of Charlotte"));
        assert_eq!(agency.enabled, Some(true));
        assert_eq!(agency.hosted_aca, Some(false));
        assert!(agency.icon_name.is_none());
    }

    #[test]
    fn test_agency_requires_name() {
        assert!(Agency::from_json(json!({"displayName": "x"})).is_err());
    }

    #[test]
    fn test_agency_list_query() {
        assert!(query_pairs(&AgencyListQuery::default()).unwrap().is_empty());

        let query = AgencyListQuery {
            name: Some("CHARLOTTE".to_string()),
        };
        assert_eq!(
            query_pairs(&query).unwrap(),
            vec![("name".to_string(), "CHARLOTTE".to_string())]
        );
    }
}
