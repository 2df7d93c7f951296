//! Parcels attached to a record.

use serde::{Deserialize, Serialize};

use crate::fields::{FieldCodec, FieldSpec};
use crate::models::serde_helpers::{comma_list, string_or_number};
use crate::models::JsonObject;
use crate::traits::{List, RawPayload, ResourceModel};

const PARCEL_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain("id", "id"),
    FieldSpec::plain("block", "block"),
    FieldSpec::plain("book", "book"),
    FieldSpec::plain("censusTract", "census_tract"),
    FieldSpec::plain("councilDistrict", "council_district"),
    FieldSpec::plain("exemptionValue", "exemption_value"),
    FieldSpec::plain("gisSequenceNumber", "gis_sequence_number"),
    FieldSpec::plain("improvedValue", "improved_value"),
    FieldSpec::plain("isPrimary", "is_primary"),
    FieldSpec::plain("landValue", "land_value"),
    FieldSpec::plain("legalDescription", "legal_description"),
    FieldSpec::plain("lot", "lot"),
    FieldSpec::plain("mapNumber", "map_number"),
    FieldSpec::plain("mapReferenceInfo", "map_reference_info"),
    FieldSpec::nested_list("owners", "owners"),
    FieldSpec::plain("page", "page"),
    FieldSpec::plain("parcel", "parcel"),
    FieldSpec::plain("parcelArea", "parcel_area"),
    FieldSpec::plain("parcelNumber", "parcel_number"),
    FieldSpec::plain("planArea", "plan_area"),
    FieldSpec::plain("range", "range"),
    FieldSpec::nested("recordId", "record_id"),
    FieldSpec::plain("section", "section"),
    FieldSpec::nested("status", "status"),
    FieldSpec::nested("subdivision", "subdivision"),
    FieldSpec::plain("supervisorDistrict", "supervisor_district"),
    FieldSpec::plain("township", "township"),
    FieldSpec::plain("tract", "tract"),
];

static PARCEL_CODEC: FieldCodec = FieldCodec::new(PARCEL_FIELDS, &[]);

/// A parcel attached to a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordParcel {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub block: Option<String>,
    pub book: Option<String>,
    pub census_tract: Option<String>,
    pub council_district: Option<String>,
    pub exemption_value: Option<f64>,
    pub gis_sequence_number: Option<i64>,
    pub improved_value: Option<f64>,
    /// Passed through as sent (usually `"Y"` or `"N"`).
    pub is_primary: Option<String>,
    pub land_value: Option<f64>,
    pub legal_description: Option<String>,
    pub lot: Option<String>,
    pub map_number: Option<String>,
    pub map_reference_info: Option<String>,
    pub owners: Option<Vec<JsonObject>>,
    pub page: Option<String>,
    pub parcel: Option<String>,
    pub parcel_area: Option<f64>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub parcel_number: Option<String>,
    pub plan_area: Option<String>,
    pub range: Option<String>,
    /// The owning record, as an object with `id` and `custom_id`.
    pub record_id: Option<JsonObject>,
    pub section: Option<i64>,
    pub status: Option<JsonObject>,
    pub subdivision: Option<JsonObject>,
    pub supervisor_district: Option<String>,
    pub township: Option<String>,
    pub tract: Option<String>,

    #[serde(skip)]
    pub raw: RawPayload,
}

/// Query parameters for listing a record's parcels.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordParcelListQuery {
    /// Record whose parcels to list (path parameter).
    #[serde(skip)]
    pub record_id: String,

    /// Restrict the response to these API field names.
    #[serde(serialize_with = "comma_list", skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl RecordParcelListQuery {
    pub fn for_record(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            fields: None,
        }
    }
}

impl ResourceModel for RecordParcel {
    const NAME: &'static str = "record parcel";
    const CODEC: &'static FieldCodec = &PARCEL_CODEC;

    fn raw(&self) -> &RawPayload {
        &self.raw
    }

    fn attach_raw(&mut self, raw: RawPayload) {
        self.raw = raw;
    }
}

impl List for RecordParcel {
    type Query = RecordParcelListQuery;

    fn list_path(query: &Self::Query) -> String {
        format!("records/{}/parcels", urlencoding::encode(&query.record_id))
    }
}
