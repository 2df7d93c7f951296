//! Addresses attached to a record.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::{FieldCodec, FieldSpec};
use crate::models::serde_helpers::{comma_list, string_or_number, yes_no};
use crate::models::JsonObject;
use crate::traits::{List, RawPayload, ResourceModel};

const ADDRESS_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain("id", "id"),
    FieldSpec::plain("addressLine1", "address_line1"),
    FieldSpec::plain("addressLine2", "address_line2"),
    FieldSpec::nested("addressTypeFlag", "address_type_flag"),
    FieldSpec::plain("city", "city"),
    FieldSpec::plain("country", "country"),
    FieldSpec::plain("county", "county"),
    FieldSpec::plain("crossStreetNameEnd", "cross_street_name_end"),
    FieldSpec::plain("crossStreetNameStart", "cross_street_name_start"),
    FieldSpec::plain("description", "description"),
    FieldSpec::nested("direction", "direction"),
    FieldSpec::plain("distance", "distance"),
    FieldSpec::plain("houseAlphaEnd", "house_alpha_end"),
    FieldSpec::plain("houseAlphaStart", "house_alpha_start"),
    FieldSpec::nested("houseFractionEnd", "house_fraction_end"),
    FieldSpec::nested("houseFractionStart", "house_fraction_start"),
    FieldSpec::plain("inspectionDistrict", "inspection_district"),
    FieldSpec::plain("inspectionDistrictPrefix", "inspection_district_prefix"),
    FieldSpec::flag("isPrimary", "is_primary"),
    FieldSpec::plain("levelEnd", "level_end"),
    FieldSpec::plain("levelPrefix", "level_prefix"),
    FieldSpec::plain("levelStart", "level_start"),
    FieldSpec::plain("locationType", "location_type"),
    FieldSpec::plain("neighborhood", "neighborhood"),
    FieldSpec::plain("neighborhoodPrefix", "neighborhood_prefix"),
    FieldSpec::plain("postalCode", "postal_code"),
    FieldSpec::id_of("recordId", "record_id"),
    FieldSpec::plain("refAddressId", "ref_address_id"),
    FieldSpec::plain("secondaryStreet", "secondary_street"),
    FieldSpec::plain("secondaryStreetNumber", "secondary_street_number"),
    FieldSpec::plain("serviceProviderCode", "service_provider_code"),
    FieldSpec::nested("state", "state"),
    FieldSpec::nested("status", "status"),
    FieldSpec::plain("streetAddress", "street_address"),
    FieldSpec::plain("streetEnd", "street_end"),
    FieldSpec::plain("streetEndFrom", "street_end_from"),
    FieldSpec::plain("streetEndTo", "street_end_to"),
    FieldSpec::plain("streetName", "street_name"),
    FieldSpec::plain("streetNameEnd", "street_name_end"),
    FieldSpec::plain("streetNameStart", "street_name_start"),
    FieldSpec::plain("streetPrefix", "street_prefix"),
    FieldSpec::plain("streetStart", "street_start"),
    FieldSpec::plain("streetStartFrom", "street_start_from"),
    FieldSpec::plain("streetStartTo", "street_start_to"),
    FieldSpec::nested("streetSuffix", "street_suffix"),
    FieldSpec::nested("streetSuffixDirection", "street_suffix_direction"),
    FieldSpec::nested("type", "type"),
    FieldSpec::plain("unitEnd", "unit_end"),
    FieldSpec::plain("unitStart", "unit_start"),
    FieldSpec::nested("unitType", "unit_type"),
    FieldSpec::plain("xCoordinate", "x_coordinate"),
    FieldSpec::plain("yCoordinate", "y_coordinate"),
];

static ADDRESS_CODEC: FieldCodec = FieldCodec::new(ADDRESS_FIELDS, &[]);

/// An address attached to a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecordAddress {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub address_type_flag: Option<JsonObject>,
    pub city: Option<String>,
    /// A plain code on some agencies, a text/value object on others.
    pub country: Option<Value>,
    pub county: Option<String>,
    pub cross_street_name_end: Option<String>,
    pub cross_street_name_start: Option<String>,
    pub description: Option<String>,
    pub direction: Option<JsonObject>,
    pub distance: Option<f64>,
    pub house_alpha_end: Option<String>,
    pub house_alpha_start: Option<String>,
    pub house_fraction_end: Option<JsonObject>,
    pub house_fraction_start: Option<JsonObject>,
    pub inspection_district: Option<String>,
    pub inspection_district_prefix: Option<String>,
    /// `isPrimary` of `"Y"`; anything else, or no value, is `false`.
    #[serde(default)]
    pub is_primary: bool,
    pub level_end: Option<String>,
    pub level_prefix: Option<String>,
    pub level_start: Option<String>,
    pub location_type: Option<String>,
    pub neighborhood: Option<String>,
    pub neighborhood_prefix: Option<String>,
    pub postal_code: Option<String>,
    /// ID of the owning record.
    #[serde(default, deserialize_with = "string_or_number")]
    pub record_id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub ref_address_id: Option<String>,
    pub secondary_street: Option<String>,
    pub secondary_street_number: Option<i64>,
    pub service_provider_code: Option<String>,
    pub state: Option<JsonObject>,
    pub status: Option<JsonObject>,
    pub street_address: Option<String>,
    pub street_end: Option<i64>,
    pub street_end_from: Option<i64>,
    pub street_end_to: Option<i64>,
    pub street_name: Option<String>,
    pub street_name_end: Option<String>,
    pub street_name_start: Option<String>,
    pub street_prefix: Option<String>,
    pub street_start: Option<i64>,
    pub street_start_from: Option<i64>,
    pub street_start_to: Option<i64>,
    pub street_suffix: Option<JsonObject>,
    pub street_suffix_direction: Option<JsonObject>,
    #[serde(rename = "type")]
    pub address_type: Option<JsonObject>,
    pub unit_end: Option<String>,
    pub unit_start: Option<String>,
    pub unit_type: Option<JsonObject>,
    pub x_coordinate: Option<f64>,
    pub y_coordinate: Option<f64>,

    #[serde(skip)]
    pub raw: RawPayload,
}

impl RecordAddress {
    /// Single-line rendering built from the street parts and city.
    ///
    /// Falls back to `street_address` when the API sends nothing finer.
    pub fn display_line(&self) -> String {
        let text = |o: &Option<JsonObject>| {
            o.as_ref()
                .and_then(|o| o.get("text").or_else(|| o.get("value")))
                .and_then(Value::as_str)
                .map(str::to_string)
        };

        let mut street: Vec<String> = Vec::new();
        if let Some(n) = self.street_start {
            street.push(n.to_string());
        }
        street.extend(self.street_prefix.clone());
        street.extend(self.street_name.clone());
        street.extend(text(&self.street_suffix));

        let mut parts: Vec<String> = Vec::new();
        if street.is_empty() {
            parts.extend(self.street_address.clone());
        } else {
            parts.push(street.join(" "));
        }
        parts.extend(self.city.clone());
        parts.extend(text(&self.state));
        parts.extend(self.postal_code.clone());
        parts.join(", ")
    }
}

/// Query parameters for listing a record's addresses.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordAddressListQuery {
    /// Record whose addresses to list (path parameter).
    #[serde(skip)]
    pub record_id: String,

    /// Only primary (`Y`) or only secondary (`N`) addresses.
    #[serde(
        rename = "isPrimary",
        serialize_with = "yes_no",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_primary: Option<bool>,

    /// Restrict the response to these API field names.
    #[serde(serialize_with = "comma_list", skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl RecordAddressListQuery {
    pub fn for_record(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            ..Default::default()
        }
    }
}

impl ResourceModel for RecordAddress {
    const NAME: &'static str = "record address";
    const CODEC: &'static FieldCodec = &ADDRESS_CODEC;

    fn raw(&self) -> &RawPayload {
        &self.raw
    }

    fn attach_raw(&mut self, raw: RawPayload) {
        self.raw = raw;
    }
}

impl List for RecordAddress {
    type Query = RecordAddressListQuery;

    fn list_path(query: &Self::Query) -> String {
        format!("records/{}/addresses", urlencoding::encode(&query.record_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::query_pairs;
    use crate::models::assert_codec_well_formed;
    use serde_json::json;

    #[test]
    fn test_address_table_well_formed() {
        assert_codec_well_formed(RecordAddress::CODEC);
    }

    #[test]
    fn test_address_decode() {
        let address = RecordAddress::from_json(json!({
            "id": 1234567,
            "isPrimary": "Y",
            "streetStart": 600,
            "streetName": "East Fourth",
            "streetSuffix": {"value": "ST", "text": "Street"},
            "city": "Charlotte",
            "state": {"value": "NC", "text": "NC"},
            "postalCode": "28202",
            "country": "US",
            "recordId": {"id": "CHARLOTTE-23CAP-00000-00A1B", "serviceProviderCode": "CHARLOTTE"},
            "type": {"value": "Mailing", "text": "Mailing"}
        }))
        .unwrap();

        assert_eq!(address.id.as_deref(), Some("1234567"));
        assert!(address.is_primary);
        assert_eq!(address.record_id.as_deref(), Some("CHARLOTTE-23CAP-00000-00A1B"));
        assert_eq!(address.country, Some(json!("US")));
        assert_eq!(address.address_type.as_ref().unwrap()["text"], "Mailing");
        assert_eq!(
            address.display_line(),
            "600 East Fourth Street, Charlotte, NC, 28202"
        );
    }

    #[test]
    fn test_address_primary_flag_defaults_false() {
        let address = RecordAddress::from_json(json!({"id": "1"})).unwrap();
        assert!(!address.is_primary);

        let address = RecordAddress::from_json(json!({"id": "1", "isPrimary": "N"})).unwrap();
        assert!(!address.is_primary);
    }

    #[test]
    fn test_address_scalar_record_id() {
        let address = RecordAddress::from_json(json!({"recordId": "REC-1"})).unwrap();
        assert_eq!(address.record_id.as_deref(), Some("REC-1"));
    }

    #[test]
    fn test_address_display_line_falls_back_to_street_address() {
        let address = RecordAddress {
            street_address: Some("600 E 4th St".to_string()),
            city: Some("Charlotte".to_string()),
            ..Default::default()
        };
        assert_eq!(address.display_line(), "600 E 4th St, Charlotte");
    }

    #[test]
    fn test_address_list_query() {
        let query = RecordAddressListQuery {
            is_primary: Some(true),
            fields: Some(vec!["streetName".to_string(), "city".to_string()]),
            ..RecordAddressListQuery::for_record("REC 1")
        };

        assert_eq!(RecordAddress::list_path(&query), "records/REC%201/addresses");
        let mut pairs = query_pairs(&query).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("fields".to_string(), "streetName,city".to_string()),
                ("isPrimary".to_string(), "Y".to_string()),
            ]
        );
    }

    #[test]
    fn test_address_list_query_empty_fields_unset() {
        let query = RecordAddressListQuery {
            fields: Some(Vec::new()),
            ..RecordAddressListQuery::for_record("REC-1")
        };
        assert!(query_pairs(&query).unwrap().is_empty());
    }
}
