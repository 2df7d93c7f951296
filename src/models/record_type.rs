//! Record type model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::{FieldCodec, FieldSpec};
use crate::traits::{List, RawPayload, ResourceModel};

const RECORD_TYPE_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain("alias", "alias"),
    FieldSpec::plain("asChildOnly", "as_child_only"),
    FieldSpec::plain("category", "category"),
    FieldSpec::boolean("createable", "createable"),
    FieldSpec::boolean("deletable", "deletable"),
    FieldSpec::plain("group", "group"),
    FieldSpec::plain("id", "id"),
    FieldSpec::plain("module", "module"),
    FieldSpec::boolean("readable", "readable"),
    FieldSpec::boolean("searchable", "searchable"),
    FieldSpec::plain("smartChoiceCode", "smart_choice_code"),
    FieldSpec::plain("subType", "sub_type"),
    FieldSpec::plain("text", "text"),
    FieldSpec::plain("type", "type"),
    FieldSpec::boolean("updatable", "updatable"),
    FieldSpec::plain("value", "value"),
];

static RECORD_TYPE_CODEC: FieldCodec = FieldCodec::new(
    RECORD_TYPE_FIELDS,
    &[
        "alias",
        "asChildOnly",
        "category",
        "createable",
        "deletable",
        "group",
        "id",
        "module",
        "readable",
        "searchable",
        "smartChoiceCode",
        "subType",
        "text",
        "type",
        "updatable",
        "value",
    ],
);

/// A record type within a module: the four-level
/// `group/type/subType/category` classification records are filed under.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordType {
    pub alias: String,
    /// Sent as a boolean or a `Y`/`N` string depending on the agency.
    pub as_child_only: Value,
    pub category: String,
    pub createable: bool,
    pub deletable: bool,
    pub group: String,
    pub id: String,
    pub module: String,
    pub readable: bool,
    pub searchable: bool,
    pub smart_choice_code: String,
    pub sub_type: String,
    pub text: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub updatable: bool,
    /// Full path, e.g. "Building/Residential/New/NA".
    pub value: String,

    #[serde(skip)]
    pub raw: RawPayload,
}

/// Query parameters for listing record types.
#[derive(Debug, Clone, Serialize)]
pub struct RecordTypeListQuery {
    /// Module whose record types to list. The API requires it.
    pub module: String,
}

impl RecordTypeListQuery {
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }
}

impl ResourceModel for RecordType {
    const NAME: &'static str = "record type";
    const CODEC: &'static FieldCodec = &RECORD_TYPE_CODEC;

    fn raw(&self) -> &RawPayload {
        &self.raw
    }

    fn attach_raw(&mut self, raw: RawPayload) {
        self.raw = raw;
    }
}

impl List for RecordType {
    type Query = RecordTypeListQuery;

    fn list_path(_query: &Self::Query) -> String {
        "settings/records/types".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::endpoint::query_pairs;
    use crate::error::AccelaError;
    use crate::models::assert_codec_well_formed;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "value": "Building/Residential/New/NA",
            "type": "Residential",
            "text": "Residential New",
            "group": "Building",
            "subType": "New",
            "category": "NA",
            "module": "Building",
            "alias": "Residential New",
            "id": "Building-Residential-New-NA",
            "readable": true,
            "createable": true,
            "updatable": false,
            "deletable": false,
            "asChildOnly": "N",
            "searchable": true,
            "smartChoiceCode": ""
        })
    }

    #[test]
    fn test_record_type_table_well_formed() {
        assert_codec_well_formed(RecordType::CODEC);
        assert_eq!(RecordType::CODEC.required().len(), RecordType::CODEC.fields().len());
    }

    #[test]
    fn test_record_type_decode() {
        let record_type = RecordType::from_json(sample()).unwrap();
        assert_eq!(record_type.value, "Building/Residential/New/NA");
        assert_eq!(record_type.type_name, "Residential");
        assert_eq!(record_type.sub_type, "New");
        assert!(record_type.readable);
        assert!(!record_type.updatable);
        assert_eq!(record_type.as_child_only, json!("N"));
        assert_eq!(record_type.smart_choice_code, "");
    }

    #[test]
    fn test_record_type_requires_every_field() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("smartChoiceCode");

        let err = RecordType::from_json(value).unwrap_err();
        assert!(matches!(err, AccelaError::Decode { ref field, .. } if field == "smartChoiceCode"));
    }

    #[test]
    fn test_record_type_list_query() {
        let query = RecordTypeListQuery::new("Building");
        assert_eq!(RecordType::list_path(&query), "settings/records/types");
        assert_eq!(
            query_pairs(&query).unwrap(),
            vec![("module".to_string(), "Building".to_string())]
        );
    }
}
