//! Document model and trait implementations.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::fields::{FieldCodec, FieldSpec};
use crate::models::JsonObject;
use crate::traits::{Download, Get, List, RawPayload, ResourceModel};

const DOCUMENT_FIELDS: &[FieldSpec] = &[
    FieldSpec::nested("category", "category"),
    FieldSpec::nested("deletable", "deletable"),
    FieldSpec::plain("department", "department"),
    FieldSpec::plain("description", "description"),
    FieldSpec::nested("downloadable", "downloadable"),
    FieldSpec::plain("entityId", "entity_id"),
    FieldSpec::plain("entityType", "entity_type"),
    FieldSpec::plain("fileName", "file_name"),
    FieldSpec::nested("group", "group"),
    FieldSpec::plain("id", "id"),
    FieldSpec::plain("modifiedBy", "modified_by"),
    FieldSpec::date_time("modifiedDate", "modified_date"),
    FieldSpec::plain("serviceProviderCode", "service_provider_code"),
    FieldSpec::plain("size", "size"),
    FieldSpec::plain("source", "source"),
    FieldSpec::nested("status", "status"),
    FieldSpec::date_time("statusDate", "status_date"),
    FieldSpec::nested("titleViewable", "title_viewable"),
    FieldSpec::plain("type", "type"),
    FieldSpec::plain("uploadedBy", "uploaded_by"),
    FieldSpec::date_time("uploadedDate", "uploaded_date"),
    FieldSpec::plain("virtualFolders", "virtual_folders"),
];

static DOCUMENT_CODEC: FieldCodec = FieldCodec::new(DOCUMENT_FIELDS, &["id"]);

/// A document stored in Accela, usually attached to a record.
///
/// The metadata is fetched with [`Get`]; the file itself with [`Download`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: u64,
    pub category: Option<JsonObject>,
    pub deletable: Option<JsonObject>,
    pub department: Option<String>,
    pub description: Option<String>,
    pub downloadable: Option<JsonObject>,
    pub entity_id: Option<String>,
    pub entity_type: Option<String>,
    pub file_name: Option<String>,
    pub group: Option<JsonObject>,
    pub modified_by: Option<String>,
    pub modified_date: Option<NaiveDateTime>,
    pub service_provider_code: Option<String>,
    /// Size in bytes.
    pub size: Option<u64>,
    pub source: Option<String>,
    pub status: Option<JsonObject>,
    pub status_date: Option<NaiveDateTime>,
    pub title_viewable: Option<JsonObject>,
    /// MIME type of the file (e.g. "application/pdf").
    #[serde(rename = "type")]
    pub content_type: Option<String>,
    pub uploaded_by: Option<String>,
    pub uploaded_date: Option<NaiveDateTime>,
    pub virtual_folders: Option<String>,

    #[serde(skip)]
    pub raw: RawPayload,
}

/// Query parameters for listing a record's documents.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordDocumentListQuery {
    /// Record whose documents to list (path parameter).
    #[serde(skip)]
    pub record_id: String,
}

impl RecordDocumentListQuery {
    pub fn for_record(record_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
        }
    }
}

impl ResourceModel for Document {
    const NAME: &'static str = "document";
    const CODEC: &'static FieldCodec = &DOCUMENT_CODEC;

    fn raw(&self) -> &RawPayload {
        &self.raw
    }

    fn attach_raw(&mut self, raw: RawPayload) {
        self.raw = raw;
    }
}

impl Get for Document {
    type Id = u64;
    const COLLECTION: &'static str = "documents";
}

impl Download for Document {}

impl List for Document {
    type Query = RecordDocumentListQuery;

    fn list_path(query: &Self::Query) -> String {
        format!("records/{}/documents", urlencoding::encode(&query.record_id))
    }
}
