//! Record model and trait implementations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::AccelaClient;
use crate::error::{AccelaError, Result};
use crate::fields::{FieldCodec, FieldSpec};
use crate::models::serde_helpers::api_date;
use crate::models::{
    Document, JsonObject, RecordAddress, RecordAddressListQuery, RecordDocumentListQuery,
    RecordParcel, RecordParcelListQuery,
};
use crate::traits::{Get, List, RawPayload, ResourceModel};

const RECORD_FIELDS: &[FieldSpec] = &[
    FieldSpec::plain("actualProductionUnit", "actual_production_unit"),
    FieldSpec::nested_list("addresses", "addresses"),
    FieldSpec::plain("appearanceDate", "appearance_date"),
    FieldSpec::plain("appearanceDayOfWeek", "appearance_day_of_week"),
    FieldSpec::nested_list("assets", "assets"),
    FieldSpec::plain("assignedDate", "assigned_date"),
    FieldSpec::plain("assignedToDepartment", "assigned_to_department"),
    FieldSpec::plain("assignedUser", "assigned_user"),
    FieldSpec::plain("balance", "balance"),
    FieldSpec::boolean("booking", "booking"),
    FieldSpec::plain("closedByDepartment", "closed_by_department"),
    FieldSpec::plain("closedByUser", "closed_by_user"),
    FieldSpec::plain("closedDate", "closed_date"),
    FieldSpec::plain("completeDate", "complete_date"),
    FieldSpec::plain("completedByDepartment", "completed_by_department"),
    FieldSpec::plain("completedByUser", "completed_by_user"),
    FieldSpec::nested_list("conditionOfApprovals", "condition_of_approvals"),
    FieldSpec::nested_list("conditions", "conditions"),
    FieldSpec::nested("constructionType", "construction_type"),
    FieldSpec::nested_list("contact", "contact"),
    FieldSpec::plain("costPerUnit", "cost_per_unit"),
    FieldSpec::plain("createdBy", "created_by"),
    FieldSpec::plain("createdByCloning", "created_by_cloning"),
    FieldSpec::nested_list("customForms", "custom_forms"),
    FieldSpec::plain("customId", "custom_id"),
    FieldSpec::nested_list("customTables", "custom_tables"),
    FieldSpec::boolean("defendantSignature", "defendant_signature"),
    FieldSpec::plain("description", "description"),
    FieldSpec::plain("enforceDepartment", "enforce_department"),
    FieldSpec::plain("enforceUser", "enforce_user"),
    FieldSpec::plain("enforceUserId", "enforce_user_id"),
    FieldSpec::plain("estimatedCostPerUnit", "estimated_cost_per_unit"),
    FieldSpec::plain("estimatedDueDate", "estimated_due_date"),
    FieldSpec::plain("estimatedProductionUnit", "estimated_production_unit"),
    FieldSpec::plain("estimatedTotalJobCost", "estimated_total_job_cost"),
    FieldSpec::plain("firstIssuedDate", "first_issued_date"),
    FieldSpec::plain("housingUnits", "housing_units"),
    FieldSpec::plain("id", "id"),
    FieldSpec::plain("inPossessionTime", "in_possession_time"),
    FieldSpec::boolean("infraction", "infraction"),
    FieldSpec::plain("initiatedProduct", "initiated_product"),
    FieldSpec::plain("inspectorDepartment", "inspector_department"),
    FieldSpec::plain("inspectorId", "inspector_id"),
    FieldSpec::plain("inspectorName", "inspector_name"),
    FieldSpec::plain("jobValue", "job_value"),
    FieldSpec::boolean("misdemeanor", "misdemeanor"),
    FieldSpec::plain("module", "module"),
    FieldSpec::plain("name", "name"),
    FieldSpec::plain("numberOfBuildings", "number_of_buildings"),
    FieldSpec::boolean("offenseWitnessed", "offense_witnessed"),
    FieldSpec::plain("openedDate", "opened_date"),
    FieldSpec::plain("overallApplicationTime", "overall_application_time"),
    FieldSpec::nested_list("owner", "owner"),
    FieldSpec::nested_list("parcel", "parcel"),
    FieldSpec::nested("priority", "priority"),
    FieldSpec::nested_list("professional", "professional"),
    FieldSpec::boolean("publicOwned", "public_owned"),
    FieldSpec::plain("recordClass", "record_class"),
    FieldSpec::nested("renewalInfo", "renewal_info"),
    FieldSpec::nested("reportedChannel", "reported_channel"),
    FieldSpec::plain("reportedDate", "reported_date"),
    FieldSpec::nested("reportedType", "reported_type"),
    FieldSpec::plain("scheduledDate", "scheduled_date"),
    FieldSpec::nested("severity", "severity"),
    FieldSpec::plain("shortNotes", "short_notes"),
    FieldSpec::nested("status", "status"),
    FieldSpec::plain("statusDate", "status_date"),
    FieldSpec::nested("statusReason", "status_reason"),
    FieldSpec::plain("statusType", "status_type"),
    FieldSpec::plain("totalFee", "total_fee"),
    FieldSpec::plain("totalJobCost", "total_job_cost"),
    FieldSpec::plain("totalPay", "total_pay"),
    FieldSpec::plain("trackingId", "tracking_id"),
    FieldSpec::nested("type", "type"),
    FieldSpec::plain("undistributedCost", "undistributed_cost"),
    FieldSpec::plain("updateDate", "update_date"),
    FieldSpec::plain("value", "value"),
];

static RECORD_CODEC: FieldCodec = FieldCodec::new(RECORD_FIELDS, &[]);

/// An Accela record: a permit, license, case, or other tracked application.
///
/// Dates are kept as the API's strings; their format varies between
/// agencies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    pub actual_production_unit: Option<f64>,
    pub addresses: Option<Vec<JsonObject>>,
    pub appearance_date: Option<String>,
    pub appearance_day_of_week: Option<String>,
    pub assets: Option<Vec<JsonObject>>,
    pub assigned_date: Option<String>,
    pub assigned_to_department: Option<String>,
    pub assigned_user: Option<String>,
    pub balance: Option<f64>,
    pub booking: Option<bool>,
    pub closed_by_department: Option<String>,
    pub closed_by_user: Option<String>,
    pub closed_date: Option<String>,
    pub complete_date: Option<String>,
    pub completed_by_department: Option<String>,
    pub completed_by_user: Option<String>,
    pub condition_of_approvals: Option<Vec<JsonObject>>,
    pub conditions: Option<Vec<JsonObject>>,
    pub construction_type: Option<JsonObject>,
    pub contact: Option<Vec<JsonObject>>,
    pub cost_per_unit: Option<f64>,
    pub created_by: Option<String>,
    pub created_by_cloning: Option<String>,
    pub custom_forms: Option<Vec<JsonObject>>,
    pub custom_id: Option<String>,
    pub custom_tables: Option<Vec<JsonObject>>,
    pub defendant_signature: Option<bool>,
    pub description: Option<String>,
    pub enforce_department: Option<String>,
    pub enforce_user: Option<String>,
    pub enforce_user_id: Option<String>,
    pub estimated_cost_per_unit: Option<f64>,
    pub estimated_due_date: Option<String>,
    pub estimated_production_unit: Option<f64>,
    pub estimated_total_job_cost: Option<f64>,
    pub first_issued_date: Option<String>,
    pub housing_units: Option<i64>,
    /// Record ID (e.g. "CHARLOTTE-23CAP-00000-00A1B").
    pub id: Option<String>,
    pub in_possession_time: Option<f64>,
    pub infraction: Option<bool>,
    pub initiated_product: Option<String>,
    pub inspector_department: Option<String>,
    pub inspector_id: Option<String>,
    pub inspector_name: Option<String>,
    pub job_value: Option<f64>,
    pub misdemeanor: Option<bool>,
    pub module: Option<String>,
    pub name: Option<String>,
    pub number_of_buildings: Option<i64>,
    pub offense_witnessed: Option<bool>,
    pub opened_date: Option<String>,
    pub overall_application_time: Option<f64>,
    pub owner: Option<Vec<JsonObject>>,
    pub parcel: Option<Vec<JsonObject>>,
    pub priority: Option<JsonObject>,
    pub professional: Option<Vec<JsonObject>>,
    pub public_owned: Option<bool>,
    pub record_class: Option<String>,
    pub renewal_info: Option<JsonObject>,
    pub reported_channel: Option<JsonObject>,
    pub reported_date: Option<String>,
    pub reported_type: Option<JsonObject>,
    pub scheduled_date: Option<String>,
    pub severity: Option<JsonObject>,
    pub short_notes: Option<String>,
    pub status: Option<JsonObject>,
    pub status_date: Option<String>,
    pub status_reason: Option<JsonObject>,
    /// Usually a list of status group names.
    pub status_type: Option<Value>,
    pub total_fee: Option<f64>,
    pub total_job_cost: Option<f64>,
    pub total_pay: Option<f64>,
    pub tracking_id: Option<i64>,
    #[serde(rename = "type")]
    pub record_type: Option<JsonObject>,
    pub undistributed_cost: Option<f64>,
    pub update_date: Option<String>,
    pub value: Option<String>,

    #[serde(skip)]
    pub raw: RawPayload,
}

fn text_of(object: Option<&JsonObject>) -> Option<&str> {
    object.and_then(|o| o.get("text")).and_then(Value::as_str)
}

impl Record {
    /// Display text of the record status (e.g. "Issued").
    pub fn status_text(&self) -> Option<&str> {
        text_of(self.status.as_ref())
    }

    /// Display text of the record type (e.g. "Building/Residential/New/NA").
    pub fn type_text(&self) -> Option<&str> {
        text_of(self.record_type.as_ref())
    }

    fn require_id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .ok_or_else(|| AccelaError::decode("id", "record has no id"))
    }

    /// Get all addresses attached to this record.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let record = Record::get(&client, "CHARLOTTE-23CAP-00000-00A1B".to_string()).await?;
    /// for address in record.fetch_addresses(&client).await? {
    ///     println!("{:?}", address.street_address);
    /// }
    /// ```
    pub async fn fetch_addresses(&self, client: &AccelaClient) -> Result<Vec<RecordAddress>> {
        let query = RecordAddressListQuery::for_record(self.require_id()?);
        RecordAddress::list_all(client, &query).await
    }

    /// Get all parcels attached to this record.
    pub async fn fetch_parcels(&self, client: &AccelaClient) -> Result<Vec<RecordParcel>> {
        let query = RecordParcelListQuery::for_record(self.require_id()?);
        RecordParcel::list_all(client, &query).await
    }

    /// Get all documents attached to this record.
    pub async fn fetch_documents(&self, client: &AccelaClient) -> Result<Vec<Document>> {
        let query = RecordDocumentListQuery::for_record(self.require_id()?);
        Document::list_all(client, &query).await
    }
}

/// Query parameters for listing records.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RecordListQuery {
    /// Filter by module name (e.g. "Building").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// Filter by record type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,

    /// Only records opened on or after this date.
    #[serde(
        rename = "openedDateFrom",
        serialize_with = "api_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub opened_date_after: Option<NaiveDate>,
}

impl ResourceModel for Record {
    const NAME: &'static str = "record";
    const CODEC: &'static FieldCodec = &RECORD_CODEC;

    fn raw(&self) -> &RawPayload {
        &self.raw
    }

    fn attach_raw(&mut self, raw: RawPayload) {
        self.raw = raw;
    }
}

impl Get for Record {
    type Id = String;
    const COLLECTION: &'static str = "records";
}

impl List for Record {
    type Query = RecordListQuery;

    fn list_path(_query: &Self::Query) -> String {
        "records".to_string()
    }
}
