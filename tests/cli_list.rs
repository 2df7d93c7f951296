//! Execution tests for list operations and offset pagination.
//!
//! Uses wiremock to mock the Accela API and test actual execution flow.

mod common;

use accela::{
    AccelaError, AgencyEnvironment, AgencyEnvironmentListQuery, Get, List, Module, Record,
    RecordAddress, RecordAddressListQuery, RecordListQuery, RecordType, RecordTypeListQuery,
};
use chrono::NaiveDate;
use common::{client_for, record_json};
use futures::{StreamExt, TryStreamExt};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve records REC-0..REC-4 in pages of two.
async fn mount_five_records(mock_server: &MockServer) {
    for (offset, ids) in [(0, vec!["REC-0", "REC-1"]), (2, vec!["REC-2", "REC-3"]), (4, vec!["REC-4"])] {
        let result: Vec<_> = ids.into_iter().map(record_json).collect();
        Mock::given(method("GET"))
            .and(path("/v4/records"))
            .and(query_param("limit", "2"))
            .and(query_param("offset", offset.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": 200,
                "result": result,
                "total": 5
            })))
            .expect(1)
            .mount(mock_server)
            .await;
    }
}

fn ids(records: &[Record]) -> Vec<String> {
    records.iter().filter_map(|r| r.id.clone()).collect()
}

#[tokio::test]
async fn test_list_records_returns_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("limit", "2"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_json("REC-0"), record_json("REC-1")],
            "total": 5
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = Record::list(&client, &RecordListQuery::default(), 2, 0)
        .await
        .unwrap();

    assert_eq!(page.len(), 2);
    assert_eq!(page.offset, 0);
    assert_eq!(page.limit, 2);
    assert_eq!(page.total, 5);
    assert!(page.has_more);
    assert_eq!(page.map(|r| r.custom_id.clone().unwrap_or_default()), vec!["BLD-REC-0", "BLD-REC-1"]);
}

#[tokio::test]
async fn test_auto_paging_walks_every_page() {
    let mock_server = MockServer::start().await;
    mount_five_records(&mock_server).await;

    let client = client_for(&mock_server);
    let page = Record::list(&client, &RecordListQuery::default(), 2, 0)
        .await
        .unwrap();
    let records: Vec<Record> = page.auto_paging().try_collect().await.unwrap();

    assert_eq!(ids(&records), vec!["REC-0", "REC-1", "REC-2", "REC-3", "REC-4"]);
}

#[tokio::test]
async fn test_collect_all_walks_every_page() {
    let mock_server = MockServer::start().await;
    mount_five_records(&mock_server).await;

    let client = client_for(&mock_server);
    let records = Record::list(&client, &RecordListQuery::default(), 2, 0)
        .await
        .unwrap()
        .collect_all()
        .await
        .unwrap();

    assert_eq!(records.len(), 5);
}

#[tokio::test]
async fn test_next_page_advances_in_place() {
    let mock_server = MockServer::start().await;
    mount_five_records(&mock_server).await;

    let client = client_for(&mock_server);
    let mut page = Record::list(&client, &RecordListQuery::default(), 2, 0)
        .await
        .unwrap();

    assert!(page.next_page().await.unwrap());
    assert_eq!(page.offset, 2);
    assert_eq!(ids(&page.items), vec!["REC-2", "REC-3"]);
    assert!(page.has_more);

    assert!(page.next_page().await.unwrap());
    assert_eq!(page.offset, 4);
    assert_eq!(page.len(), 1);
    assert!(!page.has_more);

    // Exhausted: no further request
    assert!(!page.next_page().await.unwrap());
    assert_eq!(page.offset, 4);
}

#[tokio::test]
async fn test_auto_paging_fetches_lazily() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_json("REC-0"), record_json("REC-1")],
            "total": 5
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = Record::list(&client, &RecordListQuery::default(), 2, 0)
        .await
        .unwrap();
    let first_two: Vec<_> = page.auto_paging().take(2).collect().await;

    assert_eq!(first_two.len(), 2);
    assert!(first_two.iter().all(Result::is_ok));
}

#[tokio::test]
async fn test_auto_paging_error_ends_stream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_json("REC-0"), record_json("REC-1")],
            "total": 5
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(503).set_body_json(serde_json::json!({
            "message": "Service unavailable"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = Record::list(&client, &RecordListQuery::default(), 2, 0)
        .await
        .unwrap();
    let results: Vec<_> = page.auto_paging().collect().await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(results[1].is_ok());
    assert_eq!(results[2].as_ref().unwrap_err().status_code(), Some(503));
}

#[tokio::test]
async fn test_next_page_error_keeps_current_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_json("REC-0"), record_json("REC-1")],
            "total": 5
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut page = Record::list(&client, &RecordListQuery::default(), 2, 0)
        .await
        .unwrap();

    assert!(page.next_page().await.is_err());
    assert_eq!(page.offset, 0);
    assert_eq!(ids(&page.items), vec!["REC-0", "REC-1"]);
    assert!(page.has_more);
}

#[tokio::test]
async fn test_missing_result_key_is_empty_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": 200})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = Record::list(&client, &RecordListQuery::default(), 10, 0)
        .await
        .unwrap();

    assert!(page.is_empty());
    assert_eq!(page.total, 0);
    assert!(!page.has_more);
}

#[tokio::test]
async fn test_missing_total_ends_after_first_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_json("REC-0"), record_json("REC-1")]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = Record::list(&client, &RecordListQuery::default(), 2, 0)
        .await
        .unwrap();

    assert_eq!(page.total, 2);
    assert!(!page.has_more);
    let all: Vec<Record> = page.auto_paging().try_collect().await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn test_zero_limit_rejected_without_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Record::list(&client, &RecordListQuery::default(), 0, 0)
        .await
        .unwrap_err();

    assert!(matches!(err, AccelaError::ConfigInvalid(_)));
}

#[tokio::test]
async fn test_list_records_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .and(query_param("module", "Building"))
        .and(query_param("type", "Building/Residential/New/NA"))
        .and(query_param("openedDateFrom", "2024-01-15"))
        .and(query_param("limit", "100"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_json("REC-0")],
            "total": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = RecordListQuery {
        module: Some("Building".to_string()),
        record_type: Some("Building/Residential/New/NA".to_string()),
        opened_date_after: NaiveDate::from_ymd_opt(2024, 1, 15),
    };
    let records = Record::list_all(&client, &query).await.unwrap();

    assert_eq!(ids(&records), vec!["REC-0"]);
}

#[tokio::test]
async fn test_list_addresses_filters() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records/REC-1/addresses"))
        .and(query_param("isPrimary", "Y"))
        .and(query_param("fields", "streetName,city"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [{
                "id": 99,
                "isPrimary": "Y",
                "streetName": "Main",
                "city": "Charlotte",
                "recordId": {"id": "REC-1"}
            }],
            "total": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let query = RecordAddressListQuery {
        is_primary: Some(true),
        fields: Some(vec!["streetName".to_string(), "city".to_string()]),
        ..RecordAddressListQuery::for_record("REC-1")
    };
    let page = RecordAddress::list(&client, &query, 100, 0).await.unwrap();

    assert_eq!(page.len(), 1);
    let address = &page.items[0];
    assert_eq!(address.id.as_deref(), Some("99"));
    assert!(address.is_primary);
    assert_eq!(address.record_id.as_deref(), Some("REC-1"));
}

#[tokio::test]
async fn test_record_sub_resources_via_record() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records/REC-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_json("REC-1")]
        })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/records/REC-1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [{"id": 1, "fileName": "a.pdf"}, {"id": 2, "fileName": "b.pdf"}],
            "total": 2
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/records/REC-1/parcels"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [{"id": "P-1", "isPrimary": "Y", "owners": [{"fullName": "Jane Doe"}]}],
            "total": 1
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let record = Record::get(&client, "REC-1".to_string()).await.unwrap();

    let documents = record.fetch_documents(&client).await.unwrap();
    assert_eq!(documents.iter().map(|d| d.id).collect::<Vec<_>>(), vec![1, 2]);

    let parcels = record.fetch_parcels(&client).await.unwrap();
    assert_eq!(parcels[0].is_primary.as_deref(), Some("Y"));
    assert_eq!(parcels[0].owners.as_ref().unwrap()[0]["full_name"], "Jane Doe");
}

#[tokio::test]
async fn test_list_record_types_page_object() {
    let mock_server = MockServer::start().await;

    let record_type = |value: &str| {
        serde_json::json!({
            "value": value,
            "type": "Residential",
            "text": value,
            "group": "Building",
            "subType": "New",
            "category": "NA",
            "module": "Building",
            "alias": value,
            "id": value,
            "readable": true,
            "createable": true,
            "updatable": true,
            "deletable": false,
            "asChildOnly": false,
            "searchable": true,
            "smartChoiceCode": ""
        })
    };

    Mock::given(method("GET"))
        .and(path("/v4/settings/records/types"))
        .and(query_param("module", "Building"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_type("A"), record_type("B")],
            "page": {"offset": 0, "limit": 2, "total": 3, "hasmore": false}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v4/settings/records/types"))
        .and(query_param("module", "Building"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_type("C")],
            "page": {"offset": 2, "limit": 2, "total": 3, "hasmore": false}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let page = RecordType::list(&client, &RecordTypeListQuery::new("Building"), 2, 0)
        .await
        .unwrap();

    // The server's hasmore is ignored
    assert_eq!(page.total, 3);
    assert!(page.has_more);

    let all = page.collect_all().await.unwrap();
    assert_eq!(
        all.iter().map(|t| t.value.as_str()).collect::<Vec<_>>(),
        vec!["A", "B", "C"]
    );
}

#[tokio::test]
async fn test_list_modules_unpaged() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/settings/modules"))
        .and(query_param_is_missing("limit"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [
                {"value": "Building", "text": "Building"},
                {"value": "Licenses", "text": "Business Licenses"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let modules = Module::list(&client).await.unwrap();

    assert_eq!(modules.len(), 2);
    assert_eq!(modules[1].text, "Business Licenses");
}

#[tokio::test]
async fn test_list_agency_environments() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/agencies/CHARLOTTE/environments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [
                {"name": "PROD", "isDefault": true, "enabled": true},
                {"name": "TEST", "isDefault": false, "enabled": true}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let environments =
        AgencyEnvironment::list_all(&client, &AgencyEnvironmentListQuery::for_agency("CHARLOTTE"))
            .await
            .unwrap();

    assert_eq!(environments.len(), 2);
    assert_eq!(environments[0].name, "PROD");
    assert_eq!(environments[0].is_default, Some(true));
}

#[tokio::test]
async fn test_list_item_decode_failure_fails_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v4/records"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "result": [record_json("REC-0"), {"id": "REC-1", "infraction": "N"}],
            "total": 2
        })))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let err = Record::list(&client, &RecordListQuery::default(), 10, 0)
        .await
        .unwrap_err();

    assert!(matches!(err, AccelaError::Decode { ref field, .. } if field == "infraction"));
}
