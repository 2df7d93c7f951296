//! Tests for CLI output formatting.
//!
//! - JSON output with --json flag
//! - Pretty-print output as default

use accela::{Document, PrettyPrint, Record, ResourceModel};

// ============================================================================
// JSON Output Tests
// ============================================================================

#[test]
fn test_json_flag_outputs_valid_json() {
    let record = make_test_record();
    let json_output = serde_json::to_string_pretty(&record).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_object());
    assert_eq!(parsed["custom_id"], "BLD2023-01234");
}

#[test]
fn test_json_flag_for_list_outputs_array() {
    let records = vec![make_test_record(), make_test_record()];
    let json_output = serde_json::to_string_pretty(&records).unwrap();

    let parsed: serde_json::Value = serde_json::from_str(&json_output).unwrap();
    assert!(parsed.is_array());
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_output_uses_snake_case_and_omits_raw() {
    let record = make_test_record();
    let parsed = serde_json::to_value(&record).unwrap();

    assert!(parsed.get("opened_date").is_some());
    assert!(parsed.get("openedDate").is_none());
    assert!(parsed.get("raw").is_none());
    assert_eq!(parsed["type"]["sub_type"], "New");
}

// ============================================================================
// Pretty-Print Tests
// ============================================================================

#[test]
fn test_default_output_is_not_json() {
    let record = make_test_record();
    let pretty_output = record.pretty_print();

    let parse_result: Result<serde_json::Value, _> = serde_json::from_str(&pretty_output);
    assert!(
        parse_result.is_err(),
        "Default output should NOT be valid JSON"
    );
}

#[test]
fn test_record_pretty_print_shows_key_fields() {
    let output = make_test_record().pretty_print();

    assert!(output.contains("CHARLOTTE-23CAP-00000-00A1B"), "Should show id");
    assert!(output.contains("Residential New"), "Should show type text");
    assert!(output.contains("Status:         Issued"));
    assert!(output.contains("Opened:         2023-05-01"));
}

#[test]
fn test_document_pretty_print_shows_key_fields() {
    let output = make_test_document().pretty_print();

    assert!(output.starts_with("Document #4242"));
    assert!(output.contains("site-plan.pdf"));
    assert!(output.contains("102400 bytes"));
    assert!(output.contains("Uploaded:       2024-01-15 10:30:00 by jdoe"));
}

#[test]
fn test_list_pretty_print_is_table() {
    use tabled::{Table, Tabled};

    #[derive(Tabled)]
    struct TestRow {
        id: String,
        status: String,
    }

    let rows = vec![
        TestRow {
            id: "REC-1".to_string(),
            status: "Issued".to_string(),
        },
        TestRow {
            id: "REC-2".to_string(),
            status: "Closed".to_string(),
        },
    ];

    let table_output = Table::new(rows).to_string();

    assert!(table_output.contains("id"), "Should have column headers");
    assert!(table_output.contains("status"), "Should have column headers");
    assert!(table_output.contains("REC-2"));
}

// ============================================================================
// Test Helpers
// ============================================================================

fn make_test_record() -> Record {
    Record::from_json(serde_json::json!({
        "id": "CHARLOTTE-23CAP-00000-00A1B",
        "customId": "BLD2023-01234",
        "openedDate": "2023-05-01 00:00:00",
        "status": {"value": "Issued", "text": "Issued"},
        "type": {"value": "Building/Residential/New/NA", "text": "Residential New", "subType": "New"}
    }))
    .unwrap()
}

fn make_test_document() -> Document {
    Document::from_json(serde_json::json!({
        "id": 4242,
        "fileName": "site-plan.pdf",
        "type": "application/pdf",
        "size": 102400,
        "uploadedBy": "jdoe",
        "uploadedDate": "2024-01-15 10:30:00"
    }))
    .unwrap()
}
