use super::*;
use serde_json::json;

#[test]
fn test_input_item_defaults() {
    let item: InputItem = serde_json::from_str(r#"{"parameters": {"resource": "project"}}"#).unwrap();
    assert!(item.json.is_null());
    assert_eq!(item.parameters["resource"], "project");
}

#[test]
fn test_record_from_object_with_pass_through() {
    let record = OutputRecord::new(
        json!({"id": 1, "name": "Website"}),
        Some(&json!({"runId": "abc"})),
    );
    assert_eq!(record.get("id"), Some(&json!(1)));
    assert_eq!(record.get("additionalJson"), Some(&json!({"runId": "abc"})));
}

#[test]
fn test_record_pass_through_does_not_overwrite_fields() {
    let record = OutputRecord::new(json!({"name": "Upstream"}), Some(&json!({"name": "Mine"})));
    assert_eq!(record.get("name"), Some(&json!("Upstream")));
    assert_eq!(record.json["additionalJson"]["name"], "Mine");
}

#[test]
fn test_record_wraps_scalars() {
    let record = OutputRecord::new(json!("ok"), None);
    assert_eq!(serde_json::to_value(&record).unwrap(), json!({"value": "ok"}));
}

#[test]
fn test_is_blank() {
    assert!(is_blank(&Value::Null));
    assert!(is_blank(&json!({})));
    assert!(is_blank(&json!({"id": null, "name": null})));
    assert!(is_blank(&json!([])));
    assert!(!is_blank(&json!({"id": 1, "name": null})));
    assert!(!is_blank(&json!({"success": true})));
    assert!(!is_blank(&json!(0)));
}

#[test]
fn test_error_record_from_upstream() {
    let err = TeamdeckError::Upstream {
        status: Some(404),
        message: "404 Not Found".to_string(),
        detail: Some("Booking not found".to_string()),
    };
    let record = ErrorRecord::from_error(&err, 1, &json!({"bookingId": "9"}));

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["error"], "Teamdeck Error: 404 Not Found");
    assert_eq!(json["details"], "Booking not found");
    assert_eq!(json["statusCode"], 404);
    assert_eq!(json["itemIndex"], 1);
    assert_eq!(json["originalItem"], json!({"bookingId": "9"}));
    assert!(json["timestamp"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn test_error_record_without_status_uses_fallback_detail() {
    let err = TeamdeckError::validation("Please specify at least one field to update");
    let record = ErrorRecord::from_error(&err, 0, &Value::Null);

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["details"], DEFAULT_ERROR_DETAIL);
    assert!(json.get("statusCode").is_none());
    assert!(json.get("originalItem").is_none());
}

#[test]
fn test_output_channels() {
    let mut output = NodeOutput::default();
    output.success.push(OutputRecord::new(json!({"id": 1}), None));
    assert_eq!(output.channels(), 1);
    assert_eq!(output.to_channels().unwrap(), json!([[{"id": 1}]]));

    output.errors.push(ErrorRecord::from_error(
        &TeamdeckError::InvalidResponse,
        2,
        &json!({}),
    ));
    assert_eq!(output.channels(), 2);
    let channels = output.to_channels().unwrap();
    assert_eq!(channels.as_array().unwrap().len(), 2);
    assert_eq!(channels[1][0]["error"], "Invalid API response received");
    assert_eq!(channels[1][0]["itemIndex"], 2);
}
