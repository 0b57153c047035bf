use serde_json::Value;

/// Records extracted from one listing response.
#[derive(Debug, PartialEq)]
pub enum Page {
    /// A list of records; pagination may continue.
    Records(Vec<Value>),
    /// The endpoint answered with a single entity; pagination ends here.
    Single(Value),
}

/// Normalizes a single-entity response: `body.data` when present, otherwise
/// the body itself.
pub fn unwrap_envelope(body: Value) -> Value {
    match body {
        Value::Object(map) => match map.get("data") {
            Some(data) if !data.is_null() => data.clone(),
            _ => Value::Object(map),
        },
        other => other,
    }
}

/// Extracts records from a listing response.
///
/// Upstream endpoints answer either `{data: [...], meta: {...}}` or a bare
/// list; both are accepted.
pub fn page_records(body: Value) -> Page {
    match unwrap_envelope(body) {
        Value::Array(items) => Page::Records(items),
        Value::Null => Page::Records(Vec::new()),
        other => Page::Single(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_envelope_with_data() {
        let body = json!({"data": {"id": 3, "name": "Website"}, "meta": {}});
        assert_eq!(unwrap_envelope(body), json!({"id": 3, "name": "Website"}));
    }

    #[test]
    fn test_unwrap_envelope_without_data() {
        let body = json!({"id": 3, "name": "Website"});
        assert_eq!(unwrap_envelope(body.clone()), body);
    }

    #[test]
    fn test_unwrap_envelope_null_data_keeps_body() {
        let body = json!({"data": null, "status": "ok"});
        assert_eq!(unwrap_envelope(body.clone()), body);
    }

    #[test]
    fn test_page_records_envelope() {
        let body = json!({"data": [{"id": 1}, {"id": 2}], "meta": {"total": 2}});
        assert_eq!(
            page_records(body),
            Page::Records(vec![json!({"id": 1}), json!({"id": 2})])
        );
    }

    #[test]
    fn test_page_records_bare_list() {
        let body = json!([{"id": 1}]);
        assert_eq!(page_records(body), Page::Records(vec![json!({"id": 1})]));
    }

    #[test]
    fn test_page_records_single_entity() {
        let body = json!({"id": 1, "name": "Only one"});
        assert_eq!(
            page_records(body),
            Page::Single(json!({"id": 1, "name": "Only one"}))
        );
    }

    #[test]
    fn test_page_records_empty_body() {
        assert_eq!(page_records(Value::Null), Page::Records(Vec::new()));
    }
}
