use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TeamdeckError;

#[cfg(test)]
mod tests;

/// Key under which pass-through JSON is attached to every emitted record.
pub const PASS_THROUGH_KEY: &str = "additionalJson";

/// Fallback `details` text when a failure carries no upstream detail.
pub const DEFAULT_ERROR_DETAIL: &str = "The resource you are requesting could not be found";

/// One input item as handed over by the host.
///
/// `json` is the item's original payload; `parameters` holds the values the
/// host resolved for this item from the node's declared properties.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct InputItem {
    #[serde(default)]
    pub json: Value,
    #[serde(default)]
    pub parameters: Map<String, Value>,
}

/// One emitted success record.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct OutputRecord {
    pub json: Map<String, Value>,
}

impl OutputRecord {
    /// Builds a record from a normalized API value.
    ///
    /// Objects contribute their fields; any other non-null value is wrapped
    /// as `{"value": v}`. When `pass_through` is set it is attached under
    /// [`PASS_THROUGH_KEY`].
    pub fn new(value: Value, pass_through: Option<&Value>) -> Self {
        let mut json = match value {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        };
        if let Some(extra) = pass_through {
            json.insert(PASS_THROUGH_KEY.to_string(), extra.clone());
        }
        Self { json }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.json.get(key)
    }
}

/// Returns true when a single API result carries nothing worth emitting:
/// null, an empty array, or an object whose values are all null.
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.values().all(Value::is_null),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

/// Failure captured as data while error isolation is enabled.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRecord {
    pub error: String,
    pub details: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub item_index: usize,
    /// RFC 3339 UTC, millisecond precision
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_item: Option<Value>,
}

impl ErrorRecord {
    pub fn from_error(error: &TeamdeckError, item_index: usize, original_item: &Value) -> Self {
        Self {
            error: error.to_string(),
            details: error
                .detail()
                .unwrap_or(DEFAULT_ERROR_DETAIL)
                .to_string(),
            status_code: error.status_code(),
            item_index,
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            original_item: match original_item {
                Value::Null => None,
                other => Some(other.clone()),
            },
        }
    }
}

/// Result of one execution pass: the success stream and, when anything was
/// isolated, the error stream.
#[derive(Clone, Debug, Default)]
pub struct NodeOutput {
    pub success: Vec<OutputRecord>,
    pub errors: Vec<ErrorRecord>,
}

impl NodeOutput {
    /// Number of output channels: 1 without errors, 2 otherwise.
    pub fn channels(&self) -> usize {
        if self.errors.is_empty() {
            1
        } else {
            2
        }
    }

    /// Renders the output as the host expects it: `[[success...]]` or
    /// `[[success...], [errors...]]`.
    pub fn to_channels(&self) -> serde_json::Result<Value> {
        let mut channels = vec![serde_json::to_value(&self.success)?];
        if !self.errors.is_empty() {
            channels.push(serde_json::to_value(&self.errors)?);
        }
        Ok(Value::Array(channels))
    }
}
