//! Typed per-item parameters.
//!
//! The host resolves the node's declared properties for every input item.
//! Those values are decoded once per item: first the shared envelope
//! ([`ItemParameters`]), then, after dispatch, one struct per
//! (resource, operation) pair. A missing or mistyped field is a validation
//! error naming the pair.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use teamdeck::{InputItem, TeamdeckError};

use super::config::DEFAULT_LIMIT;
use super::dates::normalize_date;
use super::resource::{Limit, OperationKind, ResourceKind};

/// Values shared by every resource and operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemParameters {
    #[serde(default = "default_resource")]
    pub resource: String,
    #[serde(default = "default_operation")]
    pub operation: String,
    #[serde(default)]
    pub use_additional_json: bool,
    #[serde(default)]
    pub additional_json: Option<Value>,
    /// Everything else, decoded later by [`ItemParameters::decode`].
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

fn default_resource() -> String {
    ResourceKind::Project.as_str().to_string()
}

fn default_operation() -> String {
    OperationKind::GetAll.as_str().to_string()
}

impl ItemParameters {
    pub fn from_item(item: &InputItem) -> Result<Self, TeamdeckError> {
        serde_json::from_value(Value::Object(item.parameters.clone()))
            .map_err(|e| TeamdeckError::validation(format!("Invalid node parameters: {}", e)))
    }

    /// Pass-through JSON to attach to every record of this item, if enabled.
    ///
    /// Accepts an object or a string holding a JSON object; absent or null
    /// counts as `{}`.
    pub fn pass_through(&self) -> Result<Option<Value>, TeamdeckError> {
        if !self.use_additional_json {
            return Ok(None);
        }
        let value = match &self.additional_json {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(Value::String(text)) if text.trim().is_empty() => Value::Object(Map::new()),
            Some(Value::String(text)) => serde_json::from_str(text).map_err(|e| {
                TeamdeckError::validation(format!("Additional JSON is not valid JSON: {}", e))
            })?,
            Some(other) => other.clone(),
        };
        if !value.is_object() {
            return Err(TeamdeckError::validation(
                "Additional JSON must be a JSON object",
            ));
        }
        Ok(Some(value))
    }

    /// Decodes the remaining fields into the struct of a (resource, operation) pair.
    pub fn decode<T: DeserializeOwned>(
        &self,
        resource: ResourceKind,
        operation: OperationKind,
    ) -> Result<T, TeamdeckError> {
        serde_json::from_value(Value::Object(self.fields.clone())).map_err(|e| {
            TeamdeckError::validation(format!(
                "Invalid parameters for {} {}: {}",
                resource, operation, e
            ))
        })
    }
}

/// `returnAll` / `limit` pair of every getAll operation.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    #[serde(default)]
    pub return_all: bool,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 {
    DEFAULT_LIMIT as u64
}

impl Paging {
    pub fn limit(&self) -> Result<Limit, TeamdeckError> {
        if self.return_all {
            return Ok(Limit::All);
        }
        if self.limit == 0 {
            return Err(TeamdeckError::validation("Limit must be at least 1"));
        }
        Ok(Limit::AtMost(self.limit as usize))
    }
}

/// Date-range and ownership filters of time entry and booking listings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntryFilters {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub project_id: Option<String>,
    #[serde(default, deserialize_with = "optional_id")]
    pub resource_id: Option<String>,
}

impl EntryFilters {
    /// Query parameters for the listing endpoint.
    ///
    /// `start_date` and `end_date` bound the entry's start date and are sent
    /// as `start_date_from` / `start_date_to`, date-only.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(start) = non_empty(&self.start_date) {
            query.push(("start_date_from".to_string(), normalize_date(start)));
        }
        if let Some(end) = non_empty(&self.end_date) {
            query.push(("start_date_to".to_string(), normalize_date(end)));
        }
        if let Some(project_id) = non_empty(&self.project_id) {
            query.push(("project_id".to_string(), project_id.to_string()));
        }
        if let Some(resource_id) = non_empty(&self.resource_id) {
            query.push(("resource_id".to_string(), resource_id.to_string()));
        }
        query
    }
}

/// getAll parameters of time entries and bookings.
#[derive(Debug, Deserialize)]
pub struct EntryList {
    #[serde(flatten)]
    pub paging: Paging,
    #[serde(default)]
    pub filters: EntryFilters,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Accepts an ID given as a JSON string or number.
pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected an ID string or number, got {}",
            other
        ))),
    }
}

/// Like [`id`], but null and empty strings become `None`.
pub fn optional_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => Ok(Some(s.trim().to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(serde::de::Error::custom(format!(
            "expected an ID string or number, got {}",
            other
        ))),
    }
}

/// Fails with "`label` is required" when an ID is empty. Dot segments are
/// rejected since they would escape the entity path.
pub fn require_id<'a>(value: &'a str, label: &str) -> Result<&'a str, TeamdeckError> {
    if value.is_empty() {
        return Err(TeamdeckError::validation(format!("{} is required", label)));
    }
    if value == "." || value == ".." {
        return Err(TeamdeckError::validation(format!(
            "{} is not a valid ID: {}",
            label, value
        )));
    }
    Ok(value)
}

/// Fails with "`label` is required" when a date is empty, otherwise returns
/// it date-only.
pub fn require_date(value: &str, label: &str) -> Result<String, TeamdeckError> {
    if value.trim().is_empty() {
        return Err(TeamdeckError::validation(format!("{} is required", label)));
    }
    Ok(normalize_date(value))
}

/// Serializes an update collection into a PUT body.
///
/// Fails before any request is made when no field is set. `start_date` and
/// `end_date` are sent date-only.
pub fn update_body<T: Serialize>(fields: &T) -> Result<Value, TeamdeckError> {
    let mut body = match serde_json::to_value(fields) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => {
            return Err(TeamdeckError::validation(format!(
                "Invalid update fields: {}",
                e
            )))
        }
    };
    if body.is_empty() {
        return Err(TeamdeckError::validation(
            "Please specify at least one field to update",
        ));
    }
    for key in ["start_date", "end_date"] {
        if let Some(Value::String(date)) = body.get(key) {
            let normalized = normalize_date(date);
            body.insert(key.to_string(), Value::String(normalized));
        }
    }
    Ok(Value::Object(body))
}

/// Fails when a booking allocation lies outside `[0, 1]`.
pub fn check_time_fraction(value: f64) -> Result<f64, TeamdeckError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(TeamdeckError::validation(format!(
            "Time fraction must be between 0 and 1, got {}",
            value
        )));
    }
    Ok(value)
}
