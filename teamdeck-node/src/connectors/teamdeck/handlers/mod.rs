//! Per-resource operation handlers.
//!
//! Each resource module decodes its typed parameters and issues exactly one
//! request per operation (getAll goes through the pagination aggregator).
//! The request shapes shared by all three resources live here.

pub mod booking;
pub mod project;
pub mod time_entry;

use serde::Serialize;
use serde_json::{json, Map, Value};
use teamdeck::{ApiRequest, RequestHelper, TeamdeckError};
use tracing::debug;

use super::pagination::fetch_all;
use super::resource::{Limit, ResourceKind};
use super::transformer::unwrap_envelope;
use crate::node::HandlerOutput;

/// POST to the resource endpoint.
async fn create(
    helper: &dyn RequestHelper,
    resource: ResourceKind,
    body: Value,
) -> Result<HandlerOutput, TeamdeckError> {
    send(helper, ApiRequest::post(resource.endpoint(), body)).await
}

/// GET a single entity.
async fn get(
    helper: &dyn RequestHelper,
    resource: ResourceKind,
    id: &str,
) -> Result<HandlerOutput, TeamdeckError> {
    send(helper, ApiRequest::get(resource.item_path(id))).await
}

/// PUT the changed fields of a single entity.
async fn update(
    helper: &dyn RequestHelper,
    resource: ResourceKind,
    id: &str,
    body: Value,
) -> Result<HandlerOutput, TeamdeckError> {
    send(helper, ApiRequest::put(resource.item_path(id), body)).await
}

/// DELETE a single entity; no lookup beforehand, the body is ignored.
async fn delete(
    helper: &dyn RequestHelper,
    resource: ResourceKind,
    id: &str,
) -> Result<HandlerOutput, TeamdeckError> {
    helper
        .request(ApiRequest::delete(resource.item_path(id)))
        .await?;
    Ok(HandlerOutput::Single(json!({ "success": true })))
}

async fn get_all(
    helper: &dyn RequestHelper,
    resource: ResourceKind,
    query: Vec<(String, String)>,
    limit: Limit,
) -> Result<HandlerOutput, TeamdeckError> {
    let records = fetch_all(helper, resource.endpoint(), &query, limit).await?;
    debug!(resource = %resource, records = records.len(), "Listing complete");
    Ok(HandlerOutput::Many(records))
}

async fn send(
    helper: &dyn RequestHelper,
    request: ApiRequest,
) -> Result<HandlerOutput, TeamdeckError> {
    let response = helper.request(request).await?;
    Ok(HandlerOutput::Single(unwrap_envelope(response.body)))
}

/// Serializes an optional-field collection into a JSON object, leaving out
/// unset fields.
fn fields_object<T: Serialize>(fields: &T) -> Result<Map<String, Value>, TeamdeckError> {
    match serde_json::to_value(fields) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Ok(Map::new()),
        Err(e) => Err(TeamdeckError::validation(format!(
            "Invalid field collection: {}",
            e
        ))),
    }
}
