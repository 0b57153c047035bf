use serde::{Deserialize, Serialize};
use serde_json::json;
use teamdeck::{RequestHelper, TeamdeckError};

use super::{create, delete, get, get_all, update};
use crate::connectors::teamdeck::config::DEFAULT_MINUTES;
use crate::connectors::teamdeck::params::{
    id, optional_id, require_date, require_id, update_body, EntryList, ItemParameters,
};
use crate::connectors::teamdeck::resource::{OperationKind, ResourceKind};
use crate::node::HandlerOutput;

const RESOURCE: ResourceKind = ResourceKind::TimeEntry;
const ID_LABEL: &str = "Time entry ID";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTimeEntry {
    #[serde(deserialize_with = "id")]
    project_id: String,
    #[serde(deserialize_with = "id")]
    resource_id: String,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    #[serde(default = "default_minutes")]
    minutes: i64,
    #[serde(default)]
    description: String,
}

fn default_minutes() -> i64 {
    DEFAULT_MINUTES
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimeEntryRef {
    #[serde(deserialize_with = "id")]
    time_entry_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateTimeEntry {
    #[serde(deserialize_with = "id")]
    time_entry_id: String,
    #[serde(default)]
    update_fields: TimeEntryUpdate,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct TimeEntryUpdate {
    #[serde(
        default,
        deserialize_with = "optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    project_id: Option<String>,
    #[serde(
        default,
        deserialize_with = "optional_id",
        skip_serializing_if = "Option::is_none"
    )]
    resource_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    minutes: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

pub async fn handle(
    helper: &dyn RequestHelper,
    operation: OperationKind,
    params: &ItemParameters,
) -> Result<HandlerOutput, TeamdeckError> {
    match operation {
        OperationKind::Create => {
            let p: CreateTimeEntry = params.decode(RESOURCE, operation)?;
            let start_date = require_date(&p.start_date, "Start date")?;
            let end_date = require_date(&p.end_date, "End date")?;
            check_minutes(p.minutes)?;
            let body = json!({
                "project_id": require_id(&p.project_id, "Project ID")?,
                "resource_id": require_id(&p.resource_id, "Resource ID")?,
                "minutes": p.minutes,
                "description": p.description,
                "start_date": start_date,
                "end_date": end_date,
            });
            create(helper, RESOURCE, body).await
        }
        OperationKind::Get => {
            let p: TimeEntryRef = params.decode(RESOURCE, operation)?;
            get(helper, RESOURCE, require_id(&p.time_entry_id, ID_LABEL)?).await
        }
        OperationKind::GetAll => {
            let p: EntryList = params.decode(RESOURCE, operation)?;
            get_all(helper, RESOURCE, p.filters.to_query(), p.paging.limit()?).await
        }
        OperationKind::Update => {
            let p: UpdateTimeEntry = params.decode(RESOURCE, operation)?;
            let id = require_id(&p.time_entry_id, ID_LABEL)?;
            if let Some(minutes) = p.update_fields.minutes {
                check_minutes(minutes)?;
            }
            let body = update_body(&p.update_fields)?;
            update(helper, RESOURCE, id, body).await
        }
        OperationKind::Delete => {
            let p: TimeEntryRef = params.decode(RESOURCE, operation)?;
            delete(helper, RESOURCE, require_id(&p.time_entry_id, ID_LABEL)?).await
        }
    }
}

fn check_minutes(minutes: i64) -> Result<i64, TeamdeckError> {
    if minutes <= 0 {
        return Err(TeamdeckError::validation("Minutes must be greater than 0"));
    }
    Ok(minutes)
}
