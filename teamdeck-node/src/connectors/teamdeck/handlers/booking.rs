use serde::{Deserialize, Serialize};
use serde_json::json;
use teamdeck::{RequestHelper, TeamdeckError};

use super::{create, delete, get, get_all, update};
use crate::connectors::teamdeck::config::DEFAULT_TIME_FRACTION;
use crate::connectors::teamdeck::params::{
    check_time_fraction, id, optional_id, require_date, require_id, update_body, EntryList,
    ItemParameters,
};
use crate::connectors::teamdeck::resource::{OperationKind, ResourceKind};
use crate::node::HandlerOutput;

const RESOURCE: ResourceKind = ResourceKind::Booking;
const ID_LABEL: &str = "Booking ID";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateBooking {
    #[serde(deserialize_with = "id")]
    project_id: String,
    #[serde(deserialize_with = "id")]
    resource_id: String,
    #[serde(default)]
    start_date: String,
    #[serde(default)]
    end_date: String,
    #[serde(default)]
    additional_fields: BookingExtras,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct BookingExtras {
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    time_fraction: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BookingRef {
    #[serde(deserialize_with = "id")]
    booking_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateBooking {
    #[serde(deserialize_with = "id")]
    booking_id: String,
    #[serde(default)]
    update_fields: BookingUpdate,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct BookingUpdate {
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
    start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    time_fraction: Option<f64>,
}

pub async fn handle(
    helper: &dyn RequestHelper,
    operation: OperationKind,
    params: &ItemParameters,
) -> Result<HandlerOutput, TeamdeckError> {
    match operation {
        OperationKind::Create => {
            let p: CreateBooking = params.decode(RESOURCE, operation)?;
            let start_date = require_date(&p.start_date, "Start date")?;
            let end_date = require_date(&p.end_date, "End date")?;
            // An explicit 0 is kept; only an unset fraction falls back to full time.
            let time_fraction = check_time_fraction(
                p.additional_fields
                    .time_fraction
                    .unwrap_or(DEFAULT_TIME_FRACTION),
            )?;
            let body = json!({
                "project_id": require_id(&p.project_id, "Project ID")?,
                "resource_id": require_id(&p.resource_id, "Resource ID")?,
                "start_date": start_date,
                "end_date": end_date,
                "description": p.additional_fields.description.unwrap_or_default(),
                "time_fraction": time_fraction,
            });
            create(helper, RESOURCE, body).await
        }
        OperationKind::Get => {
            let p: BookingRef = params.decode(RESOURCE, operation)?;
            get(helper, RESOURCE, require_id(&p.booking_id, ID_LABEL)?).await
        }
        OperationKind::GetAll => {
            let p: EntryList = params.decode(RESOURCE, operation)?;
            get_all(helper, RESOURCE, p.filters.to_query(), p.paging.limit()?).await
        }
        OperationKind::Update => {
            let p: UpdateBooking = params.decode(RESOURCE, operation)?;
            let id = require_id(&p.booking_id, ID_LABEL)?;
            if let Some(fraction) = p.update_fields.time_fraction {
                check_time_fraction(fraction)?;
            }
            let body = update_body(&p.update_fields)?;
            update(helper, RESOURCE, id, body).await
        }
        OperationKind::Delete => {
            let p: BookingRef = params.decode(RESOURCE, operation)?;
            delete(helper, RESOURCE, require_id(&p.booking_id, ID_LABEL)?).await
        }
    }
}
