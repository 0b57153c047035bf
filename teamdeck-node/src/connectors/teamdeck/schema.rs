//! Static node description (parameter schema version 1).
//!
//! Top-level parameter names are camelCase; option names inside the
//! `filters`, `additionalFields` and `updateFields` collections are the
//! upstream API's snake_case field names, so collections serialize straight
//! into query strings and request bodies.

use serde_json::json;
use std::collections::BTreeMap;
use teamdeck::credentials::CREDENTIAL_NAME;

use super::config::{BASE_URL, DEFAULT_LIMIT, DEFAULT_MINUTES, DEFAULT_TIME_FRACTION, SCHEMA_VERSION};
use super::resource::{OperationKind, ResourceKind};
use crate::types::{
    Codex, CredentialRef, NodeDescription, OptionValue, Property, PropertyType, RequestDefaults,
};

pub const NODE_NAME: &str = "teamdeck";

pub fn node_description() -> NodeDescription {
    let mut properties = vec![resource_property()];
    for resource in ResourceKind::ALL {
        properties.push(operation_property(resource));
    }
    properties.extend(project_properties());
    properties.extend(time_entry_properties());
    properties.extend(booking_properties());
    properties.extend(paging_properties());
    properties.extend(pass_through_properties());

    let mut defaults = BTreeMap::new();
    defaults.insert("name".to_string(), "Teamdeck".to_string());

    let mut headers = BTreeMap::new();
    headers.insert("Accept".to_string(), "application/json".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    NodeDescription {
        display_name: "Teamdeck".to_string(),
        name: NODE_NAME.to_string(),
        icon: "file:teamdeck.svg".to_string(),
        group: vec!["transform".to_string()],
        version: 1,
        schema_version: SCHEMA_VERSION,
        subtitle: r#"={{$parameter["operation"] + ": " + $parameter["resource"]}}"#.to_string(),
        description: "Interact with Teamdeck API for project management and time tracking"
            .to_string(),
        defaults,
        inputs: vec!["main".to_string()],
        outputs: vec!["main".to_string()],
        codex: Codex {
            categories: vec!["Productivity".to_string(), "Project Management".to_string()],
            alias: vec![
                "time tracking".to_string(),
                "resource planning".to_string(),
                "bookings".to_string(),
            ],
        },
        credentials: vec![CredentialRef {
            name: CREDENTIAL_NAME.to_string(),
            required: true,
        }],
        request_defaults: RequestDefaults {
            base_url: BASE_URL.to_string(),
            headers,
        },
        properties,
    }
}

fn resource_property() -> Property {
    Property::new("Resource", "resource", PropertyType::Options)
        .no_data_expression()
        .default_value(json!(ResourceKind::Project.as_str()))
        .values(vec![
            OptionValue::new("Project", ResourceKind::Project.as_str()),
            OptionValue::new("Time Entry", ResourceKind::TimeEntry.as_str()),
            OptionValue::new("Booking", ResourceKind::Booking.as_str()),
        ])
}

fn operation_property(resource: ResourceKind) -> Property {
    let (singular, plural) = match resource {
        ResourceKind::Project => ("project", "projects"),
        ResourceKind::TimeEntry => ("time entry", "time entries"),
        ResourceKind::Booking => ("booking", "bookings"),
    };
    let describe = |operation: OperationKind, label: &str, text: String| {
        OptionValue::new(label, operation.as_str()).described(&text, &text)
    };

    Property::new("Operation", "operation", PropertyType::Options)
        .no_data_expression()
        .default_value(json!(OperationKind::GetAll.as_str()))
        .show("resource", vec![resource.as_str()])
        .values(vec![
            describe(OperationKind::Create, "Create", format!("Create a {}", singular)),
            describe(OperationKind::Delete, "Delete", format!("Delete a {}", singular)),
            describe(OperationKind::Get, "Get", format!("Get a {}", singular)),
            describe(OperationKind::GetAll, "Get Many", format!("Get many {}", plural)),
            describe(OperationKind::Update, "Update", format!("Update a {}", singular)),
        ])
}

/// Required ID of the entity a get/update/delete works on.
fn id_property(resource: ResourceKind, display_name: &str, name: &str) -> Property {
    Property::new(display_name, name, PropertyType::String)
        .required()
        .show("resource", vec![resource.as_str()])
        .show(
            "operation",
            vec![
                OperationKind::Get.as_str(),
                OperationKind::Update.as_str(),
                OperationKind::Delete.as_str(),
            ],
        )
}

fn shown_on(property: Property, resource: ResourceKind, operation: OperationKind) -> Property {
    property
        .show("resource", vec![resource.as_str()])
        .show("operation", vec![operation.as_str()])
}

fn project_properties() -> Vec<Property> {
    let resource = ResourceKind::Project;
    vec![
        shown_on(
            Property::new("Name", "name", PropertyType::String)
                .required()
                .description("Name of the project to create"),
            resource,
            OperationKind::Create,
        ),
        shown_on(
            Property::new("Additional Fields", "additionalFields", PropertyType::Collection)
                .placeholder("Add Field")
                .fields(vec![
                    Property::new("Description", "description", PropertyType::String),
                    Property::new("Color", "color", PropertyType::Color)
                        .description("Project color (hex code)"),
                ]),
            resource,
            OperationKind::Create,
        ),
        id_property(resource, "Project ID", "projectId"),
        shown_on(
            Property::new("Update Fields", "updateFields", PropertyType::Collection)
                .placeholder("Add Field")
                .fields(vec![
                    Property::new("Name", "name", PropertyType::String),
                    Property::new("Description", "description", PropertyType::String),
                    Property::new("Color", "color", PropertyType::Color),
                ]),
            resource,
            OperationKind::Update,
        ),
        shown_on(
            Property::new("Filters", "filters", PropertyType::Collection)
                .placeholder("Add Filter")
                .fields(vec![
                    Property::new("Archived", "archived", PropertyType::Boolean)
                        .description("Whether to list archived projects"),
                    Property::new("Sort", "sort", PropertyType::String)
                        .description("Field to sort by, e.g. name"),
                    Property::new("Order", "order", PropertyType::Options)
                        .default_value(json!("asc"))
                        .values(vec![
                            OptionValue::new("Ascending", "asc"),
                            OptionValue::new("Descending", "desc"),
                        ]),
                ]),
            resource,
            OperationKind::GetAll,
        ),
    ]
}

/// Fields shared by time entry and booking creation.
fn entry_create_properties(resource: ResourceKind) -> Vec<Property> {
    let create = OperationKind::Create;
    vec![
        shown_on(
            Property::new("Project ID", "projectId", PropertyType::String).required(),
            resource,
            create,
        ),
        shown_on(
            Property::new("Resource ID", "resourceId", PropertyType::String)
                .required()
                .description("ID of the person the entry belongs to"),
            resource,
            create,
        ),
        shown_on(
            Property::new("Start Date", "startDate", PropertyType::DateTime).required(),
            resource,
            create,
        ),
        shown_on(
            Property::new("End Date", "endDate", PropertyType::DateTime).required(),
            resource,
            create,
        ),
    ]
}

fn entry_filters(resource: ResourceKind) -> Property {
    shown_on(
        Property::new("Filters", "filters", PropertyType::Collection)
            .placeholder("Add Filter")
            .fields(vec![
                Property::new("Start Date", "start_date", PropertyType::DateTime)
                    .description("Entries starting on or after this date"),
                Property::new("End Date", "end_date", PropertyType::DateTime)
                    .description("Entries starting on or before this date"),
                Property::new("Project ID", "project_id", PropertyType::String),
                Property::new("Resource ID", "resource_id", PropertyType::String),
            ]),
        resource,
        OperationKind::GetAll,
    )
}

fn time_entry_properties() -> Vec<Property> {
    let resource = ResourceKind::TimeEntry;
    let mut properties = entry_create_properties(resource);
    properties.extend(vec![
        shown_on(
            Property::new("Minutes", "minutes", PropertyType::Number)
                .required()
                .default_value(json!(DEFAULT_MINUTES))
                .type_options(json!({"minValue": 1}))
                .description("Duration in minutes (e.g., 60 for 1 hour, 480 for 8 hours)"),
            resource,
            OperationKind::Create,
        ),
        shown_on(
            Property::new("Description", "description", PropertyType::String),
            resource,
            OperationKind::Create,
        ),
        id_property(resource, "Time Entry ID", "timeEntryId"),
        shown_on(
            Property::new("Update Fields", "updateFields", PropertyType::Collection)
                .placeholder("Add Field")
                .fields(vec![
                    Property::new("Project ID", "project_id", PropertyType::String),
                    Property::new("Resource ID", "resource_id", PropertyType::String),
                    Property::new("Minutes", "minutes", PropertyType::Number)
                        .default_value(json!(DEFAULT_MINUTES)),
                    Property::new("Start Date", "start_date", PropertyType::DateTime),
                    Property::new("End Date", "end_date", PropertyType::DateTime),
                    Property::new("Description", "description", PropertyType::String),
                ]),
            resource,
            OperationKind::Update,
        ),
        entry_filters(resource),
    ]);
    properties
}

fn time_fraction_field() -> Property {
    Property::new("Time Fraction", "time_fraction", PropertyType::Number)
        .default_value(json!(DEFAULT_TIME_FRACTION))
        .type_options(json!({"minValue": 0, "maxValue": 1, "numberPrecision": 2}))
        .description("Time allocation as fraction (0.5 = 50%, 1 = 100%)")
}

fn booking_properties() -> Vec<Property> {
    let resource = ResourceKind::Booking;
    let mut properties = entry_create_properties(resource);
    properties.extend(vec![
        shown_on(
            Property::new("Additional Fields", "additionalFields", PropertyType::Collection)
                .placeholder("Add Field")
                .fields(vec![
                    Property::new("Description", "description", PropertyType::String),
                    time_fraction_field(),
                ]),
            resource,
            OperationKind::Create,
        ),
        id_property(resource, "Booking ID", "bookingId"),
        shown_on(
            Property::new("Update Fields", "updateFields", PropertyType::Collection)
                .placeholder("Add Field")
                .fields(vec![
                    Property::new("Project ID", "project_id", PropertyType::String),
                    Property::new("Resource ID", "resource_id", PropertyType::String),
                    Property::new("Start Date", "start_date", PropertyType::DateTime),
                    Property::new("End Date", "end_date", PropertyType::DateTime),
                    Property::new("Description", "description", PropertyType::String),
                    time_fraction_field(),
                ]),
            resource,
            OperationKind::Update,
        ),
        entry_filters(resource),
    ]);
    properties
}

fn paging_properties() -> Vec<Property> {
    vec![
        Property::new("Return All", "returnAll", PropertyType::Boolean)
            .description("Whether to return all results or only up to a given limit")
            .show("operation", vec![OperationKind::GetAll.as_str()]),
        Property::new("Limit", "limit", PropertyType::Number)
            .default_value(json!(DEFAULT_LIMIT))
            .type_options(json!({"minValue": 1}))
            .description("Max number of results to return")
            .show("operation", vec![OperationKind::GetAll.as_str()])
            .show("returnAll", vec![false]),
    ]
}

fn pass_through_properties() -> Vec<Property> {
    vec![
        Property::new("Add Additional JSON", "useAdditionalJson", PropertyType::Boolean)
            .description("Whether to attach extra JSON to every output record"),
        Property::new("Additional JSON", "additionalJson", PropertyType::Json)
            .description("Attached to every output record under the additionalJson key")
            .show("useAdditionalJson", vec![true]),
    ]
}
