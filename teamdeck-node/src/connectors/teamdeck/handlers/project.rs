use serde::{Deserialize, Serialize};
use serde_json::Value;
use teamdeck::{RequestHelper, TeamdeckError};

use super::{create, delete, fields_object, get, get_all, update};
use crate::connectors::teamdeck::params::{id, require_id, update_body, ItemParameters, Paging};
use crate::connectors::teamdeck::resource::{OperationKind, ResourceKind};
use crate::node::HandlerOutput;

const RESOURCE: ResourceKind = ResourceKind::Project;
const ID_LABEL: &str = "Project ID";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProject {
    #[serde(default)]
    name: String,
    #[serde(default)]
    additional_fields: ProjectExtras,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ProjectExtras {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectRef {
    #[serde(deserialize_with = "id")]
    project_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateProject {
    #[serde(deserialize_with = "id")]
    project_id: String,
    #[serde(default)]
    update_fields: ProjectUpdate,
}

#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
struct ProjectUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListProjects {
    #[serde(flatten)]
    paging: Paging,
    #[serde(default)]
    filters: ProjectFilters,
}

/// Listing options, passed through as query parameters.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectFilters {
    #[serde(default)]
    archived: Option<bool>,
    #[serde(default)]
    sort: Option<String>,
    #[serde(default)]
    order: Option<String>,
}

impl ProjectFilters {
    fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(archived) = self.archived {
            query.push(("archived".to_string(), archived.to_string()));
        }
        for (key, value) in [("sort", &self.sort), ("order", &self.order)] {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                query.push((key.to_string(), value.to_string()));
            }
        }
        query
    }
}

pub async fn handle(
    helper: &dyn RequestHelper,
    operation: OperationKind,
    params: &ItemParameters,
) -> Result<HandlerOutput, TeamdeckError> {
    match operation {
        OperationKind::Create => {
            let p: CreateProject = params.decode(RESOURCE, operation)?;
            let name = p.name.trim();
            if name.is_empty() {
                return Err(TeamdeckError::validation("Project name is required"));
            }
            let mut body = fields_object(&p.additional_fields)?;
            body.insert("name".to_string(), Value::String(name.to_string()));
            create(helper, RESOURCE, Value::Object(body)).await
        }
        OperationKind::Get => {
            let p: ProjectRef = params.decode(RESOURCE, operation)?;
            get(helper, RESOURCE, require_id(&p.project_id, ID_LABEL)?).await
        }
        OperationKind::GetAll => {
            let p: ListProjects = params.decode(RESOURCE, operation)?;
            get_all(helper, RESOURCE, p.filters.to_query(), p.paging.limit()?).await
        }
        OperationKind::Update => {
            let p: UpdateProject = params.decode(RESOURCE, operation)?;
            let id = require_id(&p.project_id, ID_LABEL)?;
            let body = update_body(&p.update_fields)?;
            update(helper, RESOURCE, id, body).await
        }
        OperationKind::Delete => {
            let p: ProjectRef = params.decode(RESOURCE, operation)?;
            delete(helper, RESOURCE, require_id(&p.project_id, ID_LABEL)?).await
        }
    }
}
