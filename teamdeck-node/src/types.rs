use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Declarative node description.
///
/// The host renders `properties` as a form and resolves their values per
/// input item; the node never reads it back at execution time.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeDescription {
    pub display_name: String,
    pub name: String,
    pub icon: String,
    pub group: Vec<String>,
    pub version: u32,
    /// Version of the parameter naming scheme
    pub schema_version: u32,
    pub subtitle: String,
    pub description: String,
    pub defaults: BTreeMap<String, String>,
    pub inputs: Vec<String>,
    pub outputs: Vec<String>,
    pub codex: Codex,
    pub credentials: Vec<CredentialRef>,
    pub request_defaults: RequestDefaults,
    pub properties: Vec<Property>,
}

impl NodeDescription {
    /// Properties visible for a (resource, operation) pair.
    ///
    /// A property without a condition on a key is visible for every value
    /// of that key.
    pub fn visible_properties(&self, resource: &str, operation: &str) -> Vec<&Property> {
        self.properties
            .iter()
            .filter(|p| p.is_shown_for("resource", resource) && p.is_shown_for("operation", operation))
            .collect()
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Codex {
    pub categories: Vec<String>,
    pub alias: Vec<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct CredentialRef {
    pub name: String,
    pub required: bool,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestDefaults {
    #[serde(rename = "baseURL")]
    pub base_url: String,
    pub headers: BTreeMap<String, String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyType {
    Options,
    String,
    Number,
    Boolean,
    DateTime,
    Collection,
    Json,
    Color,
}

/// Choices of an `options` property, or the fields of a `collection`.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum PropertyOptions {
    Values(Vec<OptionValue>),
    Fields(Vec<Property>),
}

#[derive(Clone, Debug, Serialize)]
pub struct OptionValue {
    pub name: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
}

impl OptionValue {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
            description: None,
            action: None,
        }
    }

    pub fn described(mut self, description: &str, action: &str) -> Self {
        self.description = Some(description.to_string());
        self.action = Some(action.to_string());
        self
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct DisplayOptions {
    pub show: BTreeMap<String, Vec<Value>>,
}

/// One form field.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub display_name: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub no_data_expression: bool,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_options: Option<DisplayOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<PropertyOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_options: Option<Value>,
}

impl Property {
    pub fn new(display_name: &str, name: &str, kind: PropertyType) -> Self {
        let default = match kind {
            PropertyType::Boolean => Value::Bool(false),
            PropertyType::Collection | PropertyType::Json => Value::Object(Default::default()),
            _ => Value::String(String::new()),
        };
        Self {
            display_name: display_name.to_string(),
            name: name.to_string(),
            kind,
            required: false,
            no_data_expression: false,
            default,
            description: None,
            placeholder: None,
            display_options: None,
            options: None,
            type_options: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn no_data_expression(mut self) -> Self {
        self.no_data_expression = true;
        self
    }

    pub fn default_value(mut self, default: Value) -> Self {
        self.default = default;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    pub fn placeholder(mut self, placeholder: &str) -> Self {
        self.placeholder = Some(placeholder.to_string());
        self
    }

    pub fn type_options(mut self, type_options: Value) -> Self {
        self.type_options = Some(type_options);
        self
    }

    /// Show this property only when `key` has one of `values`.
    pub fn show<V: Into<Value>>(mut self, key: &str, values: Vec<V>) -> Self {
        let display = self.display_options.get_or_insert_with(DisplayOptions::default);
        display
            .show
            .insert(key.to_string(), values.into_iter().map(Into::into).collect());
        self
    }

    pub fn values(mut self, values: Vec<OptionValue>) -> Self {
        self.options = Some(PropertyOptions::Values(values));
        self
    }

    pub fn fields(mut self, fields: Vec<Property>) -> Self {
        self.options = Some(PropertyOptions::Fields(fields));
        self
    }

    fn is_shown_for(&self, key: &str, value: &str) -> bool {
        match self
            .display_options
            .as_ref()
            .and_then(|d| d.show.get(key))
        {
            Some(allowed) => allowed.iter().any(|v| v.as_str() == Some(value)),
            None => true,
        }
    }
}
