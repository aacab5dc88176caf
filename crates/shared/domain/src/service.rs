//! Service catalog entries.
//!
//! A [`ServiceDefinition`] describes a provisionable offering: identity, human-facing
//! metadata, plans, the user-supplied variables it accepts and its resolved configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named, identified description of a provisionable offering.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceDefinition {
    /// Globally unique opaque identifier.
    pub id: String,
    /// Unique, human-readable name.
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub long_description: String,
    pub documentation_url: Option<String>,
    pub support_url: Option<String>,
    pub image_url: Option<String>,
    pub tags: Vec<String>,
    pub bindable: bool,
    pub metadata: BTreeMap<String, String>,
    pub plans: Vec<ServicePlan>,
    pub provision_inputs: Vec<ServiceVariable>,
    pub bind_inputs: Vec<ServiceVariable>,
    /// Resolved configuration (built-in defaults merged with operator overrides).
    pub config: BTreeMap<String, ConfigValue>,
}

impl ServiceDefinition {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: id.into(), name: name.into(), bindable: true, ..Self::default() }
    }

    #[must_use]
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    #[must_use]
    pub fn long_description(mut self, long_description: impl Into<String>) -> Self {
        self.long_description = long_description.into();
        self
    }

    #[must_use]
    pub fn documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn support_url(mut self, url: impl Into<String>) -> Self {
        self.support_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn bindable(mut self, bindable: bool) -> Self {
        self.bindable = bindable;
        self
    }

    #[must_use]
    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    #[must_use]
    pub fn plan(mut self, plan: ServicePlan) -> Self {
        self.plans.push(plan);
        self
    }

    #[must_use]
    pub fn provision_input(mut self, variable: ServiceVariable) -> Self {
        self.provision_inputs.push(variable);
        self
    }

    #[must_use]
    pub fn bind_input(mut self, variable: ServiceVariable) -> Self {
        self.bind_inputs.push(variable);
        self
    }

    #[must_use]
    pub fn config(mut self, key: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.config.insert(key.into(), value.into());
        self
    }

    /// The name shown to humans: the display name when set, otherwise the catalog name.
    #[must_use]
    pub fn title(&self) -> &str {
        if self.display_name.is_empty() { &self.name } else { &self.display_name }
    }
}

/// A tier of a service offering.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicePlan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub properties: BTreeMap<String, String>,
}

impl ServicePlan {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            properties: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

/// A user-supplied input accepted when provisioning or binding.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceVariable {
    pub field_name: String,
    #[serde(rename = "type")]
    pub kind: VariableKind,
    pub details: String,
    pub required: bool,
    pub default: Option<ConfigValue>,
}

impl ServiceVariable {
    pub fn new(
        field_name: impl Into<String>,
        kind: VariableKind,
        details: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            kind,
            details: details.into(),
            required: false,
            default: None,
        }
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn default_value(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariableKind {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl VariableKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }
}

/// Free-form structured configuration data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    List(Vec<ConfigValue>),
    Map(BTreeMap<String, ConfigValue>),
}

/// Scalars print bare; lists and maps print in a compact inline form.
impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::String(s) => f.write_str(s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl<T: Into<Self>> From<Vec<T>> for ConfigValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<BTreeMap<String, Self>> for ConfigValue {
    fn from(entries: BTreeMap<String, Self>) -> Self {
        Self::Map(entries)
    }
}
