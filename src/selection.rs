//! Per-response field selection.
//!
//! A request may restrict the serialized fields of any resource with a
//! query parameter keyed by the resource's snake-cased name, e.g.
//! `?complaint=incident_title,status`. Computed fields are deferred behind
//! thunks and only evaluated when they survive the selection.

use std::collections::{HashMap, HashSet};

use crate::models::keys;

/// A field value that is either already materialized or deferred.
pub enum FieldValue {
    Eager(serde_json::Value),
    Lazy(Box<dyn FnOnce() -> serde_json::Value + Send>),
}

impl FieldValue {
    /// Materialize a serializable value now.
    pub fn eager<T: serde::Serialize>(value: T) -> Self {
        Self::Eager(serde_json::to_value(value).unwrap_or(serde_json::Value::Null))
    }

    /// Defer a computation until (and unless) the field is selected.
    pub fn lazy<F>(thunk: F) -> Self
    where
        F: FnOnce() -> serde_json::Value + Send + 'static,
    {
        Self::Lazy(Box::new(thunk))
    }

    fn resolve(self) -> serde_json::Value {
        match self {
            Self::Eager(value) => value,
            Self::Lazy(thunk) => thunk(),
        }
    }
}

/// Parsed field selections, keyed by resource name.
#[derive(Debug, Clone, Default)]
pub struct SelectedFields {
    by_resource: HashMap<String, HashSet<String>>,
}

impl SelectedFields {
    /// Extract selections from the raw query map. Reserved list-parameter
    /// keys are never interpreted as resource names.
    #[must_use]
    pub fn from_query(raw: &HashMap<String, String>) -> Self {
        let by_resource = raw
            .iter()
            .filter(|(key, _)| !keys::RESERVED.contains(&key.as_str()))
            .map(|(key, value)| {
                let fields = value
                    .split(',')
                    .map(str::trim)
                    .filter(|f| !f.is_empty())
                    .map(ToString::to_string)
                    .collect();
                (key.clone(), fields)
            })
            .collect();
        Self { by_resource }
    }

    /// The selected field set for a resource, if the request constrained it.
    #[must_use]
    pub fn for_resource(&self, resource: &str) -> Option<&HashSet<String>> {
        self.by_resource.get(resource).filter(|set| !set.is_empty())
    }
}

/// A resource whose serialized shape honors field selection.
pub trait SelectableResource {
    /// Snake-cased resource name used as the selection query key.
    const RESOURCE_KEY: &'static str;

    /// The full field set, in output order. Expensive fields should be
    /// wrapped in [`FieldValue::lazy`] so an unselected field costs nothing.
    fn fields(self) -> Vec<(&'static str, FieldValue)>;

    /// Serialize, keeping only selected fields. Unselected lazy fields are
    /// dropped without being evaluated; selected names that match no field
    /// are ignored.
    fn render(self, selection: &SelectedFields) -> serde_json::Value
    where
        Self: Sized,
    {
        let selected = selection.for_resource(Self::RESOURCE_KEY);
        let mut output = serde_json::Map::new();
        for (name, value) in self.fields() {
            if selected.is_some_and(|set| !set.contains(name)) {
                continue;
            }
            output.insert(name.to_string(), value.resolve());
        }
        serde_json::Value::Object(output)
    }
}
