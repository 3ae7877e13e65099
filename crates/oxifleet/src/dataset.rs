//! Named-collection JSON document.
//!
//! The collection-query endpoint serves slices of one static document: a
//! JSON object mapping collection names to arrays of records, each record
//! carrying an `id` of arbitrary underlying type. Lookup misses are
//! values, not errors: an absent collection is `[]`, an absent id is `{}`.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::error::{Error, Result};

/// A static document of named collections.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    collections: Map<String, Value>,
}

impl Dataset {
    /// Build a dataset from a JSON value, which must be an object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DatasetFormat`] when the root is not an object.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(collections) => Ok(Self { collections }),
            other => Err(Error::DatasetFormat {
                message: format!("document root must be an object, got {other}"),
            }),
        }
    }

    /// Load a dataset from a JSON file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be read or is not a JSON
    /// object.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::DatasetRead {
            path: path.to_path_buf(),
            source,
        })?;
        let value: Value = serde_json::from_str(&raw)?;
        Self::from_value(value)
    }

    /// The built-in seed dataset: vehicles, drivers and invoices derived
    /// from the dashboard sample data.
    #[must_use]
    pub fn seed() -> Self {
        let dashboard = crate::dashboard::Dashboard::sample();

        let mut vehicles: Vec<Value> = Vec::new();
        for entry in dashboard.serviced.iter().chain(&dashboard.pending) {
            vehicles.push(json!({
                "id": entry.id,
                "model": entry.model,
                "date": entry.date,
            }));
        }

        let drivers = json!([
            { "id": "DR-1VQ", "name": "Priya Raman", "status": "Active" },
            { "id": "DR-8HK", "name": "Marcus Webb", "status": "On leave" },
            { "id": "DR-3TN", "name": "Elena Sosa", "status": "Active" },
        ]);

        let mut collections = Map::new();
        collections.insert("vehicles".to_string(), Value::Array(vehicles));
        collections.insert("drivers".to_string(), drivers);
        collections.insert(
            "invoices".to_string(),
            serde_json::to_value(&dashboard.invoices).unwrap_or_default(),
        );

        Self { collections }
    }

    /// The entire document as a JSON object.
    #[must_use]
    pub fn document(&self) -> Value {
        Value::Object(self.collections.clone())
    }

    /// One collection's array; `[]` when the name is absent or the value
    /// is not an array.
    #[must_use]
    pub fn collection(&self, name: &str) -> Value {
        match self.collections.get(name) {
            Some(value @ Value::Array(_)) => value.clone(),
            _ => Value::Array(Vec::new()),
        }
    }

    /// The first record in `name` whose `id`, compared as a string, equals
    /// `id`; `{}` when none matches.
    #[must_use]
    pub fn record(&self, name: &str, id: &str) -> Value {
        let Some(Value::Array(items)) = self.collections.get(name) else {
            return Value::Object(Map::new());
        };

        items
            .iter()
            .find(|item| id_as_string(item.get("id")) == id)
            .cloned()
            .unwrap_or_else(|| Value::Object(Map::new()))
    }
}

/// Render a record's `id` field as the string it compares as.
fn id_as_string(id: Option<&Value>) -> String {
    match id {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}
