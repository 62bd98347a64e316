//! Model catalog payload served by the companion server.
//!
//! `GET {base}paperspace-model-cockpit/api/models` returns
//!
//! ```json
//! { "models": [ { "id": "m1", "display_name": "Llama", "version": "1.0",
//!                 "path": "/models/m1", "installed": true } ] }
//! ```
//!
//! The payload is normalized leniently: a missing or malformed `models`
//! field is an empty catalog, and every optional descriptor field degrades
//! to a display fallback instead of failing the whole response. Scalar
//! values in text fields are shown as written; `installed` follows
//! JavaScript truthiness.

use serde::Serialize;
use serde_json::Value;

// ─── Descriptor ───────────────────────────────────────────────────────────────

/// One catalog entry. Immutable from the panel's side.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelDescriptor {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub installed: bool,
    /// Backend model type (e.g. "checkpoint", "lora"); informational
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    /// Backend download source, passed through untouched
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl ModelDescriptor {
    pub fn new(id: impl Into<String>, installed: bool) -> Self {
        Self {
            id: id.into(),
            display_name: None,
            version: None,
            path: None,
            installed,
            model_type: None,
            source: None,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Build from one JSON entry. `None` when the entry has no usable `id`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let obj = value.as_object()?;
        let id = obj.get("id")?.as_str()?;
        if id.is_empty() {
            return None;
        }

        let text = |key: &str| obj.get(key).and_then(scalar_text);

        Some(Self {
            id: id.to_string(),
            display_name: text("display_name"),
            version: text("version"),
            path: text("path"),
            installed: obj.get("installed").is_some_and(truthy),
            model_type: text("type"),
            source: obj.get("source").filter(|s| !s.is_null()).cloned(),
        })
    }

    /// Display name, or the id when absent
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.id)
    }

    /// Version, or `-` when absent
    pub fn version_label(&self) -> &str {
        self.version.as_deref().unwrap_or("-")
    }

    /// `"{label} ({version})"`
    pub fn primary_text(&self) -> String {
        format!("{} ({})", self.label(), self.version_label())
    }

    /// Path, or the empty string when absent
    pub fn secondary_text(&self) -> &str {
        self.path.as_deref().unwrap_or("")
    }

    pub fn status_label(&self) -> &'static str {
        if self.installed {
            "installed"
        } else {
            "not installed"
        }
    }
}

/// Strings as-is, numbers and booleans in their JSON spelling.
/// Null, arrays and objects count as absent.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

// ─── Response ─────────────────────────────────────────────────────────────────

/// Top-level payload: the ordered catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelDescriptor>,
}

impl ModelsResponse {
    pub fn new(models: Vec<ModelDescriptor>) -> Self {
        Self { models }
    }

    /// Normalize a decoded JSON body. Never fails.
    pub fn from_value(body: &Value) -> Self {
        let Some(entries) = body.get("models").and_then(Value::as_array) else {
            if body.get("models").is_some_and(|m| !m.is_null()) {
                ::log::warn!("Ignoring non-array 'models' field in models response");
            }
            return Self::default();
        };

        let mut models: Vec<ModelDescriptor> = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let Some(model) = ModelDescriptor::from_value(entry) else {
                ::log::warn!("Skipping models[{}]: missing or invalid 'id'", index);
                continue;
            };
            if models.iter().any(|m| m.id == model.id) {
                ::log::warn!("Skipping models[{}]: duplicate id '{}'", index, model.id);
                continue;
            }
            models.push(model);
        }

        Self { models }
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelDescriptor> {
        self.models.iter()
    }

    pub fn installed_count(&self) -> usize {
        self.models.iter().filter(|m| m.installed).count()
    }
}

impl<'a> IntoIterator for &'a ModelsResponse {
    type Item = &'a ModelDescriptor;
    type IntoIter = std::slice::Iter<'a, ModelDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.models.iter()
    }
}
