use crate::error::NexusError;
use serde::Serialize;
use serde_json::{Map, Value};

/// Name under which the browser adapter registers itself with the CMS.
pub const BACKEND_NAME: &str = "luva";

/// The CMS configuration document, kept as loose JSON so every key the
/// site author wrote reaches the browser untouched and in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CmsManifest(Map<String, Value>);

impl CmsManifest {
    /// Parse YAML source. Documents that are not a mapping yield an empty manifest.
    pub fn from_yaml(source: &str) -> Result<Self, NexusError> {
        if source.trim().is_empty() {
            return Ok(CmsManifest::default());
        }
        let value: Value = serde_yaml::from_str(source)?;
        Ok(match value {
            Value::Object(map) => CmsManifest(map),
            _ => CmsManifest::default(),
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn has_collections(&self) -> bool {
        match self.0.get("collections") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(items)) => !items.is_empty(),
            Some(_) => true,
        }
    }

    pub fn ensure_collections(&self) -> Result<(), NexusError> {
        if self.has_collections() {
            Ok(())
        } else {
            Err(NexusError::app("No backend found in decapconfig.yml"))
        }
    }

    /// Point the manifest at the browser adapter.
    ///
    /// Overrides `backend.name` and `backend.repo`, turns off the CMS's own
    /// config loading and embeds the access token. The token ends up in the
    /// served page and is readable by anyone who can view its source.
    pub fn inject(&mut self, repository: &str, token: &str) {
        let backend = self
            .0
            .entry("backend")
            .or_insert_with(|| Value::Object(Map::new()));
        if !backend.is_object() {
            *backend = Value::Object(Map::new());
        }
        if let Value::Object(backend) = backend {
            backend.insert("name".into(), Value::String(BACKEND_NAME.into()));
            backend.insert("repo".into(), Value::String(repository.into()));
        }
        self.0
            .insert("load_config_file".into(), Value::Bool(false));
        self.0
            .insert("githubToken".into(), Value::String(token.into()));
    }

    /// JSON literal that can sit inside an inline `<script>` element.
    ///
    /// Closing tags, comment openers and the two JavaScript line terminators
    /// are escaped inside string values.
    pub fn to_script_literal(&self) -> Result<String, NexusError> {
        Ok(serde_json::to_string(&self.0)?
            .replace("<!--", "\\u003c!--")
            .replace("</", "<\\/")
            .replace('\u{2028}', "\\u2028")
            .replace('\u{2029}', "\\u2029"))
    }

    pub fn backend_str(&self, key: &str) -> Option<&str> {
        self.0.get("backend")?.get(key)?.as_str()
    }

    pub fn backend_bool(&self, key: &str) -> Option<bool> {
        self.0.get("backend")?.get(key)?.as_bool()
    }

    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key)?.as_str()
    }
}
