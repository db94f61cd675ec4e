use crate::updates::UNKNOWN_VERSION;
use log::warn;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt;

/// One installed application as listed by `/services/apps/local`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppRecord {
    pub name: String,
    pub content: AppContent,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppContent {
    /// Rendered as text whatever its JSON type; `null` counts as absent.
    #[serde(default, deserialize_with = "version_text")]
    pub version: Option<String>,
    /// Only populated by Splunk when a newer release is known.
    #[serde(default)]
    pub update: Option<Value>,
}

/// Strings pass through verbatim, other JSON values are rendered as text.
pub fn render_version(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

fn version_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(Option::<Value>::deserialize(deserializer)?.and_then(render_version))
}

/// An installed app with a pending update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateResult {
    pub name: String,
    pub current_version: Option<String>,
    pub latest_version: String,
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: Current Version: {}, Latest Version: {}",
            self.name,
            self.current_version.as_deref().unwrap_or(UNKNOWN_VERSION),
            self.latest_version
        )
    }
}

/// Decoded inventory for one instance.
#[derive(Debug, Default)]
pub struct Inventory {
    pub apps: Vec<AppRecord>,
    /// Entries dropped because they lacked a string `name` or an object `content`.
    pub skipped: usize,
}

impl Inventory {
    /// Parses a Splunk JSON feed. Each element of `entry` is decoded on its
    /// own so a single malformed app does not sink the whole instance.
    pub fn from_feed(body: &str) -> Result<Self, serde_json::Error> {
        let json: Value = serde_json::from_str(body)?;

        let entries = match json.get("entry") {
            None | Some(Value::Null) => return Ok(Self::default()),
            Some(entry) => Vec::<Value>::deserialize(entry)?,
        };

        let mut inventory = Self::default();
        for entry in entries {
            match serde_json::from_value::<AppRecord>(entry) {
                Ok(app) => inventory.apps.push(app),
                Err(e) => {
                    warn!("Skipping malformed app entry: {}", e);
                    inventory.skipped += 1;
                }
            }
        }
        Ok(inventory)
    }
}
