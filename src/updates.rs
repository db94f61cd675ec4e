use crate::models::splunk::{render_version, AppRecord, UpdateResult};
use serde_json::Value;

pub const UNKNOWN_VERSION: &str = "Unknown";

/// Apps carrying update metadata, in inventory order. Duplicates in the
/// inventory are reported as-is.
pub fn detect(apps: &[AppRecord]) -> Vec<UpdateResult> {
    apps.iter()
        .filter_map(|app| {
            let update = app.content.update.as_ref().filter(|u| is_present(u))?;
            Some(UpdateResult {
                name: app.name.clone(),
                current_version: app.content.version.clone(),
                latest_version: latest_version(update),
            })
        })
        .collect()
}

/// JSON truthiness: null, false, zero and empty containers mean "no update".
fn is_present(update: &Value) -> bool {
    match update {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn latest_version(update: &Value) -> String {
    update
        .get("version")
        .cloned()
        .and_then(render_version)
        .unwrap_or_else(|| UNKNOWN_VERSION.to_string())
}
