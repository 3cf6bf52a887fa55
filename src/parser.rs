use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;

/// Reads scene descriptions. The document shape is left to the template.
pub struct SceneParser;

impl SceneParser {
    /// Parse a JSON scene file
    pub fn parse_json(path: &Path) -> Result<Value> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read scene file: {}", path.display()))?;

        let scene: Value = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse scene JSON: {}", path.display()))?;

        Ok(scene)
    }

    /// One-line description of a scene document for logging
    pub fn summarize(scene: &Value) -> String {
        match scene {
            Value::Object(map) => {
                let title = map.get("title").and_then(Value::as_str).unwrap_or("untitled");
                match map.get("scenes").and_then(Value::as_array) {
                    Some(steps) => format!("'{}' ({} steps)", title, steps.len()),
                    None => format!("'{}'", title),
                }
            }
            Value::Array(items) => format!("array of {} items", items.len()),
            other => format!("scalar {}", other),
        }
    }
}
