//! Upgrade an existing YAML config file in place.
//!
//! Older config files lack keys added in later releases. Missing keys are
//! inserted with their default values; keys already present are left alone.

use super::{default_category, default_daily_target, default_project, default_separator_char};
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn default_values() -> Vec<(&'static str, Value)> {
    vec![
        ("daily_target_hours", Value::from(default_daily_target())),
        ("default_category", Value::from(default_category())),
        ("default_project", Value::from(default_project())),
        ("separator_char", Value::from(default_separator_char())),
    ]
}

/// Keys the file at `path` is missing. An absent file reports nothing.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let map = read_mapping(path)?;
    Ok(default_values()
        .into_iter()
        .filter(|(k, _)| !map.contains_key(Value::from(*k)))
        .map(|(k, _)| k.to_string())
        .collect())
}

/// Insert every missing key and rewrite the file. Returns the keys added.
pub fn fill_missing_fields(path: &Path) -> AppResult<Vec<String>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let mut map = read_mapping(path)?;
    let mut added = Vec::new();

    for (key, value) in default_values() {
        let k = Value::from(key);
        if !map.contains_key(&k) {
            map.insert(k, value);
            added.push(key.to_string());
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(map))
            .map_err(|e| AppError::Config(format!("serialize {:?}: {}", path, e)))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    let yaml: Value = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("{:?}: {}", path, e)))?;

    match yaml {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!("{:?} is not a YAML mapping", path))),
    }
}
