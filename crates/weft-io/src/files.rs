//! File loading and saving for meshes, inputs and configs.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use weft_types::{WeftError, WeftResult};

use crate::contract::RelaxConfig;

/// Reads a JSON document.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> WeftResult<T> {
    let content = fs::read_to_string(path.as_ref())?;
    serde_json::from_str(&content).map_err(|e| {
        WeftError::Serialization(format!("{}: {}", path.as_ref().display(), e))
    })
}

/// Writes a value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> WeftResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| WeftError::Serialization(e.to_string()))?;
    fs::write(path, json)?;
    Ok(())
}

/// Parses a relax config from TOML text.
pub fn parse_config(content: &str) -> WeftResult<RelaxConfig> {
    toml::from_str(content).map_err(|e| WeftError::Serialization(e.to_string()))
}

/// Reads a relax config from a TOML file.
pub fn read_config(path: impl AsRef<Path>) -> WeftResult<RelaxConfig> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}
