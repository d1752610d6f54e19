//! File access helpers
//!
//! Every read is a scoped acquisition: the file is opened, read fully and
//! closed before the caller moves on.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};

use crate::core::{AssemblyError, Result};

/// Directory that relative paths named inside `path` resolve against
pub fn base_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}

/// Read a whole file as UTF-8 text
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => AssemblyError::file_not_found(path),
        _ => AssemblyError::Io(e),
    })
}

/// Read and parse a JSON document
pub fn load_json(path: &Path) -> Result<JsonValue> {
    let text = read_text(path)?;
    serde_json::from_str(&text)
        .map_err(|e| AssemblyError::malformed_manifest(path, format!("invalid JSON: {e}")))
}

/// Read a JSON document that must be an object
pub fn load_json_object(path: &Path) -> Result<Map<String, JsonValue>> {
    match load_json(path)? {
        JsonValue::Object(map) => Ok(map),
        _ => Err(AssemblyError::malformed_manifest(
            path,
            "top level must be a JSON object",
        )),
    }
}
