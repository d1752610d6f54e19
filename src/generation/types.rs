//! Core types for the assembly domain

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::core::error::{AssemblyError, Result};

/// Type tag a file is classified into before dispatch
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FileKind {
    /// JSON manifest, either nested (child list) or document (parts) shaped
    Manifest,
    /// Markdown fragment rendered and emitted as-is
    Markdown,
    /// Procedural fragment that transforms the context
    Procedural,
    /// JSON content record rendered through a part template
    ContentRecord,
    /// Fragment rendered with the Tera engine
    TeraFragment,
    /// Handler registered by an embedding application
    Custom(String),
}

impl FileKind {
    pub fn as_str(&self) -> &str {
        match self {
            FileKind::Manifest => "manifest",
            FileKind::Markdown => "markdown",
            FileKind::Procedural => "procedural",
            FileKind::ContentRecord => "content-record",
            FileKind::TeraFragment => "tera",
            FileKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single file handed to a handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerRequest {
    pub path: PathBuf,
    /// Part template governing a content record, if any
    pub template: Option<PathBuf>,
}

impl HandlerRequest {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            template: None,
        }
    }

    pub fn with_template(path: impl Into<PathBuf>, template: Option<PathBuf>) -> Self {
        Self {
            path: path.into(),
            template,
        }
    }
}

/// Document-shaped manifest: top-level context plus an ordered list of parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentManifest {
    #[serde(default)]
    pub context: Option<Map<String, JsonValue>>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One optional template paired with the content files rendered through it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub template: Option<String>,
    #[serde(default)]
    pub paths: Vec<String>,
    /// Variables visible only to this part's content files
    #[serde(default)]
    pub context: Option<Map<String, JsonValue>>,
}

/// A manifest after its shape has been recognised
#[derive(Debug, Clone, PartialEq)]
pub enum Manifest {
    Document(DocumentManifest),
    Nested {
        /// Whole JSON body, merged into the context before the children run
        body: Map<String, JsonValue>,
        children: Vec<String>,
    },
}

impl Manifest {
    /// Recognise the manifest shape.
    ///
    /// A `parts` key selects the document shape. Otherwise the first key of
    /// `child_list_keys` present in the body holds the child list: an array
    /// of paths gives a nested manifest, an array of objects is read as parts.
    pub fn parse(path: &Path, value: JsonValue, child_list_keys: &[String]) -> Result<Self> {
        let JsonValue::Object(body) = value else {
            return Err(AssemblyError::malformed_manifest(
                path,
                "top level must be a JSON object",
            ));
        };

        if body.contains_key("parts") {
            return parse_document(path, body);
        }

        let Some((key, children)) = child_list_keys
            .iter()
            .find_map(|key| body.get(key).map(|v| (key, v)))
        else {
            return Err(AssemblyError::malformed_manifest(
                path,
                format!(
                    "expected 'parts' or a child list ({})",
                    child_list_keys.join(", ")
                ),
            ));
        };

        let JsonValue::Array(items) = children else {
            return Err(AssemblyError::malformed_manifest(
                path,
                format!("'{key}' must be an array"),
            ));
        };

        if !items.is_empty() && items.iter().all(JsonValue::is_object) {
            let mut document = body.clone();
            let parts = document.remove(key).unwrap_or_default();
            document.insert("parts".to_string(), parts);
            return parse_document(path, document);
        }

        let children = items
            .iter()
            .map(|item| {
                item.as_str().map(str::to_string).ok_or_else(|| {
                    AssemblyError::malformed_manifest(
                        path,
                        format!("'{key}' entries must be path strings"),
                    )
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Manifest::Nested { body, children })
    }
}

fn parse_document(path: &Path, body: Map<String, JsonValue>) -> Result<Manifest> {
    serde_json::from_value(JsonValue::Object(body))
        .map(Manifest::Document)
        .map_err(|e| AssemblyError::malformed_manifest(path, e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keys() -> Vec<String> {
        vec!["contents".to_string(), "_paths".to_string()]
    }

    #[test]
    fn test_parse_document_manifest() {
        let value = json!({
            "context": {"title": "Demo"},
            "parts": [{"template": "t.md", "paths": ["c.json"]}, {"paths": []}]
        });

        let Manifest::Document(doc) = Manifest::parse(Path::new("m.json"), value, &keys()).unwrap()
        else {
            panic!("expected document manifest");
        };

        assert_eq!(doc.context.unwrap()["title"], "Demo");
        assert_eq!(doc.parts.len(), 2);
        assert_eq!(doc.parts[0].template.as_deref(), Some("t.md"));
        assert_eq!(doc.parts[0].paths, vec!["c.json"]);
        assert!(doc.parts[1].template.is_none());
    }

    #[test]
    fn test_parse_nested_manifest() {
        let value = json!({"title": "Hi", "_paths": ["a.md", "b.py"]});

        let manifest = Manifest::parse(Path::new("m.json"), value, &keys()).unwrap();

        match manifest {
            Manifest::Nested { body, children } => {
                assert_eq!(children, vec!["a.md", "b.py"]);
                assert_eq!(body["title"], "Hi");
            }
            other => panic!("unexpected manifest: {other:?}"),
        }
    }

    #[test]
    fn test_contents_takes_precedence_over_paths() {
        let value = json!({"contents": ["first.md"], "_paths": ["second.md"]});

        let Manifest::Nested { children, .. } =
            Manifest::parse(Path::new("m.json"), value, &keys()).unwrap()
        else {
            panic!("expected nested manifest");
        };

        assert_eq!(children, vec!["first.md"]);
    }

    #[test]
    fn test_child_list_of_objects_reads_as_parts() {
        let value = json!({
            "context": {"title": "Legacy"},
            "contents": [{"template": "t.md", "paths": ["c.json"]}]
        });

        let Manifest::Document(doc) = Manifest::parse(Path::new("m.json"), value, &keys()).unwrap()
        else {
            panic!("expected document manifest");
        };

        assert_eq!(doc.parts.len(), 1);
        assert_eq!(doc.parts[0].paths, vec!["c.json"]);
    }

    #[test]
    fn test_missing_child_list_is_malformed() {
        let err = Manifest::parse(Path::new("m.json"), json!({"title": "x"}), &keys()).unwrap_err();
        assert!(matches!(err, AssemblyError::MalformedManifest { .. }));
        assert!(err.to_string().contains("contents, _paths"));
    }

    #[test]
    fn test_non_object_manifest_is_malformed() {
        let err = Manifest::parse(Path::new("m.json"), json!(["a.md"]), &keys()).unwrap_err();
        assert!(matches!(err, AssemblyError::MalformedManifest { .. }));
    }

    #[test]
    fn test_non_string_child_is_malformed() {
        let err =
            Manifest::parse(Path::new("m.json"), json!({"_paths": ["a.md", 3]}), &keys())
                .unwrap_err();
        assert!(matches!(err, AssemblyError::MalformedManifest { .. }));
    }

    #[test]
    fn test_file_kind_display() {
        assert_eq!(FileKind::ContentRecord.to_string(), "content-record");
        assert_eq!(FileKind::Custom("csv".to_string()).to_string(), "csv");
    }
}
