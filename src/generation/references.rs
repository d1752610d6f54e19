//! Reference resolver - materialises `@file` fields of a content record

use std::path::Path;

use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::core::{AssemblyError, Context, Result};
use crate::generation::Session;
use crate::infrastructure::files;

/// Expands reference fields (strings starting with the sigil) into rendered file text
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver {
    sigil: char,
}

impl ReferenceResolver {
    pub fn new(sigil: char) -> Self {
        Self { sigil }
    }

    /// Relative path named by `value`, if it is a reference
    pub fn reference_path<'v>(&self, value: &'v JsonValue) -> Option<&'v str> {
        value
            .as_str()
            .and_then(|s| s.strip_prefix(self.sigil))
            .map(str::trim)
    }

    /// Return a copy of `record` with every reference replaced by the rendered
    /// text of its target, resolved against the directory of `record_path`.
    ///
    /// Targets are rendered leniently against `context`, i.e. without the
    /// record's own fields. The first failure aborts the whole record.
    pub fn resolve(
        &self,
        record: &Map<String, JsonValue>,
        record_path: &Path,
        context: &Context,
        session: &Session<'_>,
    ) -> Result<Map<String, JsonValue>> {
        let base = files::base_dir(record_path);
        let mut resolved = Map::with_capacity(record.len());

        for (key, value) in record {
            let Some(relative) = self.reference_path(value) else {
                resolved.insert(key.clone(), value.clone());
                continue;
            };

            let target = base.join(relative);
            if !target.is_file() {
                return Err(AssemblyError::ReferenceNotFound {
                    record: record_path.to_path_buf(),
                    reference: value.as_str().unwrap_or_default().to_string(),
                    target,
                });
            }

            debug!(field = %key, target = %target.display(), "Resolving reference");
            let text = files::read_text(&target)?;
            let rendered = session.render_lenient(&text, context)?;
            resolved.insert(key.clone(), JsonValue::String(rendered));
        }

        Ok(resolved)
    }
}

impl Default for ReferenceResolver {
    fn default() -> Self {
        Self::new('@')
    }
}
