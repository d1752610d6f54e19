//! Document assembler - renders the parts of a document-shaped manifest

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::{Context, Result};
use crate::generation::{DocumentManifest, FileKind, HandlerRequest, Part, Session};
use crate::infrastructure::files;

/// Walks the parts of a [`DocumentManifest`] in declaration order
pub struct DocumentAssembler;

impl DocumentAssembler {
    /// Assemble every part of `manifest`, emitting output per content file.
    ///
    /// Each part starts from the manifest context (plus its own `context`);
    /// content files within a part see the fields of earlier files, parts
    /// never see each other's.
    pub fn assemble(
        manifest_path: &Path,
        manifest: &DocumentManifest,
        initial: &Context,
        session: &mut Session<'_>,
    ) -> Result<()> {
        let base = files::base_dir(manifest_path);
        let manifest_context = match &manifest.context {
            Some(fields) => initial.merge(&Context::from_json_object(fields.clone())),
            None => initial.clone(),
        };

        debug!(
            path = %manifest_path.display(),
            parts = manifest.parts.len(),
            variables = manifest_context.len(),
            "Assembling document"
        );

        for (index, part) in manifest.parts.iter().enumerate() {
            Self::assemble_part(&base, index, part, &manifest_context, session)?;
        }

        Ok(())
    }

    fn assemble_part(
        base: &Path,
        index: usize,
        part: &Part,
        manifest_context: &Context,
        session: &mut Session<'_>,
    ) -> Result<()> {
        let template = resolve_template(base, index, part.template.as_deref());
        let mut context = match &part.context {
            Some(fields) => manifest_context.merge(&Context::from_json_object(fields.clone())),
            None => manifest_context.clone(),
        };

        if part.paths.is_empty() {
            warn!(part = index, "Part lists no content files");
        }

        for content in &part.paths {
            let path = base.join(content);
            let kind = match session.dispatcher().classify(&path)? {
                FileKind::Manifest => FileKind::ContentRecord,
                other => other,
            };
            let request = HandlerRequest::with_template(path, template.clone());
            if let Some(next) = session.dispatch_as(&kind, &request, &context)? {
                context = next;
            }
        }

        Ok(())
    }
}

/// Absent or non-existent templates degrade to "no template"
fn resolve_template(base: &Path, index: usize, template: Option<&str>) -> Option<PathBuf> {
    let name = template?;
    let path = base.join(name);
    if path.is_file() {
        Some(path)
    } else {
        warn!(part = index, template = %path.display(), "Part template not found, rendering without it");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tracing_test::traced_test;

    #[test]
    fn test_resolve_template_absent() {
        assert_eq!(resolve_template(Path::new("/tmp"), 0, None), None);
    }

    #[test]
    fn test_resolve_template_existing() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("t.md"), "# ${title}").unwrap();

        assert_eq!(
            resolve_template(dir.path(), 0, Some("t.md")),
            Some(dir.path().join("t.md"))
        );
    }

    #[test]
    #[traced_test]
    fn test_resolve_template_missing_warns() {
        let dir = TempDir::new().unwrap();

        assert_eq!(resolve_template(dir.path(), 2, Some("nope.md")), None);
        assert!(logs_contain("Part template not found"));
    }
}
