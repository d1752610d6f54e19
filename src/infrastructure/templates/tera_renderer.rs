//! Tera-based fragment renderer

use std::error::Error as StdError;

use tera::Tera;

use crate::core::{AssemblyError, Context, Result};

/// Renders Tera templates against the assembly context.
///
/// Tera has no hook for defaulting unknown variables, so an undefined name
/// is an error whatever the configured substitution policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct TeraTemplateRenderer;

impl TeraTemplateRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, template: &str, context: &Context) -> Result<String> {
        let tera_context = tera::Context::from_value(context.to_json())?;

        Tera::one_off(template, &tera_context, false).map_err(|e| {
            // Tera nests the cause under a generic "Failed to render" error
            let mut source: Option<&dyn StdError> = Some(&e);
            while let Some(err) = source {
                let message = err.to_string();
                if message.contains("not found in context") {
                    return AssemblyError::UndefinedVariable(undefined_name(&message));
                }
                source = err.source();
            }
            AssemblyError::Tera(e)
        })
    }
}

/// Variable name from Tera's "Variable `x` not found in context" message
fn undefined_name(message: &str) -> String {
    message
        .split('`')
        .nth(1)
        .unwrap_or(message)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_renders_variables_and_filters() {
        let mut context = Context::from_pairs([("title", "demo")]);
        context.insert("items", json!(["a", "b"]));

        let rendered = TeraTemplateRenderer::new()
            .render(
                "# {{ title | upper }}\n{% for i in items %}- {{ i }}\n{% endfor %}",
                &context,
            )
            .unwrap();

        assert_eq!(rendered, "# DEMO\n- a\n- b\n");
    }

    #[test]
    fn test_does_not_escape_html() {
        let context = Context::from_pairs([("html", "<b>x</b>")]);
        let rendered = TeraTemplateRenderer::new().render("{{ html }}", &context).unwrap();
        assert_eq!(rendered, "<b>x</b>");
    }

    #[test]
    fn test_undefined_variable() {
        let err = TeraTemplateRenderer::new()
            .render("{{ nobody }}", &Context::new())
            .unwrap_err();
        assert!(matches!(err, AssemblyError::UndefinedVariable(ref name) if name == "nobody"));
    }

    #[test]
    fn test_undefined_name_extraction() {
        assert_eq!(
            undefined_name("Variable `nobody` not found in context while rendering '__tera_one_off'"),
            "nobody"
        );
    }
}
