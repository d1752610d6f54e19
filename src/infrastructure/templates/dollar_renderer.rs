//! `${name}` placeholder renderer
//!
//! Recognises `${identifier}`, bare `$identifier` and the `$$` escape.
//! Any other `$` is rejected with its line and column.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::core::{AssemblyError, Lookup, Result, SubstitutionPolicy};
use crate::generation::TemplateRenderer;

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\$(?:(?P<escaped>\$)|(?P<named>[_A-Za-z][_A-Za-z0-9]*)|\{(?P<braced>[_A-Za-z][_A-Za-z0-9]*)\}|(?P<invalid>))",
    )
    .expect("placeholder pattern is valid")
});

/// Single-pass `$`-placeholder renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct DollarTemplateRenderer;

impl DollarTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for DollarTemplateRenderer {
    fn render(
        &self,
        template: &str,
        lookup: &dyn Lookup,
        policy: SubstitutionPolicy,
    ) -> Result<String> {
        let mut rendered = String::with_capacity(template.len());
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(template) {
            let Some(whole) = caps.get(0) else {
                continue;
            };
            rendered.push_str(&template[last..whole.start()]);
            rendered.push_str(&substitute(&caps, template, whole.start(), lookup, policy)?);
            last = whole.end();
        }

        rendered.push_str(&template[last..]);
        Ok(rendered)
    }
}

fn substitute(
    caps: &Captures<'_>,
    template: &str,
    offset: usize,
    lookup: &dyn Lookup,
    policy: SubstitutionPolicy,
) -> Result<String> {
    if caps.name("escaped").is_some() {
        return Ok("$".to_string());
    }

    let Some(name) = caps.name("named").or_else(|| caps.name("braced")) else {
        let (line, column) = line_and_column(template, offset);
        return Err(AssemblyError::MalformedTemplate { line, column });
    };

    match (lookup.lookup(name.as_str()), policy) {
        (Some(value), _) => Ok(value),
        (None, SubstitutionPolicy::Lenient) => Ok(String::new()),
        (None, SubstitutionPolicy::Strict) => {
            Err(AssemblyError::UndefinedVariable(name.as_str().to_string()))
        }
    }
}

/// 1-based line and column of a byte offset
fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
