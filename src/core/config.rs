//! Assembly configuration
//!
//! Every field has a default, so an empty (or absent) TOML file yields the
//! stock behaviour: lenient substitution, `@` references, `contents`/`_paths`
//! child lists and `python3`/`sh` for external procedures.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::{AssemblyError, Result};

/// How the renderer treats a placeholder with no bound value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubstitutionPolicy {
    /// Unbound placeholders become the empty string
    #[default]
    Lenient,
    /// Unbound placeholders abort rendering
    Strict,
}

impl fmt::Display for SubstitutionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubstitutionPolicy::Lenient => write!(f, "lenient"),
            SubstitutionPolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for SubstitutionPolicy {
    type Err = AssemblyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "lenient" => Ok(SubstitutionPolicy::Lenient),
            "strict" => Ok(SubstitutionPolicy::Strict),
            other => Err(AssemblyError::config(format!(
                "unknown substitution policy '{other}'"
            ))),
        }
    }
}

/// Top-level assembly configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssemblyConfig {
    /// Missing-variable policy applied to every render
    pub policy: SubstitutionPolicy,

    /// Prefix marking a content record value as a file reference
    pub reference_sigil: char,

    /// Keys holding a nested manifest's child list, in precedence order
    pub child_list_keys: Vec<String>,

    /// Extension → program used to run external procedure scripts
    pub interpreters: BTreeMap<String, String>,

    /// Module reference → built-in procedure name
    pub procedures: BTreeMap<String, String>,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            policy: SubstitutionPolicy::default(),
            reference_sigil: '@',
            child_list_keys: vec!["contents".to_string(), "_paths".to_string()],
            interpreters: BTreeMap::from([
                ("py".to_string(), "python3".to_string()),
                ("sh".to_string(), "sh".to_string()),
            ]),
            procedures: BTreeMap::new(),
        }
    }
}

impl AssemblyConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: AssemblyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file from disk
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(AssemblyError::file_not_found(path));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<()> {
        if self.reference_sigil.is_whitespace() {
            return Err(AssemblyError::config("reference_sigil cannot be whitespace"));
        }
        if self.child_list_keys.is_empty() {
            return Err(AssemblyError::config(
                "child_list_keys must name at least one key",
            ));
        }
        Ok(())
    }
}
