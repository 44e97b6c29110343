//! Domain value objects: TemplateName, ValueKind.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. A
//! [`TemplateName`] is the key a template is registered under inside a
//! template namespace and the string a file's context uses to select it.

use std::fmt;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::error::DomainError;

// ── TemplateName ──────────────────────────────────────────────────────────────

/// Name of a template inside a namespace.
///
/// Derived from the template file's path relative to the namespace base
/// directory, joined with the platform separator (`partials/x.tmpl` on Unix).
///
/// Invariant: never empty, never absolute, never contains `..`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateName(String);

impl TemplateName {
    /// Build a name from a path already made relative to the base directory.
    pub fn from_relative_path(path: &Path) -> Result<Self, DomainError> {
        let invalid = |reason: &str| DomainError::InvalidTemplateName {
            name: path.display().to_string(),
            reason: reason.into(),
        };

        if path.as_os_str().is_empty() {
            return Err(invalid("name is empty"));
        }

        for component in path.components() {
            match component {
                Component::Normal(_) | Component::CurDir => {}
                Component::ParentDir => return Err(invalid("name escapes the base directory")),
                Component::RootDir | Component::Prefix(_) => {
                    return Err(invalid("name must be relative"));
                }
            }
        }

        let name = path
            .to_str()
            .ok_or_else(|| invalid("name is not valid UTF-8"))?;

        Ok(Self(name.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TemplateName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemplateName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── ValueKind ─────────────────────────────────────────────────────────────────

/// Coarse type of a context value, used in type-mismatch diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl ValueKind {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(_) => Self::Bool,
            Value::Number(_) => Self::Number,
            Value::String(_) => Self::String,
            Value::Array(_) => Self::Array,
            Value::Object(_) => Self::Object,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "a boolean",
            Self::Number => "a number",
            Self::String => "a string",
            Self::Array => "an array",
            Self::Object => "an object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
