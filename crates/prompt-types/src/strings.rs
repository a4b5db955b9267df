//! Localization collaborator: key -> string lookup.
//!
//! The core never hardcodes user-facing text; it resolves resource keys
//! through a [`StringResources`] implementation. [`StringCatalog`] is a
//! TOML-backed catalog (one table per resource file), loadable from a file
//! or built inline for tests.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::Result;

/// Key -> localized string lookup, scoped by resource file.
pub trait StringResources: Send + Sync {
    /// Look up `key` in the named resource file. `None` when absent.
    fn get_string(&self, key: &str, resource_file: &str) -> Option<String>;
}

/// Resolve a key, falling back to the bare key when the catalog has no entry.
///
/// The fallback keeps tests and partial catalogs usable: message composition
/// still produces deterministic output without a full string table.
pub fn localize(strings: &dyn StringResources, key: &str, resource_file: &str) -> String {
    strings
        .get_string(key, resource_file)
        .unwrap_or_else(|| key.to_string())
}

/// Substitute `{0}`, `{1}`, ... placeholders with the given arguments.
///
/// Source strings use positional placeholders; unmatched placeholders are
/// left untouched.
pub fn format_with(template: &str, args: &[&str]) -> String {
    let mut out = template.to_string();
    for (i, arg) in args.iter().enumerate() {
        out = out.replace(&format!("{{{i}}}"), arg);
    }
    out
}

/// A TOML string catalog: `[ResourceFile]` tables of `Key = "text"` pairs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StringCatalog {
    #[serde(flatten)]
    files: HashMap<String, HashMap<String, String>>,
}

impl StringCatalog {
    /// Create an empty catalog (every lookup falls back to the key).
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a catalog from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Insert one entry, creating the resource file table if needed.
    pub fn insert(
        &mut self,
        resource_file: impl Into<String>,
        key: impl Into<String>,
        text: impl Into<String>,
    ) {
        self.files
            .entry(resource_file.into())
            .or_default()
            .insert(key.into(), text.into());
    }
}

impl StringResources for StringCatalog {
    fn get_string(&self, key: &str, resource_file: &str) -> Option<String> {
        self.files.get(resource_file)?.get(key).cloned()
    }
}
