use crate::core::path::join_relative;
use crate::core::{PackError, PackResult};
use crate::package::module_id::split_module_id;
use indexmap::IndexMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Minimal manifest written next to the bundle so a package manager can
/// install exactly the shipped externals there.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositePackage {
    pub name: String,
    pub version: String,
    pub description: String,
    pub private: bool,
    /// Sections copied verbatim from the project manifest, e.g. yarn's
    /// `resolutions`.
    #[serde(flatten)]
    pub sections: IndexMap<String, Value>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, String>,
}

/// Build the composite manifest for `resolved` module ids.
///
/// Local path references in versions are rebased by `path_offset` so
/// they stay valid from the bundle directory.
pub fn compose(
    resolved: &[String],
    sections: &IndexMap<String, Value>,
    path_offset: &str,
) -> PackResult<CompositePackage> {
    let mut dependencies = IndexMap::new();
    for id in resolved {
        let (name, version) = split_module_id(id);
        let version = rebase_file_reference(path_offset, version.unwrap_or_default())?;
        dependencies.insert(name.to_string(), version);
    }

    Ok(CompositePackage {
        name: "package".to_string(),
        version: "1.0.0".to_string(),
        description: "Packaged externals for package".to_string(),
        private: true,
        sections: sections.clone(),
        dependencies,
    })
}

/// Rewrite a local path reference so it resolves from a directory
/// `path_offset` away. Anything that is not a relative `file:`, `./` or
/// `../` reference passes through untouched.
pub fn rebase_file_reference(path_offset: &str, version: &str) -> PackResult<String> {
    let local_reference = Regex::new(r"^(?:file:[^/]{2}|\./|\.\./)")
        .map_err(|e| PackError::Manifest(format!("Invalid file reference pattern: {}", e)))?;

    if !local_reference.is_match(version) {
        return Ok(version.to_string());
    }

    let (marker, file_path) = match version.strip_prefix("file:") {
        Some(file_path) => ("file:", file_path),
        None => ("", version),
    };

    Ok(format!("{}{}", marker, join_relative(path_offset, file_path)))
}
