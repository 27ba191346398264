use crate::core::{PackError, PackResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A parsed `package.json`.
///
/// Only the fields the packaging engine reads are modeled. Everything
/// else lands in `extra`, keyed as written, so sections like
/// `resolutions` can be copied into a composed manifest verbatim.
/// Maps keep the file's key order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dev_dependencies: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub peer_dependencies: IndexMap<String, String>,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub peer_dependencies_meta: IndexMap<String, PeerDependencyMeta>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspaces: Option<serde_json::Value>,
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PeerDependencyMeta {
    #[serde(default)]
    pub optional: bool,
}

impl PackageJson {
    /// Read a package.json, returning `None` if the file does not exist
    pub fn read(path: &Path) -> PackResult<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let manifest: PackageJson = serde_json::from_str(&content)
            .map_err(|e| PackError::Manifest(format!("Failed to parse {}: {}", path.display(), e)))?;

        Ok(Some(manifest))
    }

    /// Read a package.json that must exist
    pub fn load(path: &Path) -> PackResult<Self> {
        Self::read(path)?.ok_or_else(|| {
            PackError::Manifest(format!("package.json not found at {}", path.display()))
        })
    }

    /// Whether this manifest declares a workspace root.
    ///
    /// npm accepts both an array and an object for `workspaces`; an
    /// explicit `null` does not count.
    pub fn is_workspace_root(&self) -> bool {
        matches!(&self.workspaces, Some(value) if !value.is_null())
    }

    /// Copy the named unmodeled sections (for example `resolutions`),
    /// in the order requested, skipping sections this manifest lacks
    pub fn pick_sections(&self, names: &[&str]) -> IndexMap<String, serde_json::Value> {
        let mut sections = IndexMap::new();
        for name in names {
            if let Some(value) = self.extra.get(*name) {
                sections.insert(name.to_string(), value.clone());
            }
        }
        sections
    }
}
