pub mod yarn;

pub use yarn::Yarn;

use crate::core::{PackError, PackResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// One installed package and the sub-tree below it, as reported by the
/// packager's list command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyNode {
    pub version: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub dependencies: IndexMap<String, DependencyNode>,
}

/// The production dependency tree of a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionTree {
    pub problems: Vec<String>,
    pub dependencies: IndexMap<String, DependencyNode>,
}

/// A local reference detected in a lockfile and its rebased form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RebaseRule {
    pub old_ref: String,
    pub new_ref: String,
}

/// A package manager backend.
///
/// Implementations shell out to the real tool. All operations are
/// blocking and run against a single working directory.
pub trait Packager {
    /// Filename of the lockfile this packager maintains.
    fn lockfile_name(&self) -> &str;

    /// Manifest sections that must be copied verbatim into a composed
    /// package.json for installs to behave the same.
    fn copy_package_section_names(&self) -> &[&'static str];

    /// Query the installed production dependency tree up to `depth`.
    fn production_tree(&self, cwd: &Path, depth: u32) -> PackResult<ProductionTree>;

    /// Rewrite relative `file:` references in a lockfile so they still
    /// resolve from a directory `path_offset` away from the original.
    fn rebase_lockfile(&self, path_offset: &str, lockfile: &str) -> PackResult<String>;

    /// Install dependencies into `cwd`. With `use_lockfile` the install
    /// fails if lockfile and manifest disagree.
    fn install(&self, cwd: &Path, extra_args: &[String], use_lockfile: bool) -> PackResult<()>;

    /// Remove installed packages the manifest no longer declares.
    fn prune(&self, cwd: &Path) -> PackResult<()>;

    /// Run the named package scripts, waiting for all of them.
    fn run_scripts(&self, cwd: &Path, script_names: &[String]) -> PackResult<()>;
}

/// Name-keyed collection of packager backends.
///
/// Built once per packaging call and handed to whatever needs to select
/// a backend; there is no process-wide registry.
pub struct PackagerRegistry {
    packagers: HashMap<String, Box<dyn Packager>>,
}

impl PackagerRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            packagers: HashMap::new(),
        }
    }

    /// Create a registry holding all built-in packagers
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("yarn", Box::new(Yarn::new()));
        registry
    }

    /// Register a packager under `id`, replacing any previous entry
    pub fn register(&mut self, id: &str, packager: Box<dyn Packager>) {
        self.packagers.insert(id.to_string(), packager);
    }

    /// Look up a packager by name
    pub fn get(&self, id: &str) -> PackResult<&dyn Packager> {
        self.packagers
            .get(id)
            .map(|packager| packager.as_ref())
            .ok_or_else(|| PackError::PackagerNotFound(id.to_string()))
    }
}

impl Default for PackagerRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
