use crate::core::{PackError, PackResult};
use crate::package::manifest::PackageJson;
use std::path::{Path, PathBuf};

/// Modules the target runtime ships preinstalled. A dev-only
/// declaration of one of these is excluded instead of rejected.
const RUNTIME_PROVIDED_MODULES: &[&str] = &["aws-sdk"];

/// Resolves external module names to the `name@version` ids that must
/// actually be shipped next to a bundle, including every non-optional
/// peer dependency of each module.
///
/// Resolution works purely from the manifest declarations and whatever
/// is installed under `node_modules`; no version range solving happens
/// here.
#[derive(Debug)]
pub struct DependencyResolver {
    local_dir: PathBuf,
    root_dir: PathBuf,
    manifest: PackageJson,
    runtime_provided: Vec<String>,
}

impl DependencyResolver {
    /// Create a resolver for the manifest at `manifest_path`.
    ///
    /// `root_manifest_path` points at the workspace root manifest; its
    /// directory is consulted as the fallback `node_modules` location.
    /// Outside a workspace both paths are the same file.
    pub fn new(
        manifest_path: &Path,
        root_manifest_path: &Path,
        extra_runtime_provided: &[String],
    ) -> PackResult<Self> {
        let manifest = PackageJson::load(manifest_path)?;

        let mut runtime_provided: Vec<String> = RUNTIME_PROVIDED_MODULES
            .iter()
            .map(|module| module.to_string())
            .collect();
        runtime_provided.extend(extra_runtime_provided.iter().cloned());

        Ok(Self {
            local_dir: parent_dir(manifest_path),
            root_dir: parent_dir(root_manifest_path),
            manifest,
            runtime_provided,
        })
    }

    /// Resolve `externals` into a deduplicated module id list,
    /// preserving the order modules were first seen in.
    pub fn resolve(&self, externals: &[String]) -> PackResult<Vec<String>> {
        let collected = self.collect_modules(externals, &mut Vec::new())?;

        let mut modules: Vec<String> = Vec::new();
        for module in collected {
            if !modules.contains(&module) {
                modules.push(module);
            }
        }
        Ok(modules)
    }

    /// One resolution pass over `externals`, returning the raw module id
    /// sequence. Peer dependencies recurse through here; duplicates are
    /// left for `resolve` to drop. `walk` holds the names whose peer
    /// lists are being expanded; meeting one again closes a cycle and
    /// fails the pass, which the peer caller demotes to a warning.
    fn collect_modules(
        &self,
        externals: &[String],
        walk: &mut Vec<String>,
    ) -> PackResult<Vec<String>> {
        let mut modules = Vec::new();

        for external in externals {
            // A name already on the walk closes a peer cycle
            if walk.contains(external) {
                return Err(PackError::Dependency(external.clone()));
            }

            let declared = self.manifest.dependencies.get(external);
            let declared_dev = self.manifest.dev_dependencies.get(external);

            // (1) Not declared anywhere: the module cannot be shipped
            if declared.is_none() && declared_dev.is_none() {
                println!(
                    "INFO: Runtime dependency '{}' not found in dependencies or devDependencies. It has been excluded automatically.",
                    external
                );
                continue;
            }

            // (2) Declared only for development
            if declared.is_none() {
                if !self.runtime_provided.iter().any(|module| module == external) {
                    eprintln!(
                        "ERROR: Runtime dependency '{}' found in devDependencies.",
                        external
                    );
                    return Err(PackError::Dependency(external.clone()));
                }

                println!(
                    "INFO: Runtime dependency '{}' found in devDependencies. It has been excluded automatically.",
                    external
                );
                continue;
            }

            // (3) Declared as a real dependency: pick the declared range,
            // falling back to the version installed under node_modules
            let installed = self.installed_module_manifest(external)?;

            let version = declared
                .filter(|range| !range.is_empty())
                .cloned()
                .or_else(|| {
                    installed
                        .as_ref()
                        .and_then(|manifest| manifest.version.clone())
                        .filter(|version| !version.is_empty())
                });

            match version {
                Some(version) => modules.push(format!("{}@{}", external, version)),
                None => modules.push(external.clone()),
            }

            // Ship non-optional peer dependencies along with the module
            if let Some(installed) = &installed {
                let peers: Vec<String> = installed
                    .peer_dependencies
                    .keys()
                    .filter(|peer| {
                        !installed
                            .peer_dependencies_meta
                            .get(*peer)
                            .map(|meta| meta.optional)
                            .unwrap_or(false)
                    })
                    .cloned()
                    .collect();

                if !peers.is_empty() {
                    println!("Adding explicit non-optionals peers for dependency {}", external);
                    walk.push(external.clone());
                    let peer_modules = self.collect_modules(&peers, walk);
                    walk.pop();
                    match peer_modules {
                        Ok(peer_modules) => modules.extend(peer_modules),
                        Err(_) => {
                            eprintln!(
                                "WARNING: Could not check for peer dependencies of {}",
                                external
                            );
                        }
                    }
                }
            }
        }

        Ok(modules)
    }

    /// Manifest of an installed module, looked up under the local
    /// `node_modules` first and the workspace root's second.
    fn installed_module_manifest(&self, module: &str) -> PackResult<Option<PackageJson>> {
        let local = module_manifest_path(&self.local_dir, module);
        if let Some(manifest) = PackageJson::read(&local)? {
            return Ok(Some(manifest));
        }

        let root = module_manifest_path(&self.root_dir, module);
        PackageJson::read(&root)
    }
}

fn module_manifest_path(project_dir: &Path, module: &str) -> PathBuf {
    let mut path = project_dir.join("node_modules");
    // Scoped names contain a separator and span two directories
    for part in module.split('/') {
        path.push(part);
    }
    path.join("package.json")
}

fn parent_dir(path: &Path) -> PathBuf {
    path.parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
