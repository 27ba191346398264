pub mod composer;

pub use composer::{compose, rebase_file_reference, CompositePackage};

use crate::config::Config;
use crate::core::path::{absolutize, ensure_dir, find_project_root, find_up, to_posix};
use crate::core::{PackError, PackResult};
use crate::package::manifest::PackageJson;
use crate::packagers::{Packager, PackagerRegistry};
use crate::resolver::DependencyResolver;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Packages a bundle's external npm modules into an output directory.
///
/// The packer resolves the externals against the project manifest,
/// writes a minimal `package.json` next to the bundle, carries the
/// lockfile over and drives the configured packager to install and
/// prune the result.
pub struct ExternalsPacker {
    project_dir: PathBuf,
    packager_id: String,
    install_extra_args: Vec<String>,
    extra_runtime_provided: Vec<String>,
    registry: PackagerRegistry,
}

impl ExternalsPacker {
    /// Create a packer for the project at `project_dir`.
    pub fn new(project_dir: &Path, config: &Config) -> Self {
        Self::with_registry(project_dir, config, PackagerRegistry::with_defaults())
    }

    /// Create a packer with a custom packager registry.
    pub fn with_registry(project_dir: &Path, config: &Config, registry: PackagerRegistry) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            packager_id: config.packager.clone(),
            install_extra_args: config.install_extra_args.clone(),
            extra_runtime_provided: config.runtime_provided_modules.clone(),
            registry,
        }
    }

    /// Package `externals` into `output_dir`.
    pub fn pack(&self, output_dir: &Path, externals: &[String]) -> PackResult<()> {
        // Step 1: Look up the packager backend before touching the disk
        let packager = self.registry.get(&self.packager_id)?;
        tracing::debug!("Using packager: {}", self.packager_id);

        let output_dir = absolutize(&self.project_dir, output_dir);

        // Step 2: Locate the project manifests. In a workspace the root
        // manifest lives next to the shared lockfile; the local one is
        // the nearest package.json above the project directory.
        let root_dir =
            find_project_root(&self.project_dir).unwrap_or_else(|| self.project_dir.clone());
        let root_manifest_path = root_dir.join("package.json");
        let root_manifest = PackageJson::read(&root_manifest_path)?.unwrap_or_default();

        let local_dir =
            find_up(&["package.json"], &self.project_dir).unwrap_or_else(|| self.project_dir.clone());
        let local_manifest_path = local_dir.join("package.json");

        // Step 3: Resolve the externals plus their mandatory peers
        let resolver = DependencyResolver::new(
            &local_manifest_path,
            &root_manifest_path,
            &self.extra_runtime_provided,
        )?;
        let resolved = resolver.resolve(externals)?;
        tracing::debug!("Resolved external modules: {:?}", resolved);

        if resolved.is_empty() {
            println!("No external modules needed");
        }

        // Step 4: Compose the minimal manifest next to the bundle. Inside
        // a workspace the copied sections come from the local manifest.
        let sections_manifest = if root_manifest.is_workspace_root() {
            PackageJson::load(&local_manifest_path)?
        } else {
            root_manifest
        };
        let sections = sections_manifest.pick_sections(packager.copy_package_section_names());

        let path_offset = relative_path(&output_dir, &local_dir)?;
        let composite = compose(&resolved, &sections, &path_offset)?;

        ensure_dir(&output_dir)?;
        fs::write(
            output_dir.join("package.json"),
            serde_json::to_string_pretty(&composite)?,
        )?;

        // Step 5: Carry the lockfile over so the install reproduces the
        // project's locked versions. A failed copy warns and packaging
        // continues; the lockfile's presence still selects the frozen
        // install.
        let lockfile_path = local_dir.join(packager.lockfile_name());
        let has_lockfile = lockfile_path.exists();
        if has_lockfile {
            println!("Package lock found - Using locked versions");
            if let Err(err) =
                copy_rebased_lockfile(packager, &lockfile_path, &output_dir, &path_offset)
            {
                eprintln!("Warning: Could not read lock file: {}", err);
            }
        }

        // Step 6: Install the composite package
        println!("Packing external modules: {}", resolved.join(", "));
        let start = Instant::now();
        packager.install(&output_dir, &self.install_extra_args, has_lockfile)?;
        println!("Package took [{} ms]", start.elapsed().as_millis());

        // Step 7: Prune everything the install left beyond production needs
        let start = Instant::now();
        packager.prune(&output_dir)?;
        println!(
            "Prune: {} [{} ms]",
            output_dir.display(),
            start.elapsed().as_millis()
        );

        Ok(())
    }
}

/// Copy the project lockfile into the output directory, rebasing any
/// local path references on the way.
fn copy_rebased_lockfile(
    packager: &dyn Packager,
    lockfile_path: &Path,
    output_dir: &Path,
    path_offset: &str,
) -> PackResult<()> {
    let content = fs::read_to_string(lockfile_path)?;
    let rebased = packager.rebase_lockfile(path_offset, &content)?;
    fs::write(output_dir.join(packager.lockfile_name()), rebased)?;
    Ok(())
}

/// Relative path from `from` to `to`, rendered with forward slashes.
fn relative_path(from: &Path, to: &Path) -> PackResult<String> {
    pathdiff::diff_paths(to, from)
        .map(|path| to_posix(&path))
        .ok_or_else(|| {
            PackError::Path(format!(
                "Could not compute relative path from {} to {}",
                from.display(),
                to.display()
            ))
        })
}
