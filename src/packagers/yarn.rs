use crate::core::path::join_relative;
use crate::core::spawn::{spawn_process, start_process};
use crate::core::{PackError, PackResult};
use crate::package::module_id::split_module_id;
use crate::packagers::{DependencyNode, Packager, ProductionTree, RebaseRule};
use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use std::path::Path;

/// Classic yarn (v1) backend.
pub struct Yarn;

impl Yarn {
    pub fn new() -> Self {
        Yarn
    }

    fn command() -> &'static str {
        if cfg!(windows) {
            "yarn.cmd"
        } else {
            "yarn"
        }
    }

    /// Collect the rewrite rules for every relative `file:` reference in
    /// a yarn lockfile. Rules are deduplicated by detected reference so
    /// the global replacement cannot prefix the same path twice.
    fn lockfile_rebase_rules(path_offset: &str, lockfile: &str) -> PackResult<Vec<RebaseRule>> {
        let reference = Regex::new(r#"[^"/]@(?:file:)?((?:\./|\.\./).*?)[":,]"#)
            .map_err(|e| PackError::Manifest(format!("Invalid lockfile reference pattern: {}", e)))?;

        let mut rules: Vec<RebaseRule> = Vec::new();
        for captures in reference.captures_iter(lockfile) {
            let old_ref = &captures[1];
            if rules.iter().any(|rule| rule.old_ref == old_ref) {
                continue;
            }
            rules.push(RebaseRule {
                old_ref: old_ref.to_string(),
                new_ref: join_relative(path_offset, old_ref),
            });
        }

        Ok(rules)
    }

    fn install_args(extra_args: &[String], use_lockfile: bool) -> Vec<String> {
        let mut args = vec!["install".to_string()];
        if use_lockfile {
            args.push("--frozen-lockfile".to_string());
        }
        args.push("--non-interactive".to_string());
        args.extend(extra_args.iter().cloned());
        args
    }
}

impl Default for Yarn {
    fn default() -> Self {
        Self::new()
    }
}

impl Packager for Yarn {
    fn lockfile_name(&self) -> &str {
        "yarn.lock"
    }

    fn copy_package_section_names(&self) -> &[&'static str] {
        &["resolutions"]
    }

    fn production_tree(&self, cwd: &Path, depth: u32) -> PackResult<ProductionTree> {
        let args = vec![
            "list".to_string(),
            format!("--depth={}", depth),
            "--json".to_string(),
            "--production".to_string(),
        ];

        let stdout = match spawn_process(Self::command(), &args, cwd) {
            Ok(output) => output.stdout,
            Err(err) => recover_partial_stdout(err)?,
        };

        Ok(parse_list_output(&stdout))
    }

    fn rebase_lockfile(&self, path_offset: &str, lockfile: &str) -> PackResult<String> {
        let rules = Self::lockfile_rebase_rules(path_offset, lockfile)?;

        let mut rebased = lockfile.to_string();
        for rule in &rules {
            rebased = rebased.replace(&rule.old_ref, &rule.new_ref);
        }
        Ok(rebased)
    }

    fn install(&self, cwd: &Path, extra_args: &[String], use_lockfile: bool) -> PackResult<()> {
        let args = Self::install_args(extra_args, use_lockfile);
        spawn_process(Self::command(), &args, cwd)?;
        Ok(())
    }

    // "yarn install" prunes automatically
    fn prune(&self, cwd: &Path) -> PackResult<()> {
        self.install(cwd, &[], true)
    }

    fn run_scripts(&self, cwd: &Path, script_names: &[String]) -> PackResult<()> {
        let mut first_failure = None;
        let mut running = Vec::new();

        for script_name in script_names {
            let args = vec!["run".to_string(), script_name.clone()];
            match start_process(Self::command(), &args, cwd) {
                Ok(process) => running.push(process),
                Err(err) => {
                    first_failure.get_or_insert(err);
                }
            }
        }

        // Scripts already launched always get waited on, even after a
        // sibling failed.
        for process in running {
            if let Err(err) = process.wait() {
                first_failure.get_or_insert(err);
            }
        }

        match first_failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

/// Salvage the captured stdout of a failed list query. yarn exits
/// non-zero for some recoverable conditions while still printing a
/// usable tree; only an empty stdout is a real failure.
fn recover_partial_stdout(err: PackError) -> PackResult<String> {
    match err {
        PackError::Spawn { stdout, .. } if !stdout.is_empty() => Ok(stdout),
        other => Err(other),
    }
}

/// Parse the NDJSON stream of `yarn list --json`.
///
/// Each line is one event; lines that are not valid JSON are dropped.
/// The first `"tree"` event carries the dependency forest.
fn parse_list_output(stdout: &str) -> ProductionTree {
    let tree_event = stdout
        .lines()
        .filter_map(|line| serde_json::from_str::<Value>(line).ok())
        .find(|event| event.get("type").and_then(Value::as_str) == Some("tree"));

    let trees = tree_event
        .as_ref()
        .and_then(|event| event.get("data"))
        .and_then(|data| data.get("trees"))
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    ProductionTree {
        problems: Vec::new(),
        dependencies: convert_trees(&trees),
    }
}

fn convert_trees(trees: &[Value]) -> IndexMap<String, DependencyNode> {
    let mut converted = IndexMap::new();

    for tree in trees {
        let id = tree.get("name").and_then(Value::as_str).unwrap_or_default();
        let (name, version) = split_module_id(id);

        let children = tree
            .get("children")
            .and_then(Value::as_array)
            .map(|children| convert_trees(children))
            .unwrap_or_default();

        converted.insert(
            name.to_string(),
            DependencyNode {
                version: version.unwrap_or_default().to_string(),
                dependencies: children,
            },
        );
    }

    converted
}
