//! Integration tests for fnpack CLI commands
//!
//! These tests verify that the CLI commands work end-to-end.
//! Unit tests for individual functions should be in their respective source files.

use std::fs;
use std::process::Command;
use tempfile::TempDir;

fn fnpack_command() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fnpack"))
}

#[test]
fn test_pack_rejects_dev_only_external() {
    let temp = TempDir::new().unwrap();
    let project_root = temp.path();

    fs::write(project_root.join("yarn.lock"), "").unwrap();
    fs::write(
        project_root.join("package.json"),
        r#"{"devDependencies": {"webpack": "^5.0.0"}}"#,
    )
    .unwrap();

    let output = fnpack_command()
        .arg("pack")
        .arg("--out-dir")
        .arg("out")
        .arg("--external")
        .arg("webpack")
        .current_dir(project_root)
        .output()
        .unwrap();

    assert!(!output.status.success(), "dev-only external should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("found in devDependencies"),
        "stderr should explain the violation: {}",
        stderr
    );
    assert!(stderr.contains("Dependency error"));
    assert!(
        !project_root.join("out").join("package.json").exists(),
        "no manifest should be written on failure"
    );
}

#[test]
fn test_pack_rejects_unknown_packager() {
    let temp = TempDir::new().unwrap();
    let project_root = temp.path();

    fs::write(project_root.join("yarn.lock"), "").unwrap();
    fs::write(
        project_root.join("package.json"),
        r#"{"dependencies": {"left-pad": "^1.0.0"}}"#,
    )
    .unwrap();

    let output = fnpack_command()
        .arg("pack")
        .arg("--out-dir")
        .arg("out")
        .arg("--external")
        .arg("left-pad")
        .arg("--packager")
        .arg("pnpm")
        .current_dir(project_root)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Could not find packager 'pnpm'"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_pack_fails_without_manifest() {
    let temp = TempDir::new().unwrap();
    let project_root = temp.path();

    let output = fnpack_command()
        .arg("pack")
        .arg("--out-dir")
        .arg("out")
        .arg("--external")
        .arg("left-pad")
        .current_dir(project_root)
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("package.json not found"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_pack_excluded_module_still_writes_manifest() {
    let temp = TempDir::new().unwrap();
    let project_root = temp.path();

    fs::write(project_root.join("yarn.lock"), "").unwrap();
    fs::write(
        project_root.join("package.json"),
        r#"{"dependencies": {}}"#,
    )
    .unwrap();

    // The external is declared nowhere, so it is excluded and nothing
    // needs installing. The install itself depends on a yarn binary
    // being available, so only the earlier steps are asserted strictly.
    let output = fnpack_command()
        .arg("pack")
        .arg("--out-dir")
        .arg("out")
        .arg("--external")
        .arg("ghost")
        .current_dir(project_root)
        .output()
        .unwrap();

    assert!(output.status.code().is_some());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("excluded automatically"),
        "stdout: {}",
        stdout
    );
    assert!(stdout.contains("No external modules needed"));

    let composite = project_root.join("out").join("package.json");
    assert!(composite.exists(), "composite manifest should be written");
    let content = fs::read_to_string(&composite).unwrap();
    assert!(content.contains("\"name\": \"package\""));
    assert!(!content.contains("\"dependencies\""));
}

#[test]
fn test_pack_copies_rebased_lockfile_before_install() {
    let temp = TempDir::new().unwrap();
    let project_root = temp.path();

    fs::write(
        project_root.join("package.json"),
        r#"{"dependencies": {"shared": "file:../shared"}}"#,
    )
    .unwrap();
    fs::write(
        project_root.join("yarn.lock"),
        "\"shared@file:../shared\":\n  version \"1.0.0\"\n",
    )
    .unwrap();

    let output = fnpack_command()
        .arg("pack")
        .arg("--out-dir")
        .arg("out")
        .arg("--external")
        .arg("shared")
        .current_dir(project_root)
        .output()
        .unwrap();

    // Lockfile copy happens before the install step, so it is present
    // whether or not yarn itself could run afterwards.
    assert!(output.status.code().is_some());

    let composite =
        fs::read_to_string(project_root.join("out").join("package.json")).unwrap();
    assert!(
        composite.contains("file:../../shared"),
        "composite: {}",
        composite
    );

    let lockfile = fs::read_to_string(project_root.join("out").join("yarn.lock")).unwrap();
    assert!(
        lockfile.contains("shared@file:../../shared"),
        "lockfile: {}",
        lockfile
    );
}

#[test]
fn test_tree_command_handles_missing_project() {
    let temp = TempDir::new().unwrap();
    let project_root = temp.path();

    fs::write(
        project_root.join("package.json"),
        r#"{"dependencies": {}}"#,
    )
    .unwrap();

    // Querying the tree needs a yarn binary; just verify the command
    // terminates either way.
    let output = fnpack_command()
        .arg("tree")
        .current_dir(project_root)
        .output()
        .unwrap();

    assert!(output.status.code().is_some());
}

#[test]
fn test_run_scripts_requires_script_names() {
    let temp = TempDir::new().unwrap();

    let output = fnpack_command()
        .arg("run-scripts")
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(!output.status.success(), "missing script names should fail");
}

#[test]
fn test_run_scripts_with_unknown_packager() {
    let temp = TempDir::new().unwrap();

    let output = fnpack_command()
        .arg("run-scripts")
        .arg("--packager")
        .arg("npm")
        .arg("build")
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Could not find packager 'npm'"),
        "stderr: {}",
        stderr
    );
}

#[test]
fn test_pack_requires_out_dir() {
    let temp = TempDir::new().unwrap();

    let output = fnpack_command()
        .arg("pack")
        .current_dir(temp.path())
        .output()
        .unwrap();

    assert!(!output.status.success(), "pack without --out-dir should fail");
}
