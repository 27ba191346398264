use crate::core::error::{PackError, PackResult};
use std::path::Path;
use std::process::{Child, Command, Stdio};

/// Captured output of a completed subprocess.
#[derive(Debug, Clone)]
pub struct SpawnOutput {
    pub stdout: String,
    pub stderr: String,
}

/// A subprocess that has been launched but not yet waited on.
pub struct RunningProcess {
    command: String,
    child: Child,
}

impl RunningProcess {
    /// Wait for the process to exit, collecting its output.
    ///
    /// A non-zero exit status becomes a `Spawn` error carrying both
    /// streams, so callers can inspect partial output.
    pub fn wait(self) -> PackResult<SpawnOutput> {
        let output = self.child.wait_with_output()?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(PackError::Spawn {
                command: self.command,
                code: output.status.code().unwrap_or(-1),
                stdout,
                stderr,
            });
        }

        Ok(SpawnOutput { stdout, stderr })
    }
}

/// Launch `command` in `cwd` with both output streams captured.
pub fn start_process(command: &str, args: &[String], cwd: &Path) -> PackResult<RunningProcess> {
    tracing::debug!("Spawning: {} {} (cwd: {})", command, args.join(" "), cwd.display());

    let child = Command::new(command)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    Ok(RunningProcess {
        command: format!("{} {}", command, args.join(" ")),
        child,
    })
}

/// Run `command` in `cwd` to completion, capturing stdout and stderr.
pub fn spawn_process(command: &str, args: &[String], cwd: &Path) -> PackResult<SpawnOutput> {
    start_process(command, args, cwd)?.wait()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    #[cfg(unix)]
    fn test_spawn_process_captures_stdout() {
        let temp = TempDir::new().unwrap();
        let output = spawn_process("sh", &args(&["-c", "echo hello"]), temp.path()).unwrap();
        assert_eq!(output.stdout.trim(), "hello");
        assert!(output.stderr.is_empty());
    }

    #[test]
    #[cfg(unix)]
    fn test_spawn_process_nonzero_exit() {
        let temp = TempDir::new().unwrap();
        let err = spawn_process(
            "sh",
            &args(&["-c", "echo partial; echo oops >&2; exit 3"]),
            temp.path(),
        )
        .unwrap_err();

        match err {
            PackError::Spawn {
                command,
                code,
                stdout,
                stderr,
            } => {
                assert!(command.starts_with("sh"));
                assert_eq!(code, 3);
                assert_eq!(stdout.trim(), "partial");
                assert_eq!(stderr.trim(), "oops");
            }
            other => panic!("expected Spawn error, got {:?}", other),
        }
    }

    #[test]
    fn test_spawn_process_missing_command() {
        let temp = TempDir::new().unwrap();
        let err = spawn_process("fnpack-does-not-exist", &[], temp.path()).unwrap_err();
        assert!(matches!(err, PackError::Io(_)));
    }
}
