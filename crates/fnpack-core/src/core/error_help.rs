use crate::core::PackError;

/// Provides helpful suggestions for common errors
pub trait ErrorHelp {
    fn help(&self) -> Option<String>;
}

impl ErrorHelp for PackError {
    fn help(&self) -> Option<String> {
        match self {
            PackError::Manifest(msg) => {
                if msg.contains("package.json not found") {
                    Some(
                        "💡 Suggestion: Run fnpack from inside an npm project, or navigate to a directory with a package.json"
                            .to_string(),
                    )
                } else if msg.contains("Failed to parse") {
                    Some(
                        "💡 Suggestion: Check the manifest for JSON syntax errors (trailing commas, unquoted keys, comments)"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            PackError::Dependency(module) => {
                Some(format!(
                    "💡 Suggestion: Move '{}' from devDependencies to dependencies, or add it to runtime_provided_modules in the fnpack config if the target runtime ships it",
                    module
                ))
            }
            PackError::PackagerNotFound(_) => {
                Some(
                    "💡 Suggestion: Check the packager name in your config or --packager flag. Built-in packagers: yarn"
                        .to_string(),
                )
            }
            PackError::Spawn { stderr, .. } => {
                if stderr.trim().is_empty() {
                    Some(
                        "💡 Suggestion: Make sure the package manager is installed and on your PATH"
                            .to_string(),
                    )
                } else {
                    Some(format!(
                        "💡 Suggestion: The package manager reported:\n{}",
                        stderr.trim()
                    ))
                }
            }
            PackError::Config(_) => {
                Some(
                    "💡 Suggestion: Check your config file syntax. Common issues:\n  - Missing colons after keys\n  - Incorrect indentation\n  - Unclosed quotes"
                        .to_string(),
                )
            }
            PackError::Path(msg) => {
                if msg.contains("Could not determine") {
                    Some(
                        "💡 Suggestion: Check your system environment variables (HOME, APPDATA, etc.)"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            PackError::Io(e) => {
                if e.kind() == std::io::ErrorKind::PermissionDenied {
                    Some(
                        "💡 Suggestion: Check file permissions, or try running with appropriate permissions"
                            .to_string(),
                    )
                } else if e.kind() == std::io::ErrorKind::NotFound {
                    Some(
                        "💡 Suggestion: The file or directory may not exist. Check the path and try again"
                            .to_string(),
                    )
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}

/// Format an error with helpful suggestions
pub fn format_error_with_help(error: &PackError) -> String {
    let mut output = format!("❌ Error: {}", error);

    if let Some(help) = error.help() {
        output.push_str("\n\n");
        output.push_str(&help);
    }

    output
}
