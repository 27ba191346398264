// Core functionality
pub mod core;

// Package manifest model
pub mod package;

// Re-export commonly used types
pub use crate::core::{format_error_with_help, ErrorHelp, PackError, PackResult};
pub use crate::package::manifest::{PackageJson, PeerDependencyMeta};
pub use crate::package::module_id::split_module_id;
