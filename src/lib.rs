//! fnpack packages the external dependencies of a serverless bundle.
//!
//! This crate provides the main fnpack library, re-exporting core
//! functionality from `fnpack-core` and organizing the modules that
//! resolve external modules, compose the output manifest, and drive a
//! package-manager backend.

pub use fnpack_core::{format_error_with_help, ErrorHelp, PackError, PackResult};
pub use fnpack_core::package::manifest::PackageJson;

/// Core module re-exported for convenience.
pub mod core {
    pub use fnpack_core::*;
    pub use fnpack_core::core::*;

    /// Path helpers re-exported from fnpack-core.
    pub mod path {
        pub use fnpack_core::core::path::*;
    }

    /// Subprocess helpers re-exported from fnpack-core.
    pub mod spawn {
        pub use fnpack_core::core::spawn::*;
    }
}

/// Package manifest model (re-exported from fnpack-core).
pub mod package {
    pub use fnpack_core::package::*;
}

/// Configuration management.
pub mod config;

/// Package manager backends.
pub mod packagers;

/// External module resolution.
pub mod resolver;

/// Packaging of external modules into an output directory.
pub mod pack;
