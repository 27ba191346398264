pub mod manifest;
pub mod module_id;

pub use manifest::{PackageJson, PeerDependencyMeta};
pub use module_id::split_module_id;
