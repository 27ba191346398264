use fnpack::config::Config;
use fnpack::core::{PackError, PackResult};
use fnpack::packagers::PackagerRegistry;
use std::env;

pub fn run(depth: u32, packager: Option<String>) -> PackResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| PackError::Path(format!("Failed to get current directory: {}", e)))?;

    let mut config = Config::load()?;
    if let Some(packager) = packager {
        config.packager = packager;
    }

    let registry = PackagerRegistry::with_defaults();
    let packager = registry.get(&config.packager)?;

    let tree = packager.production_tree(&current_dir, depth)?;
    println!("{}", serde_json::to_string_pretty(&tree)?);

    Ok(())
}
