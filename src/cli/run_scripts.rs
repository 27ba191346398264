use fnpack::config::Config;
use fnpack::core::path::absolutize;
use fnpack::core::{PackError, PackResult};
use fnpack::packagers::PackagerRegistry;
use std::env;
use std::path::Path;

pub fn run(dir: Option<String>, scripts: Vec<String>, packager: Option<String>) -> PackResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| PackError::Path(format!("Failed to get current directory: {}", e)))?;

    let mut config = Config::load()?;
    if let Some(packager) = packager {
        config.packager = packager;
    }

    let script_dir = match &dir {
        Some(dir) => absolutize(&current_dir, Path::new(dir)),
        None => current_dir,
    };

    let registry = PackagerRegistry::with_defaults();
    let packager = registry.get(&config.packager)?;
    packager.run_scripts(&script_dir, &scripts)?;

    println!("✓ Ran {} script(s)", scripts.len());

    Ok(())
}
