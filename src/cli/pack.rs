use fnpack::config::Config;
use fnpack::core::{PackError, PackResult};
use fnpack::pack::ExternalsPacker;
use std::env;
use std::path::Path;

pub fn run(out_dir: String, externals: Vec<String>, packager: Option<String>) -> PackResult<()> {
    let current_dir = env::current_dir()
        .map_err(|e| PackError::Path(format!("Failed to get current directory: {}", e)))?;

    let mut config = Config::load()?;
    if let Some(packager) = packager {
        config.packager = packager;
    }

    let packer = ExternalsPacker::new(&current_dir, &config);
    packer.pack(Path::new(&out_dir), &externals)?;

    println!("✓ External modules packaged into {}", out_dir);

    Ok(())
}
