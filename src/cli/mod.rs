pub mod pack;
pub mod run_scripts;
pub mod tree;
