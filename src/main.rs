use clap::{Parser, Subcommand};
use fnpack::core::PackError;
use tracing_subscriber::EnvFilter;

mod cli;

#[derive(Parser)]
#[command(name = "fnpack")]
#[command(about = "Packages external npm dependencies for serverless bundles")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Package external modules next to a bundle
    Pack {
        /// Directory the bundle was written to
        #[arg(short, long)]
        out_dir: String,
        /// External module to package (repeatable)
        #[arg(short, long = "external")]
        externals: Vec<String>,
        /// Packager backend to use (overrides config)
        #[arg(short, long)]
        packager: Option<String>,
    },
    /// Print the installed production dependency tree as JSON
    Tree {
        /// Maximum tree depth
        #[arg(short, long, default_value_t = 1)]
        depth: u32,
        /// Packager backend to use (overrides config)
        #[arg(short, long)]
        packager: Option<String>,
    },
    /// Run package.json scripts through the packager
    RunScripts {
        /// Directory to run in (defaults to the current directory)
        #[arg(short, long)]
        dir: Option<String>,
        /// Script names to run
        #[arg(required = true)]
        scripts: Vec<String>,
        /// Packager backend to use (overrides config)
        #[arg(short, long)]
        packager: Option<String>,
    },
}

fn main() -> Result<(), PackError> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pack {
            out_dir,
            externals,
            packager,
        } => cli::pack::run(out_dir, externals, packager),
        Commands::Tree { depth, packager } => cli::tree::run(depth, packager),
        Commands::RunScripts {
            dir,
            scripts,
            packager,
        } => cli::run_scripts::run(dir, scripts, packager),
    };

    // Display error with helpful suggestions
    if let Err(ref e) = result {
        eprintln!("\n{}", fnpack::core::error_help::format_error_with_help(e));
    }

    result
}
