//! Command-line interface for nxdl-doctools

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
use nxdl_doctools::generator;
#[cfg(feature = "cli")]
use nxdl_doctools::replicate;

#[cfg(feature = "cli")]
#[derive(Parser, Debug)]
#[command(name = "nxdl-doctools")]
#[command(author, version = nxdl_doctools::VERSION, about = "Documentation build tools for the NXDL schema", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[cfg(feature = "cli")]
#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate the NXDL elements and data types chapter from a schema file
    Generate {
        /// Path to the NXDL schema file (nxdl.xsd)
        #[arg(value_name = "SCHEMA")]
        schema: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Copy the documentation build resources from a definitions tree
    Prepare {
        /// Path to the NeXus definitions root directory
        #[arg(value_name = "DEFS_DIR")]
        defs_dir: PathBuf,

        /// Target build directory (defaults to the current directory)
        #[arg(value_name = "BUILD_DIR")]
        build_dir: Option<PathBuf>,
    },
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate { schema, output } => cmd_generate(schema, output),
        Commands::Prepare { defs_dir, build_dir } => cmd_prepare(defs_dir, build_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(feature = "cli")]
fn cmd_generate(
    schema: PathBuf,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = generator::generate(&schema)?;

    match output {
        Some(path) => fs::write(path, text)?,
        None => print!("{}", text),
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn cmd_prepare(
    defs_dir: PathBuf,
    build_dir: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let build_dir = match build_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    for (source, target) in replicate::replicate_resources(&defs_dir, &build_dir)? {
        println!("cp {} {}", source.display(), target.display());
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Rebuild with --features cli");
    std::process::exit(1);
}
