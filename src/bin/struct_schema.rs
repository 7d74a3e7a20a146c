//! struct-schema CLI
//!
//! Describes a compiled-in record type and writes the schema document.
//!
//! Usage:
//!   struct-schema export --type Enrollment --out schemas/enrollment.json
//!   struct-schema check
//!   struct-schema --help

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use struct_schema::{
    check_artifact, render, write_artifact, OutputFormat, SchemaConfig, TypeCatalog,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "struct-schema")]
#[command(about = "Describe record types as JSON schema documents")]
struct Cli {
    /// Config file (in addition to the default locations)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Describe a type and write the document (default command)
    Export {
        /// Type to describe (default: introspection.root_type)
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        /// Output file (default: output.path)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Single-line JSON
        #[arg(long)]
        compact: bool,
    },

    /// Describe a type and print the document
    Show {
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        #[arg(long)]
        compact: bool,
    },

    /// Compare the written document with a fresh one
    Check {
        #[arg(short = 't', long = "type")]
        type_name: Option<String>,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// List describable types
    List,

    /// Print the effective configuration
    Config {
        /// Write it to this file instead
        #[arg(long)]
        init: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = SchemaConfig::load_from(cli.config.as_deref())?;
    let catalog = TypeCatalog::builtin()?;

    let command = cli.command.unwrap_or(Commands::Export {
        type_name: None,
        out: None,
        compact: false,
    });

    match command {
        Commands::Export { type_name, out, compact } => {
            let name = type_name.unwrap_or_else(|| config.introspection.root_type.clone());
            let path = out.unwrap_or_else(|| config.output_path());
            let format = if compact { OutputFormat::Compact } else { config.output.format };

            let document = catalog.describe(&name, &config.introspection.introspector())?;
            let text = render(&document, format)?;
            let checksum = write_artifact(&path, &text, config.output.create_dirs)?;

            println!("JSON definition written to {}", path.display());
            println!("  Type: {}", name);
            println!("  SHA256: {}", checksum);
        }
        Commands::Show { type_name, compact } => {
            let name = type_name.unwrap_or_else(|| config.introspection.root_type.clone());
            let format = if compact { OutputFormat::Compact } else { config.output.format };

            let document = catalog.describe(&name, &config.introspection.introspector())?;
            println!("{}", render(&document, format)?);
        }
        Commands::Check { type_name, out } => {
            let name = type_name.unwrap_or_else(|| config.introspection.root_type.clone());
            let path = out.unwrap_or_else(|| config.output_path());

            let document = catalog.describe(&name, &config.introspection.introspector())?;
            let text = render(&document, config.output.format)?;
            let report = check_artifact(&path, &text)?;

            if report.in_sync() {
                println!("✅ {} is up to date ({})", path.display(), report.expected.short());
            } else if report.is_missing() {
                eprintln!("❌ {} does not exist - run `struct-schema export`", path.display());
                std::process::exit(1);
            } else {
                eprintln!(
                    "❌ {} is out of date (+{} -{} lines)",
                    path.display(),
                    report.added,
                    report.removed
                );
                eprint!("{}", report.diff);
                std::process::exit(1);
            }
        }
        Commands::List => {
            for name in catalog.names() {
                println!("{}", name);
            }
        }
        Commands::Config { init } => match init {
            Some(path) => {
                config.save(&path)?;
                println!("Configuration written to {}", path.display());
            }
            None => print!("{}", toml::to_string_pretty(&config)?),
        },
    }

    Ok(())
}
