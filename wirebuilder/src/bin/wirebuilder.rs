use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wirebuilder::codegen::{FileGenerator, GeneratorOptions};
use wirebuilder::writer::UnitWriter;

#[derive(Parser)]
#[command(name = "wirebuilder")]
#[command(about = "Generate Java builders from wire-format schemas", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate one source file per schema type
    Generate {
        /// Schema document (YAML, or JSON with a .json extension)
        #[arg(short = 's', long = "schema", value_name = "FILE")]
        schema: PathBuf,

        /// Output directory for generated files
        #[arg(short = 'o', long = "output", value_name = "DIR")]
        output: PathBuf,

        /// Package declared by generated files
        #[arg(short = 'p', long = "package", value_name = "PACKAGE")]
        package: Option<String>,

        /// Header file prepended to every generated file
        #[arg(short = 'c', long = "copyright", value_name = "FILE")]
        copyright: Option<PathBuf>,
    },

    /// Print the unit names in emission order without writing
    List {
        /// Schema document (YAML, or JSON with a .json extension)
        #[arg(short = 's', long = "schema", value_name = "FILE")]
        schema: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate {
            schema,
            output,
            package,
            copyright,
        } => {
            let loaded = wirebuilder::schema::load_file(&schema)
                .with_context(|| format!("failed to load schema {}", schema.display()))?;

            let mut options = GeneratorOptions::new();
            if let Some(package) = package {
                options = options.with_package(package);
            }
            if let Some(copyright) = copyright {
                options = options.with_copyright(copyright);
            }

            let writer = UnitWriter::new(&output);
            let written = writer
                .write_all(FileGenerator::new(&loaded, options))
                .context("generation failed")?;
            tracing::info!(
                "generated {} files in {}",
                written.len(),
                output.display()
            );
        }
        Commands::List { schema } => {
            let loaded = wirebuilder::schema::load_file(&schema)
                .with_context(|| format!("failed to load schema {}", schema.display()))?;
            for unit in FileGenerator::new(&loaded, GeneratorOptions::default()) {
                println!("{}", unit.context("generation failed")?.name);
            }
        }
    }

    Ok(())
}
