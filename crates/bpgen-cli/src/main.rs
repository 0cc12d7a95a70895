//! bpgen CLI.
//!
//! Generates the TypeScript types an integration implementation is written
//! against, from the integration's definition file.

use std::path::PathBuf;
use std::time::Instant;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use bpgen_compiler::config::{DEFAULT_ENTRY_POINT, DEFAULT_OUT_DIR};
use bpgen_compiler::codegen::DEFAULT_SDK_PACKAGE;
use bpgen_compiler::{Generator, GeneratorConfig};

mod ui;

#[derive(Parser)]
#[command(name = "bpgen")]
#[command(version)]
#[command(about = "Generate typed integration stubs from a definition file")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct InputArgs {
    /// Definition file, relative to the work directory
    #[arg(short, long, default_value = DEFAULT_ENTRY_POINT)]
    entry: PathBuf,

    /// Directory relative paths resolve against
    #[arg(short, long, default_value = ".")]
    work_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate implementation types
    Gen {
        #[command(flatten)]
        input: InputArgs,

        /// Output directory, relative to the work directory
        #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
        out: PathBuf,

        /// Package the generated wrappers import from
        #[arg(long, default_value = DEFAULT_SDK_PACKAGE)]
        sdk: String,

        /// Keep files already in the output directory
        #[arg(long)]
        no_clean: bool,

        /// List the files that would be written without writing them
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate the definition without generating code
    Check {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Gen {
            input,
            out,
            sdk,
            no_clean,
            dry_run,
        } => {
            let config = GeneratorConfig {
                entry_point: input.entry,
                out_dir: out,
                work_dir: input.work_dir,
                sdk_package: sdk,
                clean: !no_clean,
            };
            if dry_run {
                dry_run_generate(config).await?;
            } else {
                generate(config).await?;
            }
        }

        Commands::Check { input } => {
            let config = GeneratorConfig {
                entry_point: input.entry,
                work_dir: input.work_dir,
                ..GeneratorConfig::default()
            };
            check(config).await?;
        }
    }

    Ok(())
}

async fn generate(config: GeneratorConfig) -> miette::Result<()> {
    let start = Instant::now();
    ui::print_compact_header(env!("CARGO_PKG_VERSION"));
    println!();

    let out_dir = config.out_path();
    let generator = Generator::new(config);
    let spinner = ui::spinner("Generating implementation types...");

    match generator.generate().await {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::success(&format!("Wrote {} files to {}", result.files, out_dir.display()));
            println!();
            ui::counts(result.actions, result.channels, result.events, result.states);
            println!();
            ui::timing("Generated", start.elapsed().as_millis());
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::error_header("Generation failed.");
            Err(e.into())
        }
    }
}

async fn dry_run_generate(config: GeneratorConfig) -> miette::Result<()> {
    let out_dir = config.out_path();
    let generator = Generator::new(config);
    let files = generator.render().await?;

    ui::info(&format!(
        "Would write {} files to {}",
        files.len(),
        out_dir.display()
    ));
    println!();
    ui::file_tree(files.iter().map(|file| file.path.as_str()));
    println!();
    ui::dim("Nothing was written.");
    Ok(())
}

async fn check(config: GeneratorConfig) -> miette::Result<()> {
    let entry = config.entry_path();
    let generator = Generator::new(config);
    let spinner = ui::spinner("Checking definition...");

    match generator.check().await {
        Ok(result) => {
            spinner.finish_and_clear();
            ui::success(&format!("{} is valid.", entry.display()));
            println!();
            ui::counts(result.actions, result.channels, result.events, result.states);
            Ok(())
        }
        Err(e) => {
            spinner.finish_and_clear();
            ui::error_header("Definition is invalid.");
            Err(e.into())
        }
    }
}
