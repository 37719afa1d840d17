//! ngxkit - nginx server configuration toolkit
//!
//! This is the main entry point for the ngxkit CLI. File reading and output
//! live here; parsing and rendering are pure functions in `ngxkit-config`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use ngxkit_config::{JsonAdapter, parse_file, render};
use ngxkit_core::ModelLoader;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// ngxkit - parse, validate and canonically format nginx configuration
#[derive(Parser)]
#[command(name = "ngxkit")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a configuration file and print the model as JSON
    Parse {
        /// Path to the configuration file
        config: String,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Render a JSON or TOML model document as configuration text
    Render {
        /// Path to the model document (.json or .toml)
        model: String,
    },

    /// Parse a configuration file and print it in canonical form
    Fmt {
        /// Path to the configuration file
        config: String,

        /// Overwrite the file instead of printing
        #[arg(long)]
        write: bool,
    },

    /// Validate a configuration file
    Validate {
        /// Path to the configuration file
        config: String,
    },

    /// Show version information
    Version,
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries command output, logs go to stderr
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Parse { config, compact } => {
            tracing::info!("Parsing config: {}", config);
            let unit = parse_file(&config).with_context(|| format!("failed to parse {}", config))?;
            let json = JsonAdapter::serialize(&unit, !compact)?;
            println!("{}", json);
        }

        Commands::Render { model } => {
            tracing::info!("Rendering model: {}", model);
            let unit = ModelLoader::load(&model).with_context(|| format!("failed to load {}", model))?;
            print!("{}", render(&unit));
        }

        Commands::Fmt { config, write } => {
            let unit = parse_file(&config).with_context(|| format!("failed to parse {}", config))?;
            let text = render(&unit);
            if write {
                std::fs::write(&config, &text).with_context(|| format!("failed to write {}", config))?;
                tracing::info!("Formatted {}", config);
            } else {
                print!("{}", text);
            }
        }

        Commands::Validate { config } => {
            tracing::info!("Validating config: {}", config);

            match parse_file(&config) {
                Ok(unit) => {
                    println!(
                        "✅ Configuration '{}' is valid! ({} upstreams, {} servers)",
                        config,
                        unit.upstreams().len(),
                        unit.servers().len()
                    );
                }
                Err(e) => {
                    eprintln!("❌ Configuration Error: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Version => {
            println!("ngxkit v{}", ngxkit_core::VERSION);
        }
    }

    Ok(())
}
