//! Versioned Config CLI
//!
//! Inspects and re-encodes JSON config files written by versioned config
//! objects.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use serde_json::Value;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use versioned_config::codec::embedded_versions;
use versioned_config::settings::{OutputFormat, Settings};
use versioned_config::ConfigVersion;

#[derive(Parser)]
#[command(name = "versioned-config")]
#[command(about = "Inspect and re-encode versioned JSON config files")]
#[command(version)]
struct Cli {
    /// Settings file to load on top of the default locations
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the versions embedded in a config file
    Inspect {
        /// Config file to inspect
        file: PathBuf,
        /// Version key (defaults to the configured key)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Check whether a config file is at an expected version
    Check {
        /// Config file to check
        file: PathBuf,
        /// Version the root object should be at
        #[arg(short, long)]
        expect: String,
        /// Version key (defaults to the configured key)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Re-encode a config file
    Format {
        /// Config file to format
        file: PathBuf,
        /// Write compact JSON
        #[arg(long, conflicts_with = "pretty")]
        compact: bool,
        /// Write indented JSON
        #[arg(long)]
        pretty: bool,
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn read_json(path: &Path) -> anyhow::Result<Value> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::load_from(cli.config.as_deref())?;
    debug!(?settings, "loaded settings");

    match cli.command {
        Commands::Inspect { file, key } => {
            let key = key.unwrap_or(settings.inspect.version_key);
            let doc = read_json(&file)?;
            let versions = embedded_versions(&doc, &key);

            if versions.is_empty() {
                println!("{} - unversioned (no '{}' keys)", file.display(), key);
                return Ok(());
            }

            println!("{}", file.display());
            for (path, version) in versions {
                let path = if path.is_empty() { "/" } else { path.as_str() };
                println!("  {} {}", path, version);
            }
            Ok(())
        }

        Commands::Check { file, expect, key } => {
            let key = key.unwrap_or(settings.inspect.version_key);
            let doc = read_json(&file)?;
            let expected = ConfigVersion::from(expect);

            let Some(found) = doc.get(&key).map(ConfigVersion::from_value) else {
                bail!("{} has no '{}' key at the root", file.display(), key);
            };

            if found == expected {
                println!("✅ {} is at version {}", file.display(), found);
                return Ok(());
            }

            match found.compare(&expected) {
                Some(Ordering::Less) => {
                    println!("⚠️  {} is at version {}, needs migration to {}", file.display(), found, expected)
                }
                Some(_) => {
                    println!("❌ {} is at version {}, newer than {}", file.display(), found, expected)
                }
                None => println!("❌ {} is at version {}, expected {}", file.display(), found, expected),
            }
            std::process::exit(1);
        }

        Commands::Format { file, compact, pretty, output } => {
            let format = if compact {
                OutputFormat::Compact
            } else if pretty {
                OutputFormat::Pretty
            } else {
                settings.output.format
            };

            let doc = read_json(&file)?;
            let mut encoded = format.encode(&doc)?;
            if settings.output.trailing_newline {
                encoded.push('\n');
            }

            match output {
                Some(path) => {
                    std::fs::write(&path, encoded)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!("✅ Written to {}", path.display());
                }
                None => print!("{}", encoded),
            }
            Ok(())
        }
    }
}
