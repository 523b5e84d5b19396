//! Heron command-line interface.
//!
//! ```bash
//! heron classify statement.pdf scan.png
//! heron classify --config heron.toml --format text invoices/*.pdf
//! heron serve --host 0.0.0.0 --port 8000
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use heron::{ClassifierConfig, CompositeClassifier, batch_classify_files};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "heron")]
#[command(version, about = "Classify documents by type", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify one or more files
    Classify {
        /// Files to classify
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Configuration file (TOML, YAML or JSON); discovered as heron.toml when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,
    },

    /// Start the HTTP API server
    Serve {
        /// Address to bind
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 8000)]
        port: u16,

        /// Configuration file (TOML, YAML or JSON); discovered as heron.toml when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Text,
}

fn load_config(path: Option<&PathBuf>) -> Result<ClassifierConfig> {
    match path {
        Some(path) => ClassifierConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(ClassifierConfig::discover()
            .context("Failed to discover heron.toml")?
            .unwrap_or_default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Classify { files, config, format } => {
            let config = load_config(config.as_ref())?;
            let classifier = Arc::new(CompositeClassifier::from_config(&config)?);

            let results = batch_classify_files(files.clone(), classifier, config.max_concurrent_classifications)
                .await
                .context("Classification failed")?;

            match format {
                OutputFormat::Json => {
                    let output: Vec<serde_json::Value> = files
                        .iter()
                        .zip(&results)
                        .map(|(path, result)| {
                            serde_json::json!({
                                "file": path.display().to_string(),
                                "document_type": result.document_type,
                                "classifier_name": result.classifier_name,
                            })
                        })
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&output)?);
                }
                OutputFormat::Text => {
                    for (path, result) in files.iter().zip(&results) {
                        println!("{}\t{}\t{}", path.display(), result.document_type, result.classifier_name);
                    }
                }
            }
        }
        Commands::Serve { host, port, config } => {
            let config = load_config(config.as_ref())?;
            tracing::info!("Starting server on {}:{}", host, port);
            heron::api::serve_with_config(host, port, config).await?;
        }
    }

    Ok(())
}
