//! Command-line interface for sammelband.
//!
//! Offers the two conversion pipelines on local files, plus the HTTP server:
//!
//! ```bash
//! sammelband combine scan.jpg report.pdf -o combined_output.pdf
//! sammelband rtf notes.rtf -o converted/
//! sammelband serve -H 0.0.0.0 -p 9000
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use sammelband::{ServiceConfig, Upload, combine_partition, extract_rtf, partition_uploads};

#[derive(Parser)]
#[command(
    name = "sammelband",
    version,
    about = "Combine images and PDFs into one document; convert RTF to plain text"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP conversion service
    Serve {
        /// Address to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to listen on
        #[arg(short, long, default_value_t = 9000)]
        port: u16,
    },

    /// Combine JPEG and PDF files into one merged PDF
    Combine {
        /// Input files; PDFs are merged in the order given, followed by the
        /// document built from the images
        files: Vec<PathBuf>,

        /// Output path
        #[arg(short, long, default_value = "combined_output.pdf")]
        output: PathBuf,
    },

    /// Convert an RTF file to UTF-8 plain text with a provenance header
    Rtf {
        /// Input RTF file
        file: PathBuf,

        /// Directory for the converted output
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,
    },
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            let config = ServiceConfig::from_env();
            sammelband::api::serve(&host, port, config)
                .await
                .context("server failed")?;
        }

        Command::Combine { files, output } => {
            if files.is_empty() {
                anyhow::bail!("no input files given");
            }

            let mut uploads = Vec::with_capacity(files.len());
            for path in &files {
                let file_name = path
                    .file_name()
                    .and_then(|name| name.to_str())
                    .unwrap_or_default()
                    .to_string();
                let bytes =
                    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
                uploads.push(Upload { file_name, bytes });
            }

            let partition = partition_uploads(uploads);
            for name in &partition.dropped {
                tracing::warn!("skipping {}: unrecognized extension", name);
            }

            let merged = combine_partition(partition)?;
            std::fs::write(&output, merged)
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("wrote {}", output.display());
        }

        Command::Rtf { file, output_dir } => {
            let bytes = std::fs::read(&file).with_context(|| format!("failed to read {}", file.display()))?;
            let file_name = file.file_name().and_then(|name| name.to_str()).unwrap_or_default();

            let extracted = extract_rtf(&bytes, file_name, chrono::Local::now());

            let output = output_dir.join(&extracted.file_name);
            std::fs::write(&output, extracted.content.as_bytes())
                .with_context(|| format!("failed to write {}", output.display()))?;
            println!("wrote {}", output.display());
        }
    }

    Ok(())
}
