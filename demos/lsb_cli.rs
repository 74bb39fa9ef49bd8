// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/phasmcore

//! Example: hide, reveal and size messages from the command line.
//!
//! ```text
//! cargo run --example lsb_cli -- encode cover.jpg "meet at noon" -o hidden_image.png
//! cargo run --example lsb_cli -- decode hidden_image.png --ai
//! cargo run --example lsb_cli -- capacity cover.jpg
//! ```
//!
//! Set `RUST_LOG=phasm_lsb=debug` for codec tracing and `PHASM_API_KEY` (or
//! `api_key`) to enable `--ai`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use phasm_lsb::{Config, GeminiAnalyzer, StegoError};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "lsb_cli", about = "LSB steganography for lossless images")]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Embed a message into a cover image and write a PNG.
    Encode {
        input: PathBuf,
        message: String,
        #[arg(short, long, default_value = "hidden_image.png")]
        output: PathBuf,
    },
    /// Extract a message and print the detection result as JSON.
    Decode {
        input: PathBuf,
        /// Also ask the AI service for an analysis of the image.
        #[arg(long)]
        ai: bool,
    },
    /// Print how many message bytes an image can hold.
    Capacity { input: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            // 2 for bad input (image or message), 1 for everything else.
            let client = e.downcast_ref::<StegoError>().is_some_and(StegoError::is_client_error);
            ExitCode::from(if client { 2 } else { 1 })
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_env()?;

    match cli.command {
        Command::Encode { input, message, output } => {
            config.limits.check_message(&message)?;
            let cover = read_upload(&input, &config)?;
            let stego = phasm_lsb::encode(&cover, &message)?;
            fs::write(&output, &stego)?;
            println!("Stego image written to: {}", output.display());
        }
        Command::Decode { input, ai } => {
            let bytes = read_upload(&input, &config)?;
            let use_ai = ai && config.analysis.is_enabled();
            if ai && !use_ai {
                tracing::warn!("--ai ignored: no API key configured (set PHASM_API_KEY)");
            }
            let result = if use_ai {
                let analyzer = GeminiAnalyzer::new(&config.analysis)?;
                phasm_lsb::detect(&bytes, Some(&analyzer), config.analysis.timeout).await?
            } else {
                phasm_lsb::decode(&bytes)?
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Command::Capacity { input } => {
            let bytes = read_upload(&input, &config)?;
            let info = phasm_lsb::capacity(&bytes)?;
            println!(
                "{}x{}: {} usable bits, at most {} message bytes",
                info.width, info.height, info.usable_bits, info.max_message_bytes
            );
        }
    }
    Ok(())
}

fn read_upload(path: &Path, config: &Config) -> Result<Vec<u8>, Box<dyn std::error::Error>> {
    let bytes = fs::read(path)?;
    config.limits.check_upload(bytes.len())?;
    Ok(bytes)
}
