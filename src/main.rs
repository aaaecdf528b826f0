use anyhow::Result;
use clap::{Arg, Command};
use std::path::PathBuf;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use srt_transcript::{BatchConverter, Config, InputKind, OutputResolver};

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the conversion report
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("srt_transcript=info,warn")),
        )
        .init();

    let matches = Command::new("srt2txt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert SRT files to text files.")
        .arg(
            Arg::new("input")
                .value_name("INPUT")
                .help("Input file or directory path")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Optional: Output file or directory path"),
        )
        .get_matches();

    // clap enforces `required(true)`
    let input = matches
        .get_one::<String>("input")
        .map(PathBuf::from)
        .unwrap_or_default();
    let output = matches.get_one::<String>("output").map(PathBuf::from);

    let config = Config::load().unwrap_or_else(|e| {
        debug!("Using default configuration: {}", e);
        Config::default()
    });

    // Directory mode creates the output directory here; failure aborts the run
    let resolver = OutputResolver::new(output.as_deref(), &config.conversion.target_extension)?;
    let converter = BatchConverter::new(&config, resolver);

    let batch = converter.convert_with(&input, |result| {
        if result.is_success() {
            println!(
                "Converted '{}' to '{}'.",
                result.source.display(),
                result.destination.display()
            );
        }
    });

    match batch.input_kind {
        InputKind::Invalid => {
            println!("Input file or directory not found or is not a valid .srt file.");
        }
        _ if !batch.failed.is_empty() => {
            warn!("❌ Failed: {}", batch.failed.len());
        }
        _ => {}
    }

    Ok(())
}
