use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use cropdoc_classifier::inspect::ModelMetadata;
use cropdoc_classifier::{Classifier, DEFAULT_MODEL_PATH, ModelHandle};
use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Operator tooling for the crop disease model artifact.
#[derive(Parser, Debug)]
#[command(name = "model-inspector", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print producer, opsets and declared inputs/outputs as JSON
    Info {
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
    },
    /// Load the model like the server does and classify one image
    Probe {
        #[arg(long, default_value = DEFAULT_MODEL_PATH)]
        model: PathBuf,
        /// Image to classify; a solid green 224x224 PNG when omitted
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Info { model } => info(&model),
        Command::Probe { model, image } => probe(&model, image.as_deref()),
    }
}

fn info(model: &Path) -> anyhow::Result<()> {
    let metadata = ModelMetadata::read(model)?;
    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}

fn probe(model: &Path, image: Option<&Path>) -> anyhow::Result<()> {
    let bytes = match image {
        Some(path) => std::fs::read(path)
            .with_context(|| format!("Failed to read image {}", path.display()))?,
        None => solid_green_png()?,
    };

    tracing::info!("Loading model from {}", model.display());
    let classifier = Classifier::load(model);
    if let ModelHandle::Unavailable { reason } = classifier.model() {
        bail!("Model unavailable: {reason}");
    }

    tracing::info!("Classifying {} bytes", bytes.len());
    let prediction = classifier.classify(&bytes);
    println!("kind:       {}", prediction.kind());
    println!("disease:    {}", prediction.display_label());
    println!("confidence: {}", prediction.confidence());
    Ok(())
}

fn solid_green_png() -> anyhow::Result<Vec<u8>> {
    let img = RgbImage::from_pixel(224, 224, Rgb([0, 255, 0]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png)?;
    Ok(buf.into_inner())
}
