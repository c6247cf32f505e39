//! Command-line packer: decodes image files and writes one framebuffer blob.

use std::collections::HashSet;
use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use tracing::{Level, error, info, warn};
use zenfbpack::{
    Background, ByteOrder, Frame, PackConfig, PackSummary, PixelFormat, SourceError, Unstoppable,
};

/// Extensions picked up when scanning a folder.
const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "bmp", "png"];

#[derive(Parser, Debug)]
#[command(name = "zenfbpack", version, about = "Pack images into a 4 KiB-aligned framebuffer blob")]
struct Args {
    /// Image files and folders, packed in the order given
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// ARGB8888, ARGB1555, ARGB4444, RGB666, RGB565, RGB444 or RGB888
    #[arg(short, long, default_value = "ARGB8888")]
    format: PixelFormat,

    /// little (<) or big (>)
    #[arg(short = 'e', long, default_value = "little")]
    byte_order: ByteOrder,

    /// Color translucent pixels are blended onto (ARGB formats only)
    #[arg(short, long, default_value = "#ffffff")]
    background: Background,

    /// Output .bin file
    #[arg(short, long)]
    output: PathBuf,

    /// More logging (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(summary) => {
            info!(
                images = summary.images,
                bytes = summary.bytes_written,
                "saved to {}",
                args.output.display()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("conversion failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<PackSummary, Box<dyn Error>> {
    let paths = collect_inputs(&args.inputs)?;
    if paths.is_empty() {
        return Err("no images to pack".into());
    }

    let config = PackConfig::new(args.format)
        .with_order(args.byte_order)
        .with_background(args.background);
    info!(
        images = paths.len(),
        format = %config.format,
        order = %config.order,
        background = %config.background,
        "packing"
    );

    let mut sink = File::create(&args.output)?;
    let frames = paths.iter().map(|p| load(p));
    match config.pack_to(frames, &mut sink, Unstoppable) {
        Ok(summary) => Ok(summary),
        Err(e) => {
            drop(sink);
            if let Err(rm) = fs::remove_file(&args.output) {
                warn!("could not remove partial output {}: {rm}", args.output.display());
            }
            Err(e.into())
        }
    }
}

/// Expand folders and drop repeated paths, keeping first-seen order.
///
/// Folder contents are sorted by path so repeated runs give the same blob.
fn collect_inputs(inputs: &[PathBuf]) -> std::io::Result<Vec<PathBuf>> {
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut entries = Vec::new();
            for entry in fs::read_dir(input)? {
                let path = entry?.path();
                if path.is_file() && has_image_extension(&path) {
                    entries.push(path);
                }
            }
            entries.sort();
            for path in entries {
                if seen.insert(path.clone()) {
                    paths.push(path);
                }
            }
        } else if seen.insert(input.clone()) {
            paths.push(input.clone());
        }
    }
    Ok(paths)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

fn load(path: &Path) -> Result<Frame<'static>, SourceError> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    info!("processing {name}");

    let img = image::open(path)
        .map_err(|e| SourceError::new(name.clone(), e))?
        .into_rgba8();
    let (width, height) = img.dimensions();
    Ok(Frame::new(name, img.into_raw(), width, height))
}
