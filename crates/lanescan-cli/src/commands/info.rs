use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use lanescan_core::io::ser::SerReader;
use lanescan_core::source::{FrameSource, ImageSequenceSource, SourceId};

#[derive(Args)]
pub struct InfoArgs {
    /// Input SER file or image directory
    pub file: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    if args.file.is_dir() {
        return print_sequence_info(args);
    }

    let reader = SerReader::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let info = reader.source_info(&args.file);

    println!("File:        {}", info.filename.display());
    println!("Frames:      {}", info.total_frames);
    println!("Dimensions:  {}x{}", info.width, info.height);
    println!("Bit depth:   {}", info.bit_depth);
    println!("Color mode:  {:?}", info.color_mode);

    if let Some(frame_bytes) = reader.header.frame_byte_size() {
        let total_mb = (frame_bytes * info.total_frames) as f64 / (1024.0 * 1024.0);
        println!("Data size:   {:.1} MB", total_mb);
    }
    let seconds =
        info.total_frames as f64 * lanescan_core::consts::FRAME_INTERVAL_MS as f64 / 1000.0;
    println!("Session:     {:.1} s at real-time pacing", seconds);

    Ok(())
}

fn print_sequence_info(args: &InfoArgs) -> Result<()> {
    let mut source = ImageSequenceSource::new();
    source.open(&SourceId::from(args.file.as_path()))?;
    let frames = source.len();

    println!("Directory:   {}", args.file.display());
    println!("Frames:      {}", frames);
    if let Some(first) = source.read()? {
        println!("Dimensions:  {}x{}", first.width(), first.height());
    }
    source.release();
    Ok(())
}
