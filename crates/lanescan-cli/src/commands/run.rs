use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use lanescan_core::io::ser::SerReader;
use lanescan_core::pipeline::{
    CycleOutput, CycleStatus, FrameCycleOrchestrator, Pacing, SessionConfig, SessionDriver,
};
use lanescan_core::sink::{FrameSink, NullSink, PngSequenceSink};
use lanescan_core::source::{source_for_path, FrameSource, ImageSequenceSource, SourceId};
use tracing::{debug, info, warn};

use crate::summary::{print_driver_summary, print_session_summary};

#[derive(Args)]
pub struct RunArgs {
    /// Input SER file or image directory
    pub file: Option<PathBuf>,

    /// Session config file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory for annotated PNG frames
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Stop after this many cycles
    #[arg(long)]
    pub max_cycles: Option<u64>,

    /// Pace cycles at the real-time frame interval
    #[arg(long)]
    pub realtime: bool,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let config = load_config(args)?;
    config.validate()?;
    debug!(?config, "Session config loaded");
    print_session_summary(&config);

    let sink: Box<dyn FrameSink> = match config.output {
        Some(ref dir) => Box::new(
            PngSequenceSink::new(dir)
                .with_context(|| format!("Failed to create output directory {}", dir.display()))?,
        ),
        None => Box::new(NullSink),
    };

    let pb = progress_bar(expected_cycles(&config))?;
    let sink = ProgressSink {
        inner: sink,
        pb: pb.clone(),
    };

    let id = SourceId::from(config.input.as_path());
    let orchestrator = Arc::new(Mutex::new(FrameCycleOrchestrator::new(source_for_path(
        &config.input,
    ))));

    let started = Instant::now();
    let driver = SessionDriver::start(orchestrator, &id, sink, config.driver.clone())
        .with_context(|| format!("Failed to start session on {}", config.input.display()))?;
    let summary = driver.wait()?;
    info!(cycles = summary.cycles, exit = ?summary.exit, "Session finished");

    pb.finish_with_message("Done");
    print_driver_summary(&summary, started.elapsed());
    if let Some(ref dir) = config.output {
        println!("\nAnnotated frames saved to {}", dir.display());
    }

    Ok(())
}

fn load_config(args: &RunArgs) -> Result<SessionConfig> {
    let mut config = if let Some(ref config_path) = args.config {
        let contents = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config {}", config_path.display()))?;
        toml::from_str(&contents).context("Invalid session config")?
    } else {
        let input = args
            .file
            .clone()
            .context("An input file is required when no --config is given")?;
        SessionConfig::new(input)
    };

    // Command-line flags override the config file.
    if let Some(ref file) = args.file {
        config.input = file.clone();
    }
    if args.output.is_some() {
        config.output = args.output.clone();
    }
    if args.max_cycles.is_some() {
        config.driver.max_cycles = args.max_cycles;
    }
    if args.realtime {
        config.driver.pacing = Pacing::RealTime;
    }
    Ok(config)
}

fn expected_cycles(config: &SessionConfig) -> Option<u64> {
    let Some(frames) = source_len(&config.input) else {
        warn!(input = %config.input.display(), "Frame count unknown");
        return config.driver.max_cycles;
    };
    Some(match config.driver.max_cycles {
        Some(max) => max.min(frames),
        None => frames,
    })
}

fn source_len(path: &Path) -> Option<u64> {
    if path.is_dir() {
        let mut source = ImageSequenceSource::new();
        source.open(&SourceId::from(path)).ok()?;
        Some(source.len() as u64)
    } else {
        SerReader::open(path).ok().map(|r| r.frame_count() as u64)
    }
}

fn progress_bar(len: Option<u64>) -> Result<ProgressBar> {
    let pb = match len {
        Some(len) => {
            let pb = ProgressBar::new(len);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{msg:20} [{bar:40}] {pos}/{len}")?
                    .progress_chars("=> "),
            );
            pb
        }
        None => {
            let pb = ProgressBar::new_spinner();
            pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg:20} {pos}")?);
            pb
        }
    };
    Ok(pb)
}

/// Advances the progress bar for every presented cycle.
struct ProgressSink {
    inner: Box<dyn FrameSink>,
    pb: ProgressBar,
}

impl FrameSink for ProgressSink {
    fn present(&mut self, output: CycleOutput) -> lanescan_core::error::Result<()> {
        let msg = match output.status {
            CycleStatus::Processed => format!("{} segment(s)", output.segment_count()),
            CycleStatus::NoFrame | CycleStatus::EmptyFrame => "empty frame".to_string(),
            CycleStatus::Fault { .. } => "fault".to_string(),
            CycleStatus::SourceLost => "source lost".to_string(),
        };
        self.pb.set_message(msg);
        self.pb.inc(1);
        self.inner.present(output)
    }
}
