use anyhow::Result;
use clap::Args;
use lanescan_core::consts::FRAME_INTERVAL_MS;
use lanescan_core::region::{select_regions, MaskSource};

#[derive(Args)]
pub struct RegionsArgs {
    /// Elapsed session time in milliseconds
    pub elapsed_ms: u64,

    /// Interpret the value as a cycle number instead of milliseconds
    #[arg(long)]
    pub cycle: bool,
}

pub fn run(args: &RegionsArgs) -> Result<()> {
    let elapsed_ms = if args.cycle {
        args.elapsed_ms.saturating_mul(FRAME_INTERVAL_MS)
    } else {
        args.elapsed_ms
    };

    println!("Elapsed: {} ms", elapsed_ms);
    for region in select_regions(elapsed_ms) {
        let source = match region.source {
            MaskSource::Closed => "closed mask",
            MaskSource::Threshold => "threshold mask",
        };
        println!("  {:<12} {:<24} {}", region.branch.to_string(), region.roi.to_string(), source);
    }
    Ok(())
}
