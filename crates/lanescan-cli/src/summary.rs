use std::time::Duration;

use console::Style;
use lanescan_core::pipeline::{DriverSummary, ExitReason, SessionConfig};

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            warn: Style::new().yellow().bold(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_session_summary(config: &SessionConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Lane Scan Session"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(config.input.display())
    );
    match config.output {
        Some(ref dir) => println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.path.apply_to(dir.display())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Output"),
            s.disabled.apply_to("discarded")
        ),
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pacing"),
        s.method.apply_to(config.driver.pacing)
    );
    match config.driver.max_cycles {
        Some(max) => println!(
            "  {:<14}{}",
            s.label.apply_to("Cycle limit"),
            s.value.apply_to(max)
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Cycle limit"),
            s.disabled.apply_to("none")
        ),
    }
    println!();
}

pub fn print_driver_summary(summary: &DriverSummary, wall: Duration) {
    let s = Styles::new();

    let exit = match summary.exit {
        ExitReason::Stopped => "stopped",
        ExitReason::Exhausted => "source exhausted",
        ExitReason::CycleLimit => "cycle limit reached",
        ExitReason::SessionEnded => "session ended",
        ExitReason::SourceLost => "source lost",
        ExitReason::Poisoned => "cycle thread failed",
    };

    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Cycles"),
        s.value.apply_to(summary.cycles)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Processed"),
        s.value.apply_to(summary.processed)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Segments"),
        s.value.apply_to(summary.segments)
    );
    if summary.empty > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Empty"),
            s.disabled.apply_to(summary.empty)
        );
    }
    if summary.faults > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Faults"),
            s.warn.apply_to(summary.faults)
        );
    }
    if summary.sink_errors > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Write errors"),
            s.warn.apply_to(summary.sink_errors)
        );
    }
    if summary.shutdown_timed_out {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Shutdown"),
            s.warn.apply_to("timed out")
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Exit"),
        s.method.apply_to(exit)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Wall time"),
        s.value.apply_to(format!("{:.2} s", wall.as_secs_f64()))
    );
}
