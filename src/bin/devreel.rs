use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "devreel", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resolve all stages and write the timeline as JSON.
    Plan(PlanArgs),
    /// Print the statistics of the reel's dataset.
    Stats,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Settings JSON (fps, time_scale).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the frame rate (frames per second).
    #[arg(long)]
    fps: Option<u32>,

    /// Override the time scale.
    #[arg(long)]
    time_scale: Option<f64>,

    /// Only write this stage (introduction, derivation_geometric, derivation_algebraic).
    #[arg(long, conflicts_with = "jsonl")]
    stage: Option<devreel::StageId>,

    /// Output path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Stream one JSON event per line instead of a single document.
    #[arg(long, default_value_t = false)]
    jsonl: bool,
}

fn main() -> anyhow::Result<()> {
    let _ = devreel::telemetry::init_default_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Plan(args) => cmd_plan(args),
        Command::Stats => cmd_stats(),
    }
}

fn settings(args: &PlanArgs) -> anyhow::Result<devreel::ReelSettings> {
    let mut s = match &args.config {
        Some(path) => devreel::ReelSettings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => devreel::ReelSettings::default(),
    };
    if let Some(fps) = args.fps {
        s.fps = devreel::Fps::new(fps, 1)?;
    }
    if let Some(scale) = args.time_scale {
        s.time_scale = scale;
    }
    s.validate()?;
    Ok(s)
}

fn output(path: Option<&PathBuf>) -> anyhow::Result<Box<dyn Write>> {
    Ok(match path {
        Some(p) => {
            if let Some(parent) = p.parent().filter(|d| !d.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("create output dir '{}'", parent.display()))?;
            }
            let f = File::create(p).with_context(|| format!("create '{}'", p.display()))?;
            Box::new(BufWriter::new(f))
        }
        None => Box::new(BufWriter::new(std::io::stdout())),
    })
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let settings = settings(&args)?;
    let mut out = output(args.out.as_ref())?;

    let timeline = if args.jsonl {
        let mut sink = devreel::JsonLinesSink::new(&mut out);
        let timeline = devreel::plan_reel(settings, &mut sink)?;
        eprintln!("streamed {} events", sink.lines_written());
        timeline
    } else {
        let timeline = devreel::plan_reel(settings, &mut devreel::NullSink)?;
        match args.stage {
            Some(id) => {
                let stage = timeline
                    .stage(id)
                    .with_context(|| format!("stage {id} missing from timeline"))?;
                serde_json::to_writer_pretty(&mut out, stage)?;
            }
            None => serde_json::to_writer_pretty(&mut out, &timeline)?,
        }
        writeln!(out)?;
        timeline
    };
    out.flush().context("flush output")?;

    let fp = devreel::timeline_fingerprint(&timeline)?;
    eprintln!(
        "planned {} stages, {:.2}s, fingerprint {fp}",
        timeline.stages.len(),
        timeline.duration_s()
    );
    if let Some(p) = &args.out {
        eprintln!("wrote {}", p.display());
    }
    Ok(())
}

fn cmd_stats() -> anyhow::Result<()> {
    let stats = devreel::compute_deviation_stats(&devreel::HEIGHT_SAMPLE)?;
    let q = devreel::format_quantity;
    println!("n        = {}", stats.count);
    println!("mean     = {}", q(stats.mean));
    println!("SSD      = {}", q(stats.sum_of_squared_deviations));
    println!(
        "variance = {} (SSD / {})",
        q(stats.variance),
        stats.degrees_of_freedom()
    );
    println!("sd       = {}", q(stats.standard_deviation));
    Ok(())
}
