use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "satmark", version)]
struct Cli {
    /// Log derived timing and generation details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the full sprite atlas as a PNG.
    Atlas(AtlasArgs),
    /// Render the cell visible at a playback time as a PNG.
    Frame(FrameArgs),
    /// Print the derived timing as JSON.
    Timing(TimingArgs),
}

#[derive(Args, Debug)]
struct OptsArgs {
    /// Satellite options JSON; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Staggered outward pulses per cycle.
    #[arg(long)]
    num_waves: Option<u32>,

    /// Pulse color (`#RGB`, `#RRGGBB`, ...).
    #[arg(long)]
    wave_color: Option<satmark::Color>,

    /// Core ring color.
    #[arg(long)]
    core_color: Option<satmark::Color>,

    /// Shield arc color.
    #[arg(long)]
    shield_color: Option<satmark::Color>,
}

impl OptsArgs {
    fn resolve(&self) -> anyhow::Result<satmark::SatelliteOpts> {
        let base = match &self.config {
            Some(path) => satmark::SatelliteOptsPatch::from_path(path)?,
            None => satmark::SatelliteOptsPatch::default(),
        };
        let flags = satmark::SatelliteOptsPatch {
            num_waves: self.num_waves,
            wave_color: self.wave_color,
            core_color: self.core_color,
            shield_color: self.shield_color,
            size: None,
        };
        Ok(base.merge(&flags).resolve())
    }
}

#[derive(Args, Debug)]
struct AtlasArgs {
    #[command(flatten)]
    opts: OptsArgs,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    opts: OptsArgs,

    /// Playback time in milliseconds.
    #[arg(long)]
    time_ms: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TimingArgs {
    #[command(flatten)]
    opts: OptsArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Atlas(args) => cmd_atlas(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Timing(args) => cmd_timing(args),
    }
}

fn cmd_atlas(args: AtlasArgs) -> anyhow::Result<()> {
    let opts = args.opts.resolve()?;
    let atlas = satmark::generate_atlas(&opts.to_animation_config())?;
    atlas
        .save_png(&args.out)
        .with_context(|| format!("write atlas '{}'", args.out.display()))?;

    eprintln!("wrote {} ({})", args.out.display(), atlas.fingerprint());
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let opts = args.opts.resolve()?;
    let atlas = satmark::generate_atlas(&opts.to_animation_config())?;
    let mut animator = satmark::FrameAnimator::for_atlas(&atlas)?;
    let frame = animator.advance(args.time_ms)?;
    atlas
        .frame_rgba(frame)?
        .save_png(&args.out)
        .with_context(|| format!("write frame '{}'", args.out.display()))?;

    eprintln!("wrote {} (frame {frame})", args.out.display());
    Ok(())
}

fn cmd_timing(args: TimingArgs) -> anyhow::Result<()> {
    let opts = args.opts.resolve()?;
    let config = opts.to_animation_config();
    let (layout, timing) = satmark::check_config(&config)?;

    let report = serde_json::json!({
        "layout": layout,
        "timing": timing,
        "frame_duration_ms": satmark::DEFAULT_FRAME_DURATION_MS,
    });
    let text = serde_json::to_string_pretty(&report).context("serialize timing")?;
    println!("{text}");
    Ok(())
}
