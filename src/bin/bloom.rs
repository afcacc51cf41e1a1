use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

/// Without a subcommand, plays the animation in a window.
#[derive(Parser, Debug)]
#[command(name = "bloom", version)]
struct Cli {
    /// Log debug events (phase transitions, sink activity).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play the animation in a window (the default).
    Play(PlayArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Play the animation into a directory of numbered PNG frames.
    Frames(FramesArgs),
    /// Render the animation as an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the scene state at a frame as JSON.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct PlayArgs {
    /// Canvas side length in pixels.
    #[arg(long, default_value_t = bloom::DEFAULT_CANVAS_SIDE)]
    size: u32,

    /// Close the window as soon as the flower is finished.
    #[arg(long)]
    exit_on_finish: bool,
}

impl Default for PlayArgs {
    fn default() -> Self {
        Self {
            size: bloom::DEFAULT_CANVAS_SIDE,
            exit_on_finish: false,
        }
    }
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Frame index (0-based); the last frame shows the finished flower.
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas side length in pixels.
    #[arg(long, default_value_t = bloom::DEFAULT_CANVAS_SIDE)]
    size: u32,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Output directory.
    #[arg(long)]
    out_dir: PathBuf,

    /// Canvas side length in pixels.
    #[arg(long, default_value_t = bloom::DEFAULT_CANVAS_SIDE)]
    size: u32,

    /// Pace ticks on the wall clock instead of rendering as fast as possible.
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Canvas side length in pixels (must be even).
    #[arg(long, default_value_t = bloom::DEFAULT_CANVAS_SIDE)]
    size: u32,

    /// Replace the output file if it already exists.
    #[arg(long)]
    overwrite: bool,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd.unwrap_or_else(|| Command::Play(PlayArgs::default())) {
        Command::Play(args) => cmd_play(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Render(args) => cmd_render(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn make_player(size: u32) -> anyhow::Result<bloom::Player> {
    let ctx = bloom::AppContext::default().with_canvas(bloom::Canvas::square(size));
    bloom::Player::new(ctx).context("configure player")
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let player = make_player(args.size)?;
    let mut sink = bloom::WindowSink::new();
    if args.exit_on_finish {
        sink = sink.close_on_end();
    }

    let report = player
        .run(&mut bloom::PacedTimer, &mut bloom::CpuBackend::new(), &mut sink)
        .context("play animation window")?;

    tracing::info!(
        frames = report.frames_pushed,
        finished = report.final_scene.marker_visible,
        "window closed"
    );
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let player = make_player(args.size)?;
    let mut backend = bloom::CpuBackend::new();

    let frame = player.render_frame_at(bloom::FrameIndex(args.frame), &mut backend)?;
    bloom::write_png(&args.out, &frame)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let player = make_player(args.size)?;
    let mut backend = bloom::CpuBackend::new();
    let mut sink = bloom::PngSequenceSink::new(&args.out_dir);

    let report = if args.realtime {
        player.run(&mut bloom::PacedTimer, &mut backend, &mut sink)
    } else {
        player.run(&mut bloom::UnpacedTimer, &mut backend, &mut sink)
    }
    .with_context(|| format!("play into '{}'", args.out_dir.display()))?;

    eprintln!(
        "wrote {} frames to {}",
        report.frames_pushed,
        args.out_dir.display()
    );
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let player = make_player(args.size)?;
    let mut sink =
        bloom::FfmpegSink::new(bloom::Mp4Output::new(&args.out).overwrite(args.overwrite));

    player
        .run(&mut bloom::UnpacedTimer, &mut bloom::CpuBackend::new(), &mut sink)
        .with_context(|| format!("render '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let player = make_player(bloom::DEFAULT_CANVAS_SIDE)?;
    let idx = bloom::FrameIndex(args.frame);
    let snapshot = player.scene_at(idx).snapshot();
    let phase = bloom::phase_for_frame(
        idx,
        player.context().stem_samples,
        player.context().flower_samples,
    );

    let out = serde_json::json!({
        "frame": args.frame,
        "phase": phase,
        "scene": snapshot,
    });
    println!(
        "{}",
        serde_json::to_string_pretty(&out).context("serialize scene snapshot")?
    );
    Ok(())
}
