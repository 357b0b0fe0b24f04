use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rayon::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "coachmarks", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a tour with auto-advance and print the delegate event log.
    Simulate(SimulateArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render every frame of the tour as a numbered PNG sequence.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct PlaybackArgs {
    /// Input tour JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Ticks per second.
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// Seconds each settled step stays up before advancing.
    #[arg(long, default_value_t = 1.5)]
    dwell: f64,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    playback: PlaybackArgs,

    /// Print events as JSON lines.
    #[arg(long)]
    json: bool,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    playback: PlaybackArgs,

    /// Time in seconds since `start`.
    #[arg(long)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Surface scale relative to the tour size.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    playback: PlaybackArgs,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Surface scale relative to the tour size.
    #[arg(long, default_value_t = 1.0)]
    scale: f64,
}

const BACKDROP: [u8; 4] = [236, 238, 243, 255];

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Simulate(args) => cmd_simulate(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
    }
}

fn load(args: &PlaybackArgs) -> anyhow::Result<(coachmarks::TourSpec, coachmarks::Playback)> {
    let tour = coachmarks::TourSpec::from_path(&args.in_path)
        .with_context(|| format!("load tour '{}'", args.in_path.display()))?;
    let playback = coachmarks::Playback {
        fps: args.fps,
        dwell: args.dwell,
        ..coachmarks::Playback::default()
    };
    playback.validate()?;
    Ok((tour, playback))
}

fn surface_size(tour: &coachmarks::TourSpec, scale: f64) -> anyhow::Result<(u32, u32)> {
    anyhow::ensure!(scale.is_finite() && scale > 0.0, "scale must be > 0");
    let w = (tour.width * scale).round();
    let h = (tour.height * scale).round();
    anyhow::ensure!(
        (1.0..=f64::from(u16::MAX)).contains(&w) && (1.0..=f64::from(u16::MAX)).contains(&h),
        "surface {w}x{h} out of range"
    );
    Ok((w as u32, h as u32))
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let (tour, playback) = load(&args.playback)?;
    let mut overlay = tour.build_overlay()?;
    let log = coachmarks::RecordingDelegate::new();
    overlay.set_delegate(log.clone());

    let report = playback.run(&mut overlay, |_| {})?;
    for event in log.events() {
        if args.json {
            println!("{}", serde_json::to_string(&event)?);
        } else {
            println!("{event:?}");
        }
    }
    if args.json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        eprintln!(
            "{} frames, {:.2}s, {} advances, completed: {}",
            report.frames, report.duration, report.advances, report.completed
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (tour, playback) = load(&args.playback)?;
    let (w, h) = surface_size(&tour, args.scale)?;
    let mut overlay = tour.build_overlay()?;
    let frame = playback.frame_at(&mut overlay, args.time)?;

    let settings = coachmarks::RenderSettings {
        clear_rgba: Some(BACKDROP),
    };
    let mut renderer = coachmarks::CpuRenderer::new(w, h, settings)?;
    let rgba = renderer.render(&frame)?;
    write_png(&args.out, &rgba)?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (tour, playback) = load(&args.playback)?;
    let (w, h) = surface_size(&tour, args.scale)?;
    let mut overlay = tour.build_overlay()?;
    let frames = playback.frames(&mut overlay)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let settings = coachmarks::RenderSettings {
        clear_rgba: Some(BACKDROP),
    };
    frames.par_iter().enumerate().try_for_each_init(
        || coachmarks::CpuRenderer::new(w, h, settings.clone()),
        |renderer, (idx, frame)| -> anyhow::Result<()> {
            let renderer = renderer
                .as_mut()
                .map_err(|e| anyhow::anyhow!("create renderer: {e}"))?;
            let rgba = renderer.render(frame)?;
            write_png(&args.out_dir.join(format!("frame_{idx:05}.png")), &rgba)
        },
    )?;
    eprintln!("wrote {} frames to {}", frames.len(), args.out_dir.display());
    Ok(())
}

fn write_png(path: &Path, frame: &coachmarks::FrameRGBA) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        path,
        &frame.to_straight(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}
