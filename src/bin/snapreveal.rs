use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

const MIN_POLL_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Parser, Debug)]
#[command(name = "snapreveal", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the intro card at one instant of the dissolve as a PNG.
    Frame(FrameArgs),
    /// Render the whole dissolve as a numbered PNG sequence.
    Frames(FramesArgs),
    /// Run the live reveal flow and print each distinct view as JSON.
    Simulate(SimulateArgs),
}

#[derive(Parser, Debug)]
struct CommonArgs {
    /// Optional JSON config; missing fields use the built-in defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output width in pixels.
    #[arg(long, default_value_t = 640)]
    width: u32,

    /// Output height in pixels.
    #[arg(long, default_value_t = 360)]
    height: u32,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Seconds since the click.
    #[arg(long, default_value_t = 0.0)]
    time: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Output directory for `frame_00000.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Output frames-per-second.
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// Render chunks on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Worker threads for `--parallel` (defaults to rayon's choice).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct SimulateArgs {
    #[command(flatten)]
    common: CommonArgs,

    /// Seconds after the click at which the embedded scene reports ready.
    #[arg(long, default_value_t = 2.0)]
    scene_ready_after: f64,

    /// Total seconds to run.
    #[arg(long, default_value_t = 6.0)]
    run_for: f64,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Simulate(args) => cmd_simulate(args),
    }
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<snapreveal::RevealConfig> {
    match path {
        Some(p) => Ok(snapreveal::RevealConfig::from_path(p)
            .with_context(|| format!("load config '{}'", p.display()))?),
        None => Ok(snapreveal::RevealConfig::default()),
    }
}

fn make_renderer(
    common: &CommonArgs,
    cfg: &snapreveal::RevealConfig,
) -> anyhow::Result<snapreveal::DissolveFrameRenderer> {
    let canvas = snapreveal::Canvas::new(common.width, common.height)?;
    Ok(snapreveal::DissolveFrameRenderer::new(canvas, cfg)?)
}

fn secs_arg(name: &str, v: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(v).with_context(|| format!("--{name} must be a non-negative number"))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.common.config.as_ref())?;
    let renderer = make_renderer(&args.common, &cfg)?;
    let timeline = snapreveal::DissolveTimeline::new(&cfg.snap)?;
    let at = secs_arg("time", args.time)?;

    let frame = snapreveal::render_dissolve_frame(&renderer, &timeline, at)?;
    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &frame.to_straight_rgba8(),
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.common.config.as_ref())?;
    let renderer = make_renderer(&args.common, &cfg)?;
    let timeline = snapreveal::DissolveTimeline::new(&cfg.snap)?;

    let opts = snapreveal::RenderOpts {
        fps: snapreveal::Fps::new(args.fps, 1)?,
        parallel: args.parallel,
        threads: args.threads,
        ..Default::default()
    };
    let range = snapreveal::full_range(&timeline, opts.fps);
    let mut sink = snapreveal::PngSequenceSink::new(&args.out_dir);
    let stats = snapreveal::render_dissolve_frames(&renderer, &timeline, range, &opts, &mut sink)?;

    println!(
        "wrote {} frames to {} ({} rendered, {} elided)",
        stats.frames_total,
        args.out_dir.display(),
        stats.frames_rendered,
        stats.frames_elided
    );
    Ok(())
}

fn cmd_simulate(args: SimulateArgs) -> anyhow::Result<()> {
    let cfg = load_config(args.common.config.as_ref())?;
    let scene_ready_after = secs_arg("scene-ready-after", args.scene_ready_after)?;
    let run_for = secs_arg("run-for", args.run_for)?;
    let poll = cfg.snap.frame_interval().max(MIN_POLL_INTERVAL);

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()
        .context("build tokio runtime")?;

    rt.block_on(async move {
        let shell = snapreveal::PresentationShell::new(cfg)?;
        let start = tokio::time::Instant::now();
        let mut ticker = tokio::time::interval(poll);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut last: Option<snapreveal::View> = None;
        let mut clicked = false;
        let mut scene_ready = false;
        while start.elapsed() < run_for {
            ticker.tick().await;
            if !clicked {
                clicked = shell.click().is_some();
            }
            if !scene_ready && shell.is_revealed() && start.elapsed() >= scene_ready_after {
                shell.scene_ready();
                scene_ready = true;
            }

            let view = shell.render();
            if last.as_ref() != Some(&view) {
                println!(
                    "{:>6}ms {}",
                    start.elapsed().as_millis(),
                    serde_json::to_string(&view).context("serialize view")?
                );
                last = Some(view);
            }
        }
        shell.unmount();
        anyhow::Ok(())
    })
}
