use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tvg_texture::{AnimationTexture, Config, CpuTexture, Lifecycle, SvgEngine};

#[derive(Parser, Debug)]
#[command(name = "tvgtex", version)]
struct Cli {
    /// Optional JSON config (engine and session options).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print size and timing metadata of an animation.
    Info(InfoArgs),
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
}

#[derive(Parser, Debug)]
struct InfoArgs {
    /// Input animation source (SVG).
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input animation source (SVG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Playback position; wrapped into the animation's frame range.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    frame: f32,

    /// Output width in pixels (defaults to the intrinsic width).
    #[arg(long, requires = "height")]
    width: Option<u32>,

    /// Output height in pixels (defaults to the intrinsic height).
    #[arg(long, requires = "width")]
    height: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    let sys = Lifecycle::new(Arc::new(SvgEngine::new(config.engine.clone())));
    let _guard = sys.scoped()?;

    match cli.cmd {
        Command::Info(args) => cmd_info(&sys, &config, args),
        Command::Frame(args) => cmd_frame(&sys, &config, args),
    }
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("read source '{}'", path.display()))
}

fn open(
    sys: &Lifecycle,
    config: &Config,
    path: &Path,
) -> anyhow::Result<AnimationTexture<CpuTexture>> {
    let source = read_source(path)?;
    let session =
        AnimationTexture::with_opts(sys, &source, CpuTexture::new(), config.session.clone())
            .with_context(|| format!("open animation '{}'", path.display()))?;
    Ok(session)
}

fn cmd_info(sys: &Lifecycle, config: &Config, args: InfoArgs) -> anyhow::Result<()> {
    let mut session = open(sys, config, &args.in_path)?;
    println!("width:        {}", session.width());
    println!("height:       {}", session.height());
    println!("duration:     {}", session.duration());
    println!("total_frames: {}", session.total_frames());
    println!("fps:          {}", session.fps());
    session.dispose();
    Ok(())
}

fn cmd_frame(sys: &Lifecycle, config: &Config, args: FrameArgs) -> anyhow::Result<()> {
    let mut session = open(sys, config, &args.in_path)?;
    if let (Some(w), Some(h)) = (args.width, args.height) {
        session.resize(w, h)?;
    }
    session.set_frame(args.frame)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    session.texture()?.save_png(&args.out)?;
    session.dispose();

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
