use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use magic_doodle::{Canvas, DoodleScript, FrameRGBA, ScriptPlayer, Session};

#[derive(Parser, Debug)]
#[command(name = "magic-doodle", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Replay a script and write one frame as a PNG.
    Frame(FrameArgs),
    /// Replay a script, then write an animated frame sequence as PNGs.
    Frames(FramesArgs),
    /// Write the built-in demo script as JSON.
    Demo(DemoArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    /// Input doodle script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Keep the animation running until this script time (ms).
    #[arg(long)]
    at_ms: Option<f64>,

    /// Write the static export frame instead of the last animated one.
    #[arg(long, default_value_t = false)]
    export: bool,
}

#[derive(Parser, Debug)]
struct FramesArgs {
    /// Input doodle script JSON.
    #[arg(long)]
    script: PathBuf,

    /// Directory receiving `frame_00000.png`, `frame_00001.png`, ...
    #[arg(long)]
    out_dir: PathBuf,

    /// Number of frames to write.
    #[arg(long, default_value_t = 60)]
    count: u32,

    /// Frame rate of the sequence.
    #[arg(long, default_value_t = magic_doodle::DEFAULT_FPS)]
    fps: f64,
}

#[derive(Parser, Debug)]
struct DemoArgs {
    /// Output JSON path.
    #[arg(long)]
    out: PathBuf,

    #[arg(long, default_value_t = 640)]
    width: u32,

    #[arg(long, default_value_t = 480)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Frames(args) => cmd_frames(args),
        Command::Demo(args) => cmd_demo(args),
    }
}

fn load_script(path: &Path) -> anyhow::Result<DoodleScript> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("read script '{}'", path.display()))?;
    let script = DoodleScript::from_json(&json)
        .with_context(|| format!("parse script '{}'", path.display()))?;
    Ok(script)
}

fn replay(script: &DoodleScript) -> anyhow::Result<(Session, ScriptPlayer)> {
    let mut session = script.session()?;
    let mut player = ScriptPlayer::new();
    player.play(&mut session, &script.steps, |_, _| Ok(()))?;
    Ok((session, player))
}

fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn write_png(path: &Path, frame: &FrameRGBA) -> anyhow::Result<()> {
    let straight;
    let frame = if frame.premultiplied {
        straight = frame.to_straight();
        &straight
    } else {
        frame
    };
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let script = load_script(&args.script)?;
    let (mut session, mut player) = replay(&script)?;

    if let Some(at) = args.at_ms
        && at > player.clock()
    {
        let ms = at - player.clock();
        player.advance(&mut session, ms, magic_doodle::DEFAULT_FPS, &mut |_: &Session, _| {
            Ok(())
        })?;
    }

    ensure_parent_dir(&args.out)?;
    if args.export {
        write_png(&args.out, &session.export_frame())?;
    } else {
        write_png(&args.out, session.frame())?;
    }

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.fps.is_finite() && args.fps > 0.0,
        "--fps must be finite and > 0"
    );
    let script = load_script(&args.script)?;
    let (mut session, mut player) = replay(&script)?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut written = 0u32;
    let out_dir = args.out_dir.clone();
    let mut write = |s: &Session, _t: f64| -> magic_doodle::DoodleResult<()> {
        if written >= args.count {
            return Ok(());
        }
        let path = out_dir.join(format!("frame_{written:05}.png"));
        write_png(&path, s.frame())?;
        written += 1;
        Ok(())
    };

    if !session.is_animating() {
        let step = magic_doodle::Step::Animate { on: true };
        player.apply(&mut session, &step, &mut write)?;
    }
    // Starting above already wrote the first frame; the counter caps the rest.
    let ms = f64::from(args.count) * 1000.0 / args.fps;
    player.advance(&mut session, ms, args.fps, &mut write)?;

    eprintln!("wrote {} frames to {}", written, args.out_dir.display());
    Ok(())
}

fn cmd_demo(args: DemoArgs) -> anyhow::Result<()> {
    let canvas = Canvas::new(args.width, args.height)?;
    let json = DoodleScript::demo(canvas).to_json_pretty()?;
    ensure_parent_dir(&args.out)?;
    std::fs::write(&args.out, json)
        .with_context(|| format!("write script '{}'", args.out.display()))?;
    eprintln!("wrote {}", args.out.display());
    Ok(())
}
