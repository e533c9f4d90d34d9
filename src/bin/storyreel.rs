use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use sha2::Digest as _;
use tracing_subscriber::EnvFilter;

use storyreel::{
    CompositionSettings, FfmpegSink, FfmpegSinkOpts, FontSet, FrameIndex, InputProps,
    RenderSession, RenderSessionOpts,
};

#[derive(Parser, Debug)]
#[command(name = "storyreel", version, about = "Render storyboard explainer videos")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single frame as a PNG.
    Frame(FrameArgs),
    /// Render an MP4 video (requires `ffmpeg` on PATH).
    Render(RenderArgs),
    /// Print the frame schedule of the storyboard as JSON.
    Timeline(TimelineArgs),
    /// Print the built-in demo input props as JSON.
    DemoProps,
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Input props JSON (`{ "storyboard": .., "audioSrc": .. }`). Defaults to the demo storyboard.
    #[arg(long)]
    props: Option<PathBuf>,

    /// Composition settings JSON; flags below override individual fields.
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long)]
    width: Option<u32>,

    #[arg(long)]
    height: Option<u32>,

    #[arg(long)]
    fps: Option<u32>,

    /// Fixed composition length in frames; 0 derives it from the storyboard.
    #[arg(long)]
    duration_frames: Option<u64>,

    /// Length of the intro title card in seconds.
    #[arg(long)]
    title_secs: Option<f64>,

    /// Length of each segment slot in seconds.
    #[arg(long)]
    segment_secs: Option<f64>,

    /// Subtitle under the storyboard title on the intro card.
    #[arg(long)]
    intro_subtitle: Option<String>,

    /// Footer line on title cards.
    #[arg(long)]
    brand_line: Option<String>,

    /// Directory `audioSrc` is resolved against.
    #[arg(long)]
    public_dir: Option<PathBuf>,

    /// Extra font directory searched before system fonts.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Frame index (0-based).
    #[arg(long)]
    frame: u64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Print the frame's display list as JSON to stdout.
    #[arg(long)]
    dump_display_list: bool,

    /// Print resolved font families and SHA-256 of their bytes.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output MP4 path.
    #[arg(long)]
    out: PathBuf,

    /// Render frames on a thread pool.
    #[arg(long)]
    parallel: bool,

    #[arg(long, default_value_t = 64)]
    chunk_size: usize,

    /// Worker threads for `--parallel`.
    #[arg(long)]
    threads: Option<usize>,

    /// Do not mux the narration audio.
    #[arg(long)]
    no_audio: bool,

    /// Print resolved font families and SHA-256 of their bytes.
    #[arg(long)]
    dump_fonts: bool,
}

#[derive(Args, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    input: InputArgs,
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Render(args) => cmd_render(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::DemoProps => cmd_demo_props(),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

impl InputArgs {
    fn load(&self) -> anyhow::Result<(InputProps, CompositionSettings)> {
        let props = match &self.props {
            Some(path) => InputProps::from_path(path)
                .with_context(|| format!("load props '{}'", path.display()))?,
            None => storyreel::demo_props(),
        };

        let mut settings = match &self.settings {
            Some(path) => CompositionSettings::from_path(path)
                .with_context(|| format!("load settings '{}'", path.display()))?,
            None => CompositionSettings::default(),
        };
        if let Some(v) = self.width {
            settings.width = v;
        }
        if let Some(v) = self.height {
            settings.height = v;
        }
        if let Some(v) = self.fps {
            settings.fps = v;
        }
        if let Some(v) = self.duration_frames {
            settings.duration_frames = (v > 0).then_some(v);
        }
        if let Some(v) = self.title_secs {
            settings.title_secs = v;
        }
        if let Some(v) = self.segment_secs {
            settings.segment_secs = v;
        }
        if let Some(v) = &self.intro_subtitle {
            settings.intro_subtitle = v.clone();
        }
        if let Some(v) = &self.brand_line {
            settings.brand_line = v.clone();
        }
        if let Some(v) = &self.public_dir {
            settings.public_dir = v.clone();
        }
        if let Some(v) = &self.fonts_dir {
            settings.fonts_dir = Some(v.clone());
        }
        settings.validate().context("invalid composition settings")?;
        Ok((props, settings))
    }
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (props, settings) = args.input.load()?;
    let fonts = FontSet::discover(settings.fonts_dir.as_deref());
    if args.dump_fonts {
        dump_font_diagnostics(&fonts);
    }

    let mut session =
        RenderSession::with_fonts(props, settings, RenderSessionOpts::default(), Arc::new(fonts))?;
    let idx = FrameIndex(args.frame);

    if args.dump_display_list {
        let list = session.display_list(idx)?;
        println!("{}", serde_json::to_string_pretty(&list)?);
    }

    let frame = session.render_frame(idx)?;
    ensure_parent(&args.out)?;
    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let (props, settings) = args.input.load()?;
    let fonts = FontSet::discover(settings.fonts_dir.as_deref());
    if args.dump_fonts {
        dump_font_diagnostics(&fonts);
    }

    let opts = RenderSessionOpts {
        parallel: args.parallel,
        chunk_size: args.chunk_size,
        threads: args.threads,
        enable_audio: !args.no_audio,
        ..RenderSessionOpts::default()
    };
    let mut session = RenderSession::with_fonts(props, settings, opts, Arc::new(fonts))?;

    let bg = storyreel::composition::theme::PALETTE.bg;
    let mut sink =
        FfmpegSink::new(FfmpegSinkOpts::new(&args.out).with_bg([bg.r, bg.g, bg.b, 255]));
    let range = session.timeline().full_range();
    let stats = session.render_range(range, &mut sink)?;

    eprintln!("wrote {} ({} frames)", args.out.display(), stats.frames_total);
    Ok(())
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let (props, settings) = args.input.load()?;
    let timeline = storyreel::Timeline::new(&settings, props.storyboard.segments.len())?;
    let out = serde_json::json!({
        "fps": timeline.fps.as_f64(),
        "durationFrames": timeline.duration,
        "titleFrames": timeline.title_frames,
        "segmentFrames": timeline.segment_frames,
        "entries": timeline.entries(&props.storyboard),
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_demo_props() -> anyhow::Result<()> {
    println!("{}", storyreel::demo_props().to_json_pretty()?);
    Ok(())
}

fn ensure_parent(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

fn dump_font_diagnostics(fonts: &FontSet) {
    eprintln!("font diagnostics:");
    for (role, face) in [
        ("sans", &fonts.sans),
        ("sans_bold", &fonts.sans_bold),
        ("mono", &fonts.mono),
    ] {
        match face {
            Some(face) => {
                eprintln!("  {role}:");
                eprintln!("    family: {}", face.family);
                eprintln!("    index:  {}", face.index);
                eprintln!("    sha256: {}", sha256_hex(&face.bytes));
            }
            None => eprintln!("  {role}: <none>"),
        }
    }
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{b:02x}"));
    }
    out
}
