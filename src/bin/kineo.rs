use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use kineo::{
    AspectRatio, Canvas, Category, CpuBackend, CpuBackendOpts, Document, FrameRate, ManualFrames,
    MotionSession, ProjectSettings, Resolution, SpriteSheetOpts, TemplateCatalog, TimelineView,
};

#[derive(Parser, Debug)]
#[command(name = "kineo", version, about = "Render motion-graphics templates")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the available templates.
    Templates(TemplatesArgs),
    /// Render a single frame at native size as a PNG.
    Frame(FrameArgs),
    /// Render a sprite sheet as a PNG.
    Sprite(SpriteArgs),
    /// Render the timeline panel as a PNG.
    Timeline(TimelineArgs),
    /// Simulate live playback and write the displayed frames.
    Preview(PreviewArgs),
}

#[derive(Args, Debug)]
struct CatalogArgs {
    /// Extra templates (JSON) merged into the built-in catalog.
    #[arg(long)]
    catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Template id to instantiate.
    #[arg(long)]
    template: String,

    /// Project settings JSON; the template still sets duration and category.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Override the aspect ratio (16:9, 9:16, 1:1, 4:5).
    #[arg(long, value_parser = parse_aspect)]
    aspect: Option<AspectRatio>,

    /// Override the resolution tier (720p, 1080p, 2160p).
    #[arg(long, value_parser = parse_resolution)]
    resolution: Option<Resolution>,

    /// Override the frame rate (24, 30, 60).
    #[arg(long, value_parser = parse_fps)]
    fps: Option<FrameRate>,

    /// Font file for text layers (defaults to $KINEO_FONT).
    #[arg(long)]
    font: Vec<PathBuf>,
}

#[derive(Args, Debug)]
struct TemplatesArgs {
    #[command(flatten)]
    catalog: CatalogArgs,

    /// Only list one category (e.g. lower-thirds).
    #[arg(long, value_parser = parse_category)]
    category: Option<Category>,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Normalized time in [0, 1].
    #[arg(long, default_value_t = 0.5)]
    t: f64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SpriteArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Frame count (clamped to 1..=30).
    #[arg(long, default_value_t = 12)]
    frames: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct TimelineArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Playhead position in [0, 1].
    #[arg(long, default_value_t = 0.0)]
    t: f64,

    /// Panel width in pixels.
    #[arg(long, default_value_t = 960)]
    width: u32,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    project: ProjectArgs,

    /// Simulated wall-clock seconds of playback.
    #[arg(long, default_value_t = 2.0)]
    seconds: f64,

    /// Write every n-th displayed frame.
    #[arg(long, default_value_t = 10)]
    every: u32,

    /// Display width in pixels; height follows the aspect ratio.
    #[arg(long, default_value_t = 480)]
    display_width: u32,

    /// Output directory for `preview_NNNN.png` files.
    #[arg(long)]
    out_dir: PathBuf,
}

fn main() -> anyhow::Result<()> {
    initialise_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Templates(args) => cmd_templates(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Sprite(args) => cmd_sprite(args),
        Command::Timeline(args) => cmd_timeline(args),
        Command::Preview(args) => cmd_preview(args),
    }
}

fn initialise_tracing() {
    let filter = EnvFilter::try_from_env("KINEO_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_json_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, String> {
    serde_json::from_value(serde_json::Value::String(s.to_owned())).map_err(|e| e.to_string())
}

fn parse_aspect(s: &str) -> Result<AspectRatio, String> {
    parse_json_enum(s)
}

fn parse_resolution(s: &str) -> Result<Resolution, String> {
    parse_json_enum(s)
}

fn parse_category(s: &str) -> Result<Category, String> {
    parse_json_enum(s)
}

fn parse_fps(s: &str) -> Result<FrameRate, String> {
    let n: u32 = s.parse().map_err(|e| format!("invalid fps '{s}': {e}"))?;
    FrameRate::try_from(n)
}

fn load_catalog(args: &CatalogArgs) -> anyhow::Result<Arc<TemplateCatalog>> {
    let mut catalog = TemplateCatalog::builtin()?;
    if let Some(path) = &args.catalog {
        let extra = TemplateCatalog::from_path(path)
            .with_context(|| format!("load catalog '{}'", path.display()))?;
        catalog = catalog.merge(extra)?;
    }
    Ok(Arc::new(catalog))
}

fn load_settings(args: &ProjectArgs) -> anyhow::Result<ProjectSettings> {
    let mut settings = match &args.settings {
        Some(path) => ProjectSettings::from_path(path)
            .with_context(|| format!("load settings '{}'", path.display()))?,
        None => ProjectSettings::default(),
    };
    if let Some(a) = args.aspect {
        settings.aspect_ratio = a;
    }
    if let Some(r) = args.resolution {
        settings.resolution = r;
    }
    if let Some(f) = args.fps {
        settings.fps = f;
    }
    Ok(settings)
}

fn load_document(args: &ProjectArgs) -> anyhow::Result<Document> {
    let catalog = load_catalog(&args.catalog)?;
    let mut doc = Document::with_settings(catalog, load_settings(args)?)?;
    doc.apply_template(&args.template)
        .with_context(|| format!("apply template '{}'", args.template))?;
    Ok(doc)
}

fn make_backend(args: &ProjectArgs) -> anyhow::Result<CpuBackend> {
    let mut opts = CpuBackendOpts::from_env();
    for f in &args.font {
        opts = opts.with_font(f);
    }
    CpuBackend::new(opts).context("create cpu backend")
}

fn write(path: &Path, frame: &kineo::FrameRGBA) -> anyhow::Result<()> {
    kineo::write_png(path, frame).with_context(|| format!("write png '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_templates(args: TemplatesArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    for tpl in catalog.iter() {
        if args.category.is_some_and(|c| c != tpl.category) {
            continue;
        }
        println!(
            "{:<28} {:<15} {:>5.1}s  {}",
            tpl.id,
            tpl.category.id(),
            tpl.duration_secs,
            tpl.name
        );
    }
    Ok(())
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.project)?;
    let mut backend = make_backend(&args.project)?;
    let frame = kineo::render_still(doc.layers(), args.t, doc.settings(), &mut backend)?;
    write(&args.out, &frame)
}

fn cmd_sprite(args: SpriteArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.project)?;
    let mut backend = make_backend(&args.project)?;
    let sheet = kineo::export_sprite_sheet(
        doc.layers(),
        doc.settings(),
        &mut backend,
        SpriteSheetOpts {
            frames: args.frames,
        },
    )?;
    write(&args.out, &sheet)
}

fn cmd_timeline(args: TimelineArgs) -> anyhow::Result<()> {
    let doc = load_document(&args.project)?;
    let mut backend = make_backend(&args.project)?;
    let view = TimelineView::for_layers(args.width, doc.layers().len())?;
    let frame = kineo::render_timeline(doc.layers(), args.t, None, &view, &mut backend)?;
    write(&args.out, &frame)
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.project.catalog)?;
    let mut backend = make_backend(&args.project)?;
    let start = Instant::now();

    let mut session = MotionSession::new(catalog, ManualFrames::new())?;
    session.set_settings(load_settings(&args.project)?, start)?;
    session
        .apply_template(&args.project.template, start)
        .with_context(|| format!("apply template '{}'", args.project.template))?;
    let settings = session.document().settings().clone();
    let native = settings.canvas();
    let display_h = (u64::from(args.display_width) * u64::from(native.height)
        / u64::from(native.width).max(1)) as u32;
    let display = Canvas::new(args.display_width, display_h.max(1))?;

    let frame_dt = Duration::from_secs_f64(1.0 / f64::from(settings.fps.per_second()));
    let ticks = (args.seconds.max(0.0) * f64::from(settings.fps.per_second())).ceil() as u32;
    let every = args.every.max(1);
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    session.toggle(start);
    for i in 0..=ticks {
        let now = start + frame_dt * i;
        let Some(t) = session.tick(now) else {
            break;
        };
        if i % every == 0 {
            tracing::info!(tick = i, t, "preview frame");
            let frame = session.render_live(display, &mut backend)?;
            write(&args.out_dir.join(format!("preview_{i:04}.png")), &frame)?;
        }
    }
    session.shutdown();
    Ok(())
}
