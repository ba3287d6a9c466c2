use std::{
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use morphdeck::{
    Document, GeometryProvider as _, Player, PlayerOpts, ShapeParams, ShapeRegistry, Size,
};

#[derive(Parser, Debug)]
#[command(name = "morphdeck", version)]
struct Cli {
    /// Log debug output to stderr (`RUST_LOG` overrides).
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the outline of a shape type as JSON.
    Contour(ContourArgs),
    /// Play the build sequence of a slide and print build events as JSON lines.
    Build(BuildArgs),
    /// Morph a document to a display state and print per-frame element values as JSON lines.
    Morph(MorphArgs),
}

#[derive(Parser, Debug)]
struct ContourArgs {
    /// Shape type name (`triangle`, `star`, ...).
    #[arg(long)]
    shape: String,

    #[arg(long, default_value_t = 100.0)]
    width: f64,

    #[arg(long, default_value_t = 100.0)]
    height: f64,

    /// Resample to this many points; raw outline when omitted.
    #[arg(long)]
    samples: Option<usize>,
}

#[derive(Parser, Debug)]
struct BuildArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Slide index (0-based).
    #[arg(long, default_value_t = 0)]
    slide: usize,

    /// Clicks to simulate; every click is sent once nothing is playing. All when omitted.
    #[arg(long)]
    clicks: Option<usize>,

    /// Simulated frame interval in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Stop simulating after this much time.
    #[arg(long, default_value_t = 600_000.0)]
    max_ms: f64,

    /// Player options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct MorphArgs {
    /// Input document JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Target display state id.
    #[arg(long)]
    state: String,

    /// Simulated frame interval in milliseconds.
    #[arg(long, default_value_t = 16.0)]
    frame_ms: f64,

    /// Player options JSON.
    #[arg(long)]
    opts: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Contour(args) => cmd_contour(args),
        Command::Build(args) => cmd_build(args),
        Command::Morph(args) => cmd_morph(args),
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose {
        "morphdeck=debug"
    } else {
        "morphdeck=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn read_document(path: &Path) -> anyhow::Result<Document> {
    let f = File::open(path).with_context(|| format!("open document '{}'", path.display()))?;
    Document::from_reader(BufReader::new(f))
        .with_context(|| format!("load document '{}'", path.display()))
}

fn read_opts(path: Option<&Path>) -> anyhow::Result<PlayerOpts> {
    let Some(path) = path else {
        return Ok(PlayerOpts::default());
    };
    let f = File::open(path).with_context(|| format!("open options '{}'", path.display()))?;
    serde_json::from_reader(BufReader::new(f)).with_context(|| "parse options JSON")
}

fn emit(out: &mut impl std::io::Write, value: &impl serde::Serialize) -> anyhow::Result<()> {
    serde_json::to_writer(&mut *out, value).with_context(|| "write JSON line")?;
    writeln!(out).with_context(|| "write JSON line")?;
    Ok(())
}

fn element_values(player: &Player) -> Vec<serde_json::Value> {
    player
        .document()
        .elements
        .iter()
        .map(|el| {
            serde_json::json!({
                "id": el.id,
                "type": el.shape_type,
                "x": el.x,
                "y": el.y,
                "width": el.width,
                "height": el.height,
                "opacity": el.opacity,
                "angle": el.angle,
                "strokeColor": el.stroke_color,
                "backgroundColor": el.background_color,
                "contourPoints": el.contour_override.as_ref().map(Vec::len),
            })
        })
        .collect()
}

fn cmd_contour(args: ContourArgs) -> anyhow::Result<()> {
    anyhow::ensure!(
        args.width >= 0.0 && args.height >= 0.0,
        "width and height must be >= 0"
    );
    let registry = ShapeRegistry::with_builtins();
    if !registry.contains(&args.shape) {
        tracing::warn!(shape = %args.shape, "unknown shape type, printing the fallback outline");
    }

    let size = Size::new(args.width, args.height);
    let mut contour =
        morphdeck::extract_contour(&registry, &args.shape, size, &ShapeParams::default());
    if let Some(n) = args.samples {
        contour = contour.resampled(n);
    }

    let silhouette = registry.has_silhouette(&args.shape);
    let mut out = std::io::stdout().lock();
    emit(
        &mut out,
        &serde_json::json!({
            "shape": args.shape,
            "silhouette": silhouette,
            "closed": contour.closed,
            "points": contour.points,
        }),
    )
}

fn cmd_build(args: BuildArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frame_ms > 0.0, "--frame-ms must be > 0");
    let doc = read_document(&args.in_path)?;
    let opts = read_opts(args.opts.as_deref())?;
    let mut player = Player::new(doc, opts);
    let mut out = std::io::stdout().lock();

    let mut now = 0.0;
    player.enter_slide(args.slide, now)?;
    let mut clicks_left = args.clicks;

    while now < args.max_ms {
        for event in player.drain_events() {
            emit(&mut out, &event)?;
        }

        let idle = !player.build().is_busy() && !player.build().has_running_steps();
        if idle {
            if clicks_left == Some(0) || !player.has_more_steps() {
                break;
            }
            clicks_left = clicks_left.map(|n| n - 1);
            player.next(now);
            continue;
        }

        now += args.frame_ms;
        player.frame(now);
    }
    for event in player.drain_events() {
        emit(&mut out, &event)?;
    }

    emit(
        &mut out,
        &serde_json::json!({
            "event": "summary",
            "at": now,
            "moreSteps": player.has_more_steps(),
            "elements": element_values(&player),
        }),
    )?;
    out.flush().with_context(|| "flush stdout")
}

fn cmd_morph(args: MorphArgs) -> anyhow::Result<()> {
    anyhow::ensure!(args.frame_ms > 0.0, "--frame-ms must be > 0");
    let doc = read_document(&args.in_path)?;
    let opts = read_opts(args.opts.as_deref())?;
    let limit = opts.morph.duration_ms.max(0.0) + args.frame_ms;
    let mut player = Player::new(doc, opts);
    let mut out = std::io::stdout().lock();

    let mut now = 0.0;
    player.morph_to_state(&args.state, now)?;
    while player.is_morphing() && now <= limit {
        now += args.frame_ms;
        player.frame(now);
        emit(
            &mut out,
            &serde_json::json!({ "at": now, "elements": element_values(&player) }),
        )?;
    }
    out.flush().with_context(|| "flush stdout")
}
