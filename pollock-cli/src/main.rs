use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pollock", version, about = "Turn a photo into generative stroke art")]
struct Cli {
    /// Log pipeline events to stderr (overridden by RUST_LOG).
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ingest an image, draw the pattern and write `pollock.png`.
    ///
    /// Requires download to be enabled, so `--variant lenient` is refused.
    Render(RenderArgs),
    /// Ingest an image and write its normalized JPEG (or print it as a data URL).
    Normalize(NormalizeArgs),
    /// Report whether an image would be accepted, and how it would be drawn.
    Inspect(InspectArgs),
    /// Print the effective configuration as JSON.
    Config(ConfigArgs),
}

#[derive(Parser, Debug)]
struct ConfigOpts {
    /// Configuration JSON; applied on top of the selected variant's defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Page variant to start from.
    #[arg(long, value_enum, default_value_t = Variant::Strict)]
    variant: Variant,

    /// Override the longer-edge bound used during normalization.
    #[arg(long)]
    max_edge: Option<u32>,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Directory the artwork is written into.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Seed for a reproducible drawing.
    #[arg(long)]
    seed: Option<u64>,

    #[command(flatten)]
    opts: ConfigOpts,
}

#[derive(Parser, Debug)]
struct NormalizeArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output JPEG path.
    #[arg(long, required_unless_present = "data_url")]
    out: Option<PathBuf>,

    /// Print a `data:image/jpeg;base64,...` URL to stdout instead of writing a file.
    #[arg(long)]
    data_url: bool,

    #[command(flatten)]
    opts: ConfigOpts,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Input image.
    #[arg(long = "in")]
    in_path: PathBuf,

    #[command(flatten)]
    opts: ConfigOpts,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    #[command(flatten)]
    opts: ConfigOpts,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Variant {
    /// `.jpg`/`.png` only, 1MB cap, download enabled.
    Strict,
    /// Any image type, no size cap, no download.
    Lenient,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Normalize(args) => cmd_normalize(args),
        Command::Inspect(args) => cmd_inspect(args),
        Command::Config(args) => cmd_config(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "pollock=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(opts: &ConfigOpts) -> anyhow::Result<pollock::PollockConfig> {
    let base = match opts.variant {
        Variant::Strict => pollock::PollockConfig::strict(),
        Variant::Lenient => pollock::PollockConfig::lenient(),
    };
    let mut cfg = match &opts.config {
        Some(path) => base.overlay_json_file(path)?,
        None => base,
    };
    if let Some(max_edge) = opts.max_edge {
        cfg.ingest.max_edge = max_edge;
    }
    cfg.validate()?;
    Ok(cfg)
}

fn new_session(
    cfg: pollock::PollockConfig,
    seed: Option<u64>,
) -> anyhow::Result<pollock::Session> {
    let rng = match seed {
        Some(seed) => pollock::RngSource::seeded(seed),
        None => pollock::RngSource::from_os(),
    };
    Ok(pollock::Session::with_random(cfg, rng)?)
}

/// Run the session pipeline; on failure print the page message before the error chain.
fn load(session: &mut pollock::Session, path: &Path) -> anyhow::Result<()> {
    if let Err(e) = session.load_path(path) {
        if let Some(msg) = session.message() {
            eprintln!("{msg}");
        }
        return Err(e).with_context(|| format!("load '{}'", path.display()));
    }
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.opts)?;
    if !cfg.export.enabled {
        anyhow::bail!(
            "download is disabled in this configuration, so render has nothing to write \
             (use `inspect` or `normalize` instead)"
        );
    }
    let mut session = new_session(cfg, args.seed)?;
    load(&mut session, &args.in_path)?;

    let artifact = match session.export() {
        Ok(a) => a,
        Err(e) => {
            if let Some(msg) = session.message() {
                eprintln!("{msg}");
            }
            return Err(e.into());
        }
    };
    let path = artifact.write_into(&args.out_dir)?;

    eprintln!("wrote {}", path.display());
    Ok(())
}

fn cmd_normalize(args: NormalizeArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.opts)?;
    let file = pollock::SelectedFile::from_path(&args.in_path)?;
    pollock::validate_selection(&file, &cfg.ingest)
        .map_err(|e| anyhow::anyhow!("{}: {e}", e.user_message()))?;
    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    let image = pollock::ingest(pollock::SourceImage::new(bytes, file.mime), &cfg.ingest)?;

    if args.data_url {
        println!("{}", image.to_data_url());
        return Ok(());
    }
    let Some(out) = args.out else {
        anyhow::bail!("--out is required unless --data-url is given");
    };
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&out, image.encoded())
        .with_context(|| format!("write jpeg '{}'", out.display()))?;

    eprintln!("wrote {} ({})", out.display(), image.size());
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.opts)?;
    let file = pollock::SelectedFile::from_path(&args.in_path)?;

    println!("file:        {}", file.name);
    println!("mime:        {}", file.mime);
    println!("size:        {} bytes", file.size);
    if let Err(e) = pollock::validate_selection(&file, &cfg.ingest) {
        println!("accepted:    no ({})", e.user_message());
        return Ok(());
    }
    println!("accepted:    yes");

    let bytes = std::fs::read(&args.in_path)
        .with_context(|| format!("read '{}'", args.in_path.display()))?;
    let source = pollock::SourceImage::new(bytes, file.mime);
    let decoded = pollock::decode_source(&source)?;
    let (w, h) = decoded.dimensions();
    let image = pollock::normalize(decoded, &cfg.ingest)?;

    println!("original:    {w}x{h}");
    println!("normalized:  {}", image.size());
    println!("grid step:   {}", pollock::GRID_STEP);
    println!("grid points: {}", pollock::grid_point_count(image.size()));
    println!(
        "export:      {}",
        if cfg.export.enabled {
            cfg.export.filename.as_str()
        } else {
            "disabled"
        }
    );
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = load_config(&args.opts)?;
    println!("{}", serde_json::to_string_pretty(&cfg)?);
    Ok(())
}
