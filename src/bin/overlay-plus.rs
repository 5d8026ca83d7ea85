use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use overlay_plus::{BlendMode, ChromaPlacement, CompositeOptions, ResampleKernel};

#[derive(Parser, Debug)]
#[command(name = "overlay-plus", version)]
struct Cli {
    /// Log pipeline stages to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Composite an overlay image onto a base image.
    Composite(CompositeArgs),
    /// List blend modes and their aliases.
    Modes,
}

#[derive(Parser, Debug)]
struct CompositeArgs {
    /// Base image.
    #[arg(long)]
    base: PathBuf,

    /// Overlay image.
    #[arg(long)]
    overlay: PathBuf,

    /// Mask image, overlay-sized.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// JSON options file; flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Blend mode name or alias.
    #[arg(long)]
    mode: Option<BlendMode>,

    /// Overlay opacity, clamped to [0, 1].
    #[arg(long)]
    opacity: Option<f64>,

    /// Horizontal overlay offset; may be negative.
    #[arg(long, allow_hyphen_values = true)]
    x: Option<i64>,

    /// Vertical overlay offset; may be negative.
    #[arg(long, allow_hyphen_values = true)]
    y: Option<i64>,

    /// Leave chroma planes of YUV input untouched.
    #[arg(long, default_value_t = false)]
    no_chroma: bool,

    /// Use the first mask plane for every plane.
    #[arg(long, default_value_t = false)]
    mask_first_plane_only: bool,

    /// Chroma siting for derived mask planes: center, left or top_left.
    #[arg(long)]
    chroma_placement: Option<ChromaPlacement>,

    /// Kernel for derived mask planes: point, bilinear, bicubic, lanczos or spline36.
    #[arg(long)]
    chroma_resampler: Option<ResampleKernel>,

    /// Output image path.
    #[arg(long)]
    out: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Composite(args) => cmd_composite(args),
        Command::Modes => cmd_modes(),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "overlay_plus=debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn cmd_composite(args: CompositeArgs) -> anyhow::Result<()> {
    let mut opts = match &args.config {
        Some(path) => CompositeOptions::from_path(path)?,
        None => CompositeOptions::default(),
    };
    if let Some(mode) = args.mode {
        opts.mode = mode;
    }
    if let Some(opacity) = args.opacity {
        opts.opacity = opacity;
    }
    if let Some(x) = args.x {
        opts.x = x;
    }
    if let Some(y) = args.y {
        opts.y = y;
    }
    if args.no_chroma {
        opts.chroma = false;
    }
    if args.mask_first_plane_only {
        opts.mask_first_plane_only = true;
    }
    if let Some(placement) = args.chroma_placement {
        opts.chroma_placement = placement;
    }
    if let Some(kernel) = args.chroma_resampler {
        opts.chroma_resampler = kernel;
    }

    let base = overlay_plus::load_frame(&args.base)?;
    let overlay = overlay_plus::load_frame(&args.overlay)?;
    let mask = args
        .mask
        .as_ref()
        .map(overlay_plus::load_frame)
        .transpose()?;

    let out = overlay_plus::composite(&base, &overlay, mask.as_ref(), &opts)
        .with_context(|| format!("composite '{}' onto '{}'", args.overlay.display(), args.base.display()))?;

    if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    overlay_plus::save_frame(&out, &args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_modes() -> anyhow::Result<()> {
    for mode in BlendMode::ALL {
        let aliases = mode.aliases();
        if aliases.is_empty() {
            println!("{mode}");
        } else {
            println!("{mode} ({})", aliases.join(", "));
        }
    }
    Ok(())
}
