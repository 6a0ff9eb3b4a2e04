use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{ArgGroup, Parser, Subcommand};

use moldura::{OverlayCatalog, Session};

#[derive(Parser, Debug)]
#[command(name = "moldura", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compose a photo with a frame overlay and write the PNG.
    Compose(ComposeArgs),
    /// List the overlay identifiers available in the catalog.
    Overlays(OverlaysArgs),
}

#[derive(Parser, Debug)]
#[command(group = ArgGroup::new("source").required(true).args(["in_path", "stdin", "clipboard"]))]
struct ComposeArgs {
    /// Input photo path.
    #[arg(long = "in")]
    in_path: Option<PathBuf>,

    /// Read the photo from standard input.
    #[arg(long)]
    stdin: bool,

    /// Capture the photo from the system clipboard.
    #[arg(long)]
    clipboard: bool,

    /// Declared media type for --stdin payloads.
    #[arg(long, default_value = "image/png")]
    media_type: String,

    /// Overlay identifier to apply (defaults to the catalog's default entry).
    #[arg(long)]
    overlay: Option<String>,

    /// Overlay catalog JSON mapping identifiers to relative asset paths.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory overlay assets are resolved against (built-in catalog only).
    #[arg(long, default_value = ".")]
    assets_root: PathBuf,

    /// Output directory for the exported PNG.
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct OverlaysArgs {
    /// Overlay catalog JSON mapping identifiers to relative asset paths.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Directory overlay assets are resolved against (built-in catalog only).
    #[arg(long, default_value = ".")]
    assets_root: PathBuf,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Overlays(args) => cmd_overlays(args),
    }
}

fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_catalog(catalog: Option<&Path>, assets_root: &Path) -> anyhow::Result<OverlayCatalog> {
    match catalog {
        Some(path) => Ok(OverlayCatalog::from_path(path)?),
        None => Ok(OverlayCatalog::builtin(assets_root)),
    }
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref(), &args.assets_root)?;
    let mut session = Session::new(catalog);

    if let Some(id) = &args.overlay {
        if !session.catalog().contains(id) {
            let known: Vec<_> = session.catalog().entries().map(|(id, _)| id).collect();
            anyhow::bail!("unknown overlay '{}' (available: {})", id, known.join(", "));
        }
        session.select_overlay(id);
    }

    let payload = if let Some(path) = &args.in_path {
        moldura::payload_from_file(path)?
    } else if args.stdin {
        moldura::payload_from_reader(std::io::stdin().lock(), &args.media_type)?
    } else {
        moldura::payload_from_clipboard()?
    };

    session.ingest(payload)?;
    session.run_pending_loads();
    let out = session.export()?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;
    let out_path = args.out_dir.join(&out.file_name);
    std::fs::write(&out_path, &out.png)
        .with_context(|| format!("write png '{}'", out_path.display()))?;

    eprintln!("wrote {}", out_path.display());
    Ok(())
}

fn cmd_overlays(args: OverlaysArgs) -> anyhow::Result<()> {
    let catalog = load_catalog(args.catalog.as_deref(), &args.assets_root)?;
    for (id, path) in catalog.entries() {
        println!("{id}\t{path}");
    }
    Ok(())
}
