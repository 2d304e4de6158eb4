use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use emoji_maker::{
    Category, DirAssetSource, ExportOutcome, Exporter, FixedDialog, FsWriter, LinePromptDialog,
    PickerAction, SaveDialog, Studio, StudioConfig,
};
use rand::{SeedableRng, rngs::StdRng};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "emoji-maker", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). `EMOJI_MAKER_LOG` overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the category tabs and every gallery.
    List(SessionArgs),
    /// Composite the selection and save it as PNG.
    Compose(ExportArgs),
    /// Merge the selected SVG variants and save them as one SVG.
    ExportSvg(ExportArgs),
}

#[derive(Args, Debug)]
struct SessionArgs {
    /// Asset root containing head/, eyes/, eyebrows/, mouth/ and details/.
    #[arg(long)]
    assets: PathBuf,

    /// Studio config JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the composite canvas size in pixels.
    #[arg(long)]
    canvas_size: Option<u32>,

    /// Seed for the initial random selection.
    #[arg(long)]
    seed: Option<u64>,

    /// Explicit pick as `category=index`; repeatable. Applied after the initial random selection.
    #[arg(long = "pick", value_parser = parse_pick)]
    picks: Vec<(Category, usize)>,
}

#[derive(Args, Debug)]
struct ExportArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Destination path. Without it the save prompt asks on stdin.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Print the SHA-256 of the written bytes.
    #[arg(long)]
    digest: bool,
}

const SETTLE_TIMEOUT: Duration = Duration::from_secs(30);

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Compose(args) => cmd_export(args, ExportKind::Png),
        Command::ExportSvg(args) => cmd_export(args, ExportKind::Svg),
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_env("EMOJI_MAKER_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn parse_pick(s: &str) -> Result<(Category, usize), String> {
    let (cat, idx) = s
        .split_once('=')
        .ok_or_else(|| format!("expected category=index, got '{s}'"))?;
    let category = cat.parse::<Category>().map_err(|e| e.to_string())?;
    let index = idx
        .trim()
        .parse::<usize>()
        .map_err(|e| format!("invalid index '{idx}': {e}"))?;
    Ok((category, index))
}

fn load_config(args: &SessionArgs) -> anyhow::Result<StudioConfig> {
    let mut cfg = match &args.config {
        Some(path) => StudioConfig::from_path(path)?,
        None => StudioConfig::default(),
    };
    if let Some(size) = args.canvas_size {
        cfg.canvas_size = size;
    }
    Ok(cfg)
}

fn start_session(args: &SessionArgs, dialog: Box<dyn SaveDialog>) -> anyhow::Result<Studio> {
    let cfg = load_config(args)?;
    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let source = Arc::new(DirAssetSource::new(&args.assets));
    let exporter = Exporter::new(dialog, Box::new(FsWriter));

    let mut studio = Studio::start(cfg, source, exporter, rng)
        .with_context(|| format!("start session on '{}'", args.assets.display()))?;
    for notice in studio.take_notices() {
        eprintln!("warning: {}", notice.message);
    }

    for &(category, index) in &args.picks {
        if !studio.pick(category, index) {
            let len = studio.library().list(category).len();
            eprintln!("warning: ignoring {category}={index} (category has {len} entries)");
        }
    }
    studio.settle(SETTLE_TIMEOUT)?;
    Ok(studio)
}

fn cmd_list(args: SessionArgs) -> anyhow::Result<()> {
    let mut studio = start_session(&args, Box::new(FixedDialog::cancelling()))?;

    for category in Category::ALL {
        studio.dispatch(PickerAction::SelectTab(category));
        let view = studio.picker_view();
        let thumb = view
            .tabs
            .iter()
            .find(|t| t.active)
            .and_then(|t| t.thumbnail.as_ref())
            .map_or("-", |a| a.locator.as_str());
        println!("{category} ({} entries, showing {thumb}):", view.gallery.len());
        for entry in &view.gallery {
            let marker = if entry.selected { '*' } else { ' ' };
            let label = entry
                .asset
                .as_ref()
                .map_or("(none)", |a| a.locator.as_str());
            println!("  {marker} {:>3}  {label}", entry.index);
        }
    }
    Ok(())
}

#[derive(Clone, Copy, Debug)]
enum ExportKind {
    Png,
    Svg,
}

fn cmd_export(args: ExportArgs, kind: ExportKind) -> anyhow::Result<()> {
    let dialog: Box<dyn SaveDialog> = match &args.out {
        Some(path) => Box::new(FixedDialog::answering(path)),
        None => Box::new(LinePromptDialog::new(
            std::io::stdin().lock(),
            std::io::stderr(),
        )),
    };
    let mut studio = start_session(&args.session, dialog)?;

    let outcome = match kind {
        ExportKind::Png => studio.export_png(),
        ExportKind::Svg => studio.export_svg(),
    };
    let Some(outcome) = outcome else {
        let messages: Vec<_> = studio
            .take_notices()
            .into_iter()
            .map(|n| n.message)
            .collect();
        anyhow::bail!("{}", messages.join("; "));
    };

    match outcome {
        ExportOutcome::Saved { path, .. } => {
            if args.digest {
                println!("sha256: {}", sha256_file(&path)?);
            }
            eprintln!("wrote {}", path.display());
        }
        ExportOutcome::Cancelled => eprintln!("export cancelled"),
        ExportOutcome::Skipped => eprintln!("nothing to export"),
    }
    Ok(())
}

fn sha256_file(path: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
    let digest = sha2::Sha256::digest(&bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    Ok(out)
}
