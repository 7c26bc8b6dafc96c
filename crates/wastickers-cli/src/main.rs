use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use globset::{Glob, GlobSetBuilder};
use tracing::{error, info};
use walkdir::WalkDir;
use wastickers_core::archive::{
    ARCHIVE_EXTENSION, AUTHOR_ENTRY, TITLE_ENTRY, ensure_extension, suggested_archive_name,
};
use wastickers_core::{PackLimits, StickerPack, StickerPackError};

#[derive(Parser, Debug)]
#[command(
    name = "wastickers",
    about = "Bundle images into a .wastickers sticker pack",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Show progress bars (disable with --progress false or --quiet)
    #[arg(long, default_value_t = true, action=ArgAction::Set, global=true, help_heading = "Logging/UX")]
    progress: bool,
    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action=ArgAction::Count, global=true, help_heading = "Logging/UX")]
    verbose: u8,
    /// Quiet mode (overrides verbose)
    #[arg(
        short,
        long,
        default_value_t = false,
        global = true,
        help_heading = "Logging/UX"
    )]
    quiet: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a sticker pack from a folder of images
    Build(BuildArgs),
    /// List the entries of an existing .wastickers archive
    Inspect(InspectArgs),
}

#[derive(Parser, Debug, Clone)]
struct BuildArgs {
    /// Input file or directory with sticker images
    #[arg(help_heading = "Input/Output")]
    input: PathBuf,
    /// Tray icon image (any decodable format; stored as 96x96 PNG)
    #[arg(short, long, help_heading = "Input/Output")]
    tray: PathBuf,
    /// Output archive path (defaults to a name derived from the title)
    #[arg(short, long, help_heading = "Input/Output")]
    output: Option<PathBuf>,
    /// Pack display title
    #[arg(short, long, help_heading = "Metadata")]
    name: String,
    /// Pack publisher name
    #[arg(short, long, help_heading = "Metadata")]
    author: String,
    /// Include patterns (glob). If set, only files matching any pattern are considered
    #[arg(long, help_heading = "Input/Output")]
    include: Vec<String>,
    /// Exclude patterns (glob). Files matching any pattern will be ignored
    #[arg(long, help_heading = "Input/Output")]
    exclude: Vec<String>,
    /// Override the sticker-count ceiling
    #[arg(long, help_heading = "Limits")]
    max_stickers: Option<usize>,
    /// Print the effective pack limits (JSON) and exit
    #[arg(long, default_value_t = false, help_heading = "Limits")]
    print_limits: bool,
    /// Dry run: build and validate but do not write the archive
    #[arg(long, default_value_t = false, help_heading = "Input/Output")]
    dry_run: bool,
}

#[derive(Parser, Debug, Clone)]
struct InspectArgs {
    /// Archive to inspect
    archive: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing_with_level(cli.quiet, cli.verbose);
    match &cli.command {
        Commands::Build(args) => run_build(args, cli.progress && !cli.quiet),
        Commands::Inspect(args) => run_inspect(args),
    }
}

fn run_build(args: &BuildArgs, show_progress: bool) -> anyhow::Result<()> {
    let limits = match args.max_stickers {
        Some(max) => {
            let min = PackLimits::default().stickers_per_pack.0;
            PackLimits::builder().stickers_per_pack(min, max).build()
        }
        None => PackLimits::default(),
    };

    if args.print_limits {
        println!("{}", serde_json::to_string_pretty(&limits)?);
        return Ok(());
    }

    let tray = fs::read(&args.tray)
        .with_context(|| format!("read tray image {}", args.tray.display()))?;
    let mut pack = StickerPack::with_limits(&args.name, &args.author, &tray, limits)?;

    let mut paths = gather_paths(&args.input, &args.include, &args.exclude)?;
    // Entry numbering follows path order.
    paths.sort();
    anyhow::ensure!(
        !paths.is_empty(),
        "no sticker images found under {}",
        args.input.display()
    );

    add_stickers_with_progress(&mut pack, &paths, show_progress)?;
    info!(stickers = pack.sticker_count(), "loaded stickers");

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(suggested_archive_name(&args.name)));
    let output = ensure_extension(output, ARCHIVE_EXTENSION);

    if args.dry_run {
        info!(
            ?output,
            stickers = pack.sticker_count(),
            "dry run, archive not written"
        );
        return Ok(());
    }

    let file = File::create(&output)
        .with_context(|| format!("write archive {}", output.display()))?;
    pack.export(file)?;
    info!(?output, stickers = pack.sticker_count(), "pack written");
    Ok(())
}

fn run_inspect(args: &InspectArgs) -> anyhow::Result<()> {
    let file = File::open(&args.archive)
        .with_context(|| format!("open archive {}", args.archive.display()))?;
    let mut zip = zip::ZipArchive::new(file)?;

    let mut title = None;
    let mut author = None;
    let mut rows = Vec::with_capacity(zip.len());
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let name = entry.name().to_string();
        if name == TITLE_ENTRY || name == AUTHOR_ENTRY {
            let mut text = String::new();
            entry.read_to_string(&mut text)?;
            if name == TITLE_ENTRY {
                title = Some(text);
            } else {
                author = Some(text);
            }
        }
        rows.push((name, entry.size(), entry.compressed_size()));
    }

    println!(
        "{} ({} entries)",
        args.archive.display(),
        rows.len()
    );
    if let Some(t) = &title {
        println!("title:  {t}");
    }
    if let Some(a) = &author {
        println!("author: {a}");
    }
    for (name, size, compressed) in &rows {
        println!("  {name:<12} {size:>10} bytes ({compressed} compressed)");
    }
    Ok(())
}

fn gather_paths(
    path: &Path,
    include: &[String],
    exclude: &[String],
) -> anyhow::Result<Vec<PathBuf>> {
    // Build glob matchers
    let mut inc_set = None;
    if !include.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in include {
            b.add(Glob::new(pat)?);
        }
        inc_set = Some(b.build()?);
    }
    let mut exc_set = None;
    if !exclude.is_empty() {
        let mut b = GlobSetBuilder::new();
        for pat in exclude {
            b.add(Glob::new(pat)?);
        }
        exc_set = Some(b.build()?);
    }
    let mut list: Vec<PathBuf> = Vec::new();
    if path.is_file() {
        if !should_skip(path, inc_set.as_ref(), exc_set.as_ref()) && is_image(path) {
            list.push(path.to_path_buf());
        }
    } else {
        for entry in WalkDir::new(path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && !should_skip(p, inc_set.as_ref(), exc_set.as_ref()) && is_image(p) {
                list.push(p.to_path_buf());
            }
        }
    }
    Ok(list)
}

fn should_skip(
    p: &Path,
    include: Option<&globset::GlobSet>,
    exclude: Option<&globset::GlobSet>,
) -> bool {
    let s = p.to_string_lossy().replace('\\', "/");
    if let Some(ex) = exclude {
        if ex.is_match(&s) {
            return true;
        }
    }
    if let Some(inc) = include {
        if !inc.is_match(&s) {
            return true;
        }
    }
    false
}

fn is_image(p: &Path) -> bool {
    matches!(
        p.extension()
            .and_then(|e| e.to_str())
            .map(|s| s.to_ascii_lowercase()),
        Some(ext) if matches!(ext.as_str(), "png" | "webp" | "jpg" | "jpeg" | "bmp" | "gif")
    )
}

fn add_stickers_with_progress(
    pack: &mut StickerPack,
    paths: &[PathBuf],
    progress: bool,
) -> anyhow::Result<()> {
    use indicatif::{ProgressBar, ProgressStyle};
    let bar = if progress {
        let b = ProgressBar::new(paths.len() as u64);
        b.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} adding {pos}/{len} [{elapsed_precise}] {wide_msg}",
            )
            .unwrap(),
        );
        Some(b)
    } else {
        None
    };
    for p in paths {
        let msg = p.file_name().and_then(|s| s.to_str()).unwrap_or("");
        if let Some(b) = &bar {
            b.set_message(msg.to_string());
        }
        match fs::read(p) {
            Ok(bytes) => match pack.add_sticker(&bytes) {
                Ok(()) => {}
                // A full pack stays full; aborting beats logging the same
                // error for every remaining path.
                Err(e @ StickerPackError::TooManyStickers { .. }) => {
                    if let Some(b) = &bar {
                        b.finish_and_clear();
                    }
                    return Err(anyhow::Error::new(e))
                        .with_context(|| format!("adding {}", p.display()));
                }
                Err(e) => {
                    error!(?p, error = %e, "skip image");
                }
            },
            Err(e) => {
                error!(?p, error = %e, "skip image");
            }
        }
        if let Some(b) = &bar {
            b.inc(1);
        }
    }
    if let Some(b) = &bar {
        b.finish_and_clear();
    }
    Ok(())
}

fn init_tracing_with_level(quiet: bool, verbose: u8) {
    let level = if quiet {
        "error".to_string()
    } else {
        match verbose {
            0 => "info".into(),
            1 => "debug".into(),
            _ => "trace".into(),
        }
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(level)
        .with_target(false)
        .try_init();
}
