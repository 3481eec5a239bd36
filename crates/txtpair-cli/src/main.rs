//! txtpair — keeps `.txt` notes in step with the images they describe.
//!
//! This binary plays the part of an image browser: it copies, moves,
//! links, renames and deletes images, and lets the companion handlers
//! mirror each operation onto the image's note first.

mod host;

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use txtpair_core::{
    CompanionDocument, CompanionHandler, Config, FileOperation, MirrorOutcome, TextCompanion,
    ThumbCompanion,
};

use crate::host::{FileClass, Host};

#[derive(Debug, Parser)]
#[command(name = "txtpair", version, about = "Keep companion .txt notes in sync with images")]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, env = "TXTPAIR_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Copy an image, copying its note along.
    Copy { source: PathBuf, destination: PathBuf },
    /// Move an image, moving its note along.
    Move { source: PathBuf, destination: PathBuf },
    /// Symlink an image, linking its note along.
    Link { source: PathBuf, destination: PathBuf },
    /// Delete an image and its note.
    Delete { source: PathBuf },
    /// Rename an image within its directory.
    Rename { source: PathBuf, new_name: String },
    /// List the companions of an image.
    Companions {
        primary: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Report whether a file is a managed companion or alien.
    Check { path: PathBuf },
    /// Classify every file in a directory.
    Scan {
        dir: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Print an image's note.
    Show { primary: PathBuf },
    /// Replace an image's note (from --text, or stdin).
    Edit {
        primary: PathBuf,
        #[arg(long)]
        text: Option<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "txtpair=debug,txtpair_core=debug"
    } else {
        "txtpair=info,txtpair_core=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("txtpair").join("config.toml"))
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    match explicit {
        Some(path) => Config::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => match default_config_path() {
            Some(path) => Config::load_or_default(&path)
                .with_context(|| format!("failed to load config {}", path.display())),
            None => Ok(Config::default()),
        },
    }
}

fn report(outcomes: &[MirrorOutcome]) {
    for outcome in outcomes {
        match outcome {
            MirrorOutcome::Mirrored {
                kind,
                source,
                destination: Some(dest),
            } => println!("{kind}: {} -> {}", source.display(), dest.display()),
            MirrorOutcome::Mirrored { kind, source, .. } => {
                println!("{kind}: {}", source.display())
            }
            MirrorOutcome::Failed { kind, source, error } => {
                eprintln!("warning: {kind} of {} failed: {error}", source.display())
            }
            MirrorOutcome::Skipped | MirrorOutcome::NoCompanion => {}
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let host = Host::new(config);

    match cli.command {
        Command::Copy { source, destination } => {
            report(&host.apply(&FileOperation::Copy { source, destination })?)
        }
        Command::Move { source, destination } => {
            report(&host.apply(&FileOperation::Move { source, destination })?)
        }
        Command::Link { source, destination } => {
            report(&host.apply(&FileOperation::Symlink { source, destination })?)
        }
        Command::Delete { source } => {
            report(&host.apply(&FileOperation::Delete { source })?)
        }
        Command::Rename { source, new_name } => report(&host.rename(&source, &new_name)?),
        Command::Companions { primary, json } => {
            let companions = host.companions(&primary);
            if json {
                println!("{}", serde_json::to_string_pretty(&companions)?);
            } else {
                for path in companions {
                    println!("{}", path.display());
                }
            }
        }
        Command::Check { path } => println!("{}", host.check_label(&path)),
        Command::Scan { dir, json } => {
            let entries = host.scan(&dir)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                for entry in entries {
                    print_scan_line(&entry.path, &entry.class, &host);
                }
            }
        }
        Command::Show { primary } => {
            let doc = CompanionDocument::open(&TextCompanion.derive(&primary))?;
            print!("{}", doc.text());
        }
        Command::Edit { primary, text } => {
            let text = match text {
                Some(text) => text,
                None => {
                    let mut buf = String::new();
                    io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read note from stdin")?;
                    buf
                }
            };
            let mut doc = CompanionDocument::open_or_new(&TextCompanion.derive(&primary))?;
            doc.set_text(text);
            if doc.is_modified() {
                doc.save()?;
                tracing::info!("updated {}", doc.path().display());
            }
        }
    }
    Ok(())
}

fn print_scan_line(path: &Path, class: &FileClass, host: &Host) {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match class {
        FileClass::Image { .. } => {
            match ThumbCompanion::for_primary(path, &TextCompanion, &host.config().thumbnails) {
                Some(thumb) => println!("image      {name}  {}", thumb.label()),
                None => println!("image      {name}"),
            }
        }
        FileClass::Companion => println!("companion  {name}"),
        FileClass::Alien => println!("alien      {name}"),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(cli)
}
