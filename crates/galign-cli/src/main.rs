//! galign - command-line aligner for apartment gallery assets.
//!
//! Walks a `root/<location>/<apartment>` tree, renames drifted files to the
//! canonical `{location}-{apartment}-` prefix, reconciles JSON sidecars, and
//! regenerates per-apartment gallery manifests.

use anyhow::Result;
use clap::{Parser, Subcommand};
use galign_core::{
    align_tree, generate_manifests, AlignEvent, AlignOptions, FileOutcome, ManifestEvent,
    ManifestOptions, MetadataOutcome,
};
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "galign")]
#[command(about = "Align apartment gallery assets with their directory layout")]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rename drifted files and reconcile their JSON sidecars
    Align {
        /// Root directory laid out as root/<location>/<apartment>
        root: PathBuf,

        /// Report what would change without touching any file
        #[arg(long)]
        dry_run: bool,
    },
    /// Regenerate manifest.json for every apartment directory
    Manifest {
        /// Root directory laid out as root/<location>/<apartment>
        root: PathBuf,

        /// Report what would be written without touching any file
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging; stdout stays reserved for the change report.
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Command::Align { root, dry_run } => run_align(root, dry_run),
        Command::Manifest { root, dry_run } => run_manifest(root, dry_run),
    }
}

fn run_align(root: PathBuf, dry_run: bool) -> Result<()> {
    let prefix = if dry_run { "[DRY-RUN] " } else { "" };
    let options = AlignOptions::new(root).dry_run(dry_run);

    let report = align_tree(&options, |event| match event {
        AlignEvent::DirectoryStarted { directory } => {
            println!("processing {}", directory.path.display());
        }
        AlignEvent::FileProcessed { source, outcome } => match outcome {
            FileOutcome::Renamed {
                destination,
                metadata,
            } => {
                println!(
                    "{prefix}rename {} -> {}",
                    file_name(source),
                    file_name(destination)
                );
                if matches!(metadata, MetadataOutcome::Rewritten) {
                    println!("{prefix}metadata update {}", file_name(destination));
                }
            }
            FileOutcome::CollisionSkipped { destination } => {
                println!(
                    "{prefix}collision, skipping {} (exists: {})",
                    file_name(source),
                    file_name(destination)
                );
            }
            FileOutcome::SkippedNoSeparator | FileOutcome::AlreadyCorrect => {}
        },
        AlignEvent::EntryFailed { path, message } => {
            eprintln!("error: {}: {}", path.display(), message);
        }
    })?;

    println!(
        "{prefix}aligned {} file(s), {} metadata update(s), {} collision(s), {} error(s) in {} directories",
        report.renamed,
        report.metadata_rewritten,
        report.collisions,
        report.errors.len(),
        report.directories
    );
    Ok(())
}

fn run_manifest(root: PathBuf, dry_run: bool) -> Result<()> {
    let prefix = if dry_run { "[DRY-RUN] " } else { "" };
    let options = ManifestOptions::new(root).dry_run(dry_run);

    let report = generate_manifests(&options, |event| match event {
        ManifestEvent::Written { path, manifest } => {
            println!(
                "{prefix}manifest {} ({} image(s))",
                path.display(),
                manifest.gallery.len()
            );
        }
        ManifestEvent::Empty { directory } => {
            println!("{prefix}no renditions in {}", directory.display());
        }
        ManifestEvent::Failed { path, message } => {
            eprintln!("error: {}: {}", path.display(), message);
        }
    })?;

    println!(
        "{prefix}wrote {} manifest(s), {} empty, {} error(s) in {} directories",
        report.written,
        report.empty,
        report.errors.len(),
        report.directories
    );
    Ok(())
}

/// Last path component for compact output; directories are echoed in full.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
