//! Tree-level alignment pass.
//!
//! Walks every apartment directory, drives the per-file engine over a
//! sorted snapshot of each directory's children and aggregates outcomes
//! into a report. Failures stay contained to the entry that caused them.

use crate::align::file::{self, FileOutcome, MetadataOutcome};
use crate::align::walker::{self, AssetDirectory, TreeListing};
use crate::config::AlignOptions;
use crate::{GalignError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// One observable step of an alignment pass.
#[derive(Debug)]
pub enum AlignEvent<'a> {
    /// An apartment directory is about to be processed.
    DirectoryStarted { directory: &'a AssetDirectory },
    /// One file reached a terminal outcome.
    FileProcessed {
        source: &'a Path,
        outcome: &'a FileOutcome,
    },
    /// One entry failed; the pass continues.
    EntryFailed { path: &'a Path, message: &'a str },
}

/// Summary of an alignment pass.
#[derive(Debug, Clone, Default)]
pub struct AlignReport {
    /// Apartment directories visited
    pub directories: usize,
    /// Files excluded for carrying no location token
    pub skipped: usize,
    /// Files already canonically named
    pub correct: usize,
    /// Files renamed (or, in dry-run mode, that would be renamed)
    pub renamed: usize,
    /// Renamed sidecars whose fields were rewritten
    pub metadata_rewritten: usize,
    /// Renames abandoned because the destination existed
    pub collisions: usize,
    /// Per-entry failures (path, description)
    pub errors: Vec<(PathBuf, String)>,
}

/// Run an alignment pass over the tree in `options`.
///
/// Every file is handled independently: failures land in the report's
/// error list and the pass continues with the next entry. `observer`
/// receives an event per directory and per file, in walk order, and is
/// where callers hook up their own reporting.
pub fn align_tree<F>(options: &AlignOptions, mut observer: F) -> Result<AlignReport>
where
    F: FnMut(AlignEvent<'_>),
{
    info!(
        "Starting alignment pass over {} (dry_run={})",
        options.root.display(),
        options.dry_run
    );

    let TreeListing {
        directories,
        failures,
    } = walker::apartment_dirs(&options.root)?;
    let mut report = AlignReport::default();

    for (path, message) in failures {
        observer(AlignEvent::EntryFailed {
            path: &path,
            message: &message,
        });
        report.errors.push((path, message));
    }

    for directory in &directories {
        report.directories += 1;
        observer(AlignEvent::DirectoryStarted { directory });

        let file_names = match list_file_names(&directory.path) {
            Ok(names) => names,
            Err(e) => {
                warn!("Could not list {}: {}", directory.path.display(), e);
                let message = e.to_string();
                observer(AlignEvent::EntryFailed {
                    path: &directory.path,
                    message: &message,
                });
                report.errors.push((directory.path.clone(), message));
                continue;
            }
        };

        for file_name in &file_names {
            let source = directory.path.join(file_name);
            match file::align_file(directory, file_name, options.dry_run) {
                Ok(outcome) => {
                    tally(&mut report, &outcome);
                    observer(AlignEvent::FileProcessed {
                        source: &source,
                        outcome: &outcome,
                    });
                }
                Err(e) => {
                    warn!("Could not process {}: {}", source.display(), e);
                    let message = e.to_string();
                    observer(AlignEvent::EntryFailed {
                        path: &source,
                        message: &message,
                    });
                    report.errors.push((source, message));
                }
            }
        }
    }

    info!(
        "Alignment pass complete: {} renamed, {} metadata updates, {} collisions, {} errors",
        report.renamed,
        report.metadata_rewritten,
        report.collisions,
        report.errors.len()
    );

    Ok(report)
}

fn tally(report: &mut AlignReport, outcome: &FileOutcome) {
    match outcome {
        FileOutcome::SkippedNoSeparator => report.skipped += 1,
        FileOutcome::AlreadyCorrect => report.correct += 1,
        FileOutcome::CollisionSkipped { .. } => report.collisions += 1,
        FileOutcome::Renamed { metadata, .. } => {
            report.renamed += 1;
            if *metadata == MetadataOutcome::Rewritten {
                report.metadata_rewritten += 1;
            }
        }
    }
}

/// List the names of direct child files of `dir`, in lexicographic order.
///
/// The listing is a snapshot taken before any rename, so files moved by
/// this pass are never seen twice. Symlinks resolving to regular files
/// count as files.
fn list_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir).map_err(|e| GalignError::io_with_path(e, dir))? {
        let entry = entry.map_err(|e| GalignError::io_with_path(e, dir))?;
        if entry.path().is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn options(temp_dir: &TempDir) -> AlignOptions {
        AlignOptions::new(temp_dir.path())
    }

    #[test]
    fn test_pass_over_mixed_tree() {
        let temp_dir = TempDir::new().unwrap();
        let tea = temp_dir.path().join("srima/tea");
        fs::create_dir_all(&tea).unwrap();
        fs::write(tea.join("srima-tea-01.jpg"), "ok").unwrap();
        fs::write(tea.join("srima-02.jpg"), "drifted").unwrap();
        fs::write(tea.join("cover.jpg"), "no token").unwrap();

        let report = align_tree(&options(&temp_dir), |_| {}).unwrap();
        assert_eq!(report.directories, 1);
        assert_eq!(report.correct, 1);
        assert_eq!(report.renamed, 1);
        assert_eq!(report.skipped, 1);
        assert!(report.errors.is_empty());

        assert!(tea.join("srima-tea-02.jpg").exists());
        assert!(tea.join("cover.jpg").exists());
    }

    #[test]
    fn test_events_arrive_in_walk_order() {
        let temp_dir = TempDir::new().unwrap();
        let tea = temp_dir.path().join("srima/tea");
        fs::create_dir_all(&tea).unwrap();
        fs::write(tea.join("srima-b.jpg"), "x").unwrap();
        fs::write(tea.join("srima-a.jpg"), "x").unwrap();

        let mut log = Vec::new();
        align_tree(&options(&temp_dir), |event| match event {
            AlignEvent::DirectoryStarted { directory } => {
                log.push(format!("dir {}", directory.name));
            }
            AlignEvent::FileProcessed { source, .. } => {
                log.push(format!(
                    "file {}",
                    source.file_name().unwrap().to_string_lossy()
                ));
            }
            AlignEvent::EntryFailed { .. } => log.push("error".to_string()),
        })
        .unwrap();

        assert_eq!(log, vec!["dir tea", "file srima-a.jpg", "file srima-b.jpg"]);
    }

    #[test]
    fn test_subdirectories_are_not_files() {
        let temp_dir = TempDir::new().unwrap();
        let tea = temp_dir.path().join("srima/tea");
        fs::create_dir_all(tea.join("original")).unwrap();
        fs::write(tea.join("original/srima-raw.jpg"), "nested").unwrap();

        let report = align_tree(&options(&temp_dir), |_| {}).unwrap();
        // The nested directory is neither renamed nor descended into.
        assert_eq!(report.renamed, 0);
        assert!(tea.join("original/srima-raw.jpg").exists());
    }

    #[test]
    fn test_dry_run_reports_without_touching() {
        let temp_dir = TempDir::new().unwrap();
        let tea = temp_dir.path().join("srima/tea");
        fs::create_dir_all(&tea).unwrap();
        fs::write(tea.join("srima-02.jpg"), "drifted").unwrap();

        let report = align_tree(&options(&temp_dir).dry_run(true), |_| {}).unwrap();
        assert_eq!(report.renamed, 1);
        assert!(tea.join("srima-02.jpg").exists());
        assert!(!tea.join("srima-tea-02.jpg").exists());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let options = AlignOptions::new(temp_dir.path().join("nope"));
        assert!(align_tree(&options, |_| {}).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entry_lands_in_report() {
        use std::os::unix::fs::symlink;

        let temp_dir = TempDir::new().unwrap();
        let tea = temp_dir.path().join("srima/tea");
        fs::create_dir_all(&tea).unwrap();
        fs::write(tea.join("srima-01.jpg"), "img").unwrap();
        symlink(
            temp_dir.path().join("gone"),
            temp_dir.path().join("srima/broken"),
        )
        .unwrap();

        let report = align_tree(&options(&temp_dir), |_| {}).unwrap();
        // The broken entry is reported; the readable directory is still aligned.
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors[0].0.ends_with("broken"));
        assert_eq!(report.renamed, 1);
        assert!(tea.join("srima-tea-01.jpg").exists());
    }
}
