//! Reduction of a snapshot into per-repository progress.
//!
//! Only the latest version of each file is counted. Every call recomputes from
//! scratch; nothing is carried between snapshots.

use crate::domain::{ByteTally, FileState, FileView, RepoView, RepositoryState, Snapshot};

/// Aggregates every repository of `snapshot`, in snapshot order.
pub fn aggregate(snapshot: &Snapshot) -> Vec<RepoView> {
    snapshot.repos().iter().map(aggregate_repository).collect()
}

pub fn aggregate_repository(repo: &RepositoryState) -> RepoView {
    let files: Vec<FileView> = repo
        .files()
        .iter()
        .enumerate()
        .map(|(index, file)| file_view(index, file))
        .collect();

    let mut tally = ByteTally::default();
    for file in &files {
        tally.merge(ByteTally::new(file.done_bytes, file.missing_bytes));
    }

    RepoView {
        id: repo.uuid().to_string(),
        name: repo.name().to_string(),
        kind: repo.kind().to_string(),
        root: repo.root().to_string(),
        done_bytes: tally.done(),
        missing_bytes: tally.missing(),
        completion: tally.completion(),
        files_total: files.len(),
        files_complete: files.iter().filter(|f| f.is_complete()).count(),
        files,
    }
}

/// Tally of the latest version only; a file without versions counts as empty.
pub fn latest_tally(file: &FileState) -> ByteTally {
    file.latest_version()
        .map(|version| ByteTally::of_chunks(version.chunks()))
        .unwrap_or_default()
}

fn file_view(index: usize, file: &FileState) -> FileView {
    let tally = latest_tally(file);
    let latest = file.latest_version();
    FileView {
        path: file
            .path()
            .map(str::to_string)
            .unwrap_or_else(|| format!("#{}", index + 1)),
        versions: file.versions().len(),
        deleted: latest.is_some_and(|v| v.is_deleted()),
        timestamp: latest.and_then(|v| v.timestamp()),
        done_bytes: tally.done(),
        missing_bytes: tally.missing(),
        completion: tally.completion(),
    }
}
