use std::fmt;

use serde::{Serialize, Serializer};

use super::Chunk;

/// Placeholder shown when a repository has no bytes to account for.
pub const NO_DATA_LABEL: &str = "no data";

/// Integer completion of a repository or file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Nothing to measure; the ratio is undefined.
    NoData,
    /// Truncated percentage in `0..=100`.
    Percent(u8),
}

impl Completion {
    pub fn percent(&self) -> Option<u8> {
        match self {
            Completion::NoData => None,
            Completion::Percent(p) => Some(*p),
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Completion::Percent(100))
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Completion::NoData => f.write_str(NO_DATA_LABEL),
            Completion::Percent(p) => write!(f, "{}%", p),
        }
    }
}

impl Serialize for Completion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Completion::NoData => serializer.serialize_none(),
            Completion::Percent(p) => serializer.serialize_u8(*p),
        }
    }
}

/// Saved and pending bytes of some set of chunks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ByteTally {
    done: u64,
    missing: u64,
}

impl ByteTally {
    pub fn new(done: u64, missing: u64) -> Self {
        Self { done, missing }
    }

    pub fn of_chunks<'a>(chunks: impl IntoIterator<Item = &'a Chunk>) -> Self {
        let mut tally = Self::default();
        for chunk in chunks {
            tally.add_chunk(chunk);
        }
        tally
    }

    pub fn add_chunk(&mut self, chunk: &Chunk) {
        if chunk.is_saved() {
            self.done = self.done.saturating_add(chunk.length());
        } else {
            self.missing = self.missing.saturating_add(chunk.length());
        }
    }

    pub fn merge(&mut self, other: ByteTally) {
        self.done = self.done.saturating_add(other.done);
        self.missing = self.missing.saturating_add(other.missing);
    }

    pub fn done(&self) -> u64 {
        self.done
    }

    pub fn missing(&self) -> u64 {
        self.missing
    }

    pub fn total(&self) -> u64 {
        self.done.saturating_add(self.missing)
    }

    pub fn completion(&self) -> Completion {
        let total = u128::from(self.done) + u128::from(self.missing);
        if total == 0 {
            return Completion::NoData;
        }
        let percent = u128::from(self.done) * 100 / total;
        Completion::Percent(percent as u8)
    }
}

/// Progress of one file's latest version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileView {
    pub path: String,
    pub versions: usize,
    pub deleted: bool,
    /// Backend timestamp of the latest version, in seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
    pub done_bytes: u64,
    pub missing_bytes: u64,
    pub completion: Completion,
}

impl FileView {
    /// A file is complete when its latest version has nothing pending.
    pub fn is_complete(&self) -> bool {
        self.versions > 0 && self.missing_bytes == 0
    }
}

/// Per-repository row model produced by aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoView {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub root: String,
    pub done_bytes: u64,
    pub missing_bytes: u64,
    pub completion: Completion,
    pub files_total: usize,
    pub files_complete: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileView>,
}

impl RepoView {
    pub fn total_bytes(&self) -> u64 {
        self.done_bytes.saturating_add(self.missing_bytes)
    }

    /// `name (kind)`, the label column of the table.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.kind)
    }
}

/// Human-readable byte count using binary units.
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{} B", bytes);
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{:.1} {}", value, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_truncates() {
        assert_eq!(ByteTally::new(50, 50).completion(), Completion::Percent(50));
        assert_eq!(ByteTally::new(100, 200).completion(), Completion::Percent(33));
        assert_eq!(ByteTally::new(999, 1).completion(), Completion::Percent(99));
        assert_eq!(ByteTally::new(1, 999).completion(), Completion::Percent(0));
    }

    #[test]
    fn test_completion_bounds() {
        assert_eq!(ByteTally::new(0, 0).completion(), Completion::NoData);
        assert_eq!(ByteTally::new(0, 10).completion(), Completion::Percent(0));
        assert_eq!(ByteTally::new(10, 0).completion(), Completion::Percent(100));
        assert_eq!(
            ByteTally::new(u64::MAX, 1).completion(),
            Completion::Percent(99)
        );
    }

    #[test]
    fn test_tally_saturates() {
        let mut tally = ByteTally::default();
        tally.add_chunk(&Chunk::saved(u64::MAX));
        tally.add_chunk(&Chunk::saved(5));

        assert_eq!(tally.done(), u64::MAX);
        assert_eq!(tally.completion(), Completion::Percent(100));
    }

    #[test]
    fn test_completion_display_and_json() {
        assert_eq!(Completion::NoData.to_string(), "no data");
        assert_eq!(Completion::Percent(7).to_string(), "7%");
        assert_eq!(serde_json::to_string(&Completion::NoData).unwrap(), "null");
        assert_eq!(serde_json::to_string(&Completion::Percent(7)).unwrap(), "7");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(3 * 1024 * 1024), "3.0 MiB");
    }
}
